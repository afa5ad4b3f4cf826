//! Room controller.
//!
//! ## Responsibility
//!
//! - Dispatch inbound server messages
//! - Hold the roster, queue and current-video snapshots
//! - Turn queue controls into outbound requests
//!
//! Playback itself is delegated to the `Reconciler`.

use crate::{
    domain::{PlaybackState, PlaybackStatus, PlayerState, QueueControl, UserRoster, Video},
    infrastructure::dto::websocket::{ClientMessage, InitPayload, ServerMessage},
    player::Player,
    reconciler::Reconciler,
    view::RoomView,
};

pub struct RoomController<P, V> {
    reconciler: Reconciler<P>,
    view: V,
    roster: UserRoster,
    queue: Vec<Video>,
    current_video: Option<Video>,
}

impl<P: Player, V: RoomView> RoomController<P, V> {
    pub fn new(reconciler: Reconciler<P>, view: V) -> Self {
        Self {
            reconciler,
            view,
            roster: UserRoster::new(),
            queue: Vec::new(),
            current_video: None,
        }
    }

    pub fn on_server_message(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Init(payload) => self.on_init(payload),
            ServerMessage::Play(payload) => self
                .reconciler
                .apply_server_state(PlaybackState::playing(payload.position)),
            ServerMessage::Pause(payload) => self
                .reconciler
                .apply_server_state(PlaybackState::paused(payload.position)),
            ServerMessage::Load(payload) => {
                let video = payload.video();
                tracing::info!(
                    "Loading {}",
                    video.as_ref().map_or("nothing", |video| video.id.as_str())
                );
                self.reconciler
                    .load_video(video.as_ref().map(|video| video.id.as_str()));
                self.view.show_current_video(video.as_ref());
                self.current_video = video;
            }
            ServerMessage::Join(payload) => {
                self.view.user_joined(&payload.user_name);
                self.roster.add(payload.user_name);
            }
            ServerMessage::Leave(payload) => {
                if self.roster.remove(&payload.user_name) {
                    self.view.user_left(&payload.user_name);
                } else {
                    tracing::debug!("Leave for unknown user '{}'", payload.user_name);
                }
            }
            ServerMessage::SyncQueue(payload) => {
                self.queue = payload.queue.into_iter().map(Video::from).collect();
                self.view.render_queue(&self.queue);
            }
        }
    }

    fn on_init(&mut self, payload: InitPayload) {
        let current = payload.current_video();
        let status = PlaybackStatus::from(payload.playback_state);
        let position = payload.video_pos;
        let mut player_mutated = false;

        if let Some(video) = &current {
            self.reconciler.player_mut().load(&video.id, position);
            player_mutated = true;
        }
        self.view.show_current_video(current.as_ref());
        if status == PlaybackStatus::Paused {
            // Loading autoplays; hold the snapshot position exactly.
            let player = self.reconciler.player_mut();
            player.pause();
            player.seek(position);
            player_mutated = true;
        }

        self.queue = payload.queue.into_iter().map(Video::from).collect();
        self.view.render_queue(&self.queue);

        self.reconciler.seed(
            PlaybackState {
                state: status,
                position,
            },
            player_mutated,
        );

        self.roster.reset(payload.users);
        self.view.render_users(self.roster.users());
        self.current_video = current;

        tracing::info!(
            "Joined room: {:?} at {:.2}s, {} queued, {} users",
            status,
            position,
            self.queue.len(),
            self.roster.len()
        );
    }

    pub fn on_player_event(&mut self, event: PlayerState) -> Option<ClientMessage> {
        self.reconciler.on_local_state_change(event)
    }

    pub fn drift_check(&mut self) -> Option<ClientMessage> {
        self.reconciler.drift_check()
    }

    /// Request for a queue control pressed on entry `index` (0-based).
    ///
    /// Disabled controls and indices outside the queue yield nothing.
    pub fn queue_request(&mut self, control: QueueControl, index: usize) -> Option<ClientMessage> {
        match control.action(index, self.queue.len()) {
            Some(action) => Some(action.into()),
            None => {
                self.view.notice(&format!(
                    "Cannot apply {:?} to queue entry #{}.",
                    control,
                    index + 1
                ));
                None
            }
        }
    }

    pub fn show_users(&mut self) {
        self.view.render_users(self.roster.users());
    }

    pub fn show_queue(&mut self) {
        self.view.render_queue(&self.queue);
    }

    pub fn show_current_video(&mut self) {
        self.view.show_current_video(self.current_video.as_ref());
    }

    pub fn reconciler(&self) -> &Reconciler<P> {
        &self.reconciler
    }

    pub fn reconciler_mut(&mut self) -> &mut Reconciler<P> {
        &mut self.reconciler
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn roster(&self) -> &UserRoster {
        &self.roster
    }

    pub fn queue(&self) -> &[Video] {
        &self.queue
    }

    pub fn current_video(&self) -> Option<&Video> {
        self.current_video.as_ref()
    }
}
