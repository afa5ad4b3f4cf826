//! Playback reconciler.
//!
//! Keeps the local player's play/pause/position in line with the room while
//! avoiding feedback loops between "local change → outbound message" and
//! "inbound message → local change".
//!
//! Two mechanisms prevent echoes:
//!
//! - Local events are compared with the *believed* state. A message we sent
//!   and that comes back (or the player's callback for a change we just made)
//!   finds the belief already matching and does nothing.
//! - Every server-driven player mutation opens a suppression window. Local
//!   events and drift checks inside it are ignored. The window is a deadline
//!   on a monotonic clock; a new mutation moves the deadline.

use std::sync::Arc;

use videosync_shared::time::Clock;

use crate::{
    config::SyncPolicy,
    domain::{PlaybackState, PlaybackStatus, PlayerState},
    infrastructure::dto::websocket::ClientMessage,
    player::Player,
};

pub struct Reconciler<P> {
    player: P,
    clock: Arc<dyn Clock>,
    policy: SyncPolicy,
    /// `None` until the room sends its initial state
    playback: Option<PlaybackState>,
    suppressed_until: Option<u64>,
}

impl<P: Player> Reconciler<P> {
    pub fn new(player: P, clock: Arc<dyn Clock>, policy: SyncPolicy) -> Self {
        Self {
            player,
            clock,
            policy,
            playback: None,
            suppressed_until: None,
        }
    }

    /// The believed authoritative playback state
    pub fn playback(&self) -> Option<PlaybackState> {
        self.playback
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Whether we are inside the window after a server-driven mutation
    pub fn is_syncing(&self) -> bool {
        self.suppressed_until
            .is_some_and(|deadline| self.clock.now_millis() < deadline)
    }

    fn start_suppression(&mut self) {
        let window = self.policy.suppression_window.as_millis() as u64;
        self.suppressed_until = Some(self.clock.now_millis() + window);
    }

    /// React to the player reporting a state transition.
    ///
    /// Returns the message to send when the transition is genuine user intent.
    pub fn on_local_state_change(&mut self, event: PlayerState) -> Option<ClientMessage> {
        if self.is_syncing() {
            tracing::trace!("Ignoring player event {:?} while syncing", event);
            return None;
        }
        let status = event.as_playback_status()?;
        if self.playback.is_some_and(|playback| playback.state == status) {
            return None;
        }

        let position = self.player.current_time();
        self.playback = Some(PlaybackState {
            state: status,
            position,
        });
        tracing::info!("Local {:?} at {:.2}s", status, position);

        Some(match status {
            PlaybackStatus::Playing => ClientMessage::play(position),
            PlaybackStatus::Paused => ClientMessage::pause(position),
        })
    }

    /// Adopt a state pushed by the server and drive the player to it.
    ///
    /// Always issues play/pause and a seek, even when nothing changed.
    pub fn apply_server_state(&mut self, new_state: PlaybackState) {
        tracing::debug!(
            "Applying server state {:?} at {:.2}s",
            new_state.state,
            new_state.position
        );
        self.playback = Some(new_state);
        self.start_suppression();

        match new_state.state {
            PlaybackStatus::Playing => self.player.play(),
            PlaybackStatus::Paused => self.player.pause(),
        }
        self.player.seek(new_state.position);
    }

    /// Set the initial belief from the room snapshot.
    ///
    /// `player_mutated` tells whether the snapshot handling already loaded a
    /// video; the player's reaction to that load is then suppressed too.
    pub fn seed(&mut self, state: PlaybackState, player_mutated: bool) {
        self.playback = Some(state);
        if player_mutated {
            self.start_suppression();
        }
    }

    /// Load a new video (paused at 0). `None` means the room has nothing to play.
    pub fn load_video(&mut self, video_id: Option<&str>) {
        if let Some(video_id) = video_id {
            self.player.load(video_id, 0.0);
        }
        self.apply_server_state(PlaybackState::paused(0.0));
    }

    /// Detect a seek performed while paused.
    ///
    /// The player reports no state change for a seek while paused, so the
    /// position is polled. Only runs while both the belief and the player are
    /// paused; drift while playing is left to future play/pause/load messages.
    pub fn drift_check(&mut self) -> Option<ClientMessage> {
        if self.is_syncing() {
            return None;
        }
        let believed = self.playback?;
        if believed.state != PlaybackStatus::Paused || self.player.state() != PlayerState::Paused {
            return None;
        }

        let position = self.player.current_time();
        if position == believed.position {
            return None;
        }
        tracing::info!(
            "Seek while paused: {:.2}s -> {:.2}s",
            believed.position,
            position
        );
        self.playback = Some(PlaybackState::paused(position));
        Some(ClientMessage::pause(position))
    }
}
