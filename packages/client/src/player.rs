//! The embedded video player.
//!
//! `Player` is what the reconciler drives. `SimulatedPlayer` is a headless
//! implementation that keeps time with a `Clock` and reports its state
//! transitions over a channel, the same way a real player calls back
//! asynchronously after being told to play, pause or load.

use std::sync::Arc;

use tokio::sync::mpsc;
use videosync_shared::time::Clock;

use crate::domain::PlayerState;

/// Operations the room client needs from a video player
#[cfg_attr(test, mockall::automock)]
pub trait Player: Send {
    /// Load a video and start it at `start_seconds`
    fn load(&mut self, video_id: &str, start_seconds: f64);

    fn play(&mut self);

    fn pause(&mut self);

    fn seek(&mut self, seconds: f64);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    fn state(&self) -> PlayerState;
}

/// Headless player that advances with the clock while playing.
pub struct SimulatedPlayer {
    clock: Arc<dyn Clock>,
    events: mpsc::UnboundedSender<PlayerState>,
    video_id: Option<String>,
    state: PlayerState,
    /// Position at `anchor_millis`
    anchor_position: f64,
    anchor_millis: u64,
}

impl SimulatedPlayer {
    pub fn new(clock: Arc<dyn Clock>, events: mpsc::UnboundedSender<PlayerState>) -> Self {
        let anchor_millis = clock.now_millis();
        Self {
            clock,
            events,
            video_id: None,
            state: PlayerState::Unstarted,
            anchor_position: 0.0,
            anchor_millis,
        }
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    fn freeze_position(&mut self) {
        self.anchor_position = self.current_time();
        self.anchor_millis = self.clock.now_millis();
    }

    fn transition(&mut self, state: PlayerState) {
        if self.state == state {
            return;
        }
        self.state = state;
        if self.events.send(state).is_err() {
            tracing::debug!("Player event {:?} dropped: no listener", state);
        }
    }
}

impl Player for SimulatedPlayer {
    fn load(&mut self, video_id: &str, start_seconds: f64) {
        tracing::debug!("Loading video '{}' at {:.2}s", video_id, start_seconds);
        self.video_id = Some(video_id.to_string());
        self.anchor_position = start_seconds.max(0.0);
        self.anchor_millis = self.clock.now_millis();
        // Loading autoplays.
        self.transition(PlayerState::Buffering);
        self.transition(PlayerState::Playing);
    }

    fn play(&mut self) {
        if self.video_id.is_none() {
            return;
        }
        self.freeze_position();
        self.transition(PlayerState::Playing);
    }

    fn pause(&mut self) {
        if self.video_id.is_none() {
            return;
        }
        self.freeze_position();
        self.transition(PlayerState::Paused);
    }

    fn seek(&mut self, seconds: f64) {
        self.anchor_position = seconds.max(0.0);
        self.anchor_millis = self.clock.now_millis();
    }

    fn current_time(&self) -> f64 {
        match self.state {
            PlayerState::Playing => {
                let elapsed = self.clock.now_millis().saturating_sub(self.anchor_millis);
                self.anchor_position + elapsed as f64 / 1000.0
            }
            _ => self.anchor_position,
        }
    }

    fn state(&self) -> PlayerState {
        self.state
    }
}
