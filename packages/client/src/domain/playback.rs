//! Playback state as the room sees it and as the player reports it.

/// Room-level playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
}

/// Believed authoritative playback state: status plus position in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub state: PlaybackStatus,
    pub position: f64,
}

impl PlaybackState {
    pub fn playing(position: f64) -> Self {
        Self {
            state: PlaybackStatus::Playing,
            position,
        }
    }

    pub fn paused(position: f64) -> Self {
        Self {
            state: PlaybackStatus::Paused,
            position,
        }
    }
}

/// State reported by the embedded player.
///
/// Discriminants follow the embedded player's numeric state codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Unstarted = -1,
    Ended = 0,
    Playing = 1,
    Paused = 2,
    Buffering = 3,
    Cued = 5,
}

impl PlayerState {
    /// The room status this player state corresponds to, if any.
    pub fn as_playback_status(self) -> Option<PlaybackStatus> {
        match self {
            Self::Playing => Some(PlaybackStatus::Playing),
            Self::Paused => Some(PlaybackStatus::Paused),
            _ => None,
        }
    }
}
