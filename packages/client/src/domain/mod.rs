//! Domain model for the room client.
//!
//! Pure values and rules with no I/O: room identity, display names, playback
//! state, videos, the user roster and queue controls.

mod error;
mod playback;
mod queue;
mod room;
mod roster;
mod username;
mod video;

pub use error::DomainError;
pub use playback::{PlaybackState, PlaybackStatus, PlayerState};
pub use queue::{QueueAction, QueueControl};
pub use room::{RoomId, RoomLocation};
pub use roster::UserRoster;
pub use username::{MAX_USERNAME_CHARS, Username};
pub use video::Video;
