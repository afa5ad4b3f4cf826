//! Client configuration.

use std::{path::PathBuf, time::Duration};

/// Default interval between drift checks while paused
pub const DEFAULT_DRIFT_CHECK_INTERVAL: Duration = Duration::from_millis(500);

/// Default time after a server-driven player change during which local player
/// events are treated as echoes of that change
pub const DEFAULT_SUPPRESSION_WINDOW: Duration = Duration::from_millis(250);

/// Timing policy of the playback reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    pub drift_check_interval: Duration,
    pub suppression_window: Duration,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            drift_check_interval: DEFAULT_DRIFT_CHECK_INTERVAL,
            suppression_window: DEFAULT_SUPPRESSION_WINDOW,
        }
    }
}

/// Everything `run_client` needs
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Room page URL, e.g. `http://127.0.0.1:8080/room/movie-night`
    pub room_url: String,
    /// Display name given on the command line, if any
    pub username: Option<String>,
    /// File the display name is cached in
    pub username_cache: PathBuf,
    pub policy: SyncPolicy,
}
