//! Video descriptor.

use std::time::Duration;

/// A video in the queue or currently playing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
    pub duration: Duration,
    /// RFC 3339 publish timestamp, as sent by the server
    pub published_at: String,
    pub queued_by: String,
}

impl Video {
    /// A video known only by its ID (older servers send nothing else).
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// An empty ID means "nothing is playing".
    pub fn is_placeholder(&self) -> bool {
        self.id.is_empty()
    }
}
