//! Domain errors.

use thiserror::Error;

/// Errors raised while building domain values from user or page input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The room URL has no `scheme://host` part
    #[error("Invalid room URL '{0}'")]
    InvalidRoomUrl(String),

    /// Only http and https room pages are supported
    #[error("Unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    /// The path is not `/room/{id}`
    #[error("Invalid path {0}")]
    InvalidRoomPath(String),

    /// Room IDs are made of `[a-z0-9-]`
    #[error("Invalid room ID '{0}'")]
    InvalidRoomId(String),

    /// The display name was blank after trimming
    #[error("Username must not be empty")]
    EmptyUsername,
}
