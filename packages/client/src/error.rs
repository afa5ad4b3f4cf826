//! Error types for the room client.

use thiserror::Error;

use crate::domain::DomainError;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Bad room URL or display name
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Outbound message could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading the display name from the terminal failed
    #[error("Username prompt failed: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
