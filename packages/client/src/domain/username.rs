//! Display name value object.

use std::fmt;

use super::error::DomainError;

/// Longest display name, in characters
pub const MAX_USERNAME_CHARS: usize = 25;

/// Display name shown to the other people in the room.
///
/// Built by trimming surrounding whitespace and cutting the result to
/// [`MAX_USERNAME_CHARS`]. Only an empty result is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let sanitized: String = raw.trim().chars().take(MAX_USERNAME_CHARS).collect();
        if sanitized.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        Ok(Self(sanitized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
