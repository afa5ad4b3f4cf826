//! Room identity and location.

use std::fmt;

use url::Url;

use super::error::DomainError;

const ROOM_PATH_PREFIX: &str = "/room/";

/// Room identifier (value object)
///
/// Non-empty, made only of lowercase ASCII letters, digits and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(DomainError::InvalidRoomId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a room lives: the page it was opened from, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomLocation {
    secure: bool,
    host: String,
    room_id: RoomId,
}

impl RoomLocation {
    /// Parse a room page URL such as `https://example.com/room/movie-night`.
    ///
    /// Only the host and port are kept: credentials, query string and
    /// fragment are dropped. The path must be exactly `/room/{id}`.
    pub fn parse(page_url: &str) -> Result<Self, DomainError> {
        let url =
            Url::parse(page_url).map_err(|_| DomainError::InvalidRoomUrl(page_url.to_string()))?;

        let secure = match url.scheme() {
            "https" => true,
            "http" => false,
            other => return Err(DomainError::UnsupportedScheme(other.to_string())),
        };

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| DomainError::InvalidRoomUrl(page_url.to_string()))?;
        // port() is None when the port is the scheme default
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let path = url.path();
        let room_id = path
            .strip_prefix(ROOM_PATH_PREFIX)
            .and_then(|id| RoomId::new(id.to_string()).ok())
            .ok_or_else(|| DomainError::InvalidRoomPath(path.to_string()))?;

        Ok(Self {
            secure,
            host,
            room_id,
        })
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// WebSocket endpoint of the room; `wss` when the page was served over https.
    pub fn socket_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{}://{}/socket/{}", scheme, self.host, self.room_id)
    }
}
