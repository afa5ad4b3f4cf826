//! WebSocket message DTOs.
//!
//! Every frame is a JSON object `{"type": ..., "payload": ...}`. Inbound and
//! outbound kinds are separate sum types so a new kind is a compile-time
//! checked addition.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Messages sent by this client to the room server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum ClientMessage {
    Introduce(IntroducePayload),
    QueueUrl(UrlPayload),
    LoadUrl(UrlPayload),
    Play(PositionPayload),
    Pause(PositionPayload),
    Skip(SkipPayload),
    ReorderQueue(ReorderQueuePayload),
    RemoveFromQueue(RemoveFromQueuePayload),
}

impl ClientMessage {
    pub fn introduce(username: impl Into<String>) -> Self {
        Self::Introduce(IntroducePayload {
            username: username.into(),
        })
    }

    pub fn play(position: f64) -> Self {
        Self::Play(PositionPayload { position })
    }

    pub fn pause(position: f64) -> Self {
        Self::Pause(PositionPayload { position })
    }

    pub fn queue_url(url: impl Into<String>) -> Self {
        Self::QueueUrl(UrlPayload { url: url.into() })
    }

    pub fn load_url(url: impl Into<String>) -> Self {
        Self::LoadUrl(UrlPayload { url: url.into() })
    }

    pub fn skip() -> Self {
        Self::Skip(SkipPayload {})
    }
}

/// Messages pushed by the room server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum ServerMessage {
    Init(InitPayload),
    Play(PositionPayload),
    Pause(PositionPayload),
    Load(LoadPayload),
    Join(UserPayload),
    Leave(UserPayload),
    SyncQueue(SyncQueuePayload),
}

impl ServerMessage {
    /// Wire names of every inbound kind this client understands
    pub const KINDS: [&'static str; 7] = [
        "init",
        "play",
        "pause",
        "load",
        "join",
        "leave",
        "syncqueue",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntroducePayload {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlPayload {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionPayload {
    pub position: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkipPayload {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReorderQueuePayload {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemoveFromQueuePayload {
    pub index: usize,
}

/// Full room snapshot sent right after `introduce`.
///
/// Newer servers send `currentVideo`, older ones only `videoId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_video: Option<VideoDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default)]
    pub video_pos: f64,
    pub playback_state: PlaybackStateDto,
    #[serde(default)]
    pub queue: Vec<VideoDto>,
    #[serde(default)]
    pub users: Vec<String>,
}

/// New video announcement; `video` on newer servers, `videoId` on older ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncQueuePayload {
    #[serde(default)]
    pub queue: Vec<VideoDto>,
}

/// Video descriptor as sent by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoDto {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
    /// Nanoseconds
    pub duration: i64,
    pub published_at: String,
    pub queued_by: String,
}

/// Playback state on the wire.
///
/// Servers send the player's numeric state code (1 = playing, 2 = paused) or
/// its name. Anything that is not "playing" is treated as paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPlaybackState", into = "i64")]
pub enum PlaybackStateDto {
    Playing,
    Paused,
}

const PLAYING_CODE: i64 = 1;
const PAUSED_CODE: i64 = 2;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlaybackState {
    Code(i64),
    Name(String),
}

impl From<RawPlaybackState> for PlaybackStateDto {
    fn from(raw: RawPlaybackState) -> Self {
        let playing = match raw {
            RawPlaybackState::Code(code) => code == PLAYING_CODE,
            RawPlaybackState::Name(name) => name.eq_ignore_ascii_case("playing"),
        };
        if playing { Self::Playing } else { Self::Paused }
    }
}

impl From<PlaybackStateDto> for i64 {
    fn from(state: PlaybackStateDto) -> Self {
        match state {
            PlaybackStateDto::Playing => PLAYING_CODE,
            PlaybackStateDto::Paused => PAUSED_CODE,
        }
    }
}

/// Errors while decoding an inbound frame
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Not a `{type, payload}` JSON object at all
    #[error("Malformed frame: {0}")]
    MalformedFrame(#[source] serde_json::Error),

    /// A known message kind whose payload does not fit
    #[error("Invalid '{kind}' payload: {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
}

/// Decode an inbound text frame.
///
/// Returns `Ok(None)` for message kinds this client does not know, so newer
/// servers can add kinds without breaking older clients.
pub fn decode_server_message(text: &str) -> Result<Option<ServerMessage>, ProtocolError> {
    match serde_json::from_str::<ServerMessage>(text) {
        Ok(message) => Ok(Some(message)),
        Err(source) => {
            let envelope: Envelope =
                serde_json::from_str(text).map_err(ProtocolError::MalformedFrame)?;
            if ServerMessage::KINDS.contains(&envelope.kind.as_str()) {
                Err(ProtocolError::InvalidPayload {
                    kind: envelope.kind,
                    source,
                })
            } else {
                Ok(None)
            }
        }
    }
}
