//! Data Transfer Objects (DTOs) for the room WebSocket protocol.
//!
//! DTOs mirror the wire format; `conversion` maps them to and from the domain.

pub mod conversion;
pub mod websocket;
