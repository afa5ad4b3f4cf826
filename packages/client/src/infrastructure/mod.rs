//! Infrastructure: wire format, transport and local persistence.

pub mod dto;
pub mod transport;
pub mod username_cache;
