//! Shared utilities for the videosync workspace.

pub mod logger;
pub mod time;
