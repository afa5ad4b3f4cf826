//! Synchronized video-watching room client.
//!
//! Joins a room over WebSocket and keeps a local player's play/pause state and
//! position in step with everyone else in the room.

pub mod command;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod infrastructure;
pub mod player;
pub mod reconciler;
pub mod runner;
pub mod session;
pub mod ui;
pub mod view;

pub use runner::run_client;
