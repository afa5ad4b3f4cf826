//! Terminal client for a synchronized video-watching room.
//!
//! Joins the room at the given page URL, keeps a headless player in step with
//! the room and reads commands from stdin.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin videosync-client -- --room-url http://127.0.0.1:8080/room/movie-night
//! cargo run --bin videosync-client -- -r https://watch.example.com/room/abc -u bob
//! ```

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use videosync_client::config::{ClientConfig, SyncPolicy};
use videosync_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "videosync-client")]
#[command(about = "Watch videos in sync with everyone in a room", long_about = None)]
struct Args {
    /// Room page URL, e.g. http://127.0.0.1:8080/room/movie-night
    #[arg(short = 'r', long)]
    room_url: String,

    /// Display name (defaults to the cached one, else asks)
    #[arg(short = 'u', long)]
    username: Option<String>,

    /// File the display name is remembered in
    #[arg(long, default_value = ".videosync-username")]
    name_cache: PathBuf,

    /// How often to check for seeks while paused (milliseconds)
    #[arg(long, default_value_t = 500)]
    drift_interval_ms: u64,

    /// How long player events are ignored after a server-driven change (milliseconds)
    #[arg(long, default_value_t = 250)]
    suppression_window_ms: u64,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = ClientConfig {
        room_url: args.room_url,
        username: args.username,
        username_cache: args.name_cache,
        policy: SyncPolicy {
            drift_check_interval: Duration::from_millis(args.drift_interval_ms.max(1)),
            suppression_window: Duration::from_millis(args.suppression_window_ms),
        },
    };

    if let Err(e) = videosync_client::run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
