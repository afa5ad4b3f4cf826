//! Client execution logic.

use std::sync::Arc;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use videosync_shared::time::MonotonicClock;

use crate::{
    command::UserCommand,
    config::ClientConfig,
    domain::{RoomLocation, Username},
    error::ClientError,
    formatter::MessageFormatter,
    infrastructure::username_cache::UsernameCache,
    session::{RoomSession, SessionEnd},
    ui::prompt,
    view::TerminalView,
};

/// Join the room and run until the user leaves or the connection drops
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    // A bad room URL fails before anything else happens.
    let location = RoomLocation::parse(&config.room_url)?;

    let cache = UsernameCache::new(&config.username_cache);
    let username = resolve_username(config.username.as_deref(), &cache).await?;
    if let Err(e) = cache.store(&username) {
        tracing::warn!(
            "Failed to store username in {}: {}",
            cache.path().display(),
            e
        );
    }

    tracing::info!(
        "Joining room '{}' on {} as '{}'",
        location.room_id(),
        location.host(),
        username
    );

    let view = TerminalView::new(username.as_str());
    let mut session = RoomSession::connect(
        &location,
        &username,
        view,
        Arc::new(MonotonicClock::new()),
        config.policy,
    )
    .await?;

    print!(
        "{}",
        MessageFormatter::format_welcome(username.as_str(), location.room_id().as_str())
    );

    let (command_tx, mut commands) = mpsc::unbounded_channel();
    spawn_input_thread(username.as_str().to_string(), command_tx);

    let result = session.run(&mut commands).await;
    if let Err(e) = session.shutdown().await {
        tracing::debug!("Close failed: {}", e);
    }

    match result? {
        SessionEnd::Quit => tracing::info!("Left the room"),
        SessionEnd::Rename => {
            cache.clear()?;
            println!("\nDisplay name forgotten. Run again to choose a new one.");
        }
    }
    Ok(())
}

/// Command-line flag, then the cache, then ask
async fn resolve_username(
    flag: Option<&str>,
    cache: &UsernameCache,
) -> Result<Username, ClientError> {
    if let Some(flag) = flag {
        return Ok(Username::new(flag)?);
    }
    if let Some(cached) = cache.load() {
        tracing::debug!("Using cached username '{}'", cached);
        return Ok(cached);
    }
    tokio::task::spawn_blocking(prompt_username)
        .await
        .map_err(|e| ClientError::Prompt(e.to_string()))?
}

fn prompt_username() -> Result<Username, ClientError> {
    let mut rl = DefaultEditor::new().map_err(|e| ClientError::Prompt(e.to_string()))?;
    loop {
        match rl.readline("Display name: ") {
            Ok(line) => match Username::new(&line) {
                Ok(username) => return Ok(username),
                Err(e) => println!("{}", e),
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                return Err(ClientError::Prompt("cancelled".to_string()));
            }
            Err(e) => return Err(ClientError::Prompt(e.to_string())),
        }
    }
}

/// Read lines on a blocking thread and forward parsed commands.
///
/// Ctrl+C and Ctrl+D are forwarded as `Quit`.
fn spawn_input_thread(username: String, commands: mpsc::UnboundedSender<UserCommand>) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                commands.send(UserCommand::Quit).ok();
                return;
            }
        };

        let prompt = prompt(&username);
        loop {
            let command = match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    match UserCommand::parse(&line) {
                        Ok(Some(command)) => command,
                        Ok(None) => continue,
                        Err(e) => {
                            println!("{}", e);
                            continue;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    UserCommand::Quit
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    UserCommand::Quit
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    UserCommand::Quit
                }
            };

            let done = matches!(command, UserCommand::Quit | UserCommand::Rename);
            if commands.send(command).is_err() || done {
                break;
            }
        }
    });
}
