//! Terminal commands.

use thiserror::Error;

use crate::domain::QueueControl;

pub const HELP: &str = "\
Commands:
  /play                 resume playback
  /pause                pause playback
  /seek <seconds>       jump to a position
  /queue <url>          add a video to the queue (or just type the URL)
  /load <url>           play a video now
  /skip                 skip to the next queued video
  /up <n>               move queue entry #n up
  /down <n>             move queue entry #n down
  /top <n>              move queue entry #n to the top
  /bottom <n>           move queue entry #n to the bottom
  /remove <n>           remove queue entry #n
  /users                list users in the room
  /list                 show the queue
  /now                  show the current video
  /rename               forget the saved display name and exit
  /quit                 leave the room
  /help                 show this help";

/// A line typed by the user
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    Play,
    Pause,
    Seek(f64),
    Queue(String),
    Load(String),
    Skip,
    /// `index` is 0-based
    QueueControl {
        control: QueueControl,
        index: usize,
    },
    Users,
    List,
    Now,
    Rename,
    Quit,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type /help for commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid {what}: '{value}'")]
    InvalidArgument { what: &'static str, value: String },
}

impl UserCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Some(Self::Queue(line.to_string())));
        };

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "seek" => Self::Seek(parse_seconds(argument)?),
            "queue" => Self::Queue(required(argument, "/queue <url>")?),
            "load" => Self::Load(required(argument, "/load <url>")?),
            "skip" => Self::Skip,
            "up" => queue_control(QueueControl::MoveUp, argument, "/up <n>")?,
            "down" => queue_control(QueueControl::MoveDown, argument, "/down <n>")?,
            "top" => queue_control(QueueControl::MoveToTop, argument, "/top <n>")?,
            "bottom" => queue_control(QueueControl::MoveToBottom, argument, "/bottom <n>")?,
            "remove" => queue_control(QueueControl::Remove, argument, "/remove <n>")?,
            "users" => Self::Users,
            "list" => Self::List,
            "now" => Self::Now,
            "rename" => Self::Rename,
            "quit" | "exit" => Self::Quit,
            "help" => Self::Help,
            _ => return Err(CommandError::Unknown(format!("/{}", name))),
        };
        Ok(Some(command))
    }
}

fn required(argument: &str, usage: &'static str) -> Result<String, CommandError> {
    if argument.is_empty() {
        return Err(CommandError::MissingArgument(usage));
    }
    Ok(argument.to_string())
}

fn parse_seconds(argument: &str) -> Result<f64, CommandError> {
    let argument = required(argument, "/seek <seconds>")?;
    match argument.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
        _ => Err(CommandError::InvalidArgument {
            what: "position",
            value: argument,
        }),
    }
}

/// Queue entries are shown numbered from 1
fn queue_control(
    control: QueueControl,
    argument: &str,
    usage: &'static str,
) -> Result<UserCommand, CommandError> {
    let argument = required(argument, usage)?;
    match argument.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(UserCommand::QueueControl {
            control,
            index: number - 1,
        }),
        _ => Err(CommandError::InvalidArgument {
            what: "queue entry",
            value: argument,
        }),
    }
}
