//! Text rendering of room state for the terminal.

use std::time::Duration;

use videosync_shared::time::format_publish_date;

use crate::domain::{QueueControl, Video};

const RULE: &str = "============================================================";

pub const EMPTY_QUEUE: &str = "The video queue is empty.";
pub const NO_VIDEO: &str = "No video is currently playing.";

/// Message formatter for the terminal view
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the list of users in the room
    ///
    /// # Arguments
    ///
    /// * `users` - Display names in server order
    /// * `me` - Our own display name (marked with "(me)")
    pub fn format_users(users: &[String], me: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));
        output.push_str(&format!("Users ({}):\n", users.len()));

        if users.is_empty() {
            output.push_str("(Nobody here)\n");
        } else {
            // Only the first entry with our name is us; duplicates are allowed.
            let mut me_marked = false;
            for user in users {
                let is_me = !me_marked && user == me;
                me_marked |= is_me;
                let me_suffix = if is_me { " (me)" } else { "" };
                output.push_str(&format!("  {}{}\n", user, me_suffix));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_user_joined(user_name: &str) -> String {
        format!("\n+ {} joined\n", user_name)
    }

    pub fn format_user_left(user_name: &str) -> String {
        format!("\n- {} left\n", user_name)
    }

    /// Format the queue with the controls available for each entry
    ///
    /// Entries are numbered from 1, matching the `/up <n>` style commands.
    pub fn format_queue(queue: &[Video]) -> String {
        if queue.is_empty() {
            return format!("\n{}\n", EMPTY_QUEUE);
        }

        let mut output = String::new();
        output.push_str(&format!("\nQueue ({}):\n", queue.len()));
        for (index, video) in queue.iter().enumerate() {
            output.push_str(&format!(
                "#{} {} [{}]\n",
                index + 1,
                display_title(video),
                format_duration(video.duration)
            ));
            if !video.queued_by.is_empty() {
                output.push_str(&format!("    queued by {}\n", video.queued_by));
            }

            let controls: Vec<String> = [
                QueueControl::MoveUp,
                QueueControl::MoveDown,
                QueueControl::MoveToTop,
                QueueControl::MoveToBottom,
                QueueControl::Remove,
            ]
            .into_iter()
            .filter(|control| control.is_enabled(index, queue.len()))
            .map(|control| format!("{} {}", command_name(control), index + 1))
            .collect();
            output.push_str(&format!("    {}\n", controls.join("  ")));
        }
        output
    }

    /// Format the metadata block of the video now playing
    pub fn format_current_video(video: Option<&Video>) -> String {
        let Some(video) = video else {
            return format!("\n{}\n", NO_VIDEO);
        };

        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));
        output.push_str(&format!("Now playing: {}\n", display_title(video)));
        if !video.channel.is_empty() {
            output.push_str(&format!("Channel: {}\n", video.channel));
        }
        if !video.duration.is_zero() {
            output.push_str(&format!("Length: {}\n", format_duration(video.duration)));
        }
        if let Some(date) = format_publish_date(&video.published_at) {
            output.push_str(&format!("Published: {}\n", date));
        }
        if !video.queued_by.is_empty() {
            output.push_str(&format!("Queued by: {}\n", video.queued_by));
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_notice(text: &str) -> String {
        format!("\n{}\n", text)
    }

    /// Format the greeting printed once connected
    pub fn format_welcome(username: &str, room_id: &str) -> String {
        format!(
            "\nYou are '{}' in room '{}'. Type /help for commands. Press Ctrl+C to exit.\n",
            username, room_id
        )
    }
}

/// `MM:SS`, or `HH:MM:SS` from one hour on
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

fn display_title(video: &Video) -> String {
    if video.title.is_empty() {
        format!("Video {}", video.id)
    } else {
        video.title.clone()
    }
}

fn command_name(control: QueueControl) -> &'static str {
    match control {
        QueueControl::MoveUp => "/up",
        QueueControl::MoveDown => "/down",
        QueueControl::MoveToTop => "/top",
        QueueControl::MoveToBottom => "/bottom",
        QueueControl::Remove => "/remove",
    }
}
