//! Room view.
//!
//! The controller pushes state to a `RoomView`; `TerminalView` prints it.

use crate::{domain::Video, formatter::MessageFormatter, ui::redisplay_prompt};

/// Where the room's users, queue and current video are shown
pub trait RoomView: Send {
    fn render_users(&mut self, users: &[String]);

    fn user_joined(&mut self, user_name: &str);

    fn user_left(&mut self, user_name: &str);

    fn render_queue(&mut self, queue: &[Video]);

    /// `None` when nothing is playing
    fn show_current_video(&mut self, video: Option<&Video>);

    /// Free-form status line
    fn notice(&mut self, text: &str);
}

/// Prints to stdout and redraws the input prompt after each update
pub struct TerminalView {
    username: String,
}

impl TerminalView {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    fn print(&self, text: &str) {
        print!("{}", text);
        redisplay_prompt(&self.username);
    }
}

impl RoomView for TerminalView {
    fn render_users(&mut self, users: &[String]) {
        self.print(&MessageFormatter::format_users(users, &self.username));
    }

    fn user_joined(&mut self, user_name: &str) {
        self.print(&MessageFormatter::format_user_joined(user_name));
    }

    fn user_left(&mut self, user_name: &str) {
        self.print(&MessageFormatter::format_user_left(user_name));
    }

    fn render_queue(&mut self, queue: &[Video]) {
        self.print(&MessageFormatter::format_queue(queue));
    }

    fn show_current_video(&mut self, video: Option<&Video>) {
        self.print(&MessageFormatter::format_current_video(video));
    }

    fn notice(&mut self, text: &str) {
        self.print(&MessageFormatter::format_notice(text));
    }
}
