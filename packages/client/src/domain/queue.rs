//! Queue controls.
//!
//! The queue itself is server-authoritative; the client only turns a control
//! on a given item into a request for the server.

/// Controls shown next to each queued video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueControl {
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    Remove,
}

/// What the client asks the server to do with the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueAction {
    Reorder { from: usize, to: usize },
    Remove { index: usize },
}

impl QueueControl {
    /// Whether the control is usable for the item at `index` in a queue of `len`.
    pub fn is_enabled(self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        match self {
            Self::MoveUp | Self::MoveToTop => index > 0,
            Self::MoveDown | Self::MoveToBottom => index + 1 < len,
            Self::Remove => true,
        }
    }

    /// The request this control makes, or `None` when it is disabled.
    pub fn action(self, index: usize, len: usize) -> Option<QueueAction> {
        if !self.is_enabled(index, len) {
            return None;
        }
        let action = match self {
            Self::MoveUp => QueueAction::Reorder {
                from: index,
                to: index - 1,
            },
            Self::MoveDown => QueueAction::Reorder {
                from: index,
                to: index + 1,
            },
            Self::MoveToTop => QueueAction::Reorder { from: index, to: 0 },
            Self::MoveToBottom => QueueAction::Reorder {
                from: index,
                to: len - 1,
            },
            Self::Remove => QueueAction::Remove { index },
        };
        Some(action)
    }
}
