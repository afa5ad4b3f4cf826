//! Users present in the room.

/// Ordered list of display names, in the order the server reported them.
///
/// The same name may appear more than once; `remove` drops the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRoster {
    users: Vec<String>,
}

impl UserRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole roster with a server snapshot
    pub fn reset(&mut self, users: Vec<String>) {
        self.users = users;
    }

    pub fn add(&mut self, user_name: String) {
        self.users.push(user_name);
    }

    /// Remove the first entry with this name. Returns whether one was found.
    pub fn remove(&mut self, user_name: &str) -> bool {
        match self.users.iter().position(|name| name == user_name) {
            Some(index) => {
                self.users.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
