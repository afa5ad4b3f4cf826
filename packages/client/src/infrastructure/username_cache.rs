//! Cached display name.
//!
//! The display name is the only thing the client persists between runs.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::domain::Username;

/// Display name stored in a small text file
#[derive(Debug, Clone)]
pub struct UsernameCache {
    path: PathBuf,
}

impl UsernameCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached name. A missing, unreadable or blank file means no name.
    pub fn load(&self) -> Option<Username> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Username::new(&content).ok(),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        "Failed to read username cache {}: {}",
                        self.path.display(),
                        e
                    );
                }
                None
            }
        }
    }

    pub fn store(&self, username: &Username) -> io::Result<()> {
        fs::write(&self.path, username.as_str())?;
        tracing::debug!("Stored username in {}", self.path.display());
        Ok(())
    }

    /// Forget the cached name. Clearing an empty cache is not an error.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
