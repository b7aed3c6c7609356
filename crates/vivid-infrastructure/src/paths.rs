//! Path management for vivid configuration and session files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/vivid/
//! ├── config.toml     # Base URLs and author id
//! ├── session.toml    # Token + identity, written atomically
//! └── profile.toml    # Optional first/last name for the greeting
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves every file the client persists, rooted at one directory.
#[derive(Debug, Clone)]
pub struct VividPaths {
    root: PathBuf,
}

impl VividPaths {
    /// Uses the platform config directory (`~/.config/vivid` on Linux).
    pub fn platform() -> Result<Self, PathError> {
        let root = dirs::config_dir()
            .ok_or(PathError::ConfigDirNotFound)?
            .join("vivid");
        Ok(Self { root })
    }

    /// Uses a custom root directory (for testing).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.root.join("session.toml")
    }

    pub fn profile_file(&self) -> PathBuf {
        self.root.join("profile.toml")
    }
}
