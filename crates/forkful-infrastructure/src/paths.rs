//! Centralized path management for local state.

use anyhow::Context;
use std::path::{Path, PathBuf};

use forkful_core::Result;

/// Resolves where Forkful keeps its local files.
///
/// Layout:
/// ```text
/// base_dir/            (~/.forkful by default)
/// ├── session.json     persisted session snapshot
/// └── config.toml      client configuration
/// ```
#[derive(Debug, Clone)]
pub struct ForkfulPaths {
    base_dir: PathBuf,
}

impl ForkfulPaths {
    /// Creates path management rooted at `base_dir`, creating the
    /// directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir)
            .context("Failed to create forkful base directory")
            .map_err(forkful_core::ForkfulError::from)?;
        Ok(Self { base_dir })
    }

    /// Creates path management at the default location (~/.forkful).
    pub fn default_location() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .context("Failed to get home directory")
            .map_err(forkful_core::ForkfulError::from)?;
        Self::new(home_dir.join(".forkful"))
    }

    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
