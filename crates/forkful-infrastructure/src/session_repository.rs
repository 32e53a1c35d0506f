//! Filesystem-backed session snapshot repository.

use std::fs;
use std::path::PathBuf;

use forkful_core::session::{Session, SessionSnapshotRepository};
use forkful_core::Result;

use crate::paths::ForkfulPaths;

/// Persists the session snapshot as a single JSON file.
///
/// Writes go to a sibling temp file followed by an atomic rename, so a
/// crash mid-write leaves either the previous snapshot or the new one on
/// disk, never a torn mixture. A snapshot that fails to deserialize loads
/// as `None` (with a warning): corrupt local state forces
/// re-authentication instead of blocking startup.
pub struct JsonSnapshotRepository {
    file_path: PathBuf,
}

impl JsonSnapshotRepository {
    pub fn new(paths: &ForkfulPaths) -> Self {
        Self {
            file_path: paths.session_file(),
        }
    }

    /// Repository over an explicit file path, for tests.
    pub fn at_path(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut p = self.file_path.clone();
        p.set_extension("json.tmp");
        p
    }
}

impl SessionSnapshotRepository for JsonSnapshotRepository {
    fn load(&self) -> Result<Option<Session>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.file_path)?;
        match serde_json::from_str::<Session>(&json) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(
                    "Malformed session snapshot at {:?}, treating as signed out: {}",
                    self.file_path,
                    e
                );
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string_pretty(session)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.file_path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path)?;
        }
        Ok(())
    }
}
