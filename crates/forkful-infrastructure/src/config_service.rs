//! Configuration service implementation.
//!
//! Loads the client configuration from `config.toml` under the forkful
//! base directory and caches it to avoid repeated file I/O.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::paths::ForkfulPaths;

fn default_api_base_url() -> String {
    "http://localhost:502".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the remote recipe service.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Quiet interval after the last keystroke before a search fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl ClientConfig {
    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Configuration service that loads and caches the client configuration.
///
/// A missing or malformed file yields the defaults; configuration problems
/// never block startup.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: PathBuf,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &ForkfulPaths) -> Self {
        Self {
            config_path: paths.config_file(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            ClientConfig::default()
        });

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    fn load_config(&self) -> Result<ClientConfig, String> {
        if !self.config_path.exists() {
            return Ok(ClientConfig::default());
        }
        let raw = std::fs::read_to_string(&self.config_path)
            .map_err(|e| format!("read {:?}: {}", self.config_path, e))?;
        toml::from_str(&raw).map_err(|e| format!("parse {:?}: {}", self.config_path, e))
    }
}
