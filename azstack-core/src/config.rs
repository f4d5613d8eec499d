//! Configuration management.

use crate::error::{AzstackError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Persistent configuration for azstack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub template_path: String,
    pub ports_path: String,
    pub output_path: String,
    /// Compose CLI override (e.g. "docker compose"). When unset the
    /// platform default is used.
    pub compose_command: Option<String>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_path: paths::template_path().to_string_lossy().to_string(),
            ports_path: paths::ports_path().to_string_lossy().to_string(),
            output_path: paths::output_path().to_string_lossy().to_string(),
            compose_command: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from disk.
    ///
    /// A missing configuration file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = paths::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| AzstackError::InvalidConfig {
            reason: format!("Failed to read config: {}", e),
        })?;
        serde_json::from_str(&content).map_err(|e| AzstackError::InvalidConfig {
            reason: format!("Failed to parse config: {}", e),
        })
    }

    /// Get the template path as a `PathBuf`.
    pub fn template_path(&self) -> PathBuf {
        PathBuf::from(&self.template_path)
    }

    /// Get the port mapping document path as a `PathBuf`.
    pub fn ports_path(&self) -> PathBuf {
        PathBuf::from(&self.ports_path)
    }

    /// Get the generated compose file path as a `PathBuf`.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_path)
    }
}
