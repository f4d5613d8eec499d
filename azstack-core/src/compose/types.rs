//! Generated compose file types.
//!
//! A deliberately slim model of the generated docker-compose.yml: just
//! enough to decide the file is usable and to show the operator what is
//! about to run. Unknown keys are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root structure of the generated compose file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeFile {
    /// Compose file format version (e.g. "2", "3", "3.8")
    #[serde(default)]
    pub version: String,

    /// Services declared by the stack
    pub services: HashMap<String, Service>,
}

/// A service in the generated compose file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Container image to use
    pub image: String,

    /// Port mappings (e.g. ["10255:27017"])
    #[serde(default)]
    pub ports: Vec<String>,
}

impl ComposeFile {
    /// Names of declared services, sorted for stable display.
    pub fn service_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.services.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}
