//! Port mapping document parsing.
//!
//! The port mapping document (`ports.json`) maps each service name to either
//! a single host/container port pair or an ordered list of pairs. The shape
//! is decided once at parse time and dispatched via pattern match afterwards.

mod validate;

pub use validate::validate;

use crate::error::{AzstackError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// A single host/container port pair.
///
/// Both fields are optional at parse time; the validator reports records
/// where either is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortRecord {
    #[serde(default)]
    pub host: Option<u16>,

    #[serde(default)]
    pub container: Option<u16>,
}

impl PortRecord {
    /// Render the record as `"host:container"`.
    ///
    /// Returns `None` when either field is missing.
    pub fn pair(&self) -> Option<String> {
        match (self.host, self.container) {
            (Some(host), Some(container)) => Some(format!("{}:{}", host, container)),
            _ => None,
        }
    }
}

/// A service's port declaration: one pair or an ordered list of pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortEntry {
    /// Single port pair (e.g. mongodb)
    Single(PortRecord),
    /// Ordered list of port pairs (e.g. storage, cosmosdb)
    Multiple(Vec<PortRecord>),
}

/// The port mapping document, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortDocument {
    pub services: IndexMap<String, PortEntry>,
}

impl PortDocument {
    /// Parse a port mapping document from a JSON string.
    #[instrument(skip(content))]
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| AzstackError::PortsParseError { reason: e.to_string() })
    }

    /// Parse a port mapping document from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the JSON is invalid.
    #[instrument]
    pub fn parse_file<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading port mappings from {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| AzstackError::FileReadError {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Look up a service's port entry by name.
    pub fn get(&self, service: &str) -> Option<&PortEntry> {
        self.services.get(service)
    }

    /// Validate the document. Empty means valid.
    pub fn validate(&self) -> Vec<String> {
        validate::validate(self)
    }
}
