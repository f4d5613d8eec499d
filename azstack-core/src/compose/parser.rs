//! Generated compose file parser.
//!
//! Parses the generated docker-compose.yml and validates that it is usable
//! before any compose command is run against it.

use super::types::{ComposeFile, Service};
use crate::error::{AzstackError, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

/// Parser for the generated compose file.
pub struct ComposeParser;

impl ComposeParser {
    /// Parse a compose file from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid, the compose version is
    /// unsupported, or no usable services are defined.
    #[instrument(skip(content))]
    pub fn parse(content: &str) -> Result<ComposeFile> {
        let compose: ComposeFile = serde_yaml::from_str(content)
            .map_err(|e| AzstackError::ComposeParseError { reason: e.to_string() })?;

        Self::validate_version(&compose.version)?;
        Self::validate_services(&compose.services)?;

        Ok(compose)
    }

    /// Parse a compose file from a file path.
    #[instrument]
    pub fn parse_file<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<ComposeFile> {
        let path = path.as_ref();
        debug!("Reading compose file from {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| AzstackError::FileReadError {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Check whether the file at `path` exists and parses cleanly.
    ///
    /// The stack manager uses this to decide whether the generated file can
    /// be used as-is or must be regenerated.
    pub fn check_file(path: &Path) -> bool {
        path.exists() && Self::parse_file(path).is_ok()
    }

    /// Validate that the compose version is supported (v2 and v3).
    fn validate_version(version: &str) -> Result<()> {
        if version.is_empty() || version.starts_with('2') || version.starts_with('3') {
            Ok(())
        } else {
            Err(AzstackError::UnsupportedComposeVersion { version: version.to_string() })
        }
    }

    /// Validate that services are properly defined.
    fn validate_services(services: &HashMap<String, Service>) -> Result<()> {
        if services.is_empty() {
            return Err(AzstackError::ComposeParseError {
                reason: "No services defined".to_string(),
            });
        }

        for (name, service) in services {
            if service.image.is_empty() {
                return Err(AzstackError::ComposeParseError {
                    reason: format!("Service '{}' missing image", name),
                });
            }
        }

        Ok(())
    }
}
