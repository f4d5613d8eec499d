//! Error types for azstack.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for azstack operations.
pub type Result<T> = std::result::Result<T, AzstackError>;

/// Main error type for azstack.
#[derive(Error, Debug)]
pub enum AzstackError {
    // Port mapping errors
    #[error("port mapping document has {} validation error(s)", .errors.len())]
    PortValidation { errors: Vec<String> },

    #[error("Ports parse error: {reason}")]
    PortsParseError { reason: String },

    // Compose errors
    #[error("Compose parse error: {reason}")]
    ComposeParseError { reason: String },

    #[error("Unsupported compose version: {version}")]
    UnsupportedComposeVersion { version: String },

    #[error("File read error: {path}: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // File system errors
    #[error("I/O error at {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Command execution errors
    #[error("Failed to spawn {program}: {source}")]
    CommandSpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command {program} exited with status {status}")]
    CommandFailed { program: String, status: i32 },

    // Configuration errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
