//! Centralized path configuration for azstack.
//!
//! All stack file paths go through this module so the generator and the
//! stack manager always agree on where the template, the port mapping
//! document, and the generated compose file live.

use std::path::PathBuf;

/// Get the stack directory.
///
/// Resolution order:
/// 1. `AZSTACK_DIR` environment variable
/// 2. The current working directory
pub fn stack_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("AZSTACK_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(".")
}

/// Get the compose template path.
pub fn template_path() -> PathBuf {
    stack_dir().join("docker-compose.template.yml")
}

/// Get the port mapping document path.
pub fn ports_path() -> PathBuf {
    stack_dir().join("ports.json")
}

/// Get the generated compose file path.
pub fn output_path() -> PathBuf {
    stack_dir().join("docker-compose.yml")
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    stack_dir().join("azstack.json")
}
