//! Compose file generation.
//!
//! Reads the template and the port mapping document fresh on every run,
//! validates the document, substitutes placeholders, and writes the result
//! by full overwrite. Validation failure aborts before any output mutation.

use super::mapping::MappingTable;
use super::template;
use crate::config::Config;
use crate::error::{AzstackError, Result};
use crate::paths;
use crate::ports::PortDocument;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Input and output locations for one generator run.
#[derive(Debug, Clone)]
pub struct GeneratorPaths {
    pub template: PathBuf,
    pub ports: PathBuf,
    pub output: PathBuf,
}

impl GeneratorPaths {
    /// Paths from the well-known stack directory locations.
    pub fn from_defaults() -> Self {
        Self {
            template: paths::template_path(),
            ports: paths::ports_path(),
            output: paths::output_path(),
        }
    }

    /// Paths from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            template: config.template_path(),
            ports: config.ports_path(),
            output: config.output_path(),
        }
    }
}

/// Result of a successful generator run.
#[derive(Debug)]
pub struct GeneratedCompose {
    /// Where the compose file was written.
    pub output_path: PathBuf,
    /// Every mapping entry actually produced, in emission order.
    pub mapping: MappingTable,
}

/// Generates the compose file from the template and port mappings.
#[derive(Debug, Clone)]
pub struct ComposeGenerator {
    paths: GeneratorPaths,
}

impl ComposeGenerator {
    /// Create a generator over the given paths.
    pub fn new(paths: GeneratorPaths) -> Self {
        Self { paths }
    }

    /// The path the generated file is written to.
    pub fn output_path(&self) -> &Path {
        &self.paths.output
    }

    /// Run the generator.
    ///
    /// # Errors
    ///
    /// Returns `PortValidation` with every collected error when the port
    /// mapping document is invalid; the output file is not touched in that
    /// case. I/O and parse errors propagate immediately.
    #[instrument(skip(self))]
    pub fn generate(&self) -> Result<GeneratedCompose> {
        let template =
            std::fs::read_to_string(&self.paths.template).map_err(|e| {
                AzstackError::FileReadError {
                    path: self.paths.template.to_string_lossy().to_string(),
                    source: e,
                }
            })?;

        let doc = PortDocument::parse_file(&self.paths.ports)?;

        let errors = doc.validate();
        if !errors.is_empty() {
            return Err(AzstackError::PortValidation { errors });
        }

        let mapping = MappingTable::build(&doc);
        let output = template::substitute(&template, &mapping);

        std::fs::write(&self.paths.output, output)
            .map_err(|e| AzstackError::IoError { path: self.paths.output.clone(), source: e })?;

        info!(
            "Generated {} from {}",
            self.paths.output.display(),
            self.paths.template.display()
        );

        Ok(GeneratedCompose { output_path: self.paths.output.clone(), mapping })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEMPLATE: &str = "version: \"3.8\"\n\nservices:\n  mongodb-as-cosmosdb:\n    image: mongo:7\n    ports:\n      - \"{{MONGODB_AS_COSMOSDB_PORT}}\"\n  azurite:\n    image: mcr.microsoft.com/azure-storage/azurite\n    ports:\n      - \"{{STORAGE_PORT_1}}\"\n      - \"{{STORAGE_PORT_2}}\"\n";

    const PORTS: &str = r#"{
        "mongodb": {"host": 10255, "container": 27017},
        "storage": [
            {"host": 10000, "container": 10000},
            {"host": 10001, "container": 10001}
        ]
    }"#;

    fn generator_in(dir: &TempDir, template: &str, ports: &str) -> ComposeGenerator {
        let template_path = dir.path().join("docker-compose.template.yml");
        let ports_path = dir.path().join("ports.json");
        std::fs::write(&template_path, template).unwrap();
        std::fs::write(&ports_path, ports).unwrap();
        ComposeGenerator::new(GeneratorPaths {
            template: template_path,
            ports: ports_path,
            output: dir.path().join("docker-compose.yml"),
        })
    }

    #[test]
    fn test_generate_substitutes_and_writes() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir, TEMPLATE, PORTS);

        let generated = generator.generate().unwrap();
        let written = std::fs::read_to_string(&generated.output_path).unwrap();

        assert!(written.contains("\"10255:27017\""));
        assert!(written.contains("\"10000:10000\""));
        assert!(written.contains("\"10001:10001\""));
        assert!(!written.contains("{{"));

        let keys: Vec<&str> = generated.mapping.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["MONGODB_AS_COSMOSDB_PORT", "MONGODB_PORT", "STORAGE_PORT_1", "STORAGE_PORT_2"]
        );
    }

    #[test]
    fn test_generate_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir, TEMPLATE, PORTS);

        let first = generator.generate().unwrap();
        let first_bytes = std::fs::read(&first.output_path).unwrap();
        let second = generator.generate().unwrap();
        let second_bytes = std::fs::read(&second.output_path).unwrap();

        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn test_validation_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let ports = r#"{
            "storage": [{"host": 5000, "container": 5000}],
            "cosmosdb": [{"host": 5000, "container": 8081}]
        }"#;
        let generator = generator_in(&dir, TEMPLATE, ports);

        match generator.generate() {
            Err(AzstackError::PortValidation { errors }) => {
                assert_eq!(errors, vec!["Duplicate host port 5000 for cosmosdb"]);
            }
            other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
        }
        assert!(!dir.path().join("docker-compose.yml").exists());
    }

    #[test]
    fn test_generate_overwrites_previous_output() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir, TEMPLATE, PORTS);
        std::fs::write(dir.path().join("docker-compose.yml"), "stale content\n").unwrap();

        let generated = generator.generate().unwrap();
        let written = std::fs::read_to_string(&generated.output_path).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.contains("\"10255:27017\""));
    }

    #[test]
    fn test_unknown_placeholder_survives_generation() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir, "value: {{UNKNOWN_KEY}}\n", PORTS);

        let generated = generator.generate().unwrap();
        let written = std::fs::read_to_string(&generated.output_path).unwrap();
        assert_eq!(written, "value: {{UNKNOWN_KEY}}\n");
    }

    #[test]
    fn test_missing_template_propagates_immediately() {
        let dir = TempDir::new().unwrap();
        let ports_path = dir.path().join("ports.json");
        std::fs::write(&ports_path, PORTS).unwrap();
        let generator = ComposeGenerator::new(GeneratorPaths {
            template: dir.path().join("missing-template.yml"),
            ports: ports_path,
            output: dir.path().join("docker-compose.yml"),
        });

        assert!(matches!(generator.generate(), Err(AzstackError::FileReadError { .. })));
        assert!(!dir.path().join("docker-compose.yml").exists());
    }
}
