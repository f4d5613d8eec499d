//! Stack lifecycle management.
//!
//! The stack manager consumes the generated compose file and delegates
//! lifecycle operations (bring-up with build, tear-down) to the compose CLI
//! through an injected `CommandRunner`. Before every invocation it checks
//! that the on-disk file is usable, regenerating it from the template when
//! it is missing or invalid.

use crate::compose::{ComposeGenerator, ComposeParser};
use crate::error::{AzstackError, Result};
use crate::exec::{CommandRunner, ComposeCommand};
use tracing::{info, warn};

/// Manages the emulator stack through the compose CLI.
pub struct StackManager<R: CommandRunner> {
    generator: ComposeGenerator,
    compose: ComposeCommand,
    runner: R,
}

impl<R: CommandRunner> StackManager<R> {
    /// Create a stack manager.
    pub fn new(generator: ComposeGenerator, compose: ComposeCommand, runner: R) -> Self {
        Self { generator, compose, runner }
    }

    /// Regenerate the compose file if it is missing or invalid.
    pub fn ensure_compose_file(&self) -> Result<()> {
        if !ComposeParser::check_file(self.generator.output_path()) {
            info!(
                "{} missing or invalid, regenerating from template",
                self.generator.output_path().display()
            );
            self.generator.generate()?;
        }
        Ok(())
    }

    /// Bring up the given services, building images when `build` is set.
    ///
    /// Runs `<compose> -f <file> up [--build] -d <services...>`.
    pub fn up(&self, services: &[&str], build: bool) -> Result<()> {
        self.ensure_compose_file()?;

        // The template itself can produce an unusable file; refuse to hand
        // it to the compose CLI.
        let output = self.generator.output_path();
        if !ComposeParser::check_file(output) {
            return Err(AzstackError::ComposeParseError {
                reason: format!("{} is invalid after generation", output.display()),
            });
        }

        info!("Starting stack services: {}", services.join(", "));

        let mut args = self.compose.base_args.clone();
        args.push("-f".to_string());
        args.push(output.to_string_lossy().to_string());
        args.push("up".to_string());
        if build {
            args.push("--build".to_string());
        }
        args.push("-d".to_string());
        args.extend(services.iter().map(|s| s.to_string()));

        self.runner.run(&self.compose.program, &args)
    }

    /// Stop the stack and delete the generated compose file.
    ///
    /// Returns `Ok(false)` when there is no generated file to act on. A
    /// failing `down` is logged and does not prevent the file from being
    /// deleted; an invalid file skips `down` entirely.
    pub fn down_and_cleanup(&self) -> Result<bool> {
        let output = self.generator.output_path();
        if !output.exists() {
            info!("{} not found, nothing to stop", output.display());
            return Ok(false);
        }

        if ComposeParser::check_file(output) {
            let mut args = self.compose.base_args.clone();
            args.push("-f".to_string());
            args.push(output.to_string_lossy().to_string());
            args.push("down".to_string());

            if let Err(e) = self.runner.run(&self.compose.program, &args) {
                warn!("compose down failed: {}", e);
            }
        } else {
            warn!("{} is invalid, skipping compose down", output.display());
        }

        std::fs::remove_file(output)
            .map_err(|e| AzstackError::IoError { path: output.to_path_buf(), source: e })?;
        info!("{} deleted", output.display());

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::GeneratorPaths;
    use std::cell::RefCell;
    use tempfile::TempDir;

    const TEMPLATE: &str = "version: \"3.8\"\n\nservices:\n  mongodb-as-cosmosdb:\n    image: mongo:7\n    ports:\n      - \"{{MONGODB_AS_COSMOSDB_PORT}}\"\n  azurite:\n    image: mcr.microsoft.com/azure-storage/azurite\n    ports:\n      - \"{{STORAGE_PORT_1}}\"\n";

    const PORTS: &str = r#"{
        "mongodb": {"host": 10255, "container": 27017},
        "storage": [{"host": 10000, "container": 10000}]
    }"#;

    /// Records every invocation instead of spawning anything.
    #[derive(Default)]
    struct RecordingRunner {
        calls: RefCell<Vec<(String, Vec<String>)>>,
        fail: bool,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, program: &str, args: &[String]) -> Result<()> {
            self.calls.borrow_mut().push((program.to_string(), args.to_vec()));
            if self.fail {
                return Err(AzstackError::CommandFailed {
                    program: program.to_string(),
                    status: 1,
                });
            }
            Ok(())
        }
    }

    fn manager_in(dir: &TempDir, fail: bool) -> StackManager<RecordingRunner> {
        let template_path = dir.path().join("docker-compose.template.yml");
        let ports_path = dir.path().join("ports.json");
        std::fs::write(&template_path, TEMPLATE).unwrap();
        std::fs::write(&ports_path, PORTS).unwrap();

        let generator = ComposeGenerator::new(GeneratorPaths {
            template: template_path,
            ports: ports_path,
            output: dir.path().join("docker-compose.yml"),
        });
        let compose = ComposeCommand {
            program: "docker-compose".to_string(),
            base_args: Vec::new(),
        };
        StackManager::new(generator, compose, RecordingRunner { fail, ..Default::default() })
    }

    #[test]
    fn test_up_invokes_compose_with_services() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir, false);

        manager.up(&["cosmosdb", "azurite"], true).unwrap();

        let calls = manager.runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (program, args) = &calls[0];
        assert_eq!(program, "docker-compose");
        assert_eq!(args[0], "-f");
        assert!(args[1].ends_with("docker-compose.yml"));
        assert_eq!(&args[2..], &["up", "--build", "-d", "cosmosdb", "azurite"]);
    }

    #[test]
    fn test_up_without_build_flag() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir, false);

        manager.up(&["azurite"], false).unwrap();

        let calls = manager.runner.calls.borrow();
        let (_, args) = &calls[0];
        assert!(!args.contains(&"--build".to_string()));
        assert_eq!(&args[2..], &["up", "-d", "azurite"]);
    }

    #[test]
    fn test_ensure_regenerates_missing_file() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir, false);
        let output = dir.path().join("docker-compose.yml");
        assert!(!output.exists());

        manager.ensure_compose_file().unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_ensure_regenerates_invalid_file() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir, false);
        let output = dir.path().join("docker-compose.yml");
        std::fs::write(&output, "{ not yaml").unwrap();

        manager.ensure_compose_file().unwrap();
        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"10255:27017\""));
    }

    #[test]
    fn test_ensure_keeps_valid_file() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir, false);
        manager.ensure_compose_file().unwrap();

        let output = dir.path().join("docker-compose.yml");
        let before = std::fs::metadata(&output).unwrap().modified().unwrap();
        manager.ensure_compose_file().unwrap();
        let after = std::fs::metadata(&output).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_down_runs_compose_and_deletes_file() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir, false);
        manager.ensure_compose_file().unwrap();
        let output = dir.path().join("docker-compose.yml");

        let removed = manager.down_and_cleanup().unwrap();
        assert!(removed);
        assert!(!output.exists());

        let calls = manager.runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (_, args) = &calls[0];
        assert_eq!(args.last().map(|s| s.as_str()), Some("down"));
    }

    #[test]
    fn test_down_with_missing_file_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir, false);

        let removed = manager.down_and_cleanup().unwrap();
        assert!(!removed);
        assert!(manager.runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_down_skips_compose_for_invalid_file_but_deletes_it() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir, false);
        let output = dir.path().join("docker-compose.yml");
        std::fs::write(&output, "{ not yaml").unwrap();

        let removed = manager.down_and_cleanup().unwrap();
        assert!(removed);
        assert!(!output.exists());
        assert!(manager.runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_down_deletes_file_even_when_compose_fails() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir, true);
        manager.ensure_compose_file().unwrap();
        let output = dir.path().join("docker-compose.yml");

        let removed = manager.down_and_cleanup().unwrap();
        assert!(removed);
        assert!(!output.exists());
    }

    #[test]
    fn test_up_propagates_compose_failure() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir, true);

        match manager.up(&["azurite"], true) {
            Err(AzstackError::CommandFailed { status, .. }) => assert_eq!(status, 1),
            other => panic!("expected command failure, got {:?}", other),
        }
    }
}
