//! Command execution.
//!
//! The stack manager never spawns processes directly; it goes through the
//! `CommandRunner` trait so tests can record invocations instead of needing
//! a Docker daemon. `SystemRunner` is the real implementation and inherits
//! stdio, so `docker compose` output streams straight to the operator.

use crate::error::{AzstackError, Result};
use tracing::debug;

/// Capability to run an external command to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, returning an error on spawn failure or a
    /// non-zero exit status.
    fn run(&self, program: &str, args: &[String]) -> Result<()>;
}

/// Runs commands on the host with inherited stdio.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        debug!("Running {} {}", program, args.join(" "));

        let status = std::process::Command::new(program).args(args).status().map_err(|e| {
            AzstackError::CommandSpawnFailed { program: program.to_string(), source: e }
        })?;

        if !status.success() {
            return Err(AzstackError::CommandFailed {
                program: program.to_string(),
                status: status.code().unwrap_or(-1),
            });
        }

        Ok(())
    }
}

/// The compose CLI to delegate lifecycle commands to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeCommand {
    /// Program to invoke (e.g. "docker-compose" or "docker").
    pub program: String,
    /// Arguments prepended before every subcommand (e.g. ["compose"]).
    pub base_args: Vec<String>,
}

impl ComposeCommand {
    /// Platform default: `docker-compose` on unix, `docker compose` on
    /// Windows.
    pub fn detect() -> Self {
        if cfg!(windows) {
            Self { program: "docker".to_string(), base_args: vec!["compose".to_string()] }
        } else {
            Self { program: "docker-compose".to_string(), base_args: Vec::new() }
        }
    }

    /// Parse a configured override such as "docker compose".
    ///
    /// The first word is the program, the rest become base arguments.
    pub fn from_override(command: &str) -> Result<Self> {
        let mut words = command.split_whitespace();
        let program = words.next().ok_or_else(|| AzstackError::InvalidConfig {
            reason: "compose_command is empty".to_string(),
        })?;

        Ok(Self {
            program: program.to_string(),
            base_args: words.map(|w| w.to_string()).collect(),
        })
    }

    /// Resolve the compose CLI from an optional configured override.
    pub fn resolve(override_command: Option<&str>) -> Result<Self> {
        match override_command {
            Some(command) => Self::from_override(command),
            None => Ok(Self::detect()),
        }
    }
}
