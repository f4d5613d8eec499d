//! `azstack down` - stop the stack and delete the generated compose file.

use anyhow::Result;
use azstack_core::compose::{ComposeGenerator, GeneratorPaths};
use azstack_core::{ComposeCommand, Config, StackManager, SystemRunner};
use colored::Colorize;
use std::io::{self, Write};

pub fn run(force: bool) -> Result<()> {
    let config = Config::load()?;

    if !force {
        print!(
            "{} Stop the stack and delete {}? [y/N]: ",
            "⚠".yellow().bold(),
            config.output_path.bold()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let generator = ComposeGenerator::new(GeneratorPaths::from_config(&config));
    let compose = ComposeCommand::resolve(config.compose_command.as_deref())?;
    let manager = StackManager::new(generator, compose, SystemRunner);

    if manager.down_and_cleanup()? {
        println!("{} Stack stopped, {} deleted", "✓".green().bold(), config.output_path.bold());
    } else {
        println!("{} not found. Nothing to stop.", config.output_path);
    }

    Ok(())
}
