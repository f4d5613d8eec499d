//! `azstack generate` - produce docker-compose.yml from the template.

use anyhow::Result;
use azstack_core::compose::{ComposeGenerator, GeneratedCompose, GeneratorPaths};
use azstack_core::{AzstackError, Config};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

/// Run the generator and print the result.
pub fn run() -> Result<()> {
    let config = Config::load()?;
    let generated = execute(&config)?;
    print_result(&generated);
    Ok(())
}

/// Run the generator against the configured paths.
///
/// Validation failures are printed line by line and terminate the process
/// with a non-zero status before any output is written.
pub fn execute(config: &Config) -> Result<GeneratedCompose> {
    let generator = ComposeGenerator::new(GeneratorPaths::from_config(config));

    match generator.generate() {
        Ok(generated) => Ok(generated),
        Err(AzstackError::PortValidation { errors }) => {
            eprintln!("{} Error(s) in {}:", "✗".red().bold(), config.ports_path);
            for error in &errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

/// Print the output path and every mapping entry produced.
pub fn print_result(generated: &GeneratedCompose) {
    println!(
        "{} Generated {}",
        "✓".green().bold(),
        generated.output_path.display().to_string().bold()
    );

    if generated.mapping.is_empty() {
        println!("{}", "No port mappings produced".dimmed());
        return;
    }

    #[derive(Tabled)]
    struct MappingRow {
        #[tabled(rename = "PLACEHOLDER")]
        key: String,
        #[tabled(rename = "HOST:CONTAINER")]
        value: String,
    }

    let rows: Vec<MappingRow> = generated
        .mapping
        .iter()
        .map(|(key, value)| MappingRow { key: key.to_string(), value: value.to_string() })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}
