//! `azstack up` - generate the compose file and start the stack.

use super::generate;
use anyhow::{Context, Result};
use azstack_core::compose::{ComposeGenerator, ComposeParser, GeneratorPaths};
use azstack_core::{ComposeCommand, Config, StackManager, SystemRunner};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

/// Services started in the default mode.
const DEFAULT_SERVICES: [&str; 2] = ["cosmosdb", "azurite"];

/// Services started when MongoDB stands in for Cosmos DB.
const MONGODB_SERVICES: [&str; 2] = ["mongodb-as-cosmosdb", "azurite"];

pub fn run(mongodb_as_cosmosdb: bool, no_build: bool) -> Result<()> {
    let config = Config::load()?;

    let generated = generate::execute(&config)?;
    generate::print_result(&generated);
    println!();

    let services: &[&str] =
        if mongodb_as_cosmosdb { &MONGODB_SERVICES } else { &DEFAULT_SERVICES };

    print_services(&generated.output_path, services)?;

    let generator = ComposeGenerator::new(GeneratorPaths::from_config(&config));
    let compose = ComposeCommand::resolve(config.compose_command.as_deref())?;
    let manager = StackManager::new(generator, compose, SystemRunner);

    manager.up(services, !no_build).context("Failed to start the stack")?;

    println!("{} Stack started: {}", "✓".green().bold(), services.join(", ").bold());

    if !mongodb_as_cosmosdb {
        println!();
        println!(
            "{}",
            "If the Cosmos DB emulator gives you trouble, MongoDB can stand in for it:"
                .dimmed()
        );
        println!("  {}", "azstack up --mongodb-as-cosmosdb".dimmed());
    }

    Ok(())
}

/// Show the selected services and their images before starting.
fn print_services(output_path: &std::path::Path, services: &[&str]) -> Result<()> {
    let compose = ComposeParser::parse_file(output_path)?;

    println!(
        "{} Starting {} service(s): {}",
        "→".cyan().bold(),
        services.len(),
        services.join(", ").dimmed()
    );

    #[derive(Tabled)]
    struct ServiceRow {
        #[tabled(rename = "SERVICE")]
        name: String,
        #[tabled(rename = "IMAGE")]
        image: String,
        #[tabled(rename = "PORTS")]
        ports: String,
    }

    let rows: Vec<ServiceRow> = services
        .iter()
        .filter_map(|name| compose.services.get(*name).map(|service| (name, service)))
        .map(|(name, service)| ServiceRow {
            name: name.to_string(),
            image: service.image.clone(),
            ports: service.ports.join(", "),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    println!();

    Ok(())
}
