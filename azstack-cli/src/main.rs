use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "azstack")]
#[command(about = "Local Azure emulator stack manager", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate docker-compose.yml from the template and port mappings
    Generate,

    /// Generate the compose file and bring the stack up
    Up {
        /// Use MongoDB as a replacement for Cosmos DB
        #[arg(long)]
        mongodb_as_cosmosdb: bool,

        /// Skip building images before starting
        #[arg(long)]
        no_build: bool,
    },

    /// Stop the stack and delete the generated compose file
    Down {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate => commands::generate::run(),
        Commands::Up { mongodb_as_cosmosdb, no_build } => {
            commands::up::run(mongodb_as_cosmosdb, no_build)
        }
        Commands::Down { force } => commands::down::run(force),
    }
}
