pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Catalog CLI - database setup and catalog inspection")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply database migrations")]
    Migrate,

    #[command(about = "Load the sample catalog (idempotent)")]
    Seed,

    #[command(about = "Product listing and detail")]
    Products {
        #[command(subcommand)]
        cmd: commands::products::ProductCommands,
    },

    #[command(about = "Category listing and creation")]
    Categories {
        #[command(subcommand)]
        cmd: commands::categories::CategoryCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Migrate => commands::database::migrate(output_format).await,
        Commands::Seed => commands::database::seed(output_format).await,
        Commands::Products { cmd } => commands::products::handle(cmd, output_format).await,
        Commands::Categories { cmd } => commands::categories::handle(cmd, output_format).await,
    }
}
