//! Personae CLI — the main entry point.
//!
//! Commands:
//! - `compose`  — Build the system prompt for a character and query
//! - `retrieve` — Show the knowledge entry a query would ground on
//! - `personas` — List registered personas
//! - `doctor`   — Diagnose config and persona asset health

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "personae",
    about = "Personae — persona-grounded system-prompt synthesis",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to ~/.personae/config.toml)
    #[arg(short, long, global = true, env = "PERSONAE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the system prompt for a character and query
    Compose {
        /// Persona name
        #[arg(short = 'C', long)]
        character: String,

        /// The user's utterance (may start with the OOC toggle)
        query: String,

        /// Retrieval depth (reserved for a future top-k mode)
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Show the knowledge entry a query would ground on, as JSON
    Retrieve {
        /// Persona name
        #[arg(short = 'C', long)]
        character: String,

        /// The user's utterance
        query: String,
    },

    /// List registered personas and their asset paths
    Personas,

    /// Diagnose config and persona asset health
    Doctor,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Compose { character, query, k } => {
            commands::compose::run(cli.config.as_deref(), &character, &query, k)?
        }
        Commands::Retrieve { character, query } => {
            commands::retrieve::run(cli.config.as_deref(), &character, &query)?
        }
        Commands::Personas => commands::personas::run(cli.config.as_deref())?,
        Commands::Doctor => commands::doctor::run(cli.config.as_deref())?,
    }

    Ok(())
}
