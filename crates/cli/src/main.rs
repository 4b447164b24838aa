//! daybrief CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize config & data directory
//! - `brief`   — Generate and print today's morning briefing
//! - `chat`    — Interactive assistant session
//! - `todo`    — List, add, and complete todos
//! - `recall`  — Print a previously stored briefing

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "daybrief",
    about = "daybrief — personal morning briefing assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and data directory
    Onboard,

    /// Generate and print today's morning briefing
    Brief,

    /// Chat with the assistant
    Chat,

    /// Manage todos
    Todo {
        #[command(subcommand)]
        action: commands::todo::TodoAction,
    },

    /// Print a previously stored briefing (defaults to yesterday)
    Recall {
        /// Date in YYYY-MM-DD format
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Brief => commands::brief::run().await?,
        Commands::Chat => commands::chat::run().await?,
        Commands::Todo { action } => commands::todo::run(action).await?,
        Commands::Recall { date } => commands::recall::run(date).await?,
    }

    Ok(())
}
