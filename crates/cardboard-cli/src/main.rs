mod check;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cardboard-cli")]
#[command(about = "Check board game stock across online stores")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check one or more games by name
    Check {
        /// Game names, e.g. "Ticket to Ride"
        #[arg(required = true)]
        games: Vec<String>,

        /// Print the raw JSON response instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check every game in a saved wishlist file
    Wishlist {
        /// Wishlist file; defaults to CARDBOARD_GAMES_PATH
        #[arg(long)]
        path: Option<PathBuf>,

        /// Print the raw JSON response instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the stores that would be checked, in order
    Stores,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = cardboard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Check { games, json }) => {
            let games = check::games_from_names(&games);
            check::run_check(&config, &games, json).await?;
        }
        Some(Commands::Wishlist { path, json }) => {
            let path = path.unwrap_or_else(|| config.games_path.clone());
            let games = check::load_wishlist(&path)?;
            if games.is_empty() {
                println!("wishlist {} is empty; nothing to check", path.display());
                return Ok(());
            }
            check::run_check(&config, &games, json).await?;
        }
        Some(Commands::Stores) => check::run_stores(&config)?,
        None => println!("cardboard-cli ready; run with --help for commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
