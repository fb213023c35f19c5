//! CLI administration tool for potter-houses.
//!
//! Talks to the Potter API and the configured cache store directly, without
//! going through the HTTP service.
//!
//! # Usage
//!
//! ```bash
//! # List houses (through the cache)
//! cargo run --bin admin -- houses
//!
//! # List houses straight from the upstream
//! cargo run --bin admin -- houses --fresh
//!
//! # Check a house id
//! cargo run --bin admin -- check 1760529f-6d51-4cb1-bcb1-25087fce5bde
//!
//! # Show or drop the cached houses response
//! cargo run --bin admin -- cache fingerprint
//! cargo run --bin admin -- cache clear
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`potter_houses::config`].

use potter_houses::config;
use potter_houses::domain::entities::HouseSet;
use potter_houses::server::build_lookup;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for inspecting the Potter API house lookup.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// List houses
    Houses {
        /// Drop the cached response first
        #[arg(long)]
        fresh: bool,
    },

    /// Check whether a house id exists
    Check {
        /// House UUID
        id: String,
    },

    /// Cache operations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Cache subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Print the cache key of the houses request
    Fingerprint,

    /// Remove the cached houses response
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let lookup = build_lookup(&config).await?;

    match cli.command {
        Commands::Houses { fresh } => {
            if fresh {
                lookup.forget().await?;
            }
            match lookup.houses().await? {
                Some(houses) => print_houses(&houses),
                None => println!("{}", "Upstream rejected the request".yellow()),
            }
        }
        Commands::Check { id } => {
            if lookup.contains(&id).await? {
                println!("{} {}", "✔".green().bold(), id.cyan());
            } else {
                println!("{} {} does not exist", "✘".red().bold(), id.cyan());
            }
        }
        Commands::Cache { action } => match action {
            CacheAction::Fingerprint => {
                println!("{}  GET {}", lookup.cache_key().bright_yellow(), lookup.endpoint());
            }
            CacheAction::Clear => {
                lookup.forget().await?;
                println!(
                    "{} ({})",
                    "Cache entry removed".green(),
                    lookup.cache().backend()
                );
            }
        },
    }

    Ok(())
}

fn print_houses(houses: &HouseSet) {
    println!("{}", format!("{} house(s)", houses.len()).bright_white().bold());
    for house in houses.iter() {
        println!(
            "  {}  {}",
            house.id.cyan(),
            house.name.as_deref().unwrap_or("-")
        );
    }
}
