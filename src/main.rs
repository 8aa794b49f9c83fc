//! Command-line interface for booking-seed
//!
//! # Usage
//!
//! ```bash
//! # Insert 100 synthetic bookings, one every 5 seconds
//! booking-seed --records 100
//! ```
//!
//! Connection settings are read from `config.yaml` in the working
//! directory. Set `RUST_LOG` to change the log level (default `info`).

use booking_seed::{run_populate, CONFIG_PATH};
use clap::Parser;
use cosmosdb_populate::PopulateArgs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "booking-seed")]
#[command(version)]
#[command(about = "Generate synthetic booking records and insert them into Azure Cosmos DB")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    populate: PopulateArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    run_populate(&cli.populate, Path::new(CONFIG_PATH)).await?;

    Ok(())
}
