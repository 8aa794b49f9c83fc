//! Populate command runner.

use anyhow::Context;
use booking_generator::{BookingGenerator, SeededFakeSource};
use cosmosdb_client::{CosmosClient, DocumentStore};
use cosmosdb_populate::{CosmosDBPopulator, PopulateArgs, PopulateMetrics};
use std::path::Path;

use crate::config::{Config, CosmosDBSettings};

/// Configuration file read from the working directory.
pub const CONFIG_PATH: &str = "config.yaml";

/// Load the configuration, connect to Cosmos DB and insert the requested
/// number of records.
///
/// The configuration is fully validated before any client is built, so a
/// bad file never results in a network call.
pub async fn run_populate(
    args: &PopulateArgs,
    config_path: &Path,
) -> anyhow::Result<PopulateMetrics> {
    let config = Config::from_file(config_path)
        .with_context(|| format!("Failed to load config from {config_path:?}"))?;
    let settings = &config.cosmosdb;

    tracing::info!(
        "Seeding Cosmos DB at {} (database '{}', container '{}') with {} records",
        settings.url,
        settings.database_name,
        settings.database_container_name,
        args.records
    );

    let client = CosmosClient::new(&settings.url, &settings.key)
        .context("Failed to create Cosmos DB client")?;

    seed_bookings(client, settings, args.records).await
}

/// Provision the configured database and container in `store`, then insert
/// `records` freshly generated bookings.
pub async fn seed_bookings<S: DocumentStore>(
    store: S,
    settings: &CosmosDBSettings,
    records: u64,
) -> anyhow::Result<PopulateMetrics> {
    let generator = BookingGenerator::new(SeededFakeSource::from_entropy());

    let mut populator = CosmosDBPopulator::provision(
        store,
        &settings.database_name,
        &settings.database_container_name,
        generator,
    )
    .await
    .context("Failed to provision Cosmos DB database and container")?;

    populator
        .populate(records)
        .await
        .context("Failed to insert booking records")
}
