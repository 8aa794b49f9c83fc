//! Error types for the Cosmos DB populator.

use booking_generator::GeneratorError;
use cosmosdb_client::CosmosError;
use thiserror::Error;

/// Errors that can occur during population.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// Database or container could not be ensured.
    #[error("Provisioning error: {0}")]
    Provision(#[source] CosmosError),

    /// A single document insert failed; the run stops here.
    #[error("Insert of record {iteration} failed: {source}")]
    Insert {
        iteration: u64,
        #[source]
        source: CosmosError,
    },

    /// Generator error.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// Record could not be turned into a document.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
