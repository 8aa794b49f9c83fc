//! Cosmos DB populator for booking-seed.
//!
//! Provisions the target database and container, then inserts synthetic
//! bookings one document at a time with a fixed pause after each insert.

pub mod args;
pub mod error;
pub mod populator;

pub use args::PopulateArgs;
pub use error::PopulateError;
pub use populator::{
    CosmosDBPopulator, PopulateMetrics, PopulateState, CONTAINER_THROUGHPUT, INSERT_DELAY,
    PARTITION_KEY_PATH,
};
