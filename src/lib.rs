//! booking-seed library.
//!
//! Loads the Cosmos DB settings, provisions the bookings container and
//! inserts synthetic booking records one at a time.

pub mod config;
pub mod run;

pub use config::{Config, ConfigError, CosmosDBSettings};
pub use run::{run_populate, seed_bookings, CONFIG_PATH};
