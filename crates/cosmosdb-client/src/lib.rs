//! Minimal Azure Cosmos DB (SQL API) client.
//!
//! The seeding pipeline only needs three capabilities, captured by the
//! [`DocumentStore`] trait:
//!
//! - `ensure_database` - create the database if it does not exist
//! - `ensure_container` - create the container if it does not exist
//! - `insert_item` - create a single document
//!
//! [`CosmosClient`] implements them against the Cosmos DB REST API with
//! master-key authorization. [`InMemoryStore`] implements them in memory
//! so the seeding loop can be exercised without a live account.

mod auth;
mod client;
mod error;
mod memory;
mod store;

pub use auth::{format_http_date, MasterKey, ResourceType};
pub use client::{CosmosClient, API_VERSION};
pub use error::CosmosError;
pub use memory::{InMemoryStore, StoreCall};
pub use store::{partition_key_value, ContainerRef, ContainerSpec, DatabaseRef, DocumentStore};
