//! DocumentStore trait definition.

use crate::error::CosmosError;
use serde_json::Value;

/// Handle to a database that is known to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseRef {
    pub id: String,
}

impl DatabaseRef {
    /// Resource link used in signatures and URLs (`dbs/{id}`).
    pub fn link(&self) -> String {
        format!("dbs/{}", self.id)
    }
}

/// How a container should be created if it is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub id: String,
    /// JSON path of the partition key, e.g. `/booking_id`.
    pub partition_key_path: String,
    /// Provisioned throughput in request units per second.
    pub throughput: u32,
}

/// Handle to a container that is known to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
    pub database: String,
    pub id: String,
    pub partition_key_path: String,
}

impl ContainerRef {
    /// Resource link used in signatures and URLs (`dbs/{db}/colls/{id}`).
    pub fn link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.id)
    }
}

/// Look up the partition key value of `item` for `container`.
///
/// The partition key path doubles as a JSON pointer into the document.
pub fn partition_key_value<'a>(
    container: &ContainerRef,
    item: &'a Value,
) -> Result<&'a Value, CosmosError> {
    match item.pointer(&container.partition_key_path) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(CosmosError::MissingPartitionKey(
            container.partition_key_path.clone(),
        )),
    }
}

/// Capabilities the seeding loop needs from a document database.
///
/// Callers are generic over the store so tests can substitute
/// [`InMemoryStore`](crate::InMemoryStore) for a live account.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return the database `id`, creating it if it does not exist.
    async fn ensure_database(&self, id: &str) -> Result<DatabaseRef, CosmosError>;

    /// Return the container described by `spec`, creating it if it does not
    /// exist. An existing container is returned unchanged.
    async fn ensure_container(
        &self,
        database: &DatabaseRef,
        spec: &ContainerSpec,
    ) -> Result<ContainerRef, CosmosError>;

    /// Create a single document in `container`.
    async fn insert_item(&self, container: &ContainerRef, item: &Value) -> Result<(), CosmosError>;
}

#[async_trait::async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for &T {
    async fn ensure_database(&self, id: &str) -> Result<DatabaseRef, CosmosError> {
        (**self).ensure_database(id).await
    }

    async fn ensure_container(
        &self,
        database: &DatabaseRef,
        spec: &ContainerSpec,
    ) -> Result<ContainerRef, CosmosError> {
        (**self).ensure_container(database, spec).await
    }

    async fn insert_item(&self, container: &ContainerRef, item: &Value) -> Result<(), CosmosError> {
        (**self).insert_item(container, item).await
    }
}
