//! In-memory DocumentStore.

use crate::error::CosmosError;
use crate::store::{partition_key_value, ContainerRef, ContainerSpec, DatabaseRef, DocumentStore};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A call made against an [`InMemoryStore`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    EnsureDatabase { id: String, created: bool },
    EnsureContainer { id: String, created: bool },
    InsertItem { container: String },
}

#[derive(Debug)]
struct MemoryContainer {
    spec: ContainerSpec,
    items: Vec<Value>,
}

#[derive(Debug, Default)]
struct State {
    databases: BTreeMap<String, BTreeMap<String, MemoryContainer>>,
    calls: Vec<StoreCall>,
    insert_attempts: usize,
}

/// [`DocumentStore`] that keeps everything in memory.
///
/// Behaves like the service for the parts the seeder relies on:
/// create-if-absent provisioning, partition key checks, duplicate id
/// conflicts. Inserts can be made to fail on a chosen attempt.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    fail_insert_on: Option<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `attempt`-th insert (1-based) fail with 503 Service Unavailable.
    pub fn fail_insert_on(mut self, attempt: usize) -> Self {
        self.fail_insert_on = Some(attempt);
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Number of `insert_item` calls, failed ones included.
    pub fn insert_attempts(&self) -> usize {
        self.lock().insert_attempts
    }

    /// Documents stored in a container, in insertion order.
    pub fn items(&self, database: &str, container: &str) -> Vec<Value> {
        self.lock()
            .databases
            .get(database)
            .and_then(|containers| containers.get(container))
            .map(|c| c.items.clone())
            .unwrap_or_default()
    }

    /// Spec the container was created with, if it exists.
    pub fn container_spec(&self, database: &str, container: &str) -> Option<ContainerSpec> {
        self.lock()
            .databases
            .get(database)
            .and_then(|containers| containers.get(container))
            .map(|c| c.spec.clone())
    }
}

fn not_found(what: &str) -> CosmosError {
    CosmosError::service(StatusCode::NOT_FOUND, format!("{what} does not exist"))
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryStore {
    async fn ensure_database(&self, id: &str) -> Result<DatabaseRef, CosmosError> {
        let mut state = self.lock();
        let created = !state.databases.contains_key(id);
        state.databases.entry(id.to_string()).or_default();
        state.calls.push(StoreCall::EnsureDatabase {
            id: id.to_string(),
            created,
        });

        Ok(DatabaseRef { id: id.to_string() })
    }

    async fn ensure_container(
        &self,
        database: &DatabaseRef,
        spec: &ContainerSpec,
    ) -> Result<ContainerRef, CosmosError> {
        let mut state = self.lock();
        let containers = state
            .databases
            .get_mut(&database.id)
            .ok_or_else(|| not_found(&database.link()))?;

        let created = !containers.contains_key(&spec.id);
        let container = containers
            .entry(spec.id.clone())
            .or_insert_with(|| MemoryContainer {
                spec: spec.clone(),
                items: Vec::new(),
            });
        let partition_key_path = container.spec.partition_key_path.clone();

        state.calls.push(StoreCall::EnsureContainer {
            id: spec.id.clone(),
            created,
        });

        Ok(ContainerRef {
            database: database.id.clone(),
            id: spec.id.clone(),
            partition_key_path,
        })
    }

    async fn insert_item(&self, container: &ContainerRef, item: &Value) -> Result<(), CosmosError> {
        let mut state = self.lock();
        state.insert_attempts += 1;
        state.calls.push(StoreCall::InsertItem {
            container: container.id.clone(),
        });

        if self.fail_insert_on == Some(state.insert_attempts) {
            return Err(CosmosError::service(
                StatusCode::SERVICE_UNAVAILABLE,
                "injected insert failure",
            ));
        }

        let id = item
            .get("id")
            .and_then(Value::as_str)
            .ok_or(CosmosError::MissingId)?;
        let partition_key = partition_key_value(container, item)?;

        let stored = state
            .databases
            .get_mut(&container.database)
            .and_then(|containers| containers.get_mut(&container.id))
            .ok_or_else(|| not_found(&container.link()))?;

        let duplicate = stored.items.iter().any(|existing| {
            existing.get("id").and_then(Value::as_str) == Some(id)
                && partition_key_value(container, existing).ok() == Some(partition_key)
        });
        if duplicate {
            return Err(CosmosError::service(
                StatusCode::CONFLICT,
                format!("document '{id}' already exists"),
            ));
        }

        stored.items.push(item.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> ContainerSpec {
        ContainerSpec {
            id: "records".to_string(),
            partition_key_path: "/booking_id".to_string(),
            throughput: 200,
        }
    }

    #[tokio::test]
    async fn test_provisioning_is_idempotent() {
        let store = InMemoryStore::new();

        let db = store.ensure_database("bookings").await.unwrap();
        store.ensure_container(&db, &spec()).await.unwrap();
        let db = store.ensure_database("bookings").await.unwrap();
        store.ensure_container(&db, &spec()).await.unwrap();

        assert_eq!(
            store.calls(),
            vec![
                StoreCall::EnsureDatabase {
                    id: "bookings".to_string(),
                    created: true
                },
                StoreCall::EnsureContainer {
                    id: "records".to_string(),
                    created: true
                },
                StoreCall::EnsureDatabase {
                    id: "bookings".to_string(),
                    created: false
                },
                StoreCall::EnsureContainer {
                    id: "records".to_string(),
                    created: false
                },
            ]
        );
        assert_eq!(store.container_spec("bookings", "records"), Some(spec()));
    }

    #[tokio::test]
    async fn test_container_requires_database() {
        let store = InMemoryStore::new();
        let db = DatabaseRef {
            id: "missing".to_string(),
        };

        let err = store.ensure_container(&db, &spec()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_insert_and_conflict() {
        let store = InMemoryStore::new();
        let db = store.ensure_database("bookings").await.unwrap();
        let container = store.ensure_container(&db, &spec()).await.unwrap();

        let item = json!({ "id": "1", "booking_id": "a" });
        store.insert_item(&container, &item).await.unwrap();

        let err = store.insert_item(&container, &item).await.unwrap_err();
        assert!(err.is_conflict());

        // Same id in another partition is a different document
        let other = json!({ "id": "1", "booking_id": "b" });
        store.insert_item(&container, &other).await.unwrap();

        assert_eq!(store.items("bookings", "records"), vec![item, other]);
        assert_eq!(store.insert_attempts(), 3);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = InMemoryStore::new().fail_insert_on(2);
        let db = store.ensure_database("bookings").await.unwrap();
        let container = store.ensure_container(&db, &spec()).await.unwrap();

        let first = json!({ "id": "1", "booking_id": "a" });
        let second = json!({ "id": "2", "booking_id": "b" });
        store.insert_item(&container, &first).await.unwrap();

        let err = store.insert_item(&container, &second).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(store.items("bookings", "records").len(), 1);
    }
}
