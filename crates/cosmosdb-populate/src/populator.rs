//! Cosmos DB populator for booking records.

use crate::error::PopulateError;
use booking_generator::{BookingGenerator, FakeSource};
use chrono::Local;
use cosmosdb_client::{ContainerRef, ContainerSpec, DocumentStore};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// Partition key path of the bookings container.
pub const PARTITION_KEY_PATH: &str = "/booking_id";

/// Throughput provisioned when the container is created, in RU/s.
pub const CONTAINER_THROUGHPUT: u32 = 200;

/// Pause after every insert.
pub const INSERT_DELAY: Duration = Duration::from_secs(5);

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of records inserted.
    pub records_inserted: u64,
    /// Total time taken, pauses included.
    pub total_duration: Duration,
    /// Time spent waiting on inserts.
    pub insert_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Where a populate run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulateState {
    NotStarted,
    /// Working on the 1-based `iteration`.
    Running { iteration: u64 },
    Completed { inserted: u64 },
    /// An iteration failed after `inserted` successful inserts.
    Aborted { inserted: u64 },
}

/// Populator that generates bookings and inserts them one by one.
pub struct CosmosDBPopulator<S, F> {
    store: S,
    container: ContainerRef,
    generator: BookingGenerator<F>,
    delay: Duration,
    state: PopulateState,
}

impl<S: DocumentStore, F: FakeSource> CosmosDBPopulator<S, F> {
    /// Ensure the database and container exist, then build a populator
    /// targeting them.
    ///
    /// The container is created partitioned on [`PARTITION_KEY_PATH`] with
    /// [`CONTAINER_THROUGHPUT`] RU/s; an existing one is used as is.
    pub async fn provision(
        store: S,
        database_name: &str,
        container_name: &str,
        generator: BookingGenerator<F>,
    ) -> Result<Self, PopulateError> {
        let database = store
            .ensure_database(database_name)
            .await
            .map_err(PopulateError::Provision)?;

        let spec = ContainerSpec {
            id: container_name.to_string(),
            partition_key_path: PARTITION_KEY_PATH.to_string(),
            throughput: CONTAINER_THROUGHPUT,
        };
        let container = store
            .ensure_container(&database, &spec)
            .await
            .map_err(PopulateError::Provision)?;

        info!(
            "Using container '{}' in database '{}'",
            container.id, container.database
        );

        Ok(Self::new(store, container, generator))
    }

    /// Create a populator for a container that is known to exist.
    pub fn new(store: S, container: ContainerRef, generator: BookingGenerator<F>) -> Self {
        Self {
            store,
            container,
            generator,
            delay: INSERT_DELAY,
            state: PopulateState::NotStarted,
        }
    }

    /// Set the pause after each insert.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn state(&self) -> PopulateState {
        self.state
    }

    pub fn container(&self) -> &ContainerRef {
        &self.container
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert `count` freshly generated records, one at a time.
    ///
    /// Each record is logged after its insert succeeds, then the populator
    /// sleeps for the configured delay. The first failure stops the run and
    /// is returned; nothing is retried.
    pub async fn populate(&mut self, count: u64) -> Result<PopulateMetrics, PopulateError> {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();

        info!(
            "Inserting {} records into '{}' ({:?} between inserts)",
            count, self.container.id, self.delay
        );

        for iteration in 1..=count {
            self.state = PopulateState::Running { iteration };

            if let Err(e) = self.insert_next(iteration, &mut metrics).await {
                self.state = PopulateState::Aborted {
                    inserted: metrics.records_inserted,
                };
                error!(
                    "Stopping after {} of {} records: {}",
                    metrics.records_inserted, count, e
                );
                return Err(e);
            }

            tokio::time::sleep(self.delay).await;
        }

        self.state = PopulateState::Completed {
            inserted: metrics.records_inserted,
        };
        metrics.total_duration = start_time.elapsed();

        info!(
            "Population complete: {} records in {:?} ({:.2} records/sec)",
            metrics.records_inserted,
            metrics.total_duration,
            metrics.records_per_second()
        );

        Ok(metrics)
    }

    async fn insert_next(
        &mut self,
        iteration: u64,
        metrics: &mut PopulateMetrics,
    ) -> Result<(), PopulateError> {
        let record = self.generator.next_record(Local::now().naive_local())?;
        let document = record.to_document()?;

        debug!("Inserting record {} (id {})", iteration, record.id);

        let insert_start = Instant::now();
        self.store
            .insert_item(&self.container, &document)
            .await
            .map_err(|source| PopulateError::Insert { iteration, source })?;
        metrics.insert_duration += insert_start.elapsed();
        metrics.records_inserted += 1;

        info!("Inserted record: {}", document);

        Ok(())
    }
}
