//! End-to-end seeding scenarios against the in-memory store.

use booking_seed::{run_populate, seed_bookings, Config, ConfigError};
use cosmosdb_client::{CosmosError, InMemoryStore, StoreCall};
use cosmosdb_populate::PopulateArgs;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::time::Instant;

const CONFIG: &str = r#"
cosmosdb:
  url: http://127.0.0.1:1/
  key: Ym9va2luZy1zZWVkLXRlc3Qta2V5LTAxMjM0NTY3ODk=
  database_name: bookings
  database_container_name: records
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test(start_paused = true)]
async fn test_three_records_against_fresh_store() {
    let config = Config::from_yaml(CONFIG).unwrap();
    let store = InMemoryStore::new();

    let started = Instant::now();
    let metrics = seed_bookings(&store, &config.cosmosdb, 3).await.unwrap();

    assert_eq!(metrics.records_inserted, 3);
    assert!(started.elapsed() >= Duration::from_secs(15));

    let calls = store.calls();
    assert_eq!(
        calls[..2],
        [
            StoreCall::EnsureDatabase {
                id: "bookings".to_string(),
                created: true
            },
            StoreCall::EnsureContainer {
                id: "records".to_string(),
                created: true
            },
        ]
    );
    assert_eq!(calls.len(), 5);
    assert_eq!(store.insert_attempts(), 3);

    let spec = store.container_spec("bookings", "records").unwrap();
    assert_eq!(spec.partition_key_path, "/booking_id");
    assert_eq!(spec.throughput, 200);

    for item in store.items("bookings", "records") {
        let customer_id = item["customer_id"].as_u64().unwrap();
        assert!((1..=100).contains(&customer_id));
        assert!(["USD", "EUR", "GBP", "CAD"].contains(&item["currency"].as_str().unwrap()));
        assert_ne!(item["id"], item["booking_id"]);
    }
}

#[tokio::test(start_paused = true)]
async fn test_second_insert_failure_stops_run() {
    let config = Config::from_yaml(CONFIG).unwrap();
    let store = InMemoryStore::new().fail_insert_on(2);

    let err = seed_bookings(&store, &config.cosmosdb, 3).await.unwrap_err();

    assert!(format!("{err:#}").contains("Insert of record 2 failed"));
    assert_eq!(store.insert_attempts(), 2);
    assert_eq!(store.items("bookings", "records").len(), 1);
}

#[tokio::test]
async fn test_missing_key_fails_before_provisioning() {
    let file = write_config(
        r#"
cosmosdb:
  url: http://127.0.0.1:1/
  database_name: bookings
  database_container_name: records
"#,
    );

    let args = PopulateArgs { records: 3 };
    let err = run_populate(&args, file.path()).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Parse(_))
    ));
    assert!(format!("{err:#}").contains("missing field `key`"));
}

#[tokio::test]
async fn test_invalid_key_fails_before_provisioning() {
    let file = write_config(&CONFIG.replace(
        "Ym9va2luZy1zZWVkLXRlc3Qta2V5LTAxMjM0NTY3ODk=",
        "not-base64!",
    ));

    let args = PopulateArgs { records: 1 };
    let err = run_populate(&args, file.path()).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CosmosError>(),
        Some(CosmosError::InvalidKey(_))
    ));
}

#[tokio::test]
async fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let args = PopulateArgs { records: 1 };

    let err = run_populate(&args, &dir.path().join("config.yaml"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Read { .. })
    ));
}
