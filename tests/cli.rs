//! Tests that drive the booking-seed binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Execute booking-seed in `dir` and return the output
fn execute_booking_seed(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_booking-seed"))
        .current_dir(dir)
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("Failed to run booking-seed")
}

fn write_config(dir: &TempDir, content: &str) {
    std::fs::write(dir.path().join("config.yaml"), content).unwrap();
}

#[test]
fn test_records_flag_required() {
    let dir = tempfile::tempdir().unwrap();
    let output = execute_booking_seed(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--records"));
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = execute_booking_seed(dir.path(), &["--records", "1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}

#[test]
fn test_config_without_key() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        &dir,
        r#"
cosmosdb:
  url: http://127.0.0.1:1/
  database_name: bookings
  database_container_name: records
"#,
    );

    let output = execute_booking_seed(dir.path(), &["--records", "3"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing field `key`"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Inserted record"));
}

#[test]
fn test_unreachable_account_fails_provisioning() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        &dir,
        r#"
cosmosdb:
  url: http://127.0.0.1:1/
  key: Ym9va2luZy1zZWVkLXRlc3Qta2V5LTAxMjM0NTY3ODk=
  database_name: bookings
  database_container_name: records
"#,
    );

    let output = execute_booking_seed(dir.path(), &["--records", "0"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to provision"));
}
