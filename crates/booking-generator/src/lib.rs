//! Synthetic booking record generator for booking-seed.
//!
//! This crate provides the [`BookingGenerator`] which produces one
//! [`BookingRecord`] per call. All randomness is drawn from a [`FakeSource`],
//! so a seeded source gives reproducible records and a scripted source lets
//! tests assert exact output.
//!
//! # Architecture
//!
//! ```text
//!   FakeSource (SeededFakeSource<StdRng> | scripted)
//!        │
//!        ▼
//! ┌────────────────────┐
//! │  BookingGenerator  │
//! │                    │
//! │  - source          │
//! │  - customer pool   │
//! │  - index           │
//! └─────────┬──────────┘
//!           │
//!           ▼
//!    BookingRecord { id, booking_id, ..., timestamp }
//! ```
//!
//! # Example
//!
//! ```rust
//! use booking_generator::{BookingGenerator, SeededFakeSource};
//!
//! let now = chrono::NaiveDate::from_ymd_opt(2024, 6, 15)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//!
//! let mut generator = BookingGenerator::new(SeededFakeSource::new(42));
//! let record = generator.next_record(now).unwrap();
//! assert!((1..=100).contains(&record.customer_id));
//! ```

pub mod generator;
pub mod record;
pub mod source;

// Re-exports for convenience
pub use generator::{BookingGenerator, BookingRecordIterator, GeneratorError};
pub use record::{BookingRecord, Currency, PropertyLocation};
pub use source::{FakeSource, SeededFakeSource};
