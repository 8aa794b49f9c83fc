//! Booking generator producing one record per call.

use crate::record::{BookingRecord, Currency, PropertyLocation};
use crate::source::FakeSource;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// Size of the pre-allocated customer id pool (`1..=100`).
pub const CUSTOMER_POOL_SIZE: u32 = 100;

/// Lower bound of a booking amount.
pub const MIN_AMOUNT: f64 = 50.0;

/// Upper bound of a booking amount.
pub const MAX_AMOUNT: f64 = 1000.0;

/// Shortest stay, in days.
pub const MIN_STAY_DAYS: i64 = 1;

/// Longest stay, in days.
pub const MAX_STAY_DAYS: i64 = 14;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The customer pool was configured empty
    #[error("Customer pool is empty")]
    EmptyCustomerPool,

    /// Date arithmetic left chrono's supported range
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

/// Generator that turns random draws into booking records.
///
/// Draw order per record: `id`, `booking_id`, `property_id`, customer,
/// `owner_id`, check-in date, stay length, booking date, amount, currency,
/// city, country.
pub struct BookingGenerator<S> {
    source: S,
    customer_ids: Vec<u32>,
    index: u64,
}

impl<S: FakeSource> BookingGenerator<S> {
    /// Create a generator with the default customer pool `1..=100`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            customer_ids: (1..=CUSTOMER_POOL_SIZE).collect(),
            index: 0,
        }
    }

    /// Replace the customer id pool.
    pub fn with_customer_pool(mut self, customer_ids: Vec<u32>) -> Self {
        self.customer_ids = customer_ids;
        self
    }

    /// Customer ids a record may be assigned.
    pub fn customer_pool(&self) -> &[u32] {
        &self.customer_ids
    }

    /// Number of records generated so far.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Generate the next booking record.
    ///
    /// `now` stamps the record and fixes the "current year" that the
    /// check-in and booking dates are drawn from (Jan 1 up to `now`'s date).
    pub fn next_record(&mut self, now: NaiveDateTime) -> Result<BookingRecord, GeneratorError> {
        if self.customer_ids.is_empty() {
            return Err(GeneratorError::EmptyCustomerPool);
        }

        let year_start = NaiveDate::from_ymd_opt(now.year(), 1, 1)
            .ok_or_else(|| GeneratorError::DateOutOfRange(format!("year {}", now.year())))?;
        let today = now.date();

        let id = self.source.uuid();
        let booking_id = self.source.uuid();
        let property_id = self.source.uuid();
        let customer_id = self.customer_ids[self.source.index(self.customer_ids.len())];
        let owner_id = self.source.uuid();

        let check_in_date = self.source.date_in(year_start, today);
        let stay_days = self.source.int_in(MIN_STAY_DAYS, MAX_STAY_DAYS);
        let check_out_date = check_in_date
            .checked_add_days(Days::new(stay_days as u64))
            .ok_or_else(|| {
                GeneratorError::DateOutOfRange(format!("{check_in_date} + {stay_days} days"))
            })?;

        // Independent of the stay dates
        let booking_date = self
            .source
            .date_in(year_start, today)
            .and_time(NaiveTime::MIN);

        let amount = round_amount(self.source.float_in(MIN_AMOUNT, MAX_AMOUNT));
        let currency = Currency::ALL[self.source.index(Currency::ALL.len())];
        let property_location = PropertyLocation {
            city: self.source.city(),
            country: self.source.country(),
        };

        self.index += 1;

        Ok(BookingRecord {
            id,
            booking_id,
            property_id,
            customer_id,
            owner_id,
            check_in_date,
            check_out_date,
            booking_date,
            amount,
            currency,
            property_location,
            timestamp: now,
        })
    }

    /// Generate `count` records lazily, all stamped with `now`.
    pub fn records(&mut self, now: NaiveDateTime, count: u64) -> BookingRecordIterator<'_, S> {
        BookingRecordIterator {
            generator: self,
            now,
            remaining: count,
        }
    }
}

/// Round to cents, keeping a scale of exactly 2.
fn round_amount(raw: f64) -> Decimal {
    Decimal::new((raw * 100.0).round() as i64, 2)
}

/// Iterator that lazily generates booking records.
pub struct BookingRecordIterator<'a, S> {
    generator: &'a mut BookingGenerator<S>,
    now: NaiveDateTime,
    remaining: u64,
}

impl<S: FakeSource> Iterator for BookingRecordIterator<'_, S> {
    type Item = Result<BookingRecord, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.next_record(self.now))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl<S: FakeSource> ExactSizeIterator for BookingRecordIterator<'_, S> {}
