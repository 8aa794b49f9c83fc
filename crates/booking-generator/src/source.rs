//! Sources of randomness for record generation.

use chrono::{Days, NaiveDate};
use fake::faker::address::en::{CityName, CountryName};
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Every random draw the generator makes goes through this trait.
///
/// Implement it with scripted values to get exact, predictable records.
pub trait FakeSource {
    /// A fresh version 4 UUID.
    fn uuid(&mut self) -> Uuid;

    /// A uniform index into a collection of `len` elements (`len > 0`).
    fn index(&mut self, len: usize) -> usize;

    /// A uniform integer in `min..=max`.
    fn int_in(&mut self, min: i64, max: i64) -> i64;

    /// A uniform float in `min..=max`.
    fn float_in(&mut self, min: f64, max: f64) -> f64;

    /// A uniform date in `start..=end`.
    ///
    /// Returns `start` when the range is empty.
    fn date_in(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let span = (end - start).num_days();
        if span <= 0 {
            return start;
        }
        let offset = self.int_in(0, span);
        start
            .checked_add_days(Days::new(offset as u64))
            .unwrap_or(end)
    }

    /// A fake city name.
    fn city(&mut self) -> String;

    /// A fake country name.
    fn country(&mut self) -> String;
}

/// [`FakeSource`] backed by a `rand` RNG and the `fake` crate.
///
/// The same seed produces the same sequence of values.
pub struct SeededFakeSource<R = StdRng> {
    rng: R,
}

impl SeededFakeSource<StdRng> {
    /// Create a source with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> SeededFakeSource<R> {
    /// Wrap an existing RNG.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> FakeSource for SeededFakeSource<R> {
    fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes);

        // Set version (4) and variant (RFC 4122) bits
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        Uuid::from_bytes(bytes)
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn int_in(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    fn float_in(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..=max)
    }

    fn city(&mut self) -> String {
        CityName().fake_with_rng(&mut self.rng)
    }

    fn country(&mut self) -> String {
        CountryName().fake_with_rng(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_version() {
        let mut source = SeededFakeSource::new(42);
        let uuid = source.uuid();
        assert_eq!(uuid.get_version_num(), 4);
        assert_ne!(uuid, source.uuid());
    }

    #[test]
    fn test_deterministic_values() {
        let mut a = SeededFakeSource::new(7);
        let mut b = SeededFakeSource::new(7);

        assert_eq!(a.uuid(), b.uuid());
        assert_eq!(a.int_in(1, 1000), b.int_in(1, 1000));
        assert_eq!(a.city(), b.city());
        assert_eq!(a.country(), b.country());
    }

    #[test]
    fn test_int_and_float_ranges() {
        let mut source = SeededFakeSource::new(42);

        for _ in 0..500 {
            assert!((1..=14).contains(&source.int_in(1, 14)));
            assert!((50.0..=1000.0).contains(&source.float_in(50.0, 1000.0)));
            assert!(source.index(4) < 4);
        }
    }

    #[test]
    fn test_date_in_range() {
        let mut source = SeededFakeSource::new(42);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        for _ in 0..500 {
            let date = source.date_in(start, end);
            assert!(date >= start && date <= end);
        }
    }

    #[test]
    fn test_date_in_single_day() {
        let mut source = SeededFakeSource::new(42);
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(source.date_in(day, day), day);
    }

    #[test]
    fn test_place_names_not_empty() {
        let mut source = SeededFakeSource::new(42);
        assert!(!source.city().is_empty());
        assert!(!source.country().is_empty());
    }
}
