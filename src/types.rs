//! Core data types shared across the histogram pipeline
//!
//! # Key Types
//!
//! - **`TimeKey`**: a timestamp truncated to a granularity, as an integer
//! - **`Granularity`**: the truncation resolution chosen once per run
//! - **`Bucket`**: a (key, count) pair tracking recognized lines per slot

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer timestamp truncated to a chosen granularity
///
/// Formed by parsing a fixed-width decimal prefix of a `YYYYMMDDhhmmss`
/// string: 14 digits at second granularity down to 8 at day granularity.
/// Always non-negative for valid input.
///
/// Keys are only comparable within a single granularity; comparing keys
/// built under different granularities is undefined.
///
/// # Example
///
/// ```rust
/// use loghist::types::TimeKey;
///
/// let key: TimeKey = 20121212235956; // 2012-12-12 23:59:56 at second granularity
/// ```
pub type TimeKey = i64;

/// Truncation resolution for time keys
///
/// Exactly one granularity is selected per run and is immutable for the
/// run's lifetime. It controls how many leading digits of the
/// `YYYYMMDDhhmmss` buffer survive into the [`TimeKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Group events by second (14-digit keys)
    Second,
    /// Group events by minute (12-digit keys)
    Minute,
    /// Group events by hour (10-digit keys)
    Hour,
    /// Group events by day (8-digit keys)
    Day,
}

impl Granularity {
    /// Number of leading digits of the 14-character buffer that survive
    /// truncation at this granularity
    pub fn digits(&self) -> usize {
        match self {
            Granularity::Second => 14,
            Granularity::Minute => 12,
            Granularity::Hour => 10,
            Granularity::Day => 8,
        }
    }

    /// Divisor relating a second-granularity key to one at this granularity
    ///
    /// For any timestamp, `key(g) == key(Second) / g.divisor()` under
    /// integer truncation.
    pub fn divisor(&self) -> i64 {
        match self {
            Granularity::Second => 1,
            Granularity::Minute => 100,
            Granularity::Hour => 10_000,
            Granularity::Day => 1_000_000,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Second => write!(f, "second"),
            Granularity::Minute => write!(f, "minute"),
            Granularity::Hour => write!(f, "hour"),
            Granularity::Day => write!(f, "day"),
        }
    }
}

/// A single histogram bucket: one time slot and its event count
///
/// Created on the first occurrence of a [`TimeKey`], never removed, and
/// mutated only by incrementing `count` on repeat occurrences. `count` is
/// therefore always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// The truncated time key identifying this slot
    pub key: TimeKey,

    /// Number of recognized log lines that fell into this slot
    pub count: u64,
}

impl Bucket {
    /// Create a bucket for the first occurrence of `key`
    pub fn new(key: TimeKey) -> Self {
        Self { key, count: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_digits() {
        assert_eq!(Granularity::Second.digits(), 14);
        assert_eq!(Granularity::Minute.digits(), 12);
        assert_eq!(Granularity::Hour.digits(), 10);
        assert_eq!(Granularity::Day.digits(), 8);
    }

    #[test]
    fn test_granularity_divisor_matches_digits() {
        for g in [
            Granularity::Second,
            Granularity::Minute,
            Granularity::Hour,
            Granularity::Day,
        ] {
            let dropped = 14 - g.digits();
            assert_eq!(g.divisor(), 10i64.pow(dropped as u32));
        }
    }

    #[test]
    fn test_granularity_display() {
        assert_eq!(Granularity::Minute.to_string(), "minute");
        assert_eq!(Granularity::Day.to_string(), "day");
    }

    #[test]
    fn test_bucket_new_starts_at_one() {
        let bucket = Bucket::new(20121212235956);
        assert_eq!(bucket.key, 20121212235956);
        assert_eq!(bucket.count, 1);
    }
}
