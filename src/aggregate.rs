//! Frequency Aggregator
//!
//! Maintains the run's bucket store: an arrival-ordered, deduplicated
//! sequence of (time key, count) pairs. The insert policy is asymmetric on
//! purpose: log input is expected to be time-ordered, so the common case
//! compares only against the most recent bucket and never scans. Only
//! non-monotonic input (overlapping files, clock skew) pays a linear scan
//! over the store.

use crate::types::{Bucket, Granularity, TimeKey};

/// Buckets reserved per capacity-growth step
///
/// Capacity grows in fixed-size batches rather than element-at-a-time to
/// bound reallocation frequency on large runs.
const BUCKET_BATCH: usize = 1024;

/// Owns the bucket store for a single run
///
/// Exactly one writer, no concurrent readers while the run is in progress.
/// Buckets are appended in arrival order and never removed; only their
/// counts are mutated in place.
#[derive(Debug)]
pub struct Aggregator {
    /// Arrival-ordered bucket store
    buckets: Vec<Bucket>,

    /// Granularity the run's keys were built under
    granularity: Granularity,

    /// Number of inserts that took the linear-scan fallback
    scan_fallbacks: u64,

    /// Total keys inserted
    total_inserts: u64,
}

impl Aggregator {
    /// Create an empty aggregator for a run at the given granularity
    pub fn new(granularity: Granularity) -> Self {
        Self {
            buckets: Vec::new(),
            granularity,
            scan_fallbacks: 0,
            total_inserts: 0,
        }
    }

    /// Record one occurrence of a time key
    ///
    /// Amortized O(1) for time-ordered input; O(n) only when the key sorts
    /// before the most recently inserted bucket.
    pub fn insert(&mut self, key: TimeKey) {
        self.total_inserts += 1;

        let last_key = match self.buckets.last() {
            None => {
                self.push_bucket(key);
                return;
            }
            Some(last) => last.key,
        };

        if key == last_key {
            if let Some(last) = self.buckets.last_mut() {
                last.count += 1;
            }
        } else if key > last_key {
            self.push_bucket(key);
        } else {
            // Out-of-order input: the key may belong to any earlier bucket.
            self.scan_fallbacks += 1;
            match self.buckets.iter_mut().find(|b| b.key == key) {
                Some(bucket) => bucket.count += 1,
                None => self.push_bucket(key),
            }
        }
    }

    /// Append a new bucket, growing capacity in fixed batches
    fn push_bucket(&mut self, key: TimeKey) {
        if self.buckets.len() == self.buckets.capacity() {
            self.buckets.reserve(BUCKET_BATCH);
        }
        self.buckets.push(Bucket::new(key));
    }

    /// The bucket store, in arrival order
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Consume the aggregator, yielding the bucket store
    pub fn into_buckets(self) -> Vec<Bucket> {
        self.buckets
    }

    /// Granularity the run's keys were built under
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Number of distinct buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when no key has been inserted yet
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total keys inserted across all buckets
    pub fn total_count(&self) -> u64 {
        self.total_inserts
    }

    /// Number of inserts that fell back to a linear scan
    ///
    /// Stays zero for strictly time-ordered input.
    pub fn scan_fallbacks(&self) -> u64 {
        self.scan_fallbacks
    }
}
