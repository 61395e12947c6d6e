//! Loghist - Timestamp extraction and event-frequency histograms for log files
//!
//! This library extracts timestamps from heterogeneous log lines, normalizes
//! them into comparable integer keys at a chosen granularity, and aggregates
//! per-key event counts for histogram rendering:
//! - Recognition of four common log timestamp layouts (syslog, common log
//!   format, ctime, ISO date-time)
//! - Normalization into fixed-width `YYYYMMDDhhmmss` keys with explicit
//!   parse-error propagation
//! - Arrival-ordered bucket aggregation optimized for time-ordered input
//! - Star-bar histogram rendering with text and JSON output

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod normalize;
pub mod recognize;
pub mod render;
pub mod types;

/// Bounded line reading over files and standard input
pub mod reader;

/// Per-line recognize -> normalize -> aggregate driver
pub mod pipeline;

// Re-export main types
pub use aggregate::Aggregator;
pub use config::RunConfig;
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineStats};
pub use types::{Bucket, Granularity, TimeKey};

#[cfg(test)]
mod tests {
    #[test]
    fn test_basic_sanity() {
        assert_eq!(2 + 2, 4);
    }
}
