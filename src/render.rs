//! Histogram Renderer
//!
//! Scales bucket counts into a bounded-width star bar chart and prints a
//! summary of the run. Output is either plain text or JSON.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::types::Bucket;

/// Widest bar emitted, in stars
///
/// The bucket with the highest count renders at this width; every other
/// bar scales proportionally.
pub const MAX_BAR_WIDTH: u64 = 45;

/// Aggregate statistics over the final bucket store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of distinct buckets
    pub buckets: usize,
    /// Total count across all buckets
    pub total: u64,
    /// Largest single-bucket count
    pub max: u64,
    /// Smallest single-bucket count
    pub min: u64,
    /// Arithmetic mean of bucket counts, integer-truncated
    pub mean: u64,
}

impl Summary {
    /// Compute the summary, or `None` for an empty store
    pub fn from_buckets(buckets: &[Bucket]) -> Option<Self> {
        if buckets.is_empty() {
            return None;
        }

        let mut max = 0u64;
        let mut min = u64::MAX;
        let mut total = 0u64;
        for bucket in buckets {
            max = max.max(bucket.count);
            min = min.min(bucket.count);
            total += bucket.count;
        }

        Some(Self {
            buckets: buckets.len(),
            total,
            max,
            min,
            mean: total / buckets.len() as u64,
        })
    }
}

/// Bar width for one bucket: `round(count * 45 / max_count)`
fn bar_width(count: u64, max_count: u64) -> u64 {
    if max_count == 0 {
        return 0;
    }
    // Round half up without going through floats.
    (count * MAX_BAR_WIDTH * 2 + max_count) / (max_count * 2)
}

/// Render the text histogram and summary block
///
/// One line per bucket, in store (arrival) order:
/// `<TimeKey><bar of N stars>  <count>`.
pub fn render_text<W: Write>(out: &mut W, buckets: &[Bucket]) -> io::Result<()> {
    let summary = match Summary::from_buckets(buckets) {
        Some(summary) => summary,
        None => {
            writeln!(out, "no timestamps recognized")?;
            return Ok(());
        }
    };

    for bucket in buckets {
        let width = bar_width(bucket.count, summary.max);
        writeln!(
            out,
            "{}{}  {}",
            bucket.key,
            "*".repeat(width as usize),
            bucket.count
        )?;
    }

    writeln!(out)?;
    writeln!(out, "buckets: {}", summary.buckets)?;
    writeln!(out, "total: {}", summary.total)?;
    writeln!(out, "max: {}", summary.max)?;
    writeln!(out, "min: {}", summary.min)?;
    writeln!(out, "mean: {}", summary.mean)?;
    Ok(())
}

/// Render the bucket store and summary as pretty-printed JSON
pub fn render_json<W: Write>(out: &mut W, buckets: &[Bucket]) -> io::Result<()> {
    let report = serde_json::json!({
        "buckets": buckets,
        "summary": Summary::from_buckets(buckets),
    });
    let rendered = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{}", rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(key: i64, count: u64) -> Bucket {
        Bucket { key, count }
    }

    #[test]
    fn test_bar_width_scaling() {
        // The maximum count always renders at full width.
        assert_eq!(bar_width(10, 10), 45);
        // Half the maximum rounds to half the width, rounded half up.
        assert_eq!(bar_width(5, 10), 23);
        // A count of 1 against a large max still rounds to something sane.
        assert_eq!(bar_width(1, 45), 1);
        assert_eq!(bar_width(1, 90), 1);
        assert_eq!(bar_width(1, 91), 0);
    }

    #[test]
    fn test_summary() {
        let buckets = [bucket(1, 2), bucket(2, 1), bucket(3, 6)];
        let summary = Summary::from_buckets(&buckets).unwrap();
        assert_eq!(summary.buckets, 3);
        assert_eq!(summary.total, 9);
        assert_eq!(summary.max, 6);
        assert_eq!(summary.min, 1);
        assert_eq!(summary.mean, 3);
    }

    #[test]
    fn test_summary_mean_truncates() {
        let buckets = [bucket(1, 2), bucket(2, 3)];
        let summary = Summary::from_buckets(&buckets).unwrap();
        assert_eq!(summary.mean, 2); // 5 / 2, truncated
    }

    #[test]
    fn test_summary_empty() {
        assert!(Summary::from_buckets(&[]).is_none());
    }

    #[test]
    fn test_render_text_layout() {
        let buckets = [bucket(201212120425, 2), bucket(201212120426, 1)];
        let mut out = Vec::new();
        render_text(&mut out, &buckets).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            format!("201212120425{}  2", "*".repeat(45))
        );
        assert_eq!(
            lines.next().unwrap(),
            format!("201212120426{}  1", "*".repeat(23))
        );
        assert!(text.contains("total: 3"));
        assert!(text.contains("mean: 1"));
    }

    #[test]
    fn test_render_text_empty() {
        let mut out = Vec::new();
        render_text(&mut out, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("no timestamps recognized"));
    }

    #[test]
    fn test_render_json_shape() {
        let buckets = [bucket(20121212, 4)];
        let mut out = Vec::new();
        render_json(&mut out, &buckets).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["buckets"][0]["key"], 20121212);
        assert_eq!(value["buckets"][0]["count"], 4);
        assert_eq!(value["summary"]["total"], 4);
        assert_eq!(value["summary"]["max"], 4);
    }
}
