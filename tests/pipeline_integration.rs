//! Integration tests for the full histogram pipeline
//!
//! These tests validate the complete flow over real files:
//! - Timestamp recognition across mixed log formats
//! - Key normalization and granularity truncation
//! - Bucket aggregation across multiple sequential files
//! - Text and JSON rendering of the final store

use std::io::Write;

use tempfile::NamedTempFile;

use loghist::render;
use loghist::types::{Bucket, Granularity};
use loghist::{Pipeline, RunConfig};

// ============================================================================
// Helper Functions
// ============================================================================

/// Write the given lines into a temp file
fn log_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("failed to write temp file");
    }
    file
}

fn pipeline(granularity: Granularity, assumed_year: Option<u16>) -> Pipeline {
    let mut config = RunConfig::new(granularity);
    config.assumed_year = assumed_year;
    Pipeline::new(config)
}

// ============================================================================
// Single-file runs
// ============================================================================

#[test]
fn test_syslog_file_minute_grouping() {
    let file = log_file(&[
        "Dec 1 04:25:01 host sshd[100]: session opened",
        "Dec 1 04:25:01 host sshd[100]: session closed",
        "Dec 1 04:26:00 host cron[7]: job started",
    ]);

    let mut p = pipeline(Granularity::Minute, Some(2012));
    p.process_file(file.path()).unwrap();
    let (buckets, stats) = p.finish();

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0], Bucket { key: 201212010425, count: 2 });
    assert_eq!(buckets[1], Bucket { key: 201212010426, count: 1 });
    assert_eq!(stats.lines_read, 3);
    assert_eq!(stats.matched, 3);
}

#[test]
fn test_mixed_formats_and_noise() {
    let file = log_file(&[
        "12/Dec/2012:23:59:56 GET /index.html",
        "plain line without any timestamp",
        "2012-12-12 23:59:56.500 request handled",
        "[Thu Dec 13 23:43:10 2012 ] [error] unnormalized layout",
    ]);

    let mut p = pipeline(Granularity::Second, None);
    p.process_file(file.path()).unwrap();
    let (buckets, stats) = p.finish();

    // The common-log and ISO lines land in the same second bucket.
    assert_eq!(buckets, vec![Bucket { key: 20121212235956, count: 2 }]);
    assert_eq!(stats.matched, 2);
    assert_eq!(stats.no_match, 1);
    assert_eq!(stats.unsupported, 1);
}

#[test]
fn test_missing_file_is_fatal() {
    let mut p = pipeline(Granularity::Day, None);
    let err = p
        .process_file(std::path::Path::new("/nonexistent/loghist-test.log"))
        .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/loghist-test.log"));
}

// ============================================================================
// Multi-file runs
// ============================================================================

#[test]
fn test_sequential_files_share_the_store() {
    let first = log_file(&[
        "2012-12-01 10:00:00 a",
        "2012-12-01 10:00:00 b",
        "2012-12-01 11:00:00 c",
    ]);
    let second = log_file(&[
        "2012-12-01 12:00:00 d",
        "2012-12-01 12:00:00 e",
    ]);

    let mut p = pipeline(Granularity::Hour, None);
    p.process_file(first.path()).unwrap();
    p.process_file(second.path()).unwrap();
    let (buckets, _) = p.finish();

    let keys: Vec<_> = buckets.iter().map(|b| b.key).collect();
    assert_eq!(keys, vec![2012120110, 2012120111, 2012120112]);
    // Forward time progression across the file boundary: no scans needed.
}

#[test]
fn test_overlapping_files_take_the_scan_path() {
    let first = log_file(&[
        "2012-12-01 10:00:00 a",
        "2012-12-01 11:00:00 b",
    ]);
    let second = log_file(&[
        "2012-12-01 10:00:00 again",
        "2012-12-01 12:00:00 c",
    ]);

    let mut p = pipeline(Granularity::Hour, None);
    p.process_file(first.path()).unwrap();
    p.process_file(second.path()).unwrap();

    assert!(p.aggregator().scan_fallbacks() > 0);
    let (buckets, _) = p.finish();
    assert_eq!(
        buckets,
        vec![
            Bucket { key: 2012120110, count: 2 },
            Bucket { key: 2012120111, count: 1 },
            Bucket { key: 2012120112, count: 1 },
        ]
    );
}

// ============================================================================
// Rendering the final store
// ============================================================================

#[test]
fn test_text_rendering_end_to_end() {
    let file = log_file(&[
        "Dec 1 04:25:01 host foo",
        "Dec 1 04:25:01 host bar",
        "Dec 1 04:26:00 host baz",
    ]);

    let mut p = pipeline(Granularity::Minute, Some(2012));
    p.process_file(file.path()).unwrap();
    let (buckets, _) = p.finish();

    let mut out = Vec::new();
    render::render_text(&mut out, &buckets).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with(&format!("201212010425{}  2\n", "*".repeat(45))));
    assert!(text.contains(&format!("201212010426{}  1\n", "*".repeat(23))));
    assert!(text.contains("buckets: 2"));
    assert!(text.contains("total: 3"));
    assert!(text.contains("max: 2"));
    assert!(text.contains("min: 1"));
    assert!(text.contains("mean: 1"));
}

#[test]
fn test_json_rendering_end_to_end() {
    let file = log_file(&["2011-07-15 11:17:24.101 INFO boot"]);

    let mut p = pipeline(Granularity::Second, None);
    p.process_file(file.path()).unwrap();
    let (buckets, _) = p.finish();

    let mut out = Vec::new();
    render::render_json(&mut out, &buckets).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(value["buckets"][0]["key"], 20110715111724i64);
    assert_eq!(value["buckets"][0]["count"], 1);
    assert_eq!(value["summary"]["buckets"], 1);
}

// ============================================================================
// Granularity truncation across the pipeline
// ============================================================================

#[test]
fn test_granularity_truncation_of_the_same_input() {
    let lines = [
        "12/Dec/2012:23:59:56 GET /",
        "12/Dec/2012:23:59:57 GET /",
    ];

    let keys_at = |granularity: Granularity| {
        let file = log_file(&lines);
        let mut p = pipeline(granularity, None);
        p.process_file(file.path()).unwrap();
        p.finish().0.iter().map(|b| b.key).collect::<Vec<_>>()
    };

    assert_eq!(keys_at(Granularity::Second), vec![20121212235956, 20121212235957]);
    // Both seconds collapse into one bucket from minute granularity up.
    assert_eq!(keys_at(Granularity::Minute), vec![201212122359]);
    assert_eq!(keys_at(Granularity::Hour), vec![2012121223]);
    assert_eq!(keys_at(Granularity::Day), vec![20121212]);
}
