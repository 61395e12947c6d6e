//! Per-line processing pipeline
//!
//! Drives recognize -> normalize -> aggregate for each input line. Each
//! line completes the whole pipeline before the next is read; files are
//! processed strictly sequentially. Per-line failures skip the line and are
//! counted; only I/O failures end the run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::Aggregator;
use crate::config::RunConfig;
use crate::error::{NormalizeError, Result};
use crate::normalize;
use crate::reader::LineReader;
use crate::recognize;
use crate::types::Bucket;

/// Counters describing what happened to the run's input lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Lines read across all inputs
    pub lines_read: u64,
    /// Lines whose timestamp produced a bucket key
    pub matched: u64,
    /// Lines matching no pattern (silently skipped by design)
    pub no_match: u64,
    /// Lines matching the recognized-but-unnormalized ctime layout
    pub unsupported: u64,
    /// Lines rejected during field extraction or key conversion
    pub invalid: u64,
    /// Matched lines whose layout carries no year while no assumed year is
    /// configured; their buckets render with year `0000`
    pub year_ambiguous: u64,
}

/// One run's pipeline: configuration, aggregator, and counters
#[derive(Debug)]
pub struct Pipeline {
    config: RunConfig,
    aggregator: Aggregator,
    stats: PipelineStats,
}

impl Pipeline {
    /// Create a pipeline for a configured run
    pub fn new(config: RunConfig) -> Self {
        let aggregator = Aggregator::new(config.granularity);
        Self {
            config,
            aggregator,
            stats: PipelineStats::default(),
        }
    }

    /// Run one line through recognition, normalization and aggregation
    ///
    /// Never fails: every per-line problem is counted and skipped.
    pub fn process_line(&mut self, line: &str) {
        self.stats.lines_read += 1;

        let matched = match recognize::recognize(line) {
            Some(m) => m,
            None => {
                self.stats.no_match += 1;
                debug!(line, "no timestamp pattern matched");
                return;
            }
        };

        let fields = match normalize::extract(&matched) {
            Ok(fields) => fields,
            Err(NormalizeError::UnsupportedPattern(name)) => {
                self.stats.unsupported += 1;
                debug!(pattern = name, line, "skipping unsupported pattern");
                return;
            }
            Err(e) => {
                self.stats.invalid += 1;
                debug!(error = %e, line, "skipping line");
                return;
            }
        };

        let key = match fields.key(self.config.granularity, self.config.assumed_year) {
            Ok(key) => key,
            Err(e) => {
                self.stats.invalid += 1;
                debug!(error = %e, line, "skipping line");
                return;
            }
        };

        if fields.year.is_none() && self.config.assumed_year.is_none() {
            self.stats.year_ambiguous += 1;
        }

        self.stats.matched += 1;
        self.aggregator.insert(key);
    }

    /// Process every line of a buffered reader
    pub fn process_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut lines = LineReader::new(reader, self.config.max_line_len);
        while let Some(line) = lines.next_line()? {
            self.process_line(line);
        }
        Ok(())
    }

    /// Open and process one log file
    pub fn process_file(&mut self, path: &Path) -> Result<()> {
        if self.config.verbose {
            info!(file = %path.display(), "parsing");
        }
        let file = File::open(path).map_err(|source| crate::error::Error::File {
            path: path.to_path_buf(),
            source,
        })?;
        self.process_reader(BufReader::new(file))
    }

    /// The bucket store accumulated so far, in arrival order
    pub fn buckets(&self) -> &[Bucket] {
        self.aggregator.buckets()
    }

    /// Counters for the run so far
    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Borrow the underlying aggregator (instrumentation access)
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Finish the run, yielding the bucket store and final counters
    pub fn finish(self) -> (Vec<Bucket>, PipelineStats) {
        (self.aggregator.into_buckets(), self.stats)
    }
}
