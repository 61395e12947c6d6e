//! Run configuration
//!
//! A run is configured once, up front, and the configuration is immutable
//! for the run's lifetime. The CLI builds a [`RunConfig`] from its flags;
//! library callers construct one directly.

use serde::{Deserialize, Serialize};

use crate::types::Granularity;

/// Configuration for a single histogram run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunConfig {
    /// Grouping granularity (exactly one per run)
    pub granularity: Granularity,

    /// Year to assume for timestamp layouts that carry no year
    ///
    /// The syslog layout (`Dec  1 04:25:01`) has no year field. When this is
    /// set, such timestamps render with the given year; when unset they
    /// render with year `0000` and the run's stats count them as
    /// year-ambiguous.
    #[serde(default)]
    pub assumed_year: Option<u16>,

    /// Print per-file progress while running
    #[serde(default)]
    pub verbose: bool,

    /// Maximum accepted length of a single input line, in bytes
    ///
    /// Lines above this limit end the run with an explicit error rather
    /// than being silently truncated.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,

    /// Include-filter pattern: accepted but not applied
    #[serde(default)]
    pub include: Option<String>,

    /// Exclude-filter pattern: accepted but not applied
    #[serde(default)]
    pub exclude: Option<String>,

    /// User-supplied time format: accepted but not applied
    #[serde(default)]
    pub time_format: Option<String>,
}

// Default value functions
fn default_max_line_len() -> usize {
    1024 * 1024
}

impl RunConfig {
    /// Create a configuration with defaults for everything but granularity
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            assumed_year: None,
            verbose: false,
            max_line_len: default_max_line_len(),
            include: None,
            exclude: None,
            time_format: None,
        }
    }

    /// Set the assumed year for year-less timestamp layouts
    pub fn with_assumed_year(mut self, year: u16) -> Self {
        self.assumed_year = Some(year);
        self
    }
}
