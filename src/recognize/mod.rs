//! Format Recognizer
//!
//! Detects one of four known log timestamp layouts in free-form text.
//! Patterns are tried in a fixed priority order and the first match wins;
//! the patterns are not mutually exclusive, so order is part of the
//! contract.
//!
//! # Recognized layouts
//!
//! | Priority | Kind        | Example                      |
//! |----------|-------------|------------------------------|
//! | 1        | `Syslog`    | `Dec  1 04:25:01` (line start) |
//! | 2        | `CommonLog` | `12/Dec/2012:23:59:56`       |
//! | 3        | `Ctime`     | `Thu Dec 13 23:43:10 2012 `  |
//! | 4        | `Iso`       | `2011-07-15 11:17:24.101`    |
//!
//! A line matching none of the patterns carries no timestamp and is
//! excluded from aggregation; that is not an error.

mod month;

pub use month::month_number;

use lazy_static::lazy_static;
use regex::Regex;

/// Identifier for a recognized timestamp layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// `Mon D[D] HH:MM:SS` anchored at line start, optional trailing colon.
    /// Carries no year field.
    Syslog,
    /// Apache common log format, `DD/Mon/YYYY:HH:MM:SS`, anywhere in line
    CommonLog,
    /// `Mon DD HH:MM:SS YYYY `, anywhere in line. Recognized but carries no
    /// normalization rule; matching lines are skipped downstream.
    Ctime,
    /// `YYYY-MM-DD HH:MM:SS`, anywhere in line. A fractional-second suffix
    /// falls outside the match.
    Iso,
}

impl PatternKind {
    /// Stable name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Syslog => "syslog",
            PatternKind::CommonLog => "common-log",
            PatternKind::Ctime => "ctime",
            PatternKind::Iso => "iso",
        }
    }
}

lazy_static! {
    /// The process-wide pattern table, in priority order
    ///
    /// Compiled once, read-only afterward. Layouts mirror the classic
    /// syslog / Apache access / ctime / ISO timestamp shapes.
    static ref PATTERNS: [(PatternKind, Regex); 4] = [
        (
            PatternKind::Syslog,
            Regex::new(r"^[A-Za-z][a-z][a-z] {1,2}[0-9]{1,2} [0-9][0-9]:[0-5][0-9]:[0-5][0-9]:? ")
                .expect("syslog timestamp pattern"),
        ),
        (
            PatternKind::CommonLog,
            Regex::new(r"[0-9]{1,2}/[A-Za-z][a-z][a-z]/[0-9]{4}:[0-9]{2}:[0-5][0-9]:[0-5][0-9]")
                .expect("common log timestamp pattern"),
        ),
        (
            PatternKind::Ctime,
            Regex::new(r"[A-Za-z][a-z][a-z] [0-9]{1,2} [0-9]{2}:[0-5][0-9]:[0-5][0-9] [0-9]{4} ")
                .expect("ctime timestamp pattern"),
        ),
        (
            PatternKind::Iso,
            Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-5][0-9]:[0-5][0-9]")
                .expect("iso timestamp pattern"),
        ),
    ];
}

/// A timestamp found within a line of text
///
/// Borrows the matched span from the input line; the line itself is never
/// mutated. The span is bounded exactly by the pattern match, so fixed
/// character offsets within `text` are meaningful to the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampMatch<'a> {
    /// Which pattern matched
    pub kind: PatternKind,
    /// Byte offset of the match start within the line
    pub start: usize,
    /// Byte offset one past the match end within the line
    pub end: usize,
    /// The matched span itself
    pub text: &'a str,
}

/// Try each pattern in priority order against a line
///
/// Returns the first match, or `None` when the line carries no recognized
/// timestamp.
///
/// # Example
///
/// ```rust
/// use loghist::recognize::{recognize, PatternKind};
///
/// let found = recognize("12/Dec/2012:23:59:56 GET /index.html").unwrap();
/// assert_eq!(found.kind, PatternKind::CommonLog);
/// assert_eq!(found.text, "12/Dec/2012:23:59:56");
/// ```
pub fn recognize(line: &str) -> Option<TimestampMatch<'_>> {
    for (kind, pattern) in PATTERNS.iter() {
        if let Some(m) = pattern.find(line) {
            return Some(TimestampMatch {
                kind: *kind,
                start: m.start(),
                end: m.end(),
                text: m.as_str(),
            });
        }
    }
    None
}
