//! Error types for the histogram pipeline

use thiserror::Error;

/// Main error type: failures that end the run
///
/// Everything here is fatal by design. Per-line problems (no pattern match,
/// unknown month name, malformed digits) are represented by
/// [`NormalizeError`] and handled by skipping the offending line.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error reading an input file or stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file could not be opened
    #[error("failed to open {}: {source}", path.display())]
    File {
        /// Path of the file that failed to open
        path: std::path::PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// A single input line exceeded the configured maximum length
    ///
    /// Raised instead of silently truncating the line.
    #[error("line {line} exceeds maximum length of {limit} bytes")]
    LineTooLong {
        /// 1-indexed line number within the current input
        line: usize,
        /// The configured maximum line length in bytes
        limit: usize,
    },
}

/// Per-line normalization failures
///
/// All variants are recoverable: the pipeline skips the line, counts the
/// skip, and continues with the next line. None of them may produce a
/// bucket.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A token in month position did not resolve against the short-name table
    #[error("unrecognized month name: '{token}'")]
    UnknownMonth {
        /// The offending token
        token: String,
    },

    /// A field token did not parse as the expected digits
    #[error("malformed {field} field: '{token}'")]
    MalformedField {
        /// Which field was being extracted
        field: &'static str,
        /// The offending token
        token: String,
    },

    /// The matched pattern has no normalization rule
    ///
    /// The ctime layout is recognized but carries no extraction rule, so
    /// lines matching it are skipped rather than guessed at.
    #[error("pattern '{0}' is recognized but not normalized")]
    UnsupportedPattern(&'static str),

    /// Month or day extracted as zero
    ///
    /// A zero field would produce an invalid bucket key, so the line is
    /// rejected instead.
    #[error("zero value in {field} field")]
    ZeroField {
        /// Which field was zero
        field: &'static str,
    },

    /// The truncated key string failed to parse as an integer
    #[error("key '{buffer}' did not parse as an integer")]
    KeyOutOfRange {
        /// The truncated buffer that failed to parse
        buffer: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
