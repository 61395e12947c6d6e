//! Bounded line reading
//!
//! Reads input one line at a time into a growable scratch buffer that is
//! reused across lines. There is no fixed line-length ceiling below the
//! configured maximum; a line above the maximum is an explicit error, not a
//! silent truncation. Invalid UTF-8 is replaced rather than failing the
//! run, keeping failure granularity at the line level.

use std::io::BufRead;

use crate::error::{Error, Result};

/// Line reader with a configurable maximum line length
///
/// The returned line borrows the reader's internal buffer; callers must not
/// retain it past the next [`LineReader::next_line`] call.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    max_line_len: usize,
    raw: Vec<u8>,
    text: String,
    line_no: usize,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a buffered reader with the given line-length cap
    pub fn new(inner: R, max_line_len: usize) -> Self {
        Self {
            inner,
            max_line_len,
            raw: Vec::new(),
            text: String::new(),
            line_no: 0,
        }
    }

    /// Read the next line, without its trailing newline
    ///
    /// Returns `Ok(None)` at end of input. Carriage returns before the
    /// newline are stripped. Bytes that are not valid UTF-8 are replaced
    /// with `U+FFFD`.
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        self.raw.clear();
        let read = self.inner.read_until(b'\n', &mut self.raw)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        if self.raw.last() == Some(&b'\n') {
            self.raw.pop();
        }
        if self.raw.last() == Some(&b'\r') {
            self.raw.pop();
        }

        if self.raw.len() > self.max_line_len {
            return Err(Error::LineTooLong {
                line: self.line_no,
                limit: self.max_line_len,
            });
        }

        self.text.clear();
        self.text.push_str(&String::from_utf8_lossy(&self.raw));
        Ok(Some(&self.text))
    }

    /// 1-indexed number of the most recently read line
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}
