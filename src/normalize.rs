//! Field Normalizer
//!
//! Turns a recognized timestamp span into named date/time fields, renders
//! them as a fixed-width `YYYYMMDDhhmmss` buffer, and truncates that buffer
//! into an integer [`TimeKey`] at the run's granularity.
//!
//! Every token parse is checked: a malformed field is a per-line
//! [`NormalizeError`], never a silent zero.

use crate::error::NormalizeError;
use crate::recognize::{month_number, PatternKind, TimestampMatch};
use crate::types::{Granularity, TimeKey};

/// Date/time fields extracted from a matched timestamp span
///
/// `year` is `None` for layouts that carry no year (syslog). The remaining
/// fields are always present for a successfully extracted timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFields {
    /// Four-digit year, when the layout carries one
    pub year: Option<u16>,
    /// Month number, 1-12
    pub month: u8,
    /// Day of month
    pub day: u8,
    /// Hour, two digits
    pub hour: u8,
    /// Minute, two digits
    pub minute: u8,
    /// Second, two digits
    pub second: u8,
}

impl TimeFields {
    /// Render the fields as the 14-character `YYYYMMDDhhmmss` buffer
    ///
    /// A missing year renders via `assumed_year`, or as `0000` when no
    /// assumption was configured; callers track such keys as
    /// year-ambiguous.
    pub fn render(&self, assumed_year: Option<u16>) -> String {
        let year = self.year.or(assumed_year).unwrap_or(0);
        format!(
            "{:04}{:02}{:02}{:02}{:02}{:02}",
            year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Truncate the rendered buffer per `granularity` and parse the prefix
    /// as the bucket key
    ///
    /// A zero month or day is rejected here so that no invalid bucket can
    /// be formed from a partially resolved timestamp.
    pub fn key(
        &self,
        granularity: Granularity,
        assumed_year: Option<u16>,
    ) -> Result<TimeKey, NormalizeError> {
        if self.month == 0 {
            return Err(NormalizeError::ZeroField { field: "month" });
        }
        if self.day == 0 {
            return Err(NormalizeError::ZeroField { field: "day" });
        }

        let buffer = self.render(assumed_year);
        let prefix = &buffer[..granularity.digits()];
        prefix
            .parse::<TimeKey>()
            .map_err(|_| NormalizeError::KeyOutOfRange {
                buffer: prefix.to_string(),
            })
    }
}

/// Extract named fields from a recognized timestamp span
///
/// Dispatches on the pattern kind. The ctime layout is recognized by the
/// pattern table but carries no extraction rule, so it reports
/// [`NormalizeError::UnsupportedPattern`].
pub fn extract(m: &TimestampMatch<'_>) -> Result<TimeFields, NormalizeError> {
    match m.kind {
        PatternKind::Syslog => extract_syslog(m.text),
        PatternKind::CommonLog => extract_common_log(m.text),
        PatternKind::Ctime => Err(NormalizeError::UnsupportedPattern(m.kind.name())),
        PatternKind::Iso => extract_iso(m.text),
    }
}

/// `Mon D[D] HH:MM:SS`, no year
fn extract_syslog(text: &str) -> Result<TimeFields, NormalizeError> {
    let mut tokens = text.split_whitespace();

    let month_token = tokens.next().unwrap_or_default();
    let month = month_number(month_token).ok_or_else(|| NormalizeError::UnknownMonth {
        token: month_token.to_string(),
    })?;

    let day_token = tokens.next().unwrap_or_default();
    let day = parse_field(day_token, "day")?;

    let time_token = tokens.next().unwrap_or_default();
    let (hour, minute, second) = parse_hms(time_token)?;

    Ok(TimeFields {
        year: None,
        month,
        day,
        hour,
        minute,
        second,
    })
}

/// `DD/Mon/YYYY:HH:MM:SS`
fn extract_common_log(text: &str) -> Result<TimeFields, NormalizeError> {
    let mut tokens = text.split('/');

    let day_token = tokens.next().unwrap_or_default();
    let day = parse_field(day_token, "day")?;

    let month_token = tokens.next().unwrap_or_default();
    let month = month_number(month_token).ok_or_else(|| NormalizeError::UnknownMonth {
        token: month_token.to_string(),
    })?;

    // Remaining token is `YYYY:HH:MM:SS`: year at chars 0-3, time from char 5.
    let rest = tokens.next().unwrap_or_default();
    let year_token = rest.get(..4).ok_or_else(|| NormalizeError::MalformedField {
        field: "year",
        token: rest.to_string(),
    })?;
    let year = parse_field::<u16>(year_token, "year")?;

    let time_token = rest.get(5..).ok_or_else(|| NormalizeError::MalformedField {
        field: "time",
        token: rest.to_string(),
    })?;
    let (hour, minute, second) = parse_hms(time_token)?;

    Ok(TimeFields {
        year: Some(year),
        month,
        day,
        hour,
        minute,
        second,
    })
}

/// `YYYY-MM-DD HH:MM:SS`, fixed offsets within the matched span
fn extract_iso(text: &str) -> Result<TimeFields, NormalizeError> {
    let slice = |range: std::ops::Range<usize>, field: &'static str| {
        text.get(range).ok_or_else(|| NormalizeError::MalformedField {
            field,
            token: text.to_string(),
        })
    };

    let year = parse_field::<u16>(slice(0..4, "year")?, "year")?;
    let month = parse_field(slice(5..7, "month")?, "month")?;
    let day = parse_field(slice(8..10, "day")?, "day")?;
    let hour = parse_field(slice(11..13, "hour")?, "hour")?;
    let minute = parse_field(slice(14..16, "minute")?, "minute")?;
    let second = parse_field(slice(17..19, "second")?, "second")?;

    Ok(TimeFields {
        year: Some(year),
        month,
        day,
        hour,
        minute,
        second,
    })
}

/// Parse a decimal field token with explicit error propagation
fn parse_field<T: std::str::FromStr>(
    token: &str,
    field: &'static str,
) -> Result<T, NormalizeError> {
    token.parse().map_err(|_| NormalizeError::MalformedField {
        field,
        token: token.to_string(),
    })
}

/// Parse an `HH:MM:SS` token by digit offsets 0,1 / 3,4 / 6,7
///
/// Anything past offset 8 (such as the optional trailing colon the syslog
/// pattern admits) is ignored.
fn parse_hms(token: &str) -> Result<(u8, u8, u8), NormalizeError> {
    let malformed = || NormalizeError::MalformedField {
        field: "time",
        token: token.to_string(),
    };

    let hour = parse_field(token.get(0..2).ok_or_else(malformed)?, "time")?;
    let minute = parse_field(token.get(3..5).ok_or_else(malformed)?, "time")?;
    let second = parse_field(token.get(6..8).ok_or_else(malformed)?, "time")?;
    Ok((hour, minute, second))
}
