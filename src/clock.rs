/// Wall-clock source and timestamp-key helpers (jiff).
///
/// Keys are local civil date-times with second precision. Offsets are
/// applied with civil arithmetic, so a day is always 24 wall-clock hours
/// regardless of DST transitions.
use jiff::Span;
use jiff::civil::DateTime;

use crate::error::Result;

/// strftime/strptime pattern for document keys.
pub const KEY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of "now" for the generator. Injected so runs can be pinned.
pub trait Clock {
    fn now(&self) -> DateTime;
}

/// Local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        jiff::Zoned::now().datetime()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime);

impl FixedClock {
    /// Parse a `YYYY-MM-DD HH:MM:SS` string into a pinned clock.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(Self(parse_key(s)?))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime {
        self.0
    }
}

/// `now` minus `days` and `seconds`.
pub fn offset_back(now: DateTime, days: u32, seconds: u32) -> Result<DateTime> {
    let span = Span::new().days(days).seconds(seconds);
    Ok(now.checked_sub(span)?)
}

/// Format a date-time as a document key. Sub-second precision is dropped.
pub fn format_key(dt: DateTime) -> String {
    dt.strftime(KEY_FORMAT).to_string()
}

pub fn parse_key(s: &str) -> Result<DateTime> {
    Ok(DateTime::strptime(KEY_FORMAT, s)?)
}
