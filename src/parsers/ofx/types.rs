use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parsers::calendar::rolled_over_utc;

/// A `DTPOSTED`-style timestamp as found in a statement block:
/// `YYYYMMDD[HHMMSS[.XXX]][[offset:TZ]]`.
///
/// Exporters are sloppy here, so reading is forgiving: only digits count,
/// a 13-digit value is assumed to have lost the leading `2` of its year,
/// years before 1900 are read as 20xx and out-of-range fields roll over
/// (`20250229` is March 1st).
///
/// The bracketed zone annotation is cut off before the digits are kept, so
/// its offset never leaks into the time fields: `20251226[-10:EST]` is
/// noon, not 10:00. The time itself is taken as written, without applying
/// the offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfxDate(String);

impl OfxDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads the timestamp as UTC. Missing time fields default to 12:00:00.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        // The bracketed zone annotation carries digits of its own.
        let stamp = self.0.split('[').next()?;

        let mut digits: String = stamp.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() == 13 {
            digits.insert(0, '2');
        }
        if digits.len() < 8 {
            return None;
        }

        let field = |range: std::ops::Range<usize>| digits.get(range)?.parse::<u32>().ok();

        let year = digits[0..4].parse::<i32>().ok()?;
        let month = field(4..6)?;
        let day = field(6..8)?;
        let hour = if digits.len() >= 10 { field(8..10)? } else { 12 };
        let minute = if digits.len() >= 12 { field(10..12)? } else { 0 };
        let second = if digits.len() >= 14 { field(12..14)? } else { 0 };

        let year = if year < 1900 { 2000 + year % 100 } else { year };

        rolled_over_utc(year, month, day, hour, minute, second)
    }

    /// Like [`OfxDate::to_datetime`], falling back to `now`.
    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.to_datetime().unwrap_or_else(|| {
            debug!(raw = %self.0, "unreadable statement date, using processing time");
            now
        })
    }
}

impl From<String> for OfxDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OfxDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
