use chrono::{DateTime, Utc};
use tracing::debug;

use crate::types::Transaction;

/// One record as extracted from a statement, before normalization.
pub trait RawEntry {
    /// Normalizes the entry. `None` means the entry is dropped (no usable
    /// amount); `now` stands in for dates that cannot be read.
    fn normalize(self, now: DateTime<Utc>) -> Option<Transaction>;
}

pub trait Parser {
    type Entry: RawEntry;

    /// Short name used in log lines.
    const FORMAT: &'static str;

    /// Extracts raw entries in document order. Never fails; unreadable
    /// fragments are skipped.
    fn entries(content: &str) -> Vec<Self::Entry>;

    fn is_supported(filename: Option<&str>, content: &str) -> bool;

    /// Parses `content`, using `now` as the fallback date.
    fn parse_at(content: &str, now: DateTime<Utc>) -> Vec<Transaction> {
        let entries = Self::entries(content);
        let total = entries.len();

        let transactions: Vec<Transaction> = entries
            .into_iter()
            .filter_map(|entry| entry.normalize(now))
            .collect();

        debug!(
            format = Self::FORMAT,
            kept = transactions.len(),
            dropped = total - transactions.len(),
            "parsed statement"
        );

        transactions
    }

    /// Parses `content`, using the current time as the fallback date.
    fn parse(content: &str) -> Vec<Transaction> {
        Self::parse_at(content, Utc::now())
    }
}
