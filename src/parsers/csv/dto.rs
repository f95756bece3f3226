use chrono::{DateTime, Utc};
use tracing::debug;

use super::types::CsvDate;
use crate::parsers::amount::parse_delimited_amount;
use crate::parsers::traits::RawEntry;
use crate::types::Transaction;

/// Type-column fragments that mark money coming in ("receber", "recebimento").
const RECEIPT_MARKERS: &[&str] = &["receb"];

/// One data row, with the cells picked out by the column layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvRow {
    pub date: CsvDate,
    pub description: String,
    pub amount: String,
    pub kind: String,
}

impl CsvRow {
    fn is_receipt(&self) -> bool {
        let kind = self.kind.to_lowercase();
        RECEIPT_MARKERS.iter().any(|marker| kind.contains(marker))
    }
}

impl RawEntry for CsvRow {
    fn normalize(self, now: DateTime<Utc>) -> Option<Transaction> {
        let amount = parse_delimited_amount(&self.amount);
        let due_date = self.date.resolve(now);

        let txn = Transaction::from_signed(&self.description, amount, self.is_receipt(), due_date);
        if txn.is_none() {
            debug!(amount = %self.amount, description = %self.description, "dropping CSV row without amount");
        }
        txn
    }
}
