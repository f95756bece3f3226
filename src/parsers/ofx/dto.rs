use chrono::{DateTime, Utc};
use tracing::debug;

use super::types::OfxDate;
use crate::parsers::amount::parse_tag_amount;
use crate::parsers::traits::RawEntry;
use crate::types::Transaction;

/// `TRNTYPE` fragments that mark money coming in.
const CREDIT_MARKERS: &[&str] = &["CREDIT", "DEP"];

/// The fields of one `<STMTTRN>` block (`TRNTYPE`, `TRNAMT`, `DTPOSTED`,
/// `MEMO`, `NAME`), as written in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfxEntry {
    pub trn_type: String,
    pub amount: String,
    pub dt_posted: OfxDate,
    pub memo: Option<String>,
    pub name: Option<String>,
}

impl OfxEntry {
    /// `MEMO`, else `NAME`; blank values do not count.
    fn description(&self) -> &str {
        [&self.memo, &self.name]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    fn is_credit(&self) -> bool {
        let trn_type = self.trn_type.to_uppercase();
        CREDIT_MARKERS.iter().any(|marker| trn_type.contains(marker))
    }
}

impl RawEntry for OfxEntry {
    fn normalize(self, now: DateTime<Utc>) -> Option<Transaction> {
        let amount = parse_tag_amount(&self.amount);
        let due_date = self.dt_posted.resolve(now);

        let txn = Transaction::from_signed(self.description(), amount, self.is_credit(), due_date);
        if txn.is_none() {
            debug!(trn_type = %self.trn_type, amount = %self.amount, "dropping statement block without amount");
        }
        txn
    }
}
