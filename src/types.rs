use chrono::{DateTime, Utc};
use num_traits::{Signed, Zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Description used when the source row/block carries none ("no description").
pub const PLACEHOLDER_DESCRIPTION: &str = "Sem descrição";

/// Whether money leaves (payable) or enters (receivable) the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Payable,
    Receivable,
}

impl Direction {
    /// Maps a free-form direction tag onto a direction.
    ///
    /// Only the receivable tags (`"receivable"`, `"receber"`) select
    /// [`Direction::Receivable`]; anything else, unknown tags included, is
    /// payable.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "receivable" | "receber" => Direction::Receivable,
            _ => Direction::Payable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Payable => "payable",
            Direction::Receivable => "receivable",
        }
    }
}

/// A normalized statement entry, ready for a ledger.
///
/// `amount` is always strictly positive; the sign lives in `direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub description: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub due_date: DateTime<Utc>,
}

impl Transaction {
    /// Builds a transaction from a signed source amount.
    ///
    /// Returns `None` for a zero amount: such entries are informational and
    /// never become transactions. The entry is receivable when the source
    /// flagged it as a credit or the amount is positive.
    pub fn from_signed(
        description: &str,
        amount: Decimal,
        credit_marker: bool,
        due_date: DateTime<Utc>,
    ) -> Option<Self> {
        if Zero::is_zero(&amount) {
            return None;
        }

        let direction = if credit_marker || Signed::is_positive(&amount) {
            Direction::Receivable
        } else {
            Direction::Payable
        };

        let description = description.trim();
        let description = if description.is_empty() {
            PLACEHOLDER_DESCRIPTION
        } else {
            description
        };

        Some(Transaction {
            description: description.to_string(),
            amount: Signed::abs(&amount),
            direction,
            due_date,
        })
    }
}

/// A transaction paired with the category guessed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: String,
}
