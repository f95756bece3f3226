//! Import bank statements (OFX/QFX tag blocks or CSV exports) into
//! normalized ledger transactions, and guess a category for each one.
//!
//! ```rust,ignore
//! use bank_import_rs::ImportBuilder;
//!
//! let transactions = ImportBuilder::new()
//!     .content(&file_content)
//!     .filename("extrato.csv")
//!     .parse_categorized()?;
//! ```
//!
//! Parsing is best-effort per record: entries without a usable amount are
//! dropped and unreadable dates fall back to the processing time, so a
//! file never fails because of one bad line.

mod builder;
mod types;

pub mod categorizer;
pub mod errors;
pub mod parsers;
pub mod rules;

pub use builder::{FileFormat, ImportBuilder};
pub use categorizer::{Categorizer, normalize_for_match};
pub use errors::{ImportError, ImportResult};
pub use parsers::prelude::*;
pub use rules::{CategoryRule, CategoryRules, FALLBACK_CATEGORY};
pub use types::{CategorizedTransaction, Direction, PLACEHOLDER_DESCRIPTION, Transaction};
