mod dto;
mod header;
mod parser;
mod types;

pub mod prelude {
    pub use super::dto::CsvRow;
    pub use super::header::{ColumnLayout, detect_separator};
    pub use super::parser::CsvParser;
    pub use super::types::CsvDate;
}
