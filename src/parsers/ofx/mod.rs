mod dto;
mod parser;
mod types;

pub mod prelude {
    pub use super::dto::OfxEntry;
    pub use super::parser::OfxParser;
    pub use super::types::OfxDate;
}
