//! Separator and column detection for delimited statements.
//!
//! Bank exports rarely agree on column names or order, so the first line is
//! inspected once per file: if it looks like a header its column names are
//! matched loosely against known synonyms (Portuguese and English),
//! otherwise the file is assumed to be `date, description, amount, type`.

const DATE_NAMES: &[&str] = &["data", "date"];
const DESCRIPTION_NAMES: &[&str] = &["descri", "desc", "histor", "memo", "name"];
const AMOUNT_NAMES: &[&str] = &["valor", "amount", "value"];
const KIND_NAMES: &[&str] = &["tipo", "type"];

/// `;` only when the line has semicolons and no comma at all.
pub fn detect_separator(first_line: &str) -> u8 {
    if first_line.contains(';') && !first_line.contains(',') {
        b';'
    } else {
        b','
    }
}

/// Where each field lives in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub amount: Option<usize>,
    pub kind: Option<usize>,
    /// Number of header cells; `None` when the first line is data.
    pub header_width: Option<usize>,
}

impl ColumnLayout {
    /// `[date, description, amount, type]`, used when there is no header.
    pub const POSITIONAL: ColumnLayout = ColumnLayout {
        date: Some(0),
        description: Some(1),
        amount: Some(2),
        kind: Some(3),
        header_width: None,
    };

    /// Infers the layout from the cells of the first line.
    pub fn detect<S: AsRef<str>>(first_row: &[S]) -> ColumnLayout {
        let headers: Vec<String> = first_row
            .iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .collect();

        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|name| h.contains(name)))
        };

        let date = find(DATE_NAMES);
        let description = find(DESCRIPTION_NAMES);
        let amount = find(AMOUNT_NAMES);

        // a type column alone does not make a header
        if date.is_none() && description.is_none() && amount.is_none() {
            return ColumnLayout::POSITIONAL;
        }

        ColumnLayout {
            date,
            description,
            amount,
            kind: find(KIND_NAMES),
            header_width: Some(headers.len()),
        }
    }

    pub fn has_header(&self) -> bool {
        self.header_width.is_some()
    }
}
