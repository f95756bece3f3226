use std::sync::LazyLock;

use csv::{ReaderBuilder, StringRecord, Trim};
use regex::Regex;
use tracing::debug;

use super::dto::CsvRow;
use super::header::{ColumnLayout, detect_separator};
use crate::parsers::traits::Parser;

static INTEGER_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(\d+|\d{1,3}(\.\d{3})+)$").expect("valid integer regex"));

static CENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}$").expect("valid cents regex"));

/// Reader for delimited bank exports (`,` or `;`), with or without a header.
pub struct CsvParser;

impl Parser for CsvParser {
    type Entry = CsvRow;

    const FORMAT: &'static str = "csv";

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        match filename {
            Some(name) => name.to_lowercase().ends_with(".csv"),
            None => {
                let first_line = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
                (first_line.contains(',') || first_line.contains(';')) && !first_line.contains('<')
            }
        }
    }

    fn entries(content: &str) -> Vec<Self::Entry> {
        let mut lines = content.lines().filter(|l| !l.trim().is_empty());
        let Some(first_line) = lines.next() else {
            return Vec::new();
        };

        let separator = detect_separator(first_line);
        let first = tokenize(first_line, separator);

        let layout = ColumnLayout::detect(first.as_slice());
        debug!(?layout, separator = %(separator as char), "detected CSV layout");

        let mut rows = Vec::new();
        if !layout.has_header() {
            rows.extend(pick_row(&layout, separator, first));
        }

        rows.extend(lines.filter_map(|line| pick_row(&layout, separator, tokenize(line, separator))));
        rows
    }
}

/// Splits one line into trimmed cells.
///
/// Each line gets its own reader so a quote can never span lines. A line
/// with an unbalanced `"`, or one the reader rejects, is split plainly on
/// the separator.
fn tokenize(line: &str, separator: u8) -> Vec<String> {
    if line.matches('"').count() % 2 == 0 {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(separator)
            .trim(Trim::All)
            .from_reader(line.as_bytes());

        let mut record = StringRecord::new();
        match reader.read_record(&mut record) {
            Ok(true) => return record.iter().map(str::to_string).collect(),
            Ok(false) => return Vec::new(),
            Err(e) => debug!(error = %e, line, "unreadable CSV line, splitting on separator"),
        }
    } else {
        debug!(line, "unbalanced quote in CSV line, splitting on separator");
    }

    line.split(char::from(separator))
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Maps a row's cells onto a [`CsvRow`]. Rows with fewer than two cells
/// carry nothing usable.
fn pick_row(layout: &ColumnLayout, separator: u8, mut cells: Vec<String>) -> Option<CsvRow> {
    if cells.len() < 2 {
        debug!(?cells, "skipping CSV row with fewer than two columns");
        return None;
    }

    if separator == b',' {
        rejoin_decimal_comma(layout, &mut cells);
    }

    let cell = |idx: Option<usize>| {
        idx.and_then(|i| cells.get(i))
            .cloned()
            .unwrap_or_default()
    };

    Some(CsvRow {
        date: cell(layout.date).into(),
        description: cell(layout.description),
        amount: cell(layout.amount),
        kind: cell(layout.kind),
    })
}

/// `-23,50` written unquoted in a comma-separated file splits into `-23`
/// and `50`. When a row is wider than its header and the amount cell is
/// followed by a two-digit fragment, the two are put back together.
fn rejoin_decimal_comma(layout: &ColumnLayout, cells: &mut Vec<String>) {
    let (Some(width), Some(idx)) = (layout.header_width, layout.amount) else {
        return;
    };
    if cells.len() <= width || idx + 1 >= cells.len() {
        return;
    }
    if !INTEGER_PART.is_match(&cells[idx]) || !CENTS.is_match(&cells[idx + 1]) {
        return;
    }

    let cents = cells.remove(idx + 1);
    cells[idx] = format!("{},{}", cells[idx], cents);
}
