//! Monetary amount normalization shared by the statement parsers.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

/// `1.234,56`, `-12,00`, `1.234.567,89`: dot-grouped thousands with a
/// two-digit decimal comma.
static COMMA_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,3}(\.\d{3})*,\d{2}$").expect("valid amount regex"));

/// Reads the longest numeric prefix of `raw`, the way a lenient float
/// reader would: optional sign, digits, optional fraction and exponent.
/// Trailing garbage is ignored; no digits at all yields `None`, and so
/// does a number beyond what a [`Decimal`] holds (about 7.9e28).
pub fn leading_decimal(raw: &str) -> Option<Decimal> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &s[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_part = &s[frac_start..end];
        pos = end;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exponent = String::new();
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        let exp_negative = end < bytes.len() && bytes[end] == b'-';
        if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent.push('e');
            if exp_negative {
                exponent.push('-');
            }
            exponent.push_str(&s[digits_start..end]);
        }
    }

    let mut number = String::with_capacity(int_part.len() + frac_part.len() + exponent.len() + 3);
    if negative {
        number.push('-');
    }
    number.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        number.push('.');
        number.push_str(frac_part);
    }

    let parsed = if exponent.is_empty() {
        Decimal::from_str(&number)
    } else {
        number.push_str(&exponent);
        Decimal::from_scientific(&number)
    };

    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(%number, error = %e, "amount out of decimal range");
            None
        }
    }
}

/// Amount of a tagged statement block: a decimal comma becomes a point.
///
/// Unparseable input reads as zero, which the caller drops.
pub fn parse_tag_amount(raw: &str) -> Decimal {
    leading_decimal(&raw.replacen(',', ".", 1)).unwrap_or(Decimal::ZERO)
}

/// Amount of a delimited-text cell.
///
/// A value shaped like `1.234,56` is read as comma-decimal; anything else
/// has its commas stripped as thousands separators, so `1,234.56` and
/// `1234.56` read the same. Unparseable input reads as zero.
pub fn parse_delimited_amount(raw: &str) -> Decimal {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let normalized = if COMMA_DECIMAL.is_match(&compact) {
        compact.replace('.', "").replacen(',', ".", 1)
    } else {
        compact.replace(',', "")
    };

    leading_decimal(&normalized).unwrap_or(Decimal::ZERO)
}
