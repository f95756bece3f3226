use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parsers::calendar::rolled_over_utc;

static DAY_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("valid date regex"));

static ISO_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date regex"));

/// Formatos aceitos pelo interpretador genérico, depois dos dois formatos
/// explícitos (`DD/MM/YYYY` e `YYYY-MM-DD`).
const GENERIC_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

const GENERIC_DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Representa uma data extraída de uma coluna de CSV de extrato bancário.
///
/// Os formatos explícitos são `DD/MM/YYYY` (padrão no Brasil) e
/// `YYYY-MM-DD`; ambos viram meio-dia UTC para que a data não mude de dia
/// ao ser exibida em outro fuso. Dia ou mês fora do intervalo avançam no
/// calendário (`31/02/2025` vira 3 de março). Qualquer outro texto passa
/// por um interpretador genérico.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsvDate(String);

impl CsvDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converte para timestamp UTC, ou `None` se nenhum formato reconhecer.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let s = self.0.trim();
        if s.is_empty() {
            return None;
        }

        explicit_day(s).or_else(|| generic(s))
    }

    /// Como [`CsvDate::to_datetime`], caindo para `now` quando a data é
    /// irreconhecível ou vazia.
    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.to_datetime().unwrap_or_else(|| {
            debug!(raw = %self.0, "unreadable CSV date, using processing time");
            now
        })
    }
}

fn at_noon(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(12, 0, 0).map(|dt| Utc.from_utc_datetime(&dt))
}

fn explicit_day(s: &str) -> Option<DateTime<Utc>> {
    let (year, month, day) = if let Some(caps) = DAY_FIRST.captures(s) {
        (caps[3].parse().ok()?, caps[2].parse().ok()?, caps[1].parse().ok()?)
    } else if let Some(caps) = ISO_DAY.captures(s) {
        (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
    } else {
        return None;
    };

    rolled_over_utc(year, month, day, 12, 0, 0)
}

fn generic(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    GENERIC_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| Utc.from_utc_datetime(&dt))
        .or_else(|| {
            GENERIC_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(at_noon)
        })
}

impl From<String> for CsvDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CsvDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// -----------------------------------------------------------------------------
// Testes
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn utc(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, hh, mm, ss).unwrap()
    }

    #[rstest]
    #[case("25/12/2024", utc(2024, 12, 25, 12, 0, 0))]
    #[case("2024-12-25", utc(2024, 12, 25, 12, 0, 0))]
    #[case("  01/02/2025  ", utc(2025, 2, 1, 12, 0, 0))]
    #[case("31/12/2025", utc(2025, 12, 31, 12, 0, 0))]
    fn test_explicit_formats_are_noon_utc(#[case] input: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(CsvDate::from(input).to_datetime(), Some(expected));
    }

    #[test]
    fn test_both_explicit_formats_agree() {
        assert_eq!(
            CsvDate::from("25/12/2024").to_datetime(),
            CsvDate::from("2024-12-25").to_datetime()
        );
    }

    #[rstest]
    #[case("2024-12-25T08:30:00Z", utc(2024, 12, 25, 8, 30, 0))]
    #[case("2024-12-25T08:30:00-03:00", utc(2024, 12, 25, 11, 30, 0))]
    #[case("Wed, 25 Dec 2024 08:30:00 +0000", utc(2024, 12, 25, 8, 30, 0))]
    #[case("2024-12-25 08:30:00", utc(2024, 12, 25, 8, 30, 0))]
    #[case("2024/12/25", utc(2024, 12, 25, 12, 0, 0))]
    #[case("1/26/2025", utc(2025, 1, 26, 12, 0, 0))]
    #[case("25-12-2024", utc(2024, 12, 25, 12, 0, 0))]
    #[case("25.12.2024", utc(2024, 12, 25, 12, 0, 0))]
    #[case("25 Dec 2024", utc(2024, 12, 25, 12, 0, 0))]
    #[case("Dec 25, 2024", utc(2024, 12, 25, 12, 0, 0))]
    fn test_generic_formats(#[case] input: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(CsvDate::from(input).to_datetime(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("invalid-date")]
    #[case("ontem")]
    fn test_unreadable_dates(#[case] input: &str) {
        assert_eq!(CsvDate::from(input).to_datetime(), None);
    }

    #[rstest]
    #[case("31/02/2025", utc(2025, 3, 3, 12, 0, 0))]
    #[case("32/13/2025", utc(2026, 2, 1, 12, 0, 0))]
    #[case("12/26/2025", utc(2027, 2, 12, 12, 0, 0))]
    #[case("00/01/2025", utc(2024, 12, 31, 12, 0, 0))]
    #[case("2025-02-30", utc(2025, 3, 2, 12, 0, 0))]
    #[case("2025-13-01", utc(2026, 1, 1, 12, 0, 0))]
    fn test_explicit_formats_roll_over(#[case] input: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(CsvDate::from(input).to_datetime(), Some(expected));
    }

    #[test]
    fn test_resolve_never_fails() {
        let now = utc(2026, 10, 17, 9, 15, 0);
        assert_eq!(CsvDate::from("whenever").resolve(now), now);
        assert_eq!(CsvDate::from("").resolve(now), now);
        assert_eq!(CsvDate::from("2024-12-25").resolve(now), utc(2024, 12, 25, 12, 0, 0));
    }

    #[test]
    fn test_csv_date_serialization() {
        let date = CsvDate::from("26/12/2025");
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"26/12/2025\"");

        let deserialized: CsvDate = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.as_str(), "26/12/2025");
    }
}
