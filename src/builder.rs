use std::fmt;
use std::fs;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    categorizer::Categorizer,
    errors::{ImportError, ImportResult},
    parsers::prelude::*,
    rules::CategoryRules,
    types::{CategorizedTransaction, Transaction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "ofx")]
    Ofx,
    #[serde(rename = "csv")]
    Csv,
}

impl FileFormat {
    fn parse(&self, content: &str, now: DateTime<Utc>) -> Vec<Transaction> {
        match self {
            FileFormat::Ofx => OfxParser::parse_at(content, now),
            FileFormat::Csv => CsvParser::parse_at(content, now),
        }
    }

    /// A `.csv` filename picks the delimited reader and any other filename
    /// the statement reader. Without a filename the content decides.
    fn detect(filename: Option<&str>, content: &str) -> Self {
        if let Some(filename) = filename {
            return if CsvParser::is_supported(Some(filename), content) {
                FileFormat::Csv
            } else {
                FileFormat::Ofx
            };
        }

        if OfxParser::is_supported(None, content) {
            FileFormat::Ofx
        } else {
            FileFormat::Csv
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Ofx => f.write_str("ofx"),
            FileFormat::Csv => f.write_str("csv"),
        }
    }
}

impl FromStr for FileFormat {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ofx" | "qfx" => Ok(FileFormat::Ofx),
            "csv" => Ok(FileFormat::Csv),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Default)]
pub struct ImportBuilder {
    content: Option<String>,
    filepath: Option<String>,
    format: Option<FileFormat>,
    rules: Option<Arc<CategoryRules>>,
    now: Option<DateTime<Utc>>,
}

impl ImportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    /// Used for format detection, and read from disk when no content is given.
    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Rule table for [`ImportBuilder::parse_categorized`]; the built-in
    /// table otherwise.
    pub fn rules(mut self, rules: Arc<CategoryRules>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Pins the fallback date used for unreadable dates.
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn parse(self) -> ImportResult<Vec<Transaction>> {
        self.run().map(|(transactions, _)| transactions)
    }

    pub fn parse_categorized(self) -> ImportResult<Vec<CategorizedTransaction>> {
        let (transactions, rules) = self.run()?;
        let categorizer = Categorizer::new(rules.unwrap_or_default());
        Ok(categorizer.annotate(transactions))
    }

    fn run(self) -> ImportResult<(Vec<Transaction>, Option<Arc<CategoryRules>>)> {
        let content = match self.content {
            Some(content) => content,
            None => {
                let path = self
                    .filepath
                    .as_deref()
                    .ok_or(ImportError::MissingContentAndFilepath)?;
                fs::read_to_string(path)?
            }
        };

        let format = self
            .format
            .unwrap_or_else(|| FileFormat::detect(self.filepath.as_deref(), &content));
        debug!(%format, filename = ?self.filepath, "importing statement");

        let transactions = format.parse(&content, self.now.unwrap_or_else(Utc::now));
        Ok((transactions, self.rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::CategoryRule;
    use crate::types::Direction;
    use chrono::TimeZone;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::io::Write;

    const SAMPLE_OFX: &str = r#"OFXHEADER:100
DATA:OFXSGML

<OFX>
<BANKTRANLIST>
<STMTTRN>
<TRNTYPE>DEBIT
<DTPOSTED>20251226120000
<TRNAMT>-50.00
<MEMO>Padaria Pão Quente
</STMTTRN>
<STMTTRN>
<TRNTYPE>CREDIT
<DTPOSTED>20251227
<TRNAMT>3000.00
<MEMO>Salário
</STMTTRN>
</BANKTRANLIST>
</OFX>"#;

    const SAMPLE_CSV: &str = "data,descricao,valor\n25/12/2024,Uber viagem,-23,50";

    #[test]
    fn test_builder_new() {
        let builder = ImportBuilder::new();
        assert!(builder.content.is_none());
        assert!(builder.filepath.is_none());
        assert!(builder.format.is_none());
        assert!(builder.rules.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ImportBuilder::new()
            .content("content")
            .filename("file.csv")
            .format(FileFormat::Csv);

        assert_eq!(builder.content.as_deref(), Some("content"));
        assert_eq!(builder.filepath.as_deref(), Some("file.csv"));
        assert_eq!(builder.format, Some(FileFormat::Csv));
    }

    #[test]
    fn test_builder_missing_content() {
        let result = ImportBuilder::new().parse();
        assert!(matches!(result, Err(ImportError::MissingContentAndFilepath)));
    }

    #[test]
    fn test_builder_missing_file() {
        let result = ImportBuilder::new().filename("/definitely/not/here.ofx").parse();
        assert!(matches!(result, Err(ImportError::ReadContentFailed(_))));
    }

    #[rstest]
    #[case(Some("extrato.csv"), SAMPLE_OFX, FileFormat::Csv)]
    #[case(Some("EXTRATO.CSV"), SAMPLE_CSV, FileFormat::Csv)]
    #[case(Some("extrato.ofx"), SAMPLE_CSV, FileFormat::Ofx)]
    #[case(Some("extrato.txt"), SAMPLE_CSV, FileFormat::Ofx)]
    #[case(None, SAMPLE_OFX, FileFormat::Ofx)]
    #[case(None, SAMPLE_CSV, FileFormat::Csv)]
    #[case(None, "", FileFormat::Csv)]
    fn test_file_format_detect(
        #[case] filename: Option<&str>,
        #[case] content: &str,
        #[case] expected: FileFormat,
    ) {
        assert_eq!(FileFormat::detect(filename, content), expected);
    }

    #[rstest]
    #[case("ofx", FileFormat::Ofx)]
    #[case("QFX", FileFormat::Ofx)]
    #[case(" csv ", FileFormat::Csv)]
    fn test_file_format_from_str(#[case] input: &str, #[case] expected: FileFormat) {
        assert_eq!(input.parse::<FileFormat>().unwrap(), expected);
    }

    #[test]
    fn test_file_format_from_str_unsupported() {
        let result = "xlsx".parse::<FileFormat>();
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(f)) if f == "xlsx"));
    }

    #[test]
    fn test_file_format_serialization() {
        let json = serde_json::to_string(&FileFormat::Csv).unwrap();
        assert_eq!(json, "\"csv\"");
        assert_eq!(FileFormat::Ofx.to_string(), "ofx");

        let deserialized: FileFormat = serde_json::from_str("\"ofx\"").unwrap();
        assert_eq!(deserialized, FileFormat::Ofx);
    }

    #[test]
    fn test_parse_ofx_by_content() {
        let txns = ImportBuilder::new().content(SAMPLE_OFX).parse().unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].direction, Direction::Payable);
        assert_eq!(txns[1].direction, Direction::Receivable);
    }

    #[test]
    fn test_end_to_end_csv_categorized() {
        let categorized = ImportBuilder::new()
            .content(SAMPLE_CSV)
            .filename("extrato.csv")
            .parse_categorized()
            .unwrap();

        assert_eq!(categorized.len(), 1);
        let item = &categorized[0];
        assert_eq!(item.transaction.description, "Uber viagem");
        assert_eq!(item.transaction.amount, Decimal::new(2350, 2));
        assert_eq!(item.transaction.direction, Direction::Payable);
        assert_eq!(
            item.transaction.due_date,
            Utc.with_ymd_and_hms(2024, 12, 25, 12, 0, 0).unwrap()
        );
        assert_eq!(item.category, "Transporte");
    }

    #[test]
    fn test_parse_categorized_ofx() {
        let categorized = ImportBuilder::new()
            .content(SAMPLE_OFX)
            .format(FileFormat::Ofx)
            .parse_categorized()
            .unwrap();

        let categories: Vec<&str> = categorized.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(categories, ["Alimentação", "Salário"]);
    }

    #[test]
    fn test_parse_categorized_with_custom_rules() {
        let rules = CategoryRules {
            payable: vec![CategoryRule::new("Mobilidade", &["uber"])],
            receivable: vec![],
            fallback: "Other".to_string(),
        };

        let categorized = ImportBuilder::new()
            .content(SAMPLE_CSV)
            .rules(Arc::new(rules))
            .parse_categorized()
            .unwrap();

        assert_eq!(categorized[0].category, "Mobilidade");
    }

    #[test]
    fn test_now_pins_fallback_date() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let txns = ImportBuilder::new()
            .content("data,descricao,valor\nsem data,Pix,-5")
            .now(now)
            .parse()
            .unwrap();

        assert_eq!(txns[0].due_date, now);
    }

    #[rstest]
    #[case("", FileFormat::Ofx)]
    #[case("", FileFormat::Csv)]
    #[case("random content", FileFormat::Ofx)]
    #[case("data;descricao;valor", FileFormat::Csv)]
    fn test_nothing_importable_is_not_an_error(#[case] content: &str, #[case] format: FileFormat) {
        let txns = ImportBuilder::new().content(content).format(format).parse().unwrap();
        assert!(txns.is_empty());
    }

    #[test]
    fn test_parse_from_file() {
        let path = std::env::temp_dir().join(format!("bank-import-{}.csv", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

        let txns = ImportBuilder::new()
            .filename(path.to_str().unwrap())
            .parse()
            .unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "Uber viagem");
    }
}
