use std::sync::LazyLock;

use regex::Regex;

use super::dto::OfxEntry;
use crate::parsers::traits::Parser;

/// Non-greedy so adjacent blocks are captured one by one.
static BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<STMTTRN>(.*?)</STMTTRN>").expect("valid block regex"));

/// Leaf tags read from each block. SGML exports leave them unclosed, so a
/// value runs to the end of the line or the next tag.
struct LeafTags {
    trn_type: Regex,
    amount: Regex,
    posted: Regex,
    memo: Regex,
    name: Regex,
}

static TAGS: LazyLock<LeafTags> = LazyLock::new(|| LeafTags {
    trn_type: leaf_tag("TRNTYPE"),
    amount: leaf_tag("TRNAMT"),
    posted: leaf_tag("DTPOSTED"),
    memo: leaf_tag("MEMO"),
    name: leaf_tag("NAME"),
});

fn leaf_tag(tag: &str) -> Regex {
    Regex::new(&format!(r"(?i)<{tag}>\s*([^\r\n<]+)")).expect("valid leaf tag regex")
}

fn tag_value(re: &Regex, block: &str) -> Option<String> {
    re.captures(block)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Reader for OFX/QFX statements (SGML or XML flavour).
///
/// Only `<STMTTRN>` blocks are looked at; headers, balances and whatever
/// else surrounds them are ignored, so truncated or slightly broken files
/// still yield their transactions.
pub struct OfxParser;

impl Parser for OfxParser {
    type Entry = OfxEntry;

    const FORMAT: &'static str = "ofx";

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        if let Some(name) = filename {
            let ext = name.to_lowercase();
            if ext.ends_with(".qfx") || ext.ends_with(".ofx") {
                return true;
            }
        }

        let upper = content.to_ascii_uppercase();
        upper.contains("<OFX>")
            || upper.contains("OFXHEADER:")
            || upper.contains("<STMTTRN>")
    }

    fn entries(content: &str) -> Vec<Self::Entry> {
        BLOCK
            .captures_iter(content)
            .map(|caps| {
                let block = caps.get(1).map_or("", |m| m.as_str());
                OfxEntry {
                    trn_type: tag_value(&TAGS.trn_type, block).unwrap_or_default(),
                    amount: tag_value(&TAGS.amount, block).unwrap_or_default(),
                    dt_posted: tag_value(&TAGS.posted, block).unwrap_or_default().into(),
                    memo: tag_value(&TAGS.memo, block),
                    name: tag_value(&TAGS.name, block),
                }
            })
            .collect()
    }
}
