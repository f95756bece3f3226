//! Keyword-based category guessing.

use std::sync::Arc;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::rules::{CategoryRule, CategoryRules};
use crate::types::{CategorizedTransaction, Direction, Transaction};

/// Lowercases and strips diacritics, so `"Restauranté"` and `"restaurante"`
/// compare equal.
pub fn normalize_for_match(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

#[derive(Debug, Clone)]
struct CompiledRule {
    label: String,
    keywords: Vec<String>,
}

fn compile(rules: &[CategoryRule]) -> Vec<CompiledRule> {
    rules
        .iter()
        .map(|rule| CompiledRule {
            label: rule.label.clone(),
            keywords: rule
                .keywords
                .iter()
                .map(|k| normalize_for_match(k))
                .filter(|k| {
                    let keep = !k.is_empty();
                    if !keep {
                        debug!(label = %rule.label, "ignoring empty keyword");
                    }
                    keep
                })
                .collect(),
        })
        .collect()
}

/// Guesses a category from a description and a direction.
///
/// Keywords are normalized once, up front; `categorize` is then a pure
/// lookup that always returns a label.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Arc<CategoryRules>,
    payable: Vec<CompiledRule>,
    receivable: Vec<CompiledRule>,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(Arc::new(CategoryRules::default()))
    }
}

impl Categorizer {
    pub fn new(rules: Arc<CategoryRules>) -> Self {
        let payable = compile(&rules.payable);
        let receivable = compile(&rules.receivable);
        Categorizer {
            rules,
            payable,
            receivable,
        }
    }

    /// First category, in table order, with a keyword contained in the
    /// description; the fallback label otherwise.
    pub fn categorize(&self, description: &str, direction: Direction) -> &str {
        let compiled = match direction {
            Direction::Payable => &self.payable,
            Direction::Receivable => &self.receivable,
        };

        let desc = normalize_for_match(description);
        compiled
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| desc.contains(k.as_str())))
            .map_or(self.rules.fallback.as_str(), |rule| rule.label.as_str())
    }

    /// Same as [`Categorizer::categorize`] with a free-form direction tag;
    /// unknown tags use the payable rules.
    pub fn categorize_tag(&self, description: &str, tag: &str) -> &str {
        self.categorize(description, Direction::from_tag(tag))
    }

    pub fn categorize_transaction(&self, txn: &Transaction) -> &str {
        self.categorize(&txn.description, txn.direction)
    }

    /// Labels available for a direction, in table order, fallback last.
    pub fn categories(&self, direction: Direction) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .rules
            .for_direction(direction)
            .iter()
            .map(|rule| rule.label.as_str())
            .collect();
        if !labels.contains(&self.rules.fallback.as_str()) {
            labels.push(&self.rules.fallback);
        }
        labels
    }

    pub fn annotate(&self, transactions: Vec<Transaction>) -> Vec<CategorizedTransaction> {
        transactions
            .into_iter()
            .map(|transaction| {
                let category = self.categorize_transaction(&transaction).to_string();
                CategorizedTransaction {
                    transaction,
                    category,
                }
            })
            .collect()
    }
}
