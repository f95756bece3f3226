//! The keyword table behind category guessing.
//!
//! Rules are kept per direction and in declaration order: the first
//! category with a matching keyword wins, so moving a rule up or down
//! changes results. The built-in table can be replaced with a JSON file of
//! the same shape:
//!
//! ```json
//! {
//!   "payable": [{ "label": "Transporte", "keywords": ["uber", "posto"] }],
//!   "receivable": [{ "label": "Salário", "keywords": ["salario"] }],
//!   "fallback": "Outros"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::categorizer::normalize_for_match;
use crate::errors::{ImportError, ImportResult};
use crate::types::Direction;

/// Label returned when no keyword matches ("Other").
pub const FALLBACK_CATEGORY: &str = "Outros";

const DEFAULT_PAYABLE: &[(&str, &[&str])] = &[
    ("Outros", &["mercado pago"]),
    (
        "Alimentação",
        &[
            "atacad", "pizza", "hamburg", "mercado", "choco", "mercadinho", "supermercado", "ifood",
            "rappi", "padaria", "restaurante", "zé delivery", "açougue", "hortifruti",
        ],
    ),
    (
        "Transporte",
        &["uber", "99", "99pop", "99app", "combust", "posto", "ipiranga", "shell", "estaciona"],
    ),
    ("Moradia", &["aluguel", "condom", "condomínio", "aluguer"]),
    (
        "Saúde",
        &[
            "farmácia", "farmacia", "drogasil", "drogaria", "panvel", "consulta", "laboratório",
            "laboratorio", "exame",
        ],
    ),
    ("Lazer", &["netflix", "spotify", "prime video", "disney+", "cinema", "ingresso"]),
    (
        "Contas",
        &[
            "fatura", "energia", "luz", "enel", "cpfl", "água", "agua", "sabesp", "internet", "vivo",
            "claro", "tim", "oi", "iptu", "ipva",
        ],
    ),
    ("Beleza", &["barbearia", "salão", "unhas", "cabeleireiro"]),
    ("Compras Online", &["shp", "ml", "meli", "mercado livre", "ali", "shein"]),
];

const DEFAULT_RECEIVABLE: &[(&str, &[&str])] = &[
    ("Salário", &["salário", "salario", "pagamento", "holerite"]),
    (
        "Freelance",
        &["freela", "freelance", "serviço", "servico", "pix cliente", "pagamento cliente"],
    ),
    ("Investimentos", &["rend", "dividend", "juros"]),
    ("Presente", &["presente", "doação", "doacao"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        CategoryRule {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

fn default_fallback() -> String {
    FALLBACK_CATEGORY.to_string()
}

/// Ordered keyword rules for both directions plus the catch-all label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRules {
    pub payable: Vec<CategoryRule>,
    pub receivable: Vec<CategoryRule>,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

impl Default for CategoryRules {
    fn default() -> Self {
        let build = |table: &[(&str, &[&str])]| {
            table
                .iter()
                .map(|(label, keywords)| CategoryRule::new(label, keywords))
                .collect()
        };

        CategoryRules {
            payable: build(DEFAULT_PAYABLE),
            receivable: build(DEFAULT_RECEIVABLE),
            fallback: default_fallback(),
        }
    }
}

impl CategoryRules {
    pub fn for_direction(&self, direction: Direction) -> &[CategoryRule] {
        match direction {
            Direction::Payable => &self.payable,
            Direction::Receivable => &self.receivable,
        }
    }

    /// Loads a rule table from JSON and validates it.
    pub fn from_json(json: &str) -> ImportResult<Self> {
        let rules: CategoryRules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ImportResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Rejects blank labels and keywords that normalize to nothing (an
    /// empty keyword would match every description).
    pub fn validate(&self) -> ImportResult<()> {
        if self.fallback.trim().is_empty() {
            return Err(ImportError::InvalidRule("fallback label is blank".to_string()));
        }

        for (direction, rules) in [
            (Direction::Payable, &self.payable),
            (Direction::Receivable, &self.receivable),
        ] {
            for rule in rules {
                if rule.label.trim().is_empty() {
                    return Err(ImportError::InvalidRule(format!(
                        "blank label in {} rules",
                        direction.as_str()
                    )));
                }
                if rule
                    .keywords
                    .iter()
                    .any(|k| normalize_for_match(k).trim().is_empty())
                {
                    return Err(ImportError::InvalidRule(format!(
                        "empty keyword in {} rule {:?}",
                        direction.as_str(),
                        rule.label
                    )));
                }
            }
        }

        Ok(())
    }
}
