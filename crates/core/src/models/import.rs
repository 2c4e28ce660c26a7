use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A CSV row keyed by header name.
pub type CsvRow = HashMap<String, String>;

/// Which CSV column feeds which expense field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub date: String,
    pub description: String,
    pub amount: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl ColumnMapping {
    /// Guess a mapping from header names ("Date", "Transaction Date",
    /// "Amount", "Memo", ...). Unrecognized fields stay empty.
    pub fn detect(headers: &[String]) -> Self {
        let find = |candidates: &[&str]| -> Option<String> {
            headers
                .iter()
                .find(|h| {
                    let lower = h.to_lowercase();
                    candidates.iter().any(|c| lower.contains(c))
                })
                .cloned()
        };
        Self {
            date: find(&["date"]).unwrap_or_default(),
            description: find(&["description", "memo", "payee", "details"]).unwrap_or_default(),
            amount: find(&["amount", "value", "debit"]).unwrap_or_default(),
            category: find(&["category"]),
            currency: find(&["currency"]),
        }
    }
}
