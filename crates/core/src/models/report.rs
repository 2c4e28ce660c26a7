use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A printable financial report, ready for any renderer (PDF, HTML, text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub title: String,
    pub generated_on: NaiveDate,
    pub sections: Vec<ReportSection>,
}

impl FinancialReport {
    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub title: String,
    /// Free-standing lines printed above the table (totals, returns)
    pub summary: Vec<String>,
    pub table: Option<ReportTable>,
    /// Shown instead of the table when there is nothing to list
    pub empty_message: Option<String>,
}

impl ReportSection {
    pub fn with_table(title: &str, summary: Vec<String>, table: ReportTable) -> Self {
        Self {
            title: title.to_string(),
            summary,
            table: Some(table),
            empty_message: None,
        }
    }

    pub fn empty(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            summary: Vec::new(),
            table: None,
            empty_message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Which sections to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    pub include_health: bool,
    pub include_expenses: bool,
    pub include_stocks: bool,
    pub include_crypto: bool,
    pub include_goals: bool,
    pub include_recurring: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_health: true,
            include_expenses: true,
            include_stocks: true,
            include_crypto: true,
            include_goals: true,
            include_recurring: true,
        }
    }
}
