use serde::{Deserialize, Serialize};

use super::expense::Expense;
use super::history::HistorySample;
use super::holding::Holding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// The user's locally stored records, sent along with a chat question so
/// the assistant can answer from real data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDataSnapshot {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub stock_portfolio: Vec<Holding>,
    #[serde(default)]
    pub stock_history: Vec<HistorySample>,
    #[serde(default)]
    pub crypto_portfolio: Vec<Holding>,
}

impl UserDataSnapshot {
    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).fold(0.0, |acc, v| acc + v)
    }

    /// Sum of the stock holdings' cost bases.
    pub fn portfolio_value(&self) -> f64 {
        self.stock_portfolio.iter().map(|h| h.cost_basis()).fold(0.0, |acc, v| acc + v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub user_data: Option<UserDataSnapshot>,
}
