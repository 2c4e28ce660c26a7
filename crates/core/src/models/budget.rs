use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A spending limit for one category in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub category: String,
    pub amount: f64,
    /// 1–12
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    pub category: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

/// Spending against one budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub budget: Budget,
    pub spent: f64,
    pub remaining: f64,
    /// 0–100, see `BudgetService::spending_percentage`
    pub percentage: u32,
}

/// All budgets of a month with their spending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub month: u32,
    pub year: i32,
    pub lines: Vec<BudgetLine>,
    pub total_budgeted: f64,
    pub total_spent: f64,
}
