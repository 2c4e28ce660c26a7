use serde::{Deserialize, Serialize};

/// Valuation of a portfolio at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Sum of cost bases (what was paid)
    pub total_investment: f64,

    /// Sum of current values (live quote, else acquisition price)
    pub current_value: f64,

    /// current_value - total_investment
    pub profit_loss: f64,

    /// (profit_loss / total_investment) * 100, or 0 for an empty cost basis
    pub return_pct: f64,
}

/// Overall financial health indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealth {
    /// 0–100
    pub score: u32,

    /// Spending over the last 30 days
    pub monthly_expenses: f64,

    /// Stock + crypto value
    pub portfolio_value: f64,

    /// portfolio_value / monthly_expenses (0 without expenses)
    pub emergency_fund_ratio: f64,

    /// 0–100, higher when stocks and crypto are balanced
    pub diversification: f64,

    /// Mean saved/target across goals, as a percentage
    pub goal_progress: f64,
}
