use chrono::{DateTime, Duration, Utc};

use crate::models::analytics::FinancialHealth;
use crate::models::expense::Expense;
use crate::models::goal::FinancialGoal;
use crate::models::holding::Holding;

/// Score given when there are no records at all.
pub const NEUTRAL_SCORE: u32 = 50;

/// Computes cross-record indicators: monthly spending and the health score.
///
/// Pure business logic. Records are passed in, nothing is loaded here.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Spending dated within the last 30 days.
    pub fn monthly_expenses(&self, expenses: &[Expense], now: DateTime<Utc>) -> f64 {
        let cutoff = (now - Duration::days(30)).date_naive();
        expenses
            .iter()
            .filter(|e| e.date >= cutoff)
            .map(|e| e.amount)
            .fold(0.0, |acc, v| acc + v)
    }

    /// Health score out of 100:
    /// - emergency fund (portfolio value / monthly expenses) × 10, max 30
    /// - diversification between stocks and crypto, max 20
    /// - mean goal progress, max 30
    /// - 20 base points
    pub fn financial_health(
        &self,
        expenses: &[Expense],
        stocks: &[Holding],
        cryptos: &[Holding],
        goals: &[FinancialGoal],
        now: DateTime<Utc>,
    ) -> FinancialHealth {
        let monthly_expenses = self.monthly_expenses(expenses, now);
        let portfolio_value: f64 = stocks
            .iter()
            .chain(cryptos)
            .map(Holding::current_value)
            .fold(0.0, |acc, v| acc + v);

        let emergency_fund_ratio = if monthly_expenses > 0.0 {
            portfolio_value / monthly_expenses
        } else {
            0.0
        };

        let total_items = stocks.len() + cryptos.len();
        let diversification = if total_items > 0 {
            let stock_share = stocks.len() as f64 / total_items as f64;
            let crypto_share = cryptos.len() as f64 / total_items as f64;
            100.0 - (stock_share - crypto_share).abs() * 100.0
        } else {
            0.0
        };

        let goal_progress = if goals.is_empty() {
            0.0
        } else {
            let total: f64 = goals
                .iter()
                .map(|g| {
                    if g.target_amount > 0.0 {
                        g.saved_amount / g.target_amount
                    } else {
                        0.0
                    }
                })
                .fold(0.0, |acc, v| acc + v);
            total / goals.len() as f64 * 100.0
        };

        let no_data =
            expenses.is_empty() && stocks.is_empty() && cryptos.is_empty() && goals.is_empty();
        let score = if no_data {
            NEUTRAL_SCORE
        } else {
            let emergency = (emergency_fund_ratio * 10.0).min(30.0);
            let diversified = diversification / 100.0 * 20.0;
            let goal = goal_progress / 100.0 * 30.0;
            (emergency + diversified + goal + 20.0).round().clamp(0.0, 100.0) as u32
        };

        FinancialHealth {
            score,
            monthly_expenses,
            portfolio_value,
            emergency_fund_ratio,
            diversification,
            goal_progress,
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
