use chrono::{DateTime, Duration, Utc};

use crate::models::analytics::PortfolioSummary;
use crate::models::history::HistorySample;
use crate::models::holding::Holding;

/// Smallest change in aggregate value that is worth a new history sample.
pub const SIGNIFICANT_CHANGE: f64 = 0.01;

/// A sample is recorded at least this often, even without a value change.
pub const STALENESS_WINDOW: Duration = Duration::hours(1);

/// Values a set of holdings and decides when to record a history sample.
///
/// Pure business logic: no I/O, no clock. Callers pass `now`.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Σ quantity × (current price, else acquisition price). 0 for no holdings.
    pub fn compute_current_value(&self, holdings: &[Holding]) -> f64 {
        holdings.iter().map(Holding::current_value).fold(0.0, |acc, v| acc + v)
    }

    /// Σ quantity × acquisition price.
    pub fn compute_cost_basis(&self, holdings: &[Holding]) -> f64 {
        holdings.iter().map(Holding::cost_basis).fold(0.0, |acc, v| acc + v)
    }

    pub fn compute_profit_loss(&self, holdings: &[Holding]) -> f64 {
        self.compute_current_value(holdings) - self.compute_cost_basis(holdings)
    }

    /// Totals for a summary card. The return is 0% for an empty cost basis.
    pub fn summarize(&self, holdings: &[Holding]) -> PortfolioSummary {
        let total_investment = self.compute_cost_basis(holdings);
        let current_value = self.compute_current_value(holdings);
        let profit_loss = current_value - total_investment;
        let return_pct = if total_investment > 0.0 {
            (profit_loss / total_investment) * 100.0
        } else {
            0.0
        };

        PortfolioSummary {
            total_investment,
            current_value,
            profit_loss,
            return_pct,
        }
    }

    /// Append `(now, value)` if the value moved by more than
    /// `SIGNIFICANT_CHANGE` or the last sample is older than
    /// `STALENESS_WINDOW`. An empty history always takes the sample.
    ///
    /// Returns whether a sample was appended. The history is left sorted
    /// ascending by timestamp either way.
    pub fn record_sample_if_significant(
        &self,
        history: &mut Vec<HistorySample>,
        value: f64,
        now: DateTime<Utc>,
    ) -> bool {
        let should_record = match history.iter().max_by_key(|s| s.timestamp) {
            None => true,
            Some(last) => {
                (value - last.value).abs() > SIGNIFICANT_CHANGE
                    || now - last.timestamp > STALENESS_WINDOW
            }
        };

        if should_record {
            history.push(HistorySample::new(now, value));
        }
        // Stable sort keeps insertion order among equal timestamps
        history.sort_by_key(|s| s.timestamp);
        should_record
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}

