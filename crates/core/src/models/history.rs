use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::holding::Holding;

/// A timestamped aggregate valuation of a portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl HistorySample {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Holdings and their valuation history, persisted together as one value
/// so a sample is never stored without the portfolio that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioState {
    #[serde(default)]
    pub holdings: Vec<Holding>,

    /// Sorted ascending by timestamp.
    #[serde(default)]
    pub history: Vec<HistorySample>,
}
