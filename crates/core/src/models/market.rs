use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One end-of-day price record for a listed instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EodPrice {
    pub symbol: String,
    /// Trading day as reported upstream (ISO 8601, possibly with a time part)
    pub date: String,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl EodPrice {
    /// Calendar day of the record, if the upstream date is well-formed.
    pub fn trading_day(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

/// A listed instrument that can be added to a portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub exchange: Option<String>,
}

/// Latest quote details shown when picking an instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

impl StockQuote {
    /// Pick the most recent record. Upstream returns newest first, but
    /// records are compared by trading day so the order is not relied on.
    pub fn from_latest(prices: &[EodPrice]) -> Option<Self> {
        let latest = prices
            .iter()
            .max_by_key(|p| p.trading_day())?;
        Some(Self {
            symbol: latest.symbol.clone(),
            open: latest.open,
            high: latest.high,
            low: latest.low,
            close: latest.close,
            volume: latest.volume,
        })
    }
}
