use std::collections::BTreeMap;

use crate::errors::CoreError;

/// Currency code → rate relative to some base.
pub type Rates = BTreeMap<String, f64>;

/// USD-relative rates for every supported currency.
pub const USD_RATES: [(&str, f64); 9] = [
    ("USD", 1.0),
    ("EUR", 0.6075),
    ("GBP", 0.5043),
    ("JPY", 152.25),
    ("CAD", 1.4170),
    ("AUD", 0.6359),
    ("CHF", 0.8983),
    ("CNY", 7.2530),
    ("INR", 86.82),
];

pub const BASE_CURRENCY: &str = "USD";

/// Serves the static rate table and converts amounts with it.
///
/// Rates for another base are derived by dividing every USD rate by the
/// base's USD rate, rounded to 4 decimal places.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Supported ISO codes, in table order.
    pub fn supported(&self) -> Vec<&'static str> {
        USD_RATES.iter().map(|(code, _)| *code).collect()
    }

    pub fn is_supported(&self, code: &str) -> bool {
        USD_RATES.iter().any(|(c, _)| *c == code.trim())
    }

    /// All nine rates relative to `base`.
    /// E.g., base "EUR" → {"USD": 1.6461, "EUR": 1.0, ...}
    pub fn rates_for_base(&self, base: &str) -> Result<Rates, CoreError> {
        let base = base.trim();
        let base_rate = USD_RATES
            .iter()
            .find(|(code, _)| *code == base)
            .map(|(_, rate)| *rate)
            .ok_or_else(|| CoreError::UnsupportedCurrency(base.to_string()))?;

        if base == BASE_CURRENCY {
            return Ok(USD_RATES
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect());
        }

        Ok(USD_RATES
            .iter()
            .map(|(code, rate)| (code.to_string(), round4(rate / base_rate)))
            .collect())
    }

    /// Convert `amount` from one currency to another using `rates`
    /// (any base). The amount is returned unchanged when the currencies
    /// match or either rate is unknown.
    pub fn convert(&self, amount: f64, from: &str, to: &str, rates: &Rates) -> f64 {
        if from == to {
            return amount;
        }
        match (rates.get(from), rates.get(to)) {
            (Some(from_rate), Some(to_rate)) if *from_rate > 0.0 => amount / from_rate * to_rate,
            _ => {
                log::debug!("No rate for {from}->{to}, keeping raw amount");
                amount
            }
        }
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
