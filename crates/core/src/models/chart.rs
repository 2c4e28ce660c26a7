use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bucket granularity used when reducing a valuation history for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// No bucketing: every sample is its own point
    Hourly,
    /// One point per calendar day
    Daily,
    /// One point per 7×24h window anchored at the range cutoff
    Weekly,
    /// One point per calendar month
    Monthly,
    /// One point per calendar year
    Yearly,
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interval::Hourly => write!(f, "hourly"),
            Interval::Daily => write!(f, "daily"),
            Interval::Weekly => write!(f, "weekly"),
            Interval::Monthly => write!(f, "monthly"),
            Interval::Yearly => write!(f, "yearly"),
        }
    }
}

/// A selectable chart window: how far back to look, and how to bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub label: String,
    pub days: i64,
    pub interval: Interval,
}

/// Predefined ranges offered by the portfolio chart, shortest first.
pub const TIME_RANGES: [(&str, i64, Interval); 8] = [
    ("1D", 1, Interval::Hourly),
    ("1W", 7, Interval::Daily),
    ("1M", 30, Interval::Daily),
    ("3M", 90, Interval::Weekly),
    ("6M", 180, Interval::Weekly),
    ("1Y", 365, Interval::Monthly),
    ("5Y", 1825, Interval::Monthly),
    ("10Y", 3650, Interval::Yearly),
];

impl TimeRange {
    /// Look up one of the predefined ranges by label (case-insensitive).
    /// Unknown labels fall back to "1D".
    pub fn from_label(label: &str) -> Self {
        let upper = label.trim().to_uppercase();
        let (label, days, interval) = TIME_RANGES
            .iter()
            .find(|(l, _, _)| *l == upper)
            .copied()
            .unwrap_or(TIME_RANGES[0]);
        Self {
            label: label.to_string(),
            days,
            interval,
        }
    }

    /// Any other lookback/granularity combination.
    pub fn custom(days: i64, interval: Interval) -> Self {
        Self {
            label: format!("{days}D/{interval}"),
            days,
            interval,
        }
    }

    /// All predefined ranges.
    pub fn all() -> Vec<Self> {
        TIME_RANGES
            .iter()
            .map(|(label, days, interval)| Self {
                label: label.to_string(),
                days: *days,
                interval: *interval,
            })
            .collect()
    }
}

/// A single chart point produced by bucketing.
///
/// `timestamp` is the start of the bucket; `value` is the latest sample
/// observed inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}
