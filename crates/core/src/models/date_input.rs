//! Calendar-date fields that also accept full RFC 3339 timestamps.
//!
//! Older records store some dates as `"2025-01-15"` and others as
//! `"2025-01-15T00:00:00.000Z"`. Both decode to the same `NaiveDate`.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|e| format!("Invalid date '{value}': {e}"))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}
