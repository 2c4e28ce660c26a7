use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, TimeZone, Utc};

use crate::models::chart::{ChartPoint, Interval, TimeRange};
use crate::models::history::HistorySample;

/// Reduces a valuation history to chart-ready points.
///
/// The core computes all the numbers, the frontend only renders.
/// Buckets are computed in UTC.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Bucket `history` for `range` as seen at `now`.
    ///
    /// 1. Keep samples with `timestamp >= now - range.days`
    /// 2. Walk buckets from the first kept sample, advancing by the interval's calendar unit
    /// 3. Emit `(bucket start, latest sample value)` for each non-empty bucket
    ///
    /// Hourly ranges are not bucketed: each sample becomes its own point.
    /// Weekly buckets are fixed 7×24h windows anchored at the cutoff.
    pub fn bucket_history(
        &self,
        history: &[HistorySample],
        range: &TimeRange,
        now: DateTime<Utc>,
    ) -> Vec<ChartPoint> {
        let cutoff = lookback_start(now, range.days);

        let mut samples: Vec<HistorySample> = history
            .iter()
            .filter(|s| s.timestamp >= cutoff)
            .copied()
            .collect();
        if samples.is_empty() {
            return Vec::new();
        }
        samples.sort_by_key(|s| s.timestamp);

        if range.interval == Interval::Hourly {
            return samples
                .iter()
                .map(|s| ChartPoint {
                    timestamp: s.timestamp,
                    value: s.value,
                })
                .collect();
        }

        // Weekly windows stay anchored at the cutoff.
        let first = samples[0].timestamp;
        let mut bucket_start = match range.interval {
            Interval::Weekly => Duration::try_weeks((first - cutoff).num_weeks())
                .and_then(|offset| cutoff.checked_add_signed(offset))
                .unwrap_or(cutoff),
            _ => floor_to_interval(first, range.interval),
        };
        let mut points = Vec::new();
        let mut idx = 0;

        while idx < samples.len() {
            let Some(bucket_end) = next_bucket(bucket_start, range.interval) else {
                break;
            };

            let mut latest: Option<&HistorySample> = None;
            while idx < samples.len() && samples[idx].timestamp < bucket_end {
                latest = Some(&samples[idx]);
                idx += 1;
            }

            if let Some(sample) = latest {
                points.push(ChartPoint {
                    timestamp: bucket_start,
                    value: sample.value,
                });
            }
            bucket_start = bucket_end;
        }

        points
    }

    /// Convenience: bucket by a predefined range label.
    pub fn bucket_by_label(
        &self,
        history: &[HistorySample],
        label: &str,
        now: DateTime<Utc>,
    ) -> Vec<ChartPoint> {
        self.bucket_history(history, &TimeRange::from_label(label), now)
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// `now` minus `days`, saturating instead of overflowing.
///
/// A lookback too long to represent covers all of history; a negative one
/// too large to represent covers none of it.
pub fn lookback_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(if days < 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}

/// Start of the bucket containing `ts`. Weekly windows start at `ts` itself.
fn floor_to_interval(ts: DateTime<Utc>, interval: Interval) -> DateTime<Utc> {
    let date = ts.date_naive();
    let floored = match interval {
        Interval::Hourly | Interval::Weekly => return ts,
        Interval::Daily => Some(date),
        Interval::Monthly => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
        Interval::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1),
    };
    floored
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or(ts)
}

/// Start of the bucket after the one starting at `start`.
fn next_bucket(start: DateTime<Utc>, interval: Interval) -> Option<DateTime<Utc>> {
    match interval {
        Interval::Hourly => start.checked_add_signed(Duration::hours(1)),
        Interval::Daily => start.checked_add_days(Days::new(1)),
        Interval::Weekly => start.checked_add_signed(Duration::days(7)),
        Interval::Monthly => start.checked_add_months(Months::new(1)),
        Interval::Yearly => start.checked_add_months(Months::new(12)),
    }
}

