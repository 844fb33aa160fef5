//! Time-bucketed spending trends
//!
//! Monthly and weekly trends are sparse: only buckets that contain at least
//! one expense appear. The daily view is dense and covers every day of the
//! requested month, including days without spending.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::valid_records;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{days_in_month, ExpenseRecord, Money};

/// Number of months shown by the monthly trend when not configured
pub const DEFAULT_TREND_MONTHS: usize = 6;

/// Number of weeks shown by the weekly trend when not configured
pub const DEFAULT_TREND_WEEKS: usize = 8;

/// Spending within one time bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucketAggregate {
    /// Bucket identifier: "2024-05-25", "2024-W21" or "2024-05"
    pub label: String,
    /// First day of the bucket
    pub start: NaiveDate,
    /// Sum of expenses in the bucket
    pub total: Money,
    /// Number of expenses in the bucket
    pub count: usize,
}

impl TimeBucketAggregate {
    fn empty(label: String, start: NaiveDate) -> Self {
        Self {
            label,
            start,
            total: Money::zero(),
            count: 0,
        }
    }

    fn add(&mut self, amount: Money) {
        self.total += amount;
        self.count += 1;
    }
}

/// Monthly totals for the most recent `month_count` months that have spending
///
/// Buckets are keyed `YYYY-MM` and returned oldest first.
pub fn aggregate_by_month(records: &[ExpenseRecord], month_count: usize) -> Vec<TimeBucketAggregate> {
    let mut buckets: BTreeMap<(i32, u32), TimeBucketAggregate> = BTreeMap::new();

    for record in valid_records(records) {
        let key = (record.date.year(), record.date.month());
        buckets
            .entry(key)
            .or_insert_with(|| {
                let start = record.date.with_day(1).unwrap_or(record.date);
                TimeBucketAggregate::empty(format!("{:04}-{:02}", key.0, key.1), start)
            })
            .add(record.amount);
    }

    most_recent(buckets, month_count)
}

/// Weekly totals for the most recent `week_count` ISO weeks that have spending
///
/// Buckets are keyed `YYYY-Www` and returned oldest first.
pub fn aggregate_by_week(records: &[ExpenseRecord], week_count: usize) -> Vec<TimeBucketAggregate> {
    let mut buckets: BTreeMap<(i32, u32), TimeBucketAggregate> = BTreeMap::new();

    for record in valid_records(records) {
        let iso = record.date.iso_week();
        let key = (iso.year(), iso.week());
        buckets
            .entry(key)
            .or_insert_with(|| {
                let start = NaiveDate::from_isoywd_opt(key.0, key.1, Weekday::Mon)
                    .unwrap_or(record.date);
                TimeBucketAggregate::empty(format!("{:04}-W{:02}", key.0, key.1), start)
            })
            .add(record.amount);
    }

    most_recent(buckets, week_count)
}

/// Daily totals for every day of `year`-`month`
///
/// Always returns one bucket per calendar day, zero-filled. An invalid month
/// is a validation error.
pub fn aggregate_by_day(
    records: &[ExpenseRecord],
    year: i32,
    month: u32,
) -> ExpenseResult<Vec<TimeBucketAggregate>> {
    let days = days_in_month(year, month).ok_or_else(|| {
        ExpenseError::Validation(format!("Invalid month: {:04}-{:02}", year, month))
    })?;

    let mut buckets: Vec<TimeBucketAggregate> = (1..=days)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| TimeBucketAggregate::empty(date.format("%Y-%m-%d").to_string(), date))
        .collect();

    for record in valid_records(records) {
        if record.date.year() == year && record.date.month() == month {
            let index = record.date.day0() as usize;
            if let Some(bucket) = buckets.get_mut(index) {
                bucket.add(record.amount);
            }
        }
    }

    Ok(buckets)
}

/// Keep the last `count` buckets of a chronologically ordered map
fn most_recent<K: Ord>(
    buckets: BTreeMap<K, TimeBucketAggregate>,
    count: usize,
) -> Vec<TimeBucketAggregate> {
    let skip = buckets.len().saturating_sub(count);
    buckets.into_values().skip(skip).collect()
}
