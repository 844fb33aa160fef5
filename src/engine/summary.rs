//! Dashboard spending summary

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::valid_records;
use crate::models::{ExpenseRecord, Money, PeriodWindow};

/// Headline spending figures relative to a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    /// The day the summary is relative to
    pub as_of: NaiveDate,
    /// Spending in the calendar month containing `as_of`
    pub current_month_total: Money,
    /// Spending in the previous calendar month
    pub last_month_total: Money,
    /// Spending over the seven days ending on `as_of`
    pub last_seven_days_total: Money,
    /// Spending across all records
    pub all_time_total: Money,
    /// Change from last month to this month in percent; 0 without last-month spending
    pub month_over_month_change: f64,
    /// Current month total divided by the days elapsed so far
    pub average_daily_spending: Money,
    /// Number of expenses in the current month
    pub current_month_count: usize,
}

/// Summarize spending as of `today`
pub fn summarize(records: &[ExpenseRecord], today: NaiveDate) -> SpendingSummary {
    let current_month = PeriodWindow::month_containing(today);
    let last_month = current_month.prev();
    let week_start = today - Duration::days(6);

    let mut current_month_total = Money::zero();
    let mut last_month_total = Money::zero();
    let mut last_seven_days_total = Money::zero();
    let mut all_time_total = Money::zero();
    let mut current_month_count = 0;

    for record in valid_records(records) {
        all_time_total += record.amount;

        if current_month.contains(record.date) {
            current_month_total += record.amount;
            current_month_count += 1;
        } else if last_month.contains(record.date) {
            last_month_total += record.amount;
        }

        if record.date >= week_start && record.date <= today {
            last_seven_days_total += record.amount;
        }
    }

    let month_over_month_change = if last_month_total.is_positive() {
        (current_month_total - last_month_total).percent_of(last_month_total)
    } else {
        0.0
    };

    let average_daily_spending = Money::from_decimal(
        current_month_total.cents() as f64 / f64::from(today.day()) / 100.0,
    )
    .unwrap_or_default();

    SpendingSummary {
        as_of: today,
        current_month_total,
        last_month_total,
        last_seven_days_total,
        all_time_total,
        month_over_month_change,
        average_daily_spending,
        current_month_count,
    }
}

/// The `limit` largest expenses, largest first
///
/// Expenses with equal amounts keep their input order.
pub fn top_expenses(records: &[ExpenseRecord], limit: usize) -> Vec<ExpenseRecord> {
    let mut sorted: Vec<&ExpenseRecord> = valid_records(records).collect();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
    sorted.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::*;

    #[test]
    fn test_summary_figures() {
        let summary = summarize(&sample(), date(2024, 5, 25));

        assert_eq!(summary.current_month_total, Money::from_cents(4550 + 12000 + 899));
        assert_eq!(summary.last_month_total, Money::from_cents(2310 + 6000));
        assert_eq!(summary.last_seven_days_total, Money::from_cents(4550 + 12000));
        assert_eq!(summary.all_time_total, Money::from_cents(25759));
        assert_eq!(summary.current_month_count, 3);

        // 17449 over 8310 is a 109.97% increase
        assert!((summary.month_over_month_change - 109.975).abs() < 0.01);

        // 174.49 / 25 days = 6.9796
        assert_eq!(summary.average_daily_spending, Money::from_cents(698));
    }

    #[test]
    fn test_future_dated_expenses_not_in_last_week() {
        let records = vec![
            expense("past", 100, "Food", date(2024, 5, 18)),
            expense("edge", 200, "Food", date(2024, 5, 19)),
            expense("today", 300, "Food", date(2024, 5, 25)),
            expense("future", 400, "Food", date(2024, 5, 26)),
        ];
        let summary = summarize(&records, date(2024, 5, 25));
        assert_eq!(summary.last_seven_days_total, Money::from_cents(500));
    }

    #[test]
    fn test_january_compares_with_december() {
        let records = vec![
            expense("dec", 10000, "Food", date(2023, 12, 10)),
            expense("jan", 5000, "Food", date(2024, 1, 10)),
        ];
        let summary = summarize(&records, date(2024, 1, 20));
        assert_eq!(summary.last_month_total, Money::from_cents(10000));
        assert!((summary.month_over_month_change + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let half = i64::MAX / 2 + 1;
        let records = vec![
            expense("a", half, "Food", date(2024, 5, 1)),
            expense("b", half, "Rent", date(2024, 5, 2)),
        ];
        let summary = summarize(&records, date(2024, 5, 2));
        assert_eq!(summary.current_month_total, Money::from_cents(i64::MAX));
        assert_eq!(summary.all_time_total, Money::from_cents(i64::MAX));
        assert!(summary.average_daily_spending.is_positive());
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[], date(2024, 5, 25));
        assert_eq!(summary.all_time_total, Money::zero());
        assert_eq!(summary.month_over_month_change, 0.0);
        assert_eq!(summary.average_daily_spending, Money::zero());
        assert_eq!(summary.current_month_count, 0);
    }

    #[test]
    fn test_top_expenses() {
        let top = top_expenses(&sample(), 2);
        let ids: Vec<_> = top.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "5"]);
        assert!(top_expenses(&[], 3).is_empty());
        assert_eq!(top_expenses(&sample(), 50).len(), 5);
    }
}
