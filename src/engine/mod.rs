//! Aggregation & filtering engine
//!
//! Pure functions that turn a slice of expense records into the derived views
//! the reports and the CLI present: filtered and sorted lists, category
//! breakdowns, time-bucketed trends, budget usage and a spending summary.
//!
//! Nothing here performs I/O or reads the clock. Callers pass "today"
//! explicitly. Every function borrows its input and returns fresh values.
//!
//! Records that break the expense invariants (see
//! [`ExpenseRecord::validate`]) are excluded from every result.

pub mod budget;
pub mod category;
pub mod filter;
pub mod sort;
pub mod summary;
pub mod trend;

pub use budget::{compute_budget_status, compute_budget_statuses, BudgetHealth, BudgetStatus};
pub use category::{aggregate_by_category, distinct_categories, top_categories, CategoryAggregate};
pub use filter::{filter, FilterCriteria};
pub use sort::{sort, SortField, SortOrder, SortSpec};
pub use summary::{summarize, top_expenses, SpendingSummary};
pub use trend::{
    aggregate_by_day, aggregate_by_month, aggregate_by_week, TimeBucketAggregate,
    DEFAULT_TREND_MONTHS, DEFAULT_TREND_WEEKS,
};

use crate::models::ExpenseRecord;

/// Iterate over the records that satisfy the expense invariants
pub(crate) fn valid_records(records: &[ExpenseRecord]) -> impl Iterator<Item = &ExpenseRecord> {
    records.iter().filter(|record| match record.validate() {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Excluding expense '{}': {}", record.id, e);
            false
        }
    })
}
