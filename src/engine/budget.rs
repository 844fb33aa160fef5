//! Budget usage
//!
//! Compares what was spent in a category over a window against the budget's
//! limit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::valid_records;
use crate::models::{Budget, ExpenseRecord, Money, PeriodWindow};

/// Usage share at which a budget is flagged as nearing its limit
pub const WARNING_THRESHOLD: f64 = 80.0;

/// How close a budget is to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    /// Below 80% of the limit
    OnTrack,
    /// Between 80% and 100% of the limit
    Warning,
    /// At or beyond the limit
    Exceeded,
}

impl BudgetHealth {
    fn classify(percentage: f64, remaining: Money) -> Self {
        if remaining.is_negative() || percentage >= 100.0 {
            Self::Exceeded
        } else if percentage >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }
}

impl fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "On track"),
            Self::Warning => write!(f, "Warning"),
            Self::Exceeded => write!(f, "Exceeded"),
        }
    }
}

/// Budget usage over one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// Budgeted category
    pub category: String,
    /// The budget's limit
    pub limit: Money,
    /// Amount spent in the window
    pub spent: Money,
    /// Share of the limit consumed; 0 when the limit is zero
    pub percentage: f64,
    /// Limit minus spent; negative when over budget
    pub remaining: Money,
    /// Window the spending was measured over
    pub window: PeriodWindow,
    /// Classification of the usage
    pub health: BudgetHealth,
}

impl BudgetStatus {
    /// Whether spending went past the limit
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Compute usage of `budget` from the records dated inside `window`
pub fn compute_budget_status(
    budget: &Budget,
    records: &[ExpenseRecord],
    window: &PeriodWindow,
) -> BudgetStatus {
    let start = window.start_date();
    let end = window.end_date();

    let spent: Money = valid_records(records)
        .filter(|r| r.category == budget.category && r.date >= start && r.date <= end)
        .map(|r| r.amount)
        .sum();

    let percentage = spent.percent_of(budget.amount);
    let remaining = budget.amount - spent;

    BudgetStatus {
        category: budget.category.clone(),
        limit: budget.amount,
        spent,
        percentage,
        remaining,
        window: window.clone(),
        health: BudgetHealth::classify(percentage, remaining),
    }
}

/// Compute usage for every budget over the period containing `today`
pub fn compute_budget_statuses(
    budgets: &[Budget],
    records: &[ExpenseRecord],
    today: NaiveDate,
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|budget| compute_budget_status(budget, records, &budget.period.window_for(today)))
        .collect()
}
