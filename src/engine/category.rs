//! Spending breakdown by category

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::valid_records;
use crate::models::{ExpenseRecord, Money};

/// Spending total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    /// Category name
    pub category: String,
    /// Sum of the category's expenses
    pub total: Money,
    /// Number of expenses
    pub count: usize,
    /// Share of the overall total, 0-100
    pub percentage: f64,
    /// Color of the first expense seen in this category
    pub color: String,
    /// Set when expenses in this category disagree on their color
    pub conflicting_colors: bool,
}

/// Group expenses by exact category name
///
/// Results are ordered by total, largest first. Categories with equal totals
/// keep the order in which they were first encountered.
pub fn aggregate_by_category(records: &[ExpenseRecord]) -> Vec<CategoryAggregate> {
    let mut aggregates: Vec<CategoryAggregate> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in valid_records(records) {
        match index.get(record.category.as_str()) {
            Some(&i) => {
                let aggregate = &mut aggregates[i];
                aggregate.total += record.amount;
                aggregate.count += 1;
                if aggregate.color != record.category_color && !aggregate.conflicting_colors {
                    log::debug!(
                        "Category '{}' has conflicting colors: '{}' and '{}'",
                        aggregate.category,
                        aggregate.color,
                        record.category_color
                    );
                    aggregate.conflicting_colors = true;
                }
            }
            None => {
                index.insert(record.category.as_str(), aggregates.len());
                aggregates.push(CategoryAggregate {
                    category: record.category.clone(),
                    total: record.amount,
                    count: 1,
                    percentage: 0.0,
                    color: record.category_color.clone(),
                    conflicting_colors: false,
                });
            }
        }
    }

    let grand_total: Money = aggregates.iter().map(|a| a.total).sum();
    for aggregate in &mut aggregates {
        aggregate.percentage = aggregate.total.percent_of(grand_total);
    }

    // Stable: ties keep first-encountered order
    aggregates.sort_by(|a, b| b.total.cmp(&a.total));
    aggregates
}

/// The `limit` largest categories from an already-aggregated breakdown
pub fn top_categories(aggregates: &[CategoryAggregate], limit: usize) -> Vec<&CategoryAggregate> {
    let mut all: Vec<&CategoryAggregate> = aggregates.iter().collect();
    all.sort_by(|a, b| b.total.cmp(&a.total));
    all.truncate(limit);
    all
}

/// Category names in the order they first appear
pub fn distinct_categories(records: &[ExpenseRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    valid_records(records)
        .filter(|r| seen.insert(r.category.as_str()))
        .map(|r| r.category.clone())
        .collect()
}
