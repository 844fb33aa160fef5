//! Expense sorting

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::valid_records;
use crate::models::ExpenseRecord;

/// Field to sort expenses by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Category,
    Description,
}

impl SortField {
    fn compare(&self, a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
        match self {
            Self::Date => a.date.cmp(&b.date),
            Self::Amount => a.amount.cmp(&b.amount),
            Self::Category => a.category.cmp(&b.category),
            Self::Description => a.description.cmp(&b.description),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Amount => write!(f, "amount"),
            Self::Category => write!(f, "category"),
            Self::Description => write!(f, "description"),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "category" => Ok(Self::Category),
            "description" => Ok(Self::Description),
            other => Err(format!("Unknown sort field: {}", other)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Sort options; defaults to newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn ascending(field: SortField) -> Self {
        Self::new(field, SortOrder::Ascending)
    }

    pub fn descending(field: SortField) -> Self {
        Self::new(field, SortOrder::Descending)
    }

    /// Compare two records under this spec
    ///
    /// Descending reverses the key comparison only, so equal keys keep their
    /// input order in both directions.
    pub fn compare(&self, a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Return a sorted copy of `records`
///
/// Uses a stable sort: records with equal keys stay in input order.
pub fn sort(records: &[ExpenseRecord], spec: SortSpec) -> Vec<ExpenseRecord> {
    let mut sorted: Vec<ExpenseRecord> = valid_records(records).cloned().collect();
    sorted.sort_by(|a, b| spec.compare(a, b));
    sorted
}
