//! Expense filtering
//!
//! A record passes a [`FilterCriteria`] when it satisfies every predicate that
//! is set. Unset predicates are wildcards.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::valid_records;
use crate::models::{ExpenseRecord, Money};

/// Filter options for expense lists and reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against description and category
    #[serde(default)]
    pub search: Option<String>,
    /// Earliest date (inclusive)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Latest date (inclusive)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Minimum amount (inclusive)
    #[serde(default)]
    pub min_amount: Option<Money>,
    /// Maximum amount (inclusive)
    #[serde(default)]
    pub max_amount: Option<Money>,
    /// Allowed category names; empty means any category
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria that match everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict to an inclusive date range; either bound may be omitted
    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Restrict to an inclusive amount range; either bound may be omitted
    pub fn with_amount_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    /// Add an allowed category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Whether no predicate is active
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, str::is_empty)
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.min_amount.is_none()
            && self.max_amount.is_none()
            && self.categories.is_empty()
    }

    /// Check if a record matches this filter
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        // Search term
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            if !record.description.to_lowercase().contains(&term)
                && !record.category.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        // Date range
        if let Some(start) = self.start_date {
            if record.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.date > end {
                return false;
            }
        }

        // Amount range
        if let Some(min) = self.min_amount {
            if record.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if record.amount > max {
                return false;
            }
        }

        // Category set
        if !self.categories.is_empty() && !self.categories.contains(&record.category) {
            return false;
        }

        true
    }
}

/// Return the records matching `criteria`, in their original order
pub fn filter(records: &[ExpenseRecord], criteria: &FilterCriteria) -> Vec<ExpenseRecord> {
    valid_records(records)
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::*;

    fn ids(records: &[ExpenseRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let records = sample();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(filter(&records, &criteria), records);
    }

    #[test]
    fn test_empty_search_term_is_wildcard() {
        let records = sample();
        let criteria = FilterCriteria::new().with_search("");
        assert!(criteria.is_empty());
        assert_eq!(filter(&records, &criteria).len(), records.len());
    }

    #[test]
    fn test_search_is_case_insensitive_on_description_and_category() {
        let records = sample();

        let by_description = FilterCriteria::new().with_search("TRAIN");
        assert_eq!(ids(&filter(&records, &by_description)), vec!["2"]);

        let by_category = FilterCriteria::new().with_search("food");
        assert_eq!(ids(&filter(&records, &by_category)), vec!["1", "4"]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let records = sample();
        let criteria = FilterCriteria::new().between(Some(date(2024, 5, 3)), Some(date(2024, 5, 24)));
        assert_eq!(ids(&filter(&records, &criteria)), vec!["2", "3"]);

        let open_start = FilterCriteria::new().between(None, Some(date(2024, 4, 28)));
        assert_eq!(ids(&filter(&records, &open_start)), vec!["4", "5"]);
    }

    #[test]
    fn test_amount_range_is_inclusive() {
        let records = sample();
        let criteria = FilterCriteria::new()
            .with_amount_range(Some(Money::from_cents(2310)), Some(Money::from_cents(6000)));
        assert_eq!(ids(&filter(&records, &criteria)), vec!["1", "4", "5"]);
    }

    #[test]
    fn test_category_set() {
        let records = sample();
        let criteria = FilterCriteria::new()
            .with_category("Food")
            .with_category("Utilities");
        assert_eq!(ids(&filter(&records, &criteria)), vec!["1", "4", "5"]);

        // Category match is exact, not case-folded
        let criteria = FilterCriteria::new().with_category("food");
        assert!(filter(&records, &criteria).is_empty());
    }

    #[test]
    fn test_conjunction_of_predicates() {
        let records = sample();
        let criteria = FilterCriteria::new()
            .with_category("Food")
            .between(Some(date(2024, 5, 1)), None)
            .with_amount_range(Some(Money::from_cents(1000)), None);

        let result = filter(&records, &criteria);
        assert_eq!(ids(&result), vec!["1"]);

        // No false negatives: every record matching all predicates is returned
        let expected: Vec<_> = records.iter().filter(|r| criteria.matches(r)).collect();
        assert_eq!(result.len(), expected.len());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = sample();
        let criteria = FilterCriteria::new()
            .with_search("o")
            .with_amount_range(None, Some(Money::from_cents(10000)));

        let once = filter(&records, &criteria);
        let twice = filter(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_matches_and_empty_input() {
        let criteria = FilterCriteria::new().with_search("nothing like this");
        assert!(filter(&sample(), &criteria).is_empty());
        assert!(filter(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let records = sample();
        let before = records.clone();
        let _ = filter(&records, &FilterCriteria::new().with_category("Food"));
        assert_eq!(records, before);
    }
}
