//! Expense record model
//!
//! One user-entered expense: an amount, a category with its display color, a
//! free-text description and the calendar date it happened on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{self, Money};

/// Display color given to expenses that arrive without one
pub const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

/// A single expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Opaque unique identifier
    pub id: String,

    /// Amount spent; always positive for a valid record
    #[serde(with = "money::decimal")]
    pub amount: Money,

    /// Category name
    pub category: String,

    /// Display color tag for the category, carried through untouched
    #[serde(default, alias = "categoryColor")]
    pub category_color: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Calendar date of the expense
    pub date: NaiveDate,

    /// ISO currency code; `None` means the configured default currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl ExpenseRecord {
    /// Create a new expense with the default color and no description
    pub fn new(
        id: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            category: category.into(),
            category_color: DEFAULT_CATEGORY_COLOR.to_string(),
            description: String::new(),
            date,
            currency: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.category_color = color.into();
        self
    }

    /// Set the currency code
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// The record's currency, falling back to `default`
    pub fn currency_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.currency.as_deref().unwrap_or(default)
    }

    /// Whether the record satisfies the expense invariants
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.id.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyId);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        Ok(())
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.category,
            self.amount
        )
    }
}

/// Validation errors for expense records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyId,
    NonPositiveAmount(Money),
    EmptyCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Expense id cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
            Self::EmptyCategory => write!(f, "Expense category cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = ExpenseRecord::new("e1", Money::from_cents(4550), "Food", may(25))
            .with_description("Lunch");
        assert_eq!(expense.category_color, DEFAULT_CATEGORY_COLOR);
        assert_eq!(expense.description, "Lunch");
        assert!(expense.is_valid());
    }

    #[test]
    fn test_validation() {
        let zero = ExpenseRecord::new("e1", Money::zero(), "Food", may(1));
        assert_eq!(
            zero.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(Money::zero()))
        );

        let negative = ExpenseRecord::new("e2", Money::from_cents(-100), "Food", may(1));
        assert!(!negative.is_valid());

        let no_category = ExpenseRecord::new("e3", Money::from_cents(100), "  ", may(1));
        assert_eq!(
            no_category.validate(),
            Err(ExpenseValidationError::EmptyCategory)
        );

        let no_id = ExpenseRecord::new("", Money::from_cents(100), "Food", may(1));
        assert_eq!(no_id.validate(), Err(ExpenseValidationError::EmptyId));
    }

    #[test]
    fn test_currency_fallback() {
        let expense = ExpenseRecord::new("e1", Money::from_cents(100), "Food", may(1));
        assert_eq!(expense.currency_or("USD"), "USD");
        let expense = expense.with_currency("EUR");
        assert_eq!(expense.currency_or("USD"), "EUR");
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r##"{
            "id": "abc",
            "amount": 120.0,
            "category": "Transport",
            "categoryColor": "#3b82f6",
            "description": "Train pass",
            "date": "2024-05-24"
        }"##;
        let expense: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount, Money::from_cents(12000));
        assert_eq!(expense.category_color, "#3b82f6");
        assert_eq!(expense.date, may(24));
        assert_eq!(expense.currency, None);
    }

    #[test]
    fn test_malformed_date_rejected_on_parse() {
        let json = r#"{"id":"x","amount":1.0,"category":"Food","date":"2024-13-45"}"#;
        assert!(serde_json::from_str::<ExpenseRecord>(json).is_err());
    }

    #[test]
    fn test_display() {
        let expense = ExpenseRecord::new("e1", Money::from_cents(4550), "Food", may(25))
            .with_description("Lunch");
        assert_eq!(expense.to_string(), "2024-05-25 Lunch [Food] $45.50");
    }
}
