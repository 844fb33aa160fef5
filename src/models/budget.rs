//! Budget model
//!
//! A spending limit for one category over a recurring period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::{self, Money};
use super::period::PeriodWindow;

/// How often a budget resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// ISO week, Monday to Sunday
    Weekly,
    /// Calendar month
    #[default]
    Monthly,
    /// Calendar year
    Yearly,
}

impl BudgetPeriod {
    /// Resolve this period to the concrete window that contains `today`
    pub fn window_for(&self, today: NaiveDate) -> PeriodWindow {
        match self {
            Self::Weekly => PeriodWindow::week_containing(today),
            Self::Monthly => PeriodWindow::month_containing(today),
            Self::Yearly => PeriodWindow::year_containing(today),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" => Ok(Self::Yearly),
            other => Err(format!(
                "Unknown budget period '{}'. Use weekly, monthly or yearly",
                other
            )),
        }
    }
}

/// A spending limit for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Category name this budget applies to (exact match)
    pub category: String,

    /// Spending limit for one period
    #[serde(with = "money::decimal")]
    pub amount: Money,

    /// Recurrence period
    #[serde(default)]
    pub period: BudgetPeriod,
}

impl Budget {
    /// Create a new budget
    pub fn new(category: impl Into<String>, amount: Money, period: BudgetPeriod) -> Self {
        Self {
            category: category.into(),
            amount,
            period,
        }
    }

    /// Create a monthly budget
    pub fn monthly(category: impl Into<String>, amount: Money) -> Self {
        Self::new(category, amount, BudgetPeriod::Monthly)
    }

    /// Validate the budget definition
    ///
    /// A zero limit is allowed; negative limits are not.
    pub fn validate(&self) -> Result<(), String> {
        if self.category.trim().is_empty() {
            return Err("Budget category cannot be empty".to_string());
        }
        if self.amount.is_negative() {
            return Err(format!("Budget amount cannot be negative: {}", self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.category, self.amount, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_for() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 25).unwrap();
        assert_eq!(
            BudgetPeriod::Monthly.window_for(today),
            PeriodWindow::month(2024, 5)
        );
        assert_eq!(
            BudgetPeriod::Weekly.window_for(today),
            PeriodWindow::week(2024, 21)
        );
        assert_eq!(BudgetPeriod::Yearly.window_for(today), PeriodWindow::year(2024));
    }

    #[test]
    fn test_parse_period() {
        assert_eq!("Weekly".parse::<BudgetPeriod>(), Ok(BudgetPeriod::Weekly));
        assert_eq!("month".parse::<BudgetPeriod>(), Ok(BudgetPeriod::Monthly));
        assert_eq!("yearly".parse::<BudgetPeriod>(), Ok(BudgetPeriod::Yearly));
        assert!("daily".parse::<BudgetPeriod>().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Budget::monthly("Food", Money::from_cents(50000)).validate().is_ok());
        assert!(Budget::monthly("Food", Money::zero()).validate().is_ok());
        assert!(Budget::monthly("Food", Money::from_cents(-1)).validate().is_err());
        assert!(Budget::monthly("", Money::from_cents(1)).validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let budget = Budget::new("Food", Money::from_cents(50000), BudgetPeriod::Weekly);
        let json = serde_json::to_string(&budget).unwrap();
        assert_eq!(json, r#"{"category":"Food","amount":500.0,"period":"weekly"}"#);
        let parsed: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, budget);
    }
}
