//! Core data models for expense-tracker
//!
//! Expense records, budgets, the category catalog, money amounts and date
//! windows.

pub mod budget;
pub mod category;
pub mod expense;
pub mod money;
pub mod period;

pub use budget::{Budget, BudgetPeriod};
pub use category::{Category, CategoryValidationError, COLOR_PALETTE, PRESET_CATEGORIES};
pub use expense::{ExpenseRecord, ExpenseValidationError, DEFAULT_CATEGORY_COLOR};
pub use money::Money;
pub use period::{days_in_month, PeriodWindow};
