//! Reports module for expense-tracker
//!
//! Each report is generated from plain records, formats itself for the
//! terminal and can be written out as CSV.

pub mod budget;
pub mod spending;
pub mod summary;
pub mod trends;

pub use budget::BudgetReport;
pub use spending::SpendingReport;
pub use summary::SummaryReport;
pub use trends::{TrendGranularity, TrendReport};
