//! Export module for expense-tracker
//!
//! - CSV: expenses and budgets, spreadsheet-compatible
//! - JSON: machine-readable full snapshot
//! - YAML: human-readable full snapshot

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_budgets_csv, export_expenses_csv, EXPENSE_CSV_HEADER};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
