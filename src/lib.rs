//! expense-tracker - personal expense tracking with analytics
//!
//! This library provides the core functionality for the `expenses` command
//! line tool: a validated expense model, a pure aggregation and filtering
//! engine, JSON snapshot storage, CSV import and CSV/JSON/YAML export.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, expenses, categories, budgets, periods)
//! - `engine`: Filtering, sorting and aggregation over expense records
//! - `storage`: JSON file storage layer
//! - `import`: CSV import
//! - `export`: CSV, JSON and YAML export
//! - `reports`: Terminal and CSV reports built on the engine
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
//! use expense_tracker::engine::{filter, FilterCriteria};
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let storage = Storage::open(paths)?;
//! let records = storage.expenses.get_all()?;
//! let food = filter(&records, &FilterCriteria::new().with_category("Food"));
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
