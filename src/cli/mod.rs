//! CLI command handlers
//!
//! Bridges clap argument parsing with storage, the engine and the reports.

pub mod budget;
pub mod category;
pub mod expense;
pub mod export;
pub mod import;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_add, handle_delete, handle_edit, handle_list, AddArgs, EditArgs, ListArgs};
pub use export::{handle_export, ExportArgs, ExportFormat};
pub use import::{handle_import, ImportArgs};
pub use report::{handle_report_command, ReportCommands};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;
use clap::Args;

use crate::engine::FilterCriteria;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;

/// Filter flags shared by `list`, `export` and `report spending`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text matched against description and category
    #[arg(short, long)]
    pub search: Option<String>,

    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Minimum amount, inclusive
    #[arg(long)]
    pub min: Option<String>,

    /// Maximum amount, inclusive
    #[arg(long)]
    pub max: Option<String>,

    /// Only these categories (repeatable, exact match)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,
}

impl FilterArgs {
    /// Validate the flags and build engine criteria
    pub fn to_criteria(&self) -> ExpenseResult<FilterCriteria> {
        let start = self.from.as_deref().map(|s| parse_date_arg(s, "start")).transpose()?;
        let end = self.to.as_deref().map(|s| parse_date_arg(s, "end")).transpose()?;
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(ExpenseError::Validation(format!(
                    "End date {} is before start date {}",
                    end, start
                )));
            }
        }

        let min = self.min.as_deref().map(parse_amount_arg).transpose()?;
        let max = self.max.as_deref().map(parse_amount_arg).transpose()?;

        let mut criteria = FilterCriteria::new()
            .between(start, end)
            .with_amount_range(min, max);
        if let Some(term) = &self.search {
            criteria = criteria.with_search(term.clone());
        }
        for category in &self.categories {
            criteria = criteria.with_category(category.clone());
        }

        Ok(criteria)
    }
}

/// Parse a YYYY-MM-DD argument
pub fn parse_date_arg(s: &str, what: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid {} date: {}. Use YYYY-MM-DD", what, s))
    })
}

/// Parse an amount argument such as "45.50" or "$1,200"
pub fn parse_amount_arg(s: &str) -> ExpenseResult<Money> {
    Money::parse(s).map_err(|e| ExpenseError::Validation(e.to_string()))
}

/// Open a buffered writer for an output file
pub(crate) fn create_output(path: &Path) -> ExpenseResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_to_criteria() {
        let args = FilterArgs {
            search: Some("lunch".into()),
            from: Some("2024-05-01".into()),
            to: Some("2024-05-31".into()),
            min: Some("10".into()),
            max: None,
            categories: vec!["Food".into(), "Travel".into()],
        };
        let criteria = args.to_criteria().unwrap();

        assert_eq!(criteria.search.as_deref(), Some("lunch"));
        assert_eq!(criteria.start_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(criteria.min_amount, Some(Money::from_cents(1000)));
        assert_eq!(criteria.categories.len(), 2);
    }

    #[test]
    fn test_filter_args_validation() {
        let reversed = FilterArgs {
            from: Some("2024-05-31".into()),
            to: Some("2024-05-01".into()),
            ..Default::default()
        };
        assert!(reversed.to_criteria().unwrap_err().is_validation());

        let bad_amount = FilterArgs {
            min: Some("ten".into()),
            ..Default::default()
        };
        assert!(bad_amount.to_criteria().unwrap_err().is_validation());

        assert!(FilterArgs::default().to_criteria().unwrap().is_empty());
    }

    #[test]
    fn test_parse_date_arg() {
        assert!(parse_date_arg("2024-02-29", "start").is_ok());
        assert!(parse_date_arg("2023-02-29", "start").is_err());
        assert!(parse_date_arg("05/25/2024", "start").is_err());
    }
}
