//! User settings for expense-tracker
//!
//! Display preferences and the defaults used by reports and listings.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::engine::{SortSpec, DEFAULT_TREND_MONTHS, DEFAULT_TREND_WEEKS};
use crate::error::ExpenseError;

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol printed in front of amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Currency code assumed for expenses that carry none
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Months shown by the monthly trend
    #[serde(default = "default_trend_months")]
    pub trend_months: usize,

    /// Weeks shown by the weekly trend
    #[serde(default = "default_trend_weeks")]
    pub trend_weeks: usize,

    /// Expenses listed in the summary's top list
    #[serde(default = "default_top_expense_count")]
    pub top_expense_count: usize,

    /// Ordering for `list` when no sort flag is given
    #[serde(default)]
    pub default_sort: SortSpec,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_trend_months() -> usize {
    DEFAULT_TREND_MONTHS
}

fn default_trend_weeks() -> usize {
    DEFAULT_TREND_WEEKS
}

fn default_top_expense_count() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency_symbol(),
            default_currency: default_currency(),
            trend_months: default_trend_months(),
            trend_weeks: default_trend_weeks(),
            top_expense_count: default_top_expense_count(),
            default_sort: SortSpec::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if no file exists yet
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        log::info!("Saved settings to {}", paths.settings_file().display());
        Ok(())
    }
}
