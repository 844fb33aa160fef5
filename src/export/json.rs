//! JSON Export functionality
//!
//! Exports the complete snapshot to JSON format with schema versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::distinct_categories;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, Category, ExpenseRecord, Money};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full snapshot export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub expenses: Vec<ExpenseRecord>,

    pub budgets: Vec<Budget>,

    /// Category catalog; absent in older exports
    #[serde(default)]
    pub categories: Vec<Category>,

    pub metadata: ExportMetadata,
}

/// Summary figures written alongside the data for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub budget_count: usize,
    pub category_count: usize,
    #[serde(with = "crate::models::money::decimal")]
    pub total_spent: Money,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Build an export from explicit data
    pub fn new(expenses: Vec<ExpenseRecord>, budgets: Vec<Budget>) -> Self {
        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            budget_count: budgets.len(),
            category_count: distinct_categories(&expenses).len(),
            total_spent: expenses.iter().map(|r| r.amount).sum(),
            earliest_expense: expenses.iter().map(|r| r.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|r| r.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses,
            budgets,
            categories: Vec::new(),
            metadata,
        }
    }

    /// Create a full export from storage
    pub fn from_storage(storage: &Storage) -> ExpenseResult<Self> {
        let mut export = Self::new(storage.expenses.get_all()?, storage.budgets.get_all()?);
        export.categories = storage.categories.get_all()?;
        Ok(export)
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut ids = HashSet::new();
        for record in &self.expenses {
            record
                .validate()
                .map_err(|e| format!("Expense {}: {}", record.id, e))?;
            if !ids.insert(record.id.as_str()) {
                return Err(format!("Duplicate expense id {}", record.id));
            }
        }

        let mut categories = HashSet::new();
        for budget in &self.budgets {
            budget.validate()?;
            if !categories.insert(budget.category.as_str()) {
                return Err(format!("Duplicate budget for category {}", budget.category));
            }
        }

        let mut names = HashSet::new();
        for category in &self.categories {
            category.validate().map_err(|e| e.to_string())?;
            if !names.insert(category.name.as_str()) {
                return Err(format!("Duplicate category {}", category.name));
            }
        }

        Ok(())
    }
}

/// Export the full snapshot to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}

/// Read and validate a JSON export
pub fn import_from_json(json_str: &str) -> ExpenseResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| ExpenseError::Import(e.to_string()))?;

    export.validate().map_err(ExpenseError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn seed(storage: &Storage) {
        let may = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        storage
            .expenses
            .insert(ExpenseRecord::new("a", Money::from_cents(4550), "Food", may(25)))
            .unwrap();
        storage
            .expenses
            .insert(ExpenseRecord::new("b", Money::from_cents(12000), "Transport", may(3)))
            .unwrap();
        storage
            .budgets
            .upsert(Budget::monthly("Food", Money::from_cents(50000)))
            .unwrap();
    }

    #[test]
    fn test_full_export_metadata() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let export = FullExport::from_storage(&storage).unwrap();
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.expense_count, 2);
        assert_eq!(export.metadata.budget_count, 1);
        assert_eq!(export.metadata.category_count, 2);
        assert_eq!(export.metadata.total_spent, Money::from_cents(16550));
        assert_eq!(export.metadata.earliest_expense.as_deref(), Some("2024-05-03"));
        assert_eq!(export.metadata.latest_expense.as_deref(), Some("2024-05-25"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, true).unwrap();

        let imported = import_from_json(&String::from_utf8(output).unwrap()).unwrap();
        assert_eq!(imported.expenses, storage.expenses.get_all().unwrap());
        assert_eq!(imported.budgets.len(), 1);
        assert_eq!(imported.categories, storage.categories.get_all().unwrap());
    }

    #[test]
    fn test_export_without_categories_still_loads() {
        let mut value = serde_json::to_value(FullExport::new(vec![], vec![])).unwrap();
        value.as_object_mut().unwrap().remove("categories");

        let imported = import_from_json(&value.to_string()).unwrap();
        assert!(imported.categories.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_data() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let record = ExpenseRecord::new("dup", Money::from_cents(100), "Food", date);

        let export = FullExport::new(vec![record.clone(), record], vec![]);
        assert!(export.validate().unwrap_err().contains("Duplicate"));

        let mut export = FullExport::new(vec![], vec![]);
        export.schema_version = "0.1.0".into();
        assert!(export.validate().is_err());

        let mut export = FullExport::new(vec![], vec![]);
        export.categories = vec![Category::new("Pets", "#fff"), Category::new("Pets", "#000")];
        assert!(export.validate().unwrap_err().contains("Duplicate category"));
    }
}
