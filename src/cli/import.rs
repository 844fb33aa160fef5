//! CLI command handler for import
//!
//! CSV files are parsed row by row; JSON and YAML snapshot exports are
//! merged into the current snapshot.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;

use super::export::ExportFormat;
use super::parse_date_arg;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{import_from_json, import_from_yaml, FullExport};
use crate::import::ImportService;
use crate::storage::Storage;

/// Arguments for `import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// File to import (.csv, .json or .yaml)
    pub file: PathBuf,

    /// Date for CSV rows that leave the date empty (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub default_date: Option<String>,
}

/// Handle `import`
pub fn handle_import(storage: &Storage, args: ImportArgs, today: NaiveDate) -> ExpenseResult<()> {
    let path = args.file.as_path();
    if !path.exists() {
        return Err(ExpenseError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }

    match ExportFormat::from_path(path).unwrap_or(ExportFormat::Csv) {
        ExportFormat::Csv => {
            let default_date = match args.default_date.as_deref() {
                Some(s) => parse_date_arg(s, "default")?,
                None => today,
            };
            import_csv(storage, path, default_date)
        }
        ExportFormat::Json => merge_snapshot(storage, import_from_json(&read_file(path)?)?),
        ExportFormat::Yaml => merge_snapshot(storage, import_from_yaml(&read_file(path)?)?),
    }
}

fn import_csv(storage: &Storage, path: &Path, default_date: NaiveDate) -> ExpenseResult<()> {
    let result = ImportService::new(storage).import_file(path, default_date)?;

    println!("Import Complete!");
    println!("  Imported:    {}", result.imported());
    if result.errors > 0 {
        println!("  Errors:      {}", result.errors);
        for message in &result.error_messages {
            println!("    {}", message);
        }
    }

    Ok(())
}

/// Add a snapshot's expenses, budgets and categories to storage
///
/// Expenses whose id already exists are skipped; budgets replace existing
/// budgets for the same category. Catalogued categories keep their current
/// color.
fn merge_snapshot(storage: &Storage, export: FullExport) -> ExpenseResult<()> {
    for category in &export.categories {
        storage.categories.ensure(&category.name, &category.color)?;
    }

    let mut imported = 0;
    let mut skipped = 0;
    for record in export.expenses {
        match storage.expenses.insert(record) {
            Ok(()) => imported += 1,
            Err(ExpenseError::Duplicate { identifier, .. }) => {
                log::debug!("Skipping existing expense {}", identifier);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let budget_count = export.budgets.len();
    for budget in export.budgets {
        storage.budgets.upsert(budget)?;
    }

    storage.save_all()?;
    log::info!(
        "Merged snapshot: {} expenses imported, {} skipped, {} budgets",
        imported,
        skipped,
        budget_count
    );

    println!("Import Complete!");
    println!("  Imported:    {}", imported);
    println!("  Skipped:     {} (already present)", skipped);
    println!("  Budgets:     {}", budget_count);
    Ok(())
}

fn read_file(path: &Path) -> ExpenseResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| ExpenseError::Import(format!("Failed to read {}: {}", path.display(), e)))
}
