//! YAML Export functionality
//!
//! Human-readable variant of the full JSON export.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full snapshot to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# expense-tracker export\n\
         # Generated: {}\n\
         # App Version: {}\n\
         # Expenses: {}, budgets: {}\n\n",
        export.exported_at,
        export.app_version,
        export.metadata.expense_count,
        export.metadata.budget_count
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}

/// Read and validate a YAML export
///
/// Comment lines are ignored by the YAML parser.
pub fn import_from_yaml(yaml_str: &str) -> ExpenseResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| ExpenseError::Import(e.to_string()))?;

    export.validate().map_err(ExpenseError::Import)?;

    Ok(export)
}
