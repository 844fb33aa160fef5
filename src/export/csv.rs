//! CSV Export functionality
//!
//! Exports expenses and budget definitions to spreadsheet-friendly CSV.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, ExpenseRecord};

/// Header row written by [`export_expenses_csv`]
pub const EXPENSE_CSV_HEADER: &str = "Date,Description,Category,Amount,Color,Currency,ID";

/// Export expenses to CSV, one row per record in the given order
///
/// The output can be read back by the CSV importer.
pub fn export_expenses_csv<W: Write>(
    records: &[ExpenseRecord],
    default_currency: &str,
    writer: &mut W,
) -> ExpenseResult<()> {
    writeln!(writer, "{}", EXPENSE_CSV_HEADER).map_err(|e| ExpenseError::Export(e.to_string()))?;

    for record in records {
        writeln!(
            writer,
            "{},{},{},{:.2},{},{},{}",
            record.date,
            escape_csv(&record.description),
            escape_csv(&record.category),
            record.amount.as_decimal(),
            escape_csv(&record.category_color),
            escape_csv(record.currency_or(default_currency)),
            escape_csv(&record.id)
        )
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    log::info!("Exported {} expenses to CSV", records.len());
    Ok(())
}

/// Export budget definitions to CSV
pub fn export_budgets_csv<W: Write>(budgets: &[Budget], writer: &mut W) -> ExpenseResult<()> {
    writeln!(writer, "Category,Limit,Period").map_err(|e| ExpenseError::Export(e.to_string()))?;

    for budget in budgets {
        writeln!(
            writer,
            "{},{:.2},{}",
            escape_csv(&budget.category),
            budget.amount.as_decimal(),
            budget.period
        )
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Escape a string for CSV format
pub(crate) fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
