//! Budget Report
//!
//! Usage of every budget over the period that contains a given day.

use std::io::Write;

use chrono::NaiveDate;

use crate::engine::{compute_budget_statuses, BudgetStatus};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::csv::escape_csv;
use crate::models::{Budget, ExpenseRecord, Money};

/// Budget usage report
#[derive(Debug, Clone)]
pub struct BudgetReport {
    /// Day the budget periods were resolved against
    pub as_of: NaiveDate,
    pub statuses: Vec<BudgetStatus>,
}

impl BudgetReport {
    /// Generate the report for every budget as of `today`
    pub fn generate(budgets: &[Budget], records: &[ExpenseRecord], today: NaiveDate) -> Self {
        Self {
            as_of: today,
            statuses: compute_budget_statuses(budgets, records, today),
        }
    }

    pub fn total_limit(&self) -> Money {
        self.statuses.iter().map(|s| s.limit).sum()
    }

    pub fn total_spent(&self) -> Money {
        self.statuses.iter().map(|s| s.spent).sum()
    }

    /// Budgets at or beyond their limit
    pub fn exceeded(&self) -> Vec<&BudgetStatus> {
        self.statuses
            .iter()
            .filter(|s| s.is_over_budget())
            .collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Status as of {}\n", self.as_of));
        output.push_str(&"=".repeat(90));
        output.push('\n');

        if self.statuses.is_empty() {
            output.push_str("No budgets set. Use `expenses budget set` to add one.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:<10} {:>12} {:>12} {:>12} {:>7}  {}\n",
            "Category", "Period", "Limit", "Spent", "Remaining", "Used", "Status"
        ));
        output.push_str(&"-".repeat(90));
        output.push('\n');

        for status in &self.statuses {
            output.push_str(&format!(
                "{:<20} {:<10} {:>12} {:>12} {:>12} {:>6.1}%  {}\n",
                status.category,
                status.window.to_string(),
                status.limit.format_with_symbol(currency_symbol),
                status.spent.format_with_symbol(currency_symbol),
                status.remaining.format_with_symbol(currency_symbol),
                status.percentage,
                status.health
            ));
        }

        output.push_str(&"-".repeat(90));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:<10} {:>12} {:>12}\n",
            "TOTAL",
            "",
            self.total_limit().format_with_symbol(currency_symbol),
            self.total_spent().format_with_symbol(currency_symbol)
        ));

        let exceeded = self.exceeded().len();
        if exceeded > 0 {
            output.push_str(&format!("\n{} budget(s) exceeded\n", exceeded));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ExpenseResult<()> {
        writeln!(
            writer,
            "Category,Period,Start Date,End Date,Limit,Spent,Remaining,Percentage,Status"
        )
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

        for status in &self.statuses {
            writeln!(
                writer,
                "{},{},{},{},{:.2},{:.2},{:.2},{:.2},{}",
                escape_csv(&status.category),
                status.window,
                status.window.start_date(),
                status.window.end_date(),
                status.limit.as_decimal(),
                status.spent.as_decimal(),
                status.remaining.as_decimal(),
                status.percentage,
                status.health
            )
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
