//! Summary Report
//!
//! The dashboard view: headline totals, the largest expenses and the
//! current month's category breakdown.

use std::io::Write;

use chrono::NaiveDate;

use crate::engine::{
    aggregate_by_category, filter, summarize, top_expenses, CategoryAggregate, FilterCriteria,
    SpendingSummary,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, Money, PeriodWindow};

/// Dashboard summary
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub summary: SpendingSummary,
    /// Largest expenses of all time
    pub top_expenses: Vec<ExpenseRecord>,
    /// Breakdown of the current month
    pub month_categories: Vec<CategoryAggregate>,
}

impl SummaryReport {
    /// Generate the summary as of `today`
    pub fn generate(records: &[ExpenseRecord], today: NaiveDate, top_count: usize) -> Self {
        let month = PeriodWindow::month_containing(today);
        let criteria =
            FilterCriteria::new().between(Some(month.start_date()), Some(month.end_date()));

        Self {
            summary: summarize(records, today),
            top_expenses: top_expenses(records, top_count),
            month_categories: aggregate_by_category(&filter(records, &criteria)),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let s = &self.summary;
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("Spending Summary as of {}\n", s.as_of));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<28} {:>14}\n", "This month:", money(s.current_month_total)));
        output.push_str(&format!("{:<28} {:>14}\n", "Last month:", money(s.last_month_total)));
        output.push_str(&format!(
            "{:<28} {:>13.1}%\n",
            "Change vs last month:", s.month_over_month_change
        ));
        output.push_str(&format!("{:<28} {:>14}\n", "Last 7 days:", money(s.last_seven_days_total)));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            "Average per day:",
            money(s.average_daily_spending)
        ));
        output.push_str(&format!("{:<28} {:>14}\n", "Expenses this month:", s.current_month_count));
        output.push_str(&format!("{:<28} {:>14}\n", "All time:", money(s.all_time_total)));

        if !self.month_categories.is_empty() {
            output.push_str("\nThis month by category\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for category in &self.month_categories {
                output.push_str(&format!(
                    "{:<28} {:>14} {:>7.1}%\n",
                    category.category,
                    money(category.total),
                    category.percentage
                ));
            }
        }

        if !self.top_expenses.is_empty() {
            output.push_str("\nLargest expenses\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for record in &self.top_expenses {
                output.push_str(&format!(
                    "{} {:<25} {:<12} {:>12}\n",
                    record.date,
                    truncate(&record.description, 25),
                    truncate(&record.category, 12),
                    money(record.amount)
                ));
            }
        }

        output
    }

    /// Export the headline figures to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ExpenseResult<()> {
        let s = &self.summary;
        let rows = [
            ("current_month_total", format!("{:.2}", s.current_month_total.as_decimal())),
            ("last_month_total", format!("{:.2}", s.last_month_total.as_decimal())),
            ("month_over_month_change", format!("{:.2}", s.month_over_month_change)),
            ("last_seven_days_total", format!("{:.2}", s.last_seven_days_total.as_decimal())),
            ("average_daily_spending", format!("{:.2}", s.average_daily_spending.as_decimal())),
            ("current_month_count", s.current_month_count.to_string()),
            ("all_time_total", format!("{:.2}", s.all_time_total.as_decimal())),
        ];

        writeln!(writer, "As Of,Metric,Value").map_err(|e| ExpenseError::Export(e.to_string()))?;
        for (metric, value) in rows {
            writeln!(writer, "{},{},{}", s.as_of, metric, value)
                .map_err(|e| ExpenseError::Export(e.to_string()))?;
        }

        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
