//! Spending Report
//!
//! Spending breakdown by category for the expenses that match a filter.

use std::io::Write;

use chrono::NaiveDate;

use crate::engine::{aggregate_by_category, filter, top_categories, CategoryAggregate, FilterCriteria};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::csv::escape_csv;
use crate::models::{ExpenseRecord, Money};

/// Spending by category
#[derive(Debug, Clone)]
pub struct SpendingReport {
    /// Lower date bound of the filter, if any
    pub start_date: Option<NaiveDate>,
    /// Upper date bound of the filter, if any
    pub end_date: Option<NaiveDate>,
    /// Categories, largest total first
    pub categories: Vec<CategoryAggregate>,
    pub total_spending: Money,
    pub total_expenses: usize,
}

impl SpendingReport {
    /// Generate the report over the records matching `criteria`
    pub fn generate(records: &[ExpenseRecord], criteria: &FilterCriteria) -> Self {
        let matching = filter(records, criteria);
        let categories = aggregate_by_category(&matching);

        Self {
            start_date: criteria.start_date,
            end_date: criteria.end_date,
            total_spending: categories.iter().map(|c| c.total).sum(),
            total_expenses: categories.iter().map(|c| c.count).sum(),
            categories,
        }
    }

    fn range_label(&self) -> String {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => format!("{} to {}", start, end),
            (Some(start), None) => format!("since {}", start),
            (None, Some(end)) => format!("until {}", end),
            (None, None) => "all time".to_string(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending Report: {}\n", self.range_label()));
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "Total Spending: {}\n",
            self.total_spending.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("Total Expenses: {}\n\n", self.total_expenses));

        if self.categories.is_empty() {
            output.push_str("No expenses match.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>14} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for category in &self.categories {
            let marker = if category.conflicting_colors { " *" } else { "" };
            output.push_str(&format!(
                "{:<30} {:>14} {:>8} {:>7.1}%{}\n",
                category.category,
                category.total.format_with_symbol(currency_symbol),
                category.count,
                category.percentage,
                marker
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>14} {:>8}\n",
            "TOTAL",
            self.total_spending.format_with_symbol(currency_symbol),
            self.total_expenses
        ));

        if self.categories.iter().any(|c| c.conflicting_colors) {
            output.push_str("\n* = expenses in this category use more than one color\n");
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ExpenseResult<()> {
        writeln!(writer, "Category,Amount,Count,Percentage,Color")
            .map_err(|e| ExpenseError::Export(e.to_string()))?;

        for category in &self.categories {
            writeln!(
                writer,
                "{},{:.2},{},{:.2},{}",
                escape_csv(&category.category),
                category.total.as_decimal(),
                category.count,
                category.percentage,
                escape_csv(&category.color)
            )
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        }

        let total_percentage = if self.total_spending.is_zero() { 0.0 } else { 100.0 };
        writeln!(
            writer,
            "TOTAL,{:.2},{},{:.2},",
            self.total_spending.as_decimal(),
            self.total_expenses,
            total_percentage
        )
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

        Ok(())
    }

    /// Get the top spending categories
    pub fn top_categories(&self, limit: usize) -> Vec<&CategoryAggregate> {
        top_categories(&self.categories, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::new("a", Money::from_cents(4550), "Food", date(2024, 5, 25)),
            ExpenseRecord::new("b", Money::from_cents(12000), "Transport", date(2024, 5, 24)),
            ExpenseRecord::new("c", Money::from_cents(9900), "Travel", date(2024, 4, 2)),
        ]
    }

    #[test]
    fn test_generate_spending_report() {
        let criteria = FilterCriteria::new().between(Some(date(2024, 5, 1)), Some(date(2024, 5, 31)));
        let report = SpendingReport::generate(&records(), &criteria);

        assert_eq!(report.total_spending, Money::from_cents(16550));
        assert_eq!(report.total_expenses, 2);
        assert_eq!(report.categories[0].category, "Transport");
        assert_eq!(report.top_categories(1)[0].category, "Transport");
    }

    #[test]
    fn test_format_terminal() {
        let report = SpendingReport::generate(&records(), &FilterCriteria::new());
        let output = report.format_terminal("€");

        assert!(output.contains("Spending Report: all time"));
        assert!(output.contains("€264.50"));
        assert!(output.contains("Transport"));
    }

    #[test]
    fn test_empty_report() {
        let report = SpendingReport::generate(&[], &FilterCriteria::new());
        assert_eq!(report.total_spending, Money::zero());
        assert!(report.format_terminal("$").contains("No expenses match."));
    }

    #[test]
    fn test_export_csv_empty_total_percentage() {
        let report = SpendingReport::generate(&[], &FilterCriteria::new());
        let mut output = Vec::new();
        report.export_csv(&mut output).unwrap();

        let csv_string = String::from_utf8(output).unwrap();
        assert!(csv_string.ends_with("TOTAL,0.00,0,0.00,\n"));
    }

    #[test]
    fn test_export_csv() {
        let report = SpendingReport::generate(&records(), &FilterCriteria::new());
        let mut output = Vec::new();
        report.export_csv(&mut output).unwrap();

        let csv_string = String::from_utf8(output).unwrap();
        assert!(csv_string.starts_with("Category,Amount,Count,Percentage,Color\n"));
        assert!(csv_string.contains("Transport,120.00,1,"));
        assert!(csv_string.contains("TOTAL,264.50,3,100.00,"));
    }
}
