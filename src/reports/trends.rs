//! Trend Report
//!
//! Spending over time as daily, weekly or monthly buckets, drawn as a text
//! bar chart in the terminal.

use std::fmt;
use std::io::Write;

use crate::engine::{aggregate_by_day, aggregate_by_month, aggregate_by_week, TimeBucketAggregate};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, Money};

const BAR_WIDTH: usize = 40;

/// Bucket size for a trend report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendGranularity {
    /// Every day of one calendar month
    Daily { year: i32, month: u32 },
    /// The most recent ISO weeks with spending
    Weekly { weeks: usize },
    /// The most recent months with spending
    Monthly { months: usize },
}

impl fmt::Display for TrendGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily { year, month } => write!(f, "Daily spending for {:04}-{:02}", year, month),
            Self::Weekly { weeks } => write!(f, "Weekly spending (last {} weeks)", weeks),
            Self::Monthly { months } => write!(f, "Monthly spending (last {} months)", months),
        }
    }
}

/// Spending trend
#[derive(Debug, Clone)]
pub struct TrendReport {
    pub granularity: TrendGranularity,
    /// Buckets, oldest first
    pub buckets: Vec<TimeBucketAggregate>,
    pub total: Money,
}

impl TrendReport {
    /// Generate a trend report
    ///
    /// Fails only for a daily report of an invalid month.
    pub fn generate(records: &[ExpenseRecord], granularity: TrendGranularity) -> ExpenseResult<Self> {
        let buckets = match granularity {
            TrendGranularity::Daily { year, month } => aggregate_by_day(records, year, month)?,
            TrendGranularity::Weekly { weeks } => aggregate_by_week(records, weeks),
            TrendGranularity::Monthly { months } => aggregate_by_month(records, months),
        };

        Ok(Self {
            granularity,
            total: buckets.iter().map(|b| b.total).sum(),
            buckets,
        })
    }

    /// Largest bucket total
    pub fn peak(&self) -> Money {
        self.buckets
            .iter()
            .map(|b| b.total)
            .max()
            .unwrap_or_default()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", self.granularity));
        output.push_str(&"=".repeat(70));
        output.push('\n');

        if self.buckets.is_empty() {
            output.push_str("No spending recorded.\n");
            return output;
        }

        let peak = self.peak();
        for bucket in &self.buckets {
            let width = if peak.is_positive() {
                ((bucket.total.cents() as f64 / peak.cents() as f64) * BAR_WIDTH as f64).round()
                    as usize
            } else {
                0
            };
            output.push_str(&format!(
                "{:<10} {:>12} {}\n",
                bucket.label,
                bucket.total.format_with_symbol(currency_symbol),
                "#".repeat(width)
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>12}\n",
            "TOTAL",
            self.total.format_with_symbol(currency_symbol)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ExpenseResult<()> {
        writeln!(writer, "Period,Start Date,Amount,Count")
            .map_err(|e| ExpenseError::Export(e.to_string()))?;

        for bucket in &self.buckets {
            writeln!(
                writer,
                "{},{},{:.2},{}",
                bucket.label,
                bucket.start,
                bucket.total.as_decimal(),
                bucket.count
            )
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
