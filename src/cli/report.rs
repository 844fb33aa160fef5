//! CLI commands for reports

use std::io::Write;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::{Subcommand, ValueEnum};

use super::{create_output, FilterArgs};
use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::PeriodWindow;
use crate::reports::{BudgetReport, SpendingReport, SummaryReport, TrendGranularity, TrendReport};
use crate::storage::Storage;

/// Trend bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrendBy {
    /// Every day of one month
    Day,
    /// ISO weeks
    Week,
    /// Calendar months
    Month,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending by category
    Spending {
        #[command(flatten)]
        filter: FilterArgs,

        /// Show the top N categories only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Spending over time
    #[command(alias = "trend")]
    Trends {
        /// Bucket size
        #[arg(long, value_enum, default_value = "month")]
        by: TrendBy,

        /// Month for the daily view (YYYY-MM); defaults to the current month
        #[arg(long)]
        month: Option<String>,

        /// Number of buckets for weekly and monthly views
        #[arg(long)]
        count: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budget usage for the current periods
    Budgets {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dashboard summary
    Summary {
        /// Number of largest expenses to show
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let records = storage.expenses.get_all()?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Spending {
            filter,
            top,
            output,
        } => {
            let report = SpendingReport::generate(&records, &filter.to_criteria()?);

            if let Some(path) = output {
                write_csv(&path, |w| report.export_csv(w))?;
                println!("Spending report exported to: {}", path.display());
            } else if let Some(n) = top {
                println!("Top {} Spending Categories\n", n);
                println!("{:<30} {:>14} {:>8}", "Category", "Amount", "%");
                println!("{}", "-".repeat(54));
                for category in report.top_categories(n) {
                    println!(
                        "{:<30} {:>14} {:>7.1}%",
                        category.category,
                        category.total.format_with_symbol(symbol),
                        category.percentage
                    );
                }
                println!(
                    "\nTotal Spending: {}",
                    report.total_spending.format_with_symbol(symbol)
                );
            } else {
                println!("{}", report.format_terminal(symbol));
            }
        }

        ReportCommands::Trends {
            by,
            month,
            count,
            output,
        } => {
            let granularity = match by {
                TrendBy::Day => {
                    let (year, month) = resolve_month(month.as_deref(), today)?;
                    TrendGranularity::Daily { year, month }
                }
                TrendBy::Week => TrendGranularity::Weekly {
                    weeks: count.unwrap_or(settings.trend_weeks),
                },
                TrendBy::Month => TrendGranularity::Monthly {
                    months: count.unwrap_or(settings.trend_months),
                },
            };
            let report = TrendReport::generate(&records, granularity)?;

            if let Some(path) = output {
                write_csv(&path, |w| report.export_csv(w))?;
                println!("Trend report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(symbol));
            }
        }

        ReportCommands::Budgets { output } => {
            let budgets = storage.budgets.get_all()?;
            let report = BudgetReport::generate(&budgets, &records, today);

            if let Some(path) = output {
                write_csv(&path, |w| report.export_csv(w))?;
                println!("Budget report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(symbol));
            }
        }

        ReportCommands::Summary { top, output } => {
            let report =
                SummaryReport::generate(&records, today, top.unwrap_or(settings.top_expense_count));

            if let Some(path) = output {
                write_csv(&path, |w| report.export_csv(w))?;
                println!("Summary exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(symbol));
            }
        }
    }

    Ok(())
}

/// Resolve a YYYY-MM argument, defaulting to the month containing `today`
fn resolve_month(month: Option<&str>, today: NaiveDate) -> ExpenseResult<(i32, u32)> {
    let Some(s) = month else {
        return Ok((today.year(), today.month()));
    };

    match PeriodWindow::parse_month(s) {
        Ok(PeriodWindow::Month { year, month }) => Ok((year, month)),
        _ => Err(ExpenseError::Validation(format!(
            "Invalid month: {}. Use YYYY-MM (e.g., 2024-05)",
            s
        ))),
    }
}

fn write_csv<F>(path: &std::path::Path, export: F) -> ExpenseResult<()>
where
    F: FnOnce(&mut std::io::BufWriter<std::fs::File>) -> ExpenseResult<()>,
{
    let mut writer = create_output(path)?;
    export(&mut writer)?;
    writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))
}
