//! Budget CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::parse_amount_arg;
use crate::config::settings::Settings;
use crate::error::ExpenseResult;
use crate::models::{Budget, BudgetPeriod};
use crate::reports::BudgetReport;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set the spending limit for a category, replacing any existing one
    Set {
        /// Category name (exact match)
        category: String,
        /// Limit per period (e.g. "500" or "500.00")
        amount: String,
        /// weekly, monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        period: BudgetPeriod,
    },

    /// List budgets with their current usage
    List,

    /// Remove the budget for a category
    #[command(alias = "rm")]
    Remove {
        /// Category name
        category: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: BudgetCommands,
) -> ExpenseResult<()> {
    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            period,
        } => {
            let amount = parse_amount_arg(&amount)?;
            let budget = Budget::new(category.trim(), amount, period);

            let replaced = storage.budgets.upsert(budget.clone())?;
            storage.budgets.save()?;

            match replaced {
                Some(old) => println!("Updated budget: {} (was {})", budget, old.amount),
                None => println!("Set budget: {}", budget),
            }
        }

        BudgetCommands::List => {
            let budgets = storage.budgets.get_all()?;
            let records = storage.expenses.get_all()?;
            let report = BudgetReport::generate(&budgets, &records, today);
            println!("{}", report.format_terminal(&settings.currency_symbol));
        }

        BudgetCommands::Remove { category } => {
            let removed = storage.budgets.delete(&category)?;
            storage.budgets.save()?;
            println!("Removed budget: {}", removed);
        }
    }

    Ok(())
}
