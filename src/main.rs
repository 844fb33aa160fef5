use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use env_logger::Env;

use expense_tracker::cli::{
    handle_add, handle_budget_command, handle_category_command, handle_delete, handle_edit,
    handle_export, handle_import, handle_list, handle_report_command, AddArgs, BudgetCommands,
    CategoryCommands, EditArgs, ExportArgs, ImportArgs, ListArgs, ReportCommands,
};
use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
use expense_tracker::engine::SortOrder;
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track expenses and see where the money goes",
    long_about = "Record personal expenses, then filter, sort and summarize them \
                  by category, by period and against per-category budgets."
)]
struct Cli {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, env = "EXPENSES_TODAY")]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an expense
    Add(AddArgs),

    /// Change fields of an existing expense
    Edit(EditArgs),

    /// List expenses with optional filters and sorting
    #[command(alias = "ls")]
    List(ListArgs),

    /// Delete an expense by ID
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
    },

    /// Category catalog commands
    #[command(subcommand, alias = "categories")]
    Category(CategoryCommands),

    /// Import expenses from CSV, or a JSON/YAML export
    Import(ImportArgs),

    /// Export expenses (CSV) or the full snapshot (JSON/YAML)
    Export(ExportArgs),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Reports and dashboards
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show or change configuration
    Config {
        /// Symbol used when printing amounts
        #[arg(long)]
        currency_symbol: Option<String>,

        /// ISO currency code for new expenses
        #[arg(long)]
        default_currency: Option<String>,

        /// Default number of months in the monthly trend
        #[arg(long)]
        trend_months: Option<usize>,

        /// Default number of weeks in the weekly trend
        #[arg(long)]
        trend_weeks: Option<usize>,

        /// Default number of largest expenses in the summary
        #[arg(long)]
        top_expenses: Option<usize>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Add(args)) => handle_add(&storage, args, today)?,
        Some(Commands::Edit(args)) => handle_edit(&storage, args)?,
        Some(Commands::List(args)) => handle_list(&storage, &settings, args)?,
        Some(Commands::Delete { id }) => handle_delete(&storage, &id)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Import(args)) => handle_import(&storage, args, today)?,
        Some(Commands::Export(args)) => handle_export(&storage, &settings, args)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, today, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, today, cmd)?,
        Some(Commands::Config {
            currency_symbol,
            default_currency,
            trend_months,
            trend_weeks,
            top_expenses,
        }) => {
            let mut changed = false;
            if let Some(symbol) = currency_symbol {
                settings.currency_symbol = symbol;
                changed = true;
            }
            if let Some(code) = default_currency {
                settings.default_currency = code.trim().to_uppercase();
                changed = true;
            }
            if let Some(months) = trend_months {
                settings.trend_months = months;
                changed = true;
            }
            if let Some(weeks) = trend_weeks {
                settings.trend_weeks = weeks;
                changed = true;
            }
            if let Some(count) = top_expenses {
                settings.top_expense_count = count;
                changed = true;
            }

            if changed {
                settings.save(&paths)?;
                println!("Settings saved.");
                println!();
            }

            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Default currency:  {}", settings.default_currency);
            println!("  Trend months:      {}", settings.trend_months);
            println!("  Trend weeks:       {}", settings.trend_weeks);
            println!("  Top expenses:      {}", settings.top_expense_count);
            let order = match settings.default_sort.order {
                SortOrder::Ascending => "ascending",
                SortOrder::Descending => "descending",
            };
            println!(
                "  Default sort:      {} {}",
                settings.default_sort.field, order
            );
        }
        None => {
            println!("expenses - personal expense tracking");
            println!();
            println!("Run 'expenses --help' for usage information.");
        }
    }

    Ok(())
}
