//! Expense CLI commands
//!
//! Adding, editing, listing and deleting expenses.

use chrono::NaiveDate;
use clap::Args;

use super::{parse_amount_arg, parse_date_arg, FilterArgs};
use crate::config::settings::Settings;
use crate::engine::{filter, sort, SortField, SortOrder, SortSpec};
use crate::error::ExpenseResult;
use crate::models::{ExpenseRecord, Money};
use crate::storage::{ExpenseChanges, Storage};

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount spent (e.g. "45.50")
    pub amount: String,

    /// Category name
    pub category: String,

    /// Free-text description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Date of the expense (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Display color for the category (e.g. "#22c55e")
    #[arg(long)]
    pub color: Option<String>,

    /// ISO currency code; defaults to the configured currency
    #[arg(long)]
    pub currency: Option<String>,
}

/// Arguments for `edit`
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Expense ID
    pub id: String,

    /// New amount
    #[arg(short, long)]
    pub amount: Option<String>,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Display color, for a category not yet in the catalog
    #[arg(long)]
    pub color: Option<String>,

    /// New ISO currency code; an empty value resets it to the default
    #[arg(long)]
    pub currency: Option<String>,
}

impl EditArgs {
    /// Parse the flags into field changes
    pub fn to_changes(&self) -> ExpenseResult<ExpenseChanges> {
        Ok(ExpenseChanges {
            amount: self.amount.as_deref().map(parse_amount_arg).transpose()?,
            category: self.category.clone(),
            description: self.description.clone(),
            date: self
                .date
                .as_deref()
                .map(|s| parse_date_arg(s, "expense"))
                .transpose()?,
            color: self.color.clone(),
            currency: self.currency.clone(),
        })
    }
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Sort by date, amount, category or description
    #[arg(long)]
    pub sort: Option<SortField>,

    /// Sort ascending
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Show at most this many expenses
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    /// Sort spec from the flags, falling back to the configured default
    pub fn sort_spec(&self, default: SortSpec) -> SortSpec {
        let field = self.sort.unwrap_or(default.field);
        let order = if self.asc {
            SortOrder::Ascending
        } else if self.desc {
            SortOrder::Descending
        } else {
            default.order
        };
        SortSpec::new(field, order)
    }
}

/// Handle `add`
pub fn handle_add(storage: &Storage, args: AddArgs, today: NaiveDate) -> ExpenseResult<()> {
    let amount = parse_amount_arg(&args.amount)?;
    let date = match args.date.as_deref() {
        Some(s) => parse_date_arg(s, "expense")?,
        None => today,
    };

    let record = storage.add_expense(
        amount,
        &args.category,
        date,
        &args.description,
        args.color.as_deref(),
        args.currency.as_deref(),
    )?;

    println!("Added expense: {}", record);
    println!("  ID: {}", record.id);
    Ok(())
}

/// Handle `edit`
pub fn handle_edit(storage: &Storage, args: EditArgs) -> ExpenseResult<()> {
    let changes = args.to_changes()?;
    if changes.is_empty() {
        println!(
            "No changes specified. Use --amount, --category, --description, --date, --color or --currency."
        );
        return Ok(());
    }

    let (_, record) = storage.edit_expense(&args.id, changes)?;
    println!("Updated expense: {}", record);
    Ok(())
}

/// Handle `list`
pub fn handle_list(storage: &Storage, settings: &Settings, args: ListArgs) -> ExpenseResult<()> {
    let criteria = args.filter.to_criteria()?;
    let spec = args.sort_spec(settings.default_sort);

    let records = storage.expenses.get_all()?;
    let mut matching = sort(&filter(&records, &criteria), spec);
    let total: Money = matching.iter().map(|r| r.amount).sum();
    let matched = matching.len();
    if let Some(limit) = args.limit {
        matching.truncate(limit);
    }

    if matching.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    println!("{}", format_expense_table(&matching, settings));
    if matching.len() < matched {
        println!("Showing {} of {} expenses", matching.len(), matched);
    }
    println!(
        "{} expenses, total {}",
        matched,
        total.format_with_symbol(&settings.currency_symbol)
    );

    Ok(())
}

/// Handle `delete`
pub fn handle_delete(storage: &Storage, id: &str) -> ExpenseResult<()> {
    let removed = storage.expenses.delete(id)?;
    storage.expenses.save()?;
    println!("Deleted expense: {}", removed);
    Ok(())
}

fn format_expense_table(records: &[ExpenseRecord], settings: &Settings) -> String {
    let mut output = format!(
        "{:<10}  {:<30} {:<16} {:>12}  {}\n",
        "Date", "Description", "Category", "Amount", "ID"
    );
    output.push_str(&"-".repeat(84));

    for record in records {
        let amount = record.amount.format_with_symbol(&settings.currency_symbol);
        let amount = match record.currency.as_deref() {
            Some(code) if code != settings.default_currency => format!("{} {}", amount, code),
            _ => amount,
        };
        output.push_str(&format!(
            "\n{:<10}  {:<30} {:<16} {:>12}  {}",
            record.date,
            record.description,
            record.category,
            amount,
            short_id(&record.id)
        ));
    }

    output
}

fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(i, _)| &id[..i])
}
