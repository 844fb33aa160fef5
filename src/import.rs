//! CSV import
//!
//! Reads expenses from a CSV file whose first row names the columns. The
//! header must contain date, description, category and amount columns;
//! color, currency and id columns are optional.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::category::is_hex_color;
use crate::models::{ExpenseRecord, Money, DEFAULT_CATEGORY_COLOR};
use crate::storage::{new_expense_id, Storage};

/// Description given to rows that leave it blank
pub const DEFAULT_DESCRIPTION: &str = "Imported expense";

/// Category given to rows that leave it blank
pub const DEFAULT_CATEGORY: &str = "Other";

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%d/%m/%y", "%Y/%m/%d", "%m-%d-%Y",
    "%d-%m-%Y",
];

/// Column positions detected from a CSV header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub description_column: usize,
    pub category_column: usize,
    pub amount_column: usize,
    pub color_column: Option<usize>,
    pub currency_column: Option<usize>,
    pub id_column: Option<usize>,
}

impl ColumnMapping {
    /// Detect the mapping from a header row
    ///
    /// Matching is case-insensitive and by substring; the first matching
    /// column wins.
    pub fn detect(headers: &StringRecord) -> ExpenseResult<Self> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let find = |keys: &[&str]| names.iter().position(|h| keys.iter().any(|k| h.contains(k)));

        let date_column = find(&["date"]);
        let description_column = find(&["description", "desc"]);
        let category_column = find(&["category"]);
        let amount_column = find(&["amount", "price"]);

        match (date_column, description_column, category_column, amount_column) {
            (Some(date), Some(description), Some(category), Some(amount)) => Ok(Self {
                date_column: date,
                description_column: description,
                category_column: category,
                amount_column: amount,
                color_column: find(&["color"]),
                currency_column: find(&["currency"]),
                id_column: names.iter().position(|h| h == "id"),
            }),
            _ => Err(ExpenseError::Import(
                "CSV header must contain date, description, category and amount columns"
                    .to_string(),
            )),
        }
    }
}

/// Outcome of an import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Records that were accepted
    pub records: Vec<ExpenseRecord>,
    /// Number of rows that were skipped
    pub errors: usize,
    /// One message per skipped row
    pub error_messages: Vec<String>,
}

impl ImportResult {
    pub fn imported(&self) -> usize {
        self.records.len()
    }

    fn reject(&mut self, message: String) {
        log::warn!("Skipping CSV row: {}", message);
        self.errors += 1;
        self.error_messages.push(message);
    }
}

/// Parse CSV data into expense records
///
/// Rows with an empty date are dated `default_date`. Rows whose date cannot
/// be parsed, or whose amount is not a positive number, are counted as
/// errors and skipped. A file without a usable header is an error.
pub fn parse_csv<R: Read>(input: R, default_date: NaiveDate) -> ExpenseResult<ImportResult> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mapping = ColumnMapping::detect(&headers)?;

    let mut result = ImportResult::default();
    for (index, row) in reader.records().enumerate() {
        // Line 1 is the header
        let line = index + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                result.reject(format!("Line {}: error reading CSV record: {}", line, e));
                continue;
            }
        };

        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        match parse_row(&row, &mapping, default_date) {
            Ok(record) => result.records.push(record),
            Err(message) => result.reject(format!("Line {}: {}", line, message)),
        }
    }

    if result.records.is_empty() && result.errors == 0 {
        return Err(ExpenseError::Import(
            "CSV file must have at least a header and one data row".to_string(),
        ));
    }

    log::info!(
        "Parsed {} expenses from CSV ({} rows skipped)",
        result.imported(),
        result.errors
    );
    Ok(result)
}

fn parse_row(
    row: &StringRecord,
    mapping: &ColumnMapping,
    default_date: NaiveDate,
) -> Result<ExpenseRecord, String> {
    let field = |column: usize| row.get(column).unwrap_or("");
    let optional = |column: Option<usize>| column.map(field).filter(|value| !value.is_empty());

    let date_str = field(mapping.date_column);
    let date = if date_str.is_empty() {
        default_date
    } else {
        parse_date(date_str)?
    };

    let amount_str = field(mapping.amount_column);
    let amount = Money::parse(amount_str)
        .map_err(|e| format!("Could not parse amount '{}': {}", amount_str, e))?;
    if !amount.is_positive() {
        return Err(format!("Amount must be positive, got '{}'", amount_str));
    }

    let description = optional(Some(mapping.description_column)).unwrap_or(DEFAULT_DESCRIPTION);
    let category = optional(Some(mapping.category_column)).unwrap_or(DEFAULT_CATEGORY);
    let color = optional(mapping.color_column).unwrap_or(DEFAULT_CATEGORY_COLOR);
    if !is_hex_color(color) {
        return Err(format!("Invalid color '{}'", color));
    }
    let id = optional(mapping.id_column)
        .map(str::to_string)
        .unwrap_or_else(new_expense_id);

    let mut record = ExpenseRecord::new(id, amount, category, date)
        .with_description(description)
        .with_color(color);
    if let Some(currency) = optional(mapping.currency_column) {
        record = record.with_currency(currency.to_uppercase());
    }

    Ok(record)
}

/// Parse a date string, trying ISO first and then common regional formats
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .ok_or_else(|| format!("Could not parse date: '{}'", s))
}

/// Imports CSV files into the expense snapshot
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a CSV file and persist the accepted records
    ///
    /// Rows whose id is already stored are counted as errors. Catalogued
    /// categories keep their catalog color; new ones are added to the
    /// catalog with the row's color.
    pub fn import_file(&self, path: &Path, default_date: NaiveDate) -> ExpenseResult<ImportResult> {
        let file = std::fs::File::open(path).map_err(|e| {
            ExpenseError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let parsed = parse_csv(file, default_date)?;

        let mut result = ImportResult {
            records: Vec::with_capacity(parsed.records.len()),
            errors: parsed.errors,
            error_messages: parsed.error_messages,
        };

        for mut record in parsed.records {
            match self
                .storage
                .categories
                .ensure(&record.category, &record.category_color)
            {
                Ok(color) => record.category_color = color,
                Err(e) if e.is_validation() => {
                    result.reject(format!("Expense {}: {}", record.id, e));
                    continue;
                }
                Err(e) => return Err(e),
            }

            match self.storage.expenses.insert(record.clone()) {
                Ok(()) => {
                    log::debug!("Imported expense {}", record.id);
                    result.records.push(record);
                }
                Err(e @ ExpenseError::Duplicate { .. }) => result.reject(e.to_string()),
                Err(e) => return Err(e),
            }
        }

        self.storage.expenses.save()?;
        self.storage.categories.save()?;
        log::info!(
            "Imported {} expenses from {}",
            result.imported(),
            path.display()
        );
        Ok(result)
    }
}
