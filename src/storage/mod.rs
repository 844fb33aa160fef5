//! Storage layer for expense-tracker
//!
//! A local JSON snapshot of expenses, budgets and the category catalog with
//! atomic writes.

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod file_io;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};

use chrono::NaiveDate;

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::{Budget, Category, ExpenseRecord, Money, DEFAULT_CATEGORY_COLOR};

/// Main storage coordinator
pub struct Storage {
    paths: ExpensePaths,
    pub expenses: ExpenseRepository,
    pub budgets: BudgetRepository,
    pub categories: CategoryRepository,
}

/// Field changes for an existing expense; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub color: Option<String>,
    pub currency: Option<String>,
}

impl ExpenseChanges {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.color.is_none()
            && self.currency.is_none()
    }
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            paths,
        })
    }

    /// Open the snapshot and load everything
    pub fn open(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    pub fn load_all(&self) -> Result<(), ExpenseError> {
        self.expenses.load()?;
        self.budgets.load()?;
        self.categories.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), ExpenseError> {
        self.expenses.save()?;
        self.budgets.save()?;
        self.categories.save()?;
        Ok(())
    }

    /// Record a new expense under a freshly generated id
    ///
    /// The color comes from the category catalog. A category that is not
    /// catalogued yet is added with `color`, or the default color.
    pub fn add_expense(
        &self,
        amount: Money,
        category: &str,
        date: NaiveDate,
        description: &str,
        color: Option<&str>,
        currency: Option<&str>,
    ) -> Result<ExpenseRecord, ExpenseError> {
        let mut record = ExpenseRecord::new(new_expense_id(), amount, category.trim(), date)
            .with_description(description.trim());
        if let Some(currency) = currency {
            record = record.with_currency(currency.trim().to_uppercase());
        }
        record
            .validate()
            .map_err(|e| ExpenseError::invalid_record(&record.id, e.to_string()))?;
        record.category_color = self.resolve_color(&record.category, color)?;

        self.expenses.insert(record.clone())?;
        self.expenses.save()?;
        self.categories.save()?;
        log::info!("Added expense {} ({})", record.id, record.amount);
        Ok(record)
    }

    /// Apply `changes` to the expense `id`, returning the old and new records
    ///
    /// The edited record is validated like a new one. Changing the category
    /// picks up that category's catalog color.
    pub fn edit_expense(
        &self,
        id: &str,
        changes: ExpenseChanges,
    ) -> Result<(ExpenseRecord, ExpenseRecord), ExpenseError> {
        let old = self
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id))?;

        let mut record = old.clone();
        if let Some(amount) = changes.amount {
            record.amount = amount;
        }
        if let Some(category) = &changes.category {
            record.category = category.trim().to_string();
        }
        if let Some(description) = &changes.description {
            record.description = description.trim().to_string();
        }
        if let Some(date) = changes.date {
            record.date = date;
        }
        if let Some(currency) = &changes.currency {
            let currency = currency.trim();
            record.currency = if currency.is_empty() {
                None
            } else {
                Some(currency.to_uppercase())
            };
        }
        record
            .validate()
            .map_err(|e| ExpenseError::invalid_record(&record.id, e.to_string()))?;

        if changes.category.is_some() || changes.color.is_some() {
            record.category_color =
                self.resolve_color(&record.category, changes.color.as_deref())?;
        }

        self.expenses.update(record.clone())?;
        self.expenses.save()?;
        self.categories.save()?;
        log::info!("Edited expense {}", record.id);
        Ok((old, record))
    }

    /// Color for an expense in `category`
    ///
    /// A catalogued category keeps its color; asking for a different one is
    /// an error, since that would give the category two colors.
    fn resolve_color(&self, category: &str, color: Option<&str>) -> Result<String, ExpenseError> {
        let color = color.map(str::trim);
        match self.categories.get(category)? {
            Some(existing) => match color {
                Some(color) if !color.eq_ignore_ascii_case(&existing.color) => {
                    Err(ExpenseError::Validation(format!(
                        "Category '{}' uses color {}; change it with `expenses category edit`",
                        existing.name, existing.color
                    )))
                }
                _ => Ok(existing.color),
            },
            None => self
                .categories
                .ensure(category, color.unwrap_or(DEFAULT_CATEGORY_COLOR)),
        }
    }

    /// Add a category to the catalog
    pub fn add_category(&self, name: &str, color: &str) -> Result<Category, ExpenseError> {
        let category = Category::new(name.trim(), color.trim());
        self.categories.insert(category.clone())?;
        self.categories.save()?;
        Ok(category)
    }

    /// Rename and/or recolor a category
    ///
    /// Every expense in the category follows, and so does its budget.
    /// Renaming onto a name that has expenses merges them into the category.
    /// Returns the new catalog entry and the number of expenses rewritten.
    pub fn edit_category(
        &self,
        name: &str,
        new_name: Option<&str>,
        color: Option<&str>,
    ) -> Result<(Category, usize), ExpenseError> {
        let existing = self
            .categories
            .get(name)?
            .ok_or_else(|| ExpenseError::category_not_found(name))?;
        let updated = Category::new(
            new_name.map(str::trim).unwrap_or(&existing.name),
            color.map(str::trim).unwrap_or(&existing.color),
        );
        let renamed = updated.name != existing.name;

        let budget = self.budgets.get(&existing.name)?;
        if renamed && budget.is_some() && self.budgets.get(&updated.name)?.is_some() {
            return Err(ExpenseError::Duplicate {
                entity_type: "Budget",
                identifier: updated.name,
            });
        }

        self.categories.update(&existing.name, updated.clone())?;

        let rewritten = self.expenses.update_where(
            |r| r.category == existing.name || r.category == updated.name,
            |r| {
                r.category = updated.name.clone();
                r.category_color = updated.color.clone();
            },
        )?;

        if let (true, Some(budget)) = (renamed, budget) {
            self.budgets.delete(&existing.name)?;
            self.budgets
                .upsert(Budget::new(&updated.name, budget.amount, budget.period))?;
        }

        self.save_all()?;
        log::info!(
            "Changed category {} to {} ({} expenses)",
            existing,
            updated,
            rewritten
        );
        Ok((updated, rewritten))
    }

    /// Remove a category from the catalog
    ///
    /// A category still used by expenses cannot be removed.
    pub fn remove_category(&self, name: &str) -> Result<Category, ExpenseError> {
        let in_use = self
            .expenses
            .get_all()?
            .iter()
            .filter(|r| r.category == name)
            .count();
        if in_use > 0 {
            return Err(ExpenseError::Validation(format!(
                "Category '{}' is used by {} expense(s); move them to another category first",
                name, in_use
            )));
        }

        let removed = self.categories.delete(name)?;
        self.categories.save()?;
        Ok(removed)
    }
}

/// Generate a unique expense id
pub fn new_expense_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
