//! Budget repository for JSON storage
//!
//! At most one budget exists per category; setting a budget for a category
//! that already has one replaces it.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::Budget;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<Vec<Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load budgets from disk, validating each one
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: BudgetData = read_json(&self.path)?;

        for budget in &file_data.budgets {
            budget.validate().map_err(ExpenseError::Validation)?;
        }

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data.budgets;

        Ok(())
    }

    /// Save budgets to disk, ordered by category
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut budgets = data.clone();
        budgets.sort_by(|a, b| a.category.cmp(&b.category));

        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    pub fn get_all(&self) -> Result<Vec<Budget>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    /// Get the budget for a category
    pub fn get(&self, category: &str) -> Result<Option<Budget>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.iter().find(|b| b.category == category).cloned())
    }

    /// Insert or replace the budget for its category
    ///
    /// Returns the budget that was replaced, if any.
    pub fn upsert(&self, budget: Budget) -> Result<Option<Budget>, ExpenseError> {
        budget.validate().map_err(ExpenseError::Validation)?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.iter_mut().find(|b| b.category == budget.category) {
            Some(existing) => Ok(Some(std::mem::replace(existing, budget))),
            None => {
                data.push(budget);
                Ok(None)
            }
        }
    }

    /// Remove the budget for a category
    pub fn delete(&self, category: &str) -> Result<Budget, ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let index = data
            .iter()
            .position(|b| b.category == category)
            .ok_or_else(|| ExpenseError::budget_not_found(category))?;
        Ok(data.remove(index))
    }
}
