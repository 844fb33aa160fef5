//! Category catalog repository for JSON storage
//!
//! Manages loading and saving the catalog to categories.json. A missing file
//! starts the catalog from the preset categories.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::Category;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for the category catalog
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load the catalog from disk, or the presets if nothing was saved yet
    pub fn load(&self) -> Result<(), ExpenseError> {
        let categories = if self.path.exists() {
            let file_data: CategoryData = read_json(&self.path)?;
            file_data.categories
        } else {
            log::info!("No category catalog at {}, using presets", self.path.display());
            Category::presets()
        };

        {
            let mut seen = std::collections::HashSet::new();
            for category in &categories {
                category
                    .validate()
                    .map_err(|e| ExpenseError::Validation(e.to_string()))?;
                if !seen.insert(category.name.as_str()) {
                    return Err(ExpenseError::Validation(format!(
                        "Category '{}' appears more than once",
                        category.name
                    )));
                }
            }
        }

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = categories;

        Ok(())
    }

    /// Save the catalog to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = CategoryData {
            categories: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All categories in catalog order
    pub fn get_all(&self) -> Result<Vec<Category>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    /// Get a category by exact name
    pub fn get(&self, name: &str) -> Result<Option<Category>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.iter().find(|c| c.name == name).cloned())
    }

    /// Add a category; names must be unique
    pub fn insert(&self, category: Category) -> Result<(), ExpenseError> {
        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if data.iter().any(|c| c.name == category.name) {
            return Err(ExpenseError::Duplicate {
                entity_type: "Category",
                identifier: category.name,
            });
        }

        data.push(category);
        Ok(())
    }

    /// Color of `name`, adding the category with `color` if it is not listed
    pub fn ensure(&self, name: &str, color: &str) -> Result<String, ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(existing) = data.iter().find(|c| c.name == name) {
            return Ok(existing.color.clone());
        }

        let candidate = Category::new(name, color);
        candidate
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        log::info!("Adding category '{}' to the catalog", candidate);
        data.push(candidate);
        Ok(color.to_string())
    }

    /// Replace the category called `name`, returning the old entry
    ///
    /// The replacement may carry a new name, as long as no other category
    /// uses it.
    pub fn update(&self, name: &str, category: Category) -> Result<Category, ExpenseError> {
        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if category.name != name && data.iter().any(|c| c.name == category.name) {
            return Err(ExpenseError::Duplicate {
                entity_type: "Category",
                identifier: category.name,
            });
        }

        let existing = data
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| ExpenseError::category_not_found(name))?;
        Ok(std::mem::replace(existing, category))
    }

    /// Remove a category, returning it
    pub fn delete(&self, name: &str) -> Result<Category, ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let index = data
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| ExpenseError::category_not_found(name))?;
        Ok(data.remove(index))
    }
}
