//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json. Records keep their
//! insertion order, which is the order ties are reported in by the engine.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::ExpenseRecord;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<ExpenseRecord>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<Vec<ExpenseRecord>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load expenses from disk
    ///
    /// Every record is validated; the first invalid or duplicated one fails
    /// the whole load.
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        {
            let mut seen = std::collections::HashSet::new();
            for record in &file_data.expenses {
                record
                    .validate()
                    .map_err(|e| ExpenseError::invalid_record(&record.id, e.to_string()))?;
                if !seen.insert(record.id.as_str()) {
                    return Err(ExpenseError::invalid_record(&record.id, "duplicate id"));
                }
            }
        }

        log::info!(
            "Loaded {} expenses from {}",
            file_data.expenses.len(),
            self.path.display()
        );

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data.expenses;

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = ExpenseData {
            expenses: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All expenses in insertion order
    pub fn get_all(&self) -> Result<Vec<ExpenseRecord>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    /// Get an expense by id
    pub fn get(&self, id: &str) -> Result<Option<ExpenseRecord>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.iter().find(|r| r.id == id).cloned())
    }

    /// Append a validated expense; ids must be unique
    pub fn insert(&self, record: ExpenseRecord) -> Result<(), ExpenseError> {
        record
            .validate()
            .map_err(|e| ExpenseError::invalid_record(&record.id, e.to_string()))?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if data.iter().any(|r| r.id == record.id) {
            return Err(ExpenseError::Duplicate {
                entity_type: "Expense",
                identifier: record.id,
            });
        }

        data.push(record);
        Ok(())
    }

    /// Replace the stored expense with the same id, returning the old record
    pub fn update(&self, record: ExpenseRecord) -> Result<ExpenseRecord, ExpenseError> {
        record
            .validate()
            .map_err(|e| ExpenseError::invalid_record(&record.id, e.to_string()))?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let existing = data
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| ExpenseError::expense_not_found(&record.id))?;
        Ok(std::mem::replace(existing, record))
    }

    /// Apply `change` to every expense matching `predicate`, returning how many
    pub fn update_where<P, F>(&self, predicate: P, mut change: F) -> Result<usize, ExpenseError>
    where
        P: Fn(&ExpenseRecord) -> bool,
        F: FnMut(&mut ExpenseRecord),
    {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut count = 0;
        for record in data.iter_mut().filter(|r| predicate(r)) {
            change(record);
            count += 1;
        }
        Ok(count)
    }

    /// Delete an expense, returning it
    pub fn delete(&self, id: &str) -> Result<ExpenseRecord, ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let index = data
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ExpenseError::expense_not_found(id))?;
        Ok(data.remove(index))
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(id: &str, cents: i64) -> ExpenseRecord {
        ExpenseRecord::new(
            id,
            Money::from_cents(cents),
            "Food",
            NaiveDate::from_ymd_opt(2024, 5, 25).unwrap(),
        )
    }

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        (temp_dir, ExpenseRepository::new(path))
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_save_load_keeps_order() {
        let (temp_dir, repo) = create_test_repo();
        repo.insert(record("b", 200)).unwrap();
        repo.insert(record("a", 100)).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();
        let ids: Vec<_> = repo2.get_all().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(repo2.get("a").unwrap().unwrap().amount, Money::from_cents(100));
    }

    #[test]
    fn test_insert_rejects_invalid_and_duplicates() {
        let (_temp_dir, repo) = create_test_repo();

        let err = repo.insert(record("zero", 0)).unwrap_err();
        assert!(err.is_validation());

        repo.insert(record("a", 100)).unwrap();
        let err = repo.insert(record("a", 300)).unwrap_err();
        assert!(matches!(err, ExpenseError::Duplicate { .. }));
    }

    #[test]
    fn test_load_rejects_non_positive_amount() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(
            temp_dir.path().join("expenses.json"),
            r#"{"expenses": [{"id": "x", "amount": -5.0, "category": "Food", "date": "2024-05-01"}]}"#,
        )
        .unwrap();

        let err = repo.load().unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidRecord { ref id, .. } if id == "x"));
    }

    #[test]
    fn test_load_rejects_malformed_date() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(
            temp_dir.path().join("expenses.json"),
            r#"{"expenses": [{"id": "x", "amount": 5.0, "category": "Food", "date": "yesterday"}]}"#,
        )
        .unwrap();

        assert!(matches!(repo.load(), Err(ExpenseError::Storage(_))));
    }

    #[test]
    fn test_update_revalidates() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(record("a", 100)).unwrap();

        let old = repo.update(record("a", 250).with_description("Dinner")).unwrap();
        assert_eq!(old.amount, Money::from_cents(100));
        let stored = repo.get("a").unwrap().unwrap();
        assert_eq!(stored.amount, Money::from_cents(250));
        assert_eq!(stored.description, "Dinner");

        let err = repo.update(record("a", -5)).unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidRecord { ref id, .. } if id == "a"));
        assert_eq!(repo.get("a").unwrap().unwrap().amount, Money::from_cents(250));

        assert!(repo.update(record("missing", 100)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_where() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(record("a", 100)).unwrap();
        repo.insert(record("b", 200)).unwrap();

        let changed = repo
            .update_where(|r| r.amount.cents() > 150, |r| r.category = "Dining".into())
            .unwrap();
        assert_eq!(changed, 1);
        assert_eq!(repo.get("b").unwrap().unwrap().category, "Dining");
        assert_eq!(repo.get("a").unwrap().unwrap().category, "Food");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(record("a", 100)).unwrap();

        let removed = repo.delete("a").unwrap();
        assert_eq!(removed.id, "a");
        assert!(repo.delete("a").unwrap_err().is_not_found());
    }
}
