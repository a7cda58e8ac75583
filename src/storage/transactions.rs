//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{CategoryId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::{lock_error, TransactionStore};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a category index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: category_id -> transaction_ids
    by_category: RwLock<HashMap<CategoryId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    fn sorted(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        transactions
    }
}

impl TransactionStore for TransactionRepository {
    fn load(&self) -> Result<(), LedgerError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        data.clear();
        by_category.clear();

        for txn in file_data.transactions {
            if let Some(cat_id) = txn.category_id {
                by_category.entry(cat_id).or_default().push(txn.id);
            }
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    fn save(&self) -> Result<(), LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let file_data = TransactionData {
            transactions: Self::sorted(data.values().cloned().collect()),
        };
        write_json_atomic(&self.path, &file_data)
    }

    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(Self::sorted(data.values().cloned().collect()))
    }

    fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_category = self.by_category.read().map_err(lock_error)?;

        let ids = by_category
            .get(&category_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let transactions = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        Ok(Self::sorted(transactions))
    }

    fn upsert_many(&self, txns: Vec<Transaction>) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        for txn in txns {
            // Drop the old index entry if this replaces an existing record
            if let Some(old_cat) = data.get(&txn.id).and_then(|old| old.category_id) {
                if let Some(ids) = by_category.get_mut(&old_cat) {
                    ids.retain(|&id| id != txn.id);
                }
            }

            if let Some(cat_id) = txn.category_id {
                by_category.entry(cat_id).or_default().push(txn.id);
            }
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    fn delete(&self, id: TransactionId) -> Result<bool, LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        let Some(txn) = data.remove(&id) else {
            return Ok(false);
        };

        if let Some(cat_id) = txn.category_id {
            if let Some(ids) = by_category.get_mut(&cat_id) {
                ids.retain(|&tid| tid != id);
            }
        }
        Ok(true)
    }

    fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn income(title: &str, cents: i64) -> Transaction {
        Transaction::new(
            title,
            Money::from_cents(cents),
            TransactionType::Income,
            None,
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();

        let txn = income("Salary", 500000);
        let id = txn.id;
        repo.upsert(txn).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.title, "Salary");
        assert_eq!(retrieved.value.cents(), 500000);
    }

    #[test]
    fn test_get_by_category() {
        let (_temp_dir, repo) = create_test_repo();
        let job = CategoryId::new();

        let mut salary = income("Salary", 100);
        salary.category_id = Some(job);
        let mut bonus = income("Bonus", 200);
        bonus.category_id = Some(job);

        repo.upsert_many(vec![salary, bonus, income("Gift", 300)]).unwrap();

        assert_eq!(repo.get_by_category(job).unwrap().len(), 2);
        assert!(repo.get_by_category(CategoryId::new()).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        let txn = income("Salary", 500000);
        let id = txn.id;
        repo.upsert(txn).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(id).unwrap().unwrap().title, "Salary");
    }

    #[test]
    fn test_delete_only_removes_target() {
        let (_temp_dir, repo) = create_test_repo();
        let keep = income("Keep", 1);
        let drop = income("Drop", 2);
        let (keep_id, drop_id) = (keep.id, drop.id);
        repo.upsert_many(vec![keep, drop]).unwrap();

        assert!(repo.delete(drop_id).unwrap());
        assert!(!repo.delete(drop_id).unwrap());

        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.get(keep_id).unwrap().is_some());
    }

    #[test]
    fn test_delete_updates_category_index() {
        let (_temp_dir, repo) = create_test_repo();
        let cat = CategoryId::new();
        let mut txn = income("Salary", 1);
        txn.category_id = Some(cat);
        let id = txn.id;
        repo.upsert(txn).unwrap();

        repo.delete(id).unwrap();
        assert!(repo.get_by_category(cat).unwrap().is_empty());
    }
}
