//! Storage layer for ledger-cli
//!
//! The services only see the [`TransactionStore`] and [`CategoryStore`]
//! traits. [`Storage`] bundles one of each together with the audit logger;
//! the default backend is JSON files with atomic writes.

pub mod categories;
pub mod file_io;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;

use std::path::PathBuf;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::{CategoryMatching, LedgerPaths};
use crate::error::LedgerError;
use crate::models::{Category, CategoryId, Transaction, TransactionId};

/// Persistence for transaction records
///
/// `upsert*` and `delete` change the in-memory state only; `save` flushes it
/// to the backing medium.
pub trait TransactionStore: Send + Sync {
    /// Load all records from the backing medium
    fn load(&self) -> Result<(), LedgerError>;

    /// Persist the current state
    fn save(&self) -> Result<(), LedgerError>;

    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError>;

    /// All transactions, oldest first
    fn get_all(&self) -> Result<Vec<Transaction>, LedgerError>;

    fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Transaction>, LedgerError>;

    /// Insert or replace a batch of transactions
    fn upsert_many(&self, txns: Vec<Transaction>) -> Result<(), LedgerError>;

    fn upsert(&self, txn: Transaction) -> Result<(), LedgerError> {
        self.upsert_many(vec![txn])
    }

    /// Remove a transaction, returning whether it existed
    fn delete(&self, id: TransactionId) -> Result<bool, LedgerError>;

    fn count(&self) -> Result<usize, LedgerError>;
}

/// Persistence for category records
pub trait CategoryStore: Send + Sync {
    /// Load all records from the backing medium
    fn load(&self) -> Result<(), LedgerError>;

    /// Persist the current state
    fn save(&self) -> Result<(), LedgerError>;

    fn get(&self, id: CategoryId) -> Result<Option<Category>, LedgerError>;

    fn get_all(&self) -> Result<Vec<Category>, LedgerError>;

    /// Find a category whose title matches under the given policy
    fn find_by_title(
        &self,
        title: &str,
        matching: CategoryMatching,
    ) -> Result<Option<Category>, LedgerError>;

    /// Insert or replace a batch of categories
    fn upsert_many(&self, categories: Vec<Category>) -> Result<(), LedgerError>;

    fn upsert(&self, category: Category) -> Result<(), LedgerError> {
        self.upsert_many(vec![category])
    }

    fn count(&self) -> Result<usize, LedgerError>;
}

pub(crate) fn lock_error<E: std::fmt::Display>(e: E) -> LedgerError {
    LedgerError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Main storage coordinator that provides access to all stores
pub struct Storage {
    pub transactions: Box<dyn TransactionStore>,
    pub categories: Box<dyn CategoryStore>,
    audit: AuditLogger,
}

impl Storage {
    /// Create JSON-backed storage under the given paths
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self::with_stores(
            Box::new(TransactionRepository::new(paths.transactions_file())),
            Box::new(CategoryRepository::new(paths.categories_file())),
            paths.audit_log(),
        ))
    }

    /// Assemble storage from explicit stores
    pub fn with_stores(
        transactions: Box<dyn TransactionStore>,
        categories: Box<dyn CategoryStore>,
        audit_log: PathBuf,
    ) -> Self {
        Self {
            transactions,
            categories,
            audit: AuditLogger::new(audit_log),
        }
    }

    /// Load all data from the backing stores
    pub fn load_all(&mut self) -> Result<(), LedgerError> {
        self.transactions.load()?;
        self.categories.load()?;
        Ok(())
    }

    /// Save all data
    pub fn save_all(&self) -> Result<(), LedgerError> {
        self.categories.save()?;
        self.transactions.save()?;
        Ok(())
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a created entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), LedgerError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record a deleted entity in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), LedgerError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Record a batch of audit entries with a single write
    pub fn log_batch(&self, entries: &[AuditEntry]) -> Result<(), LedgerError> {
        self.audit.log_batch(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert_eq!(storage.categories.count().unwrap(), 0);
    }

    #[test]
    fn test_save_all_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();

        let category = Category::new("Job");
        let txn = Transaction::new(
            "Salary",
            Money::from_units(10),
            TransactionType::Income,
            Some(category.id),
        );
        storage.categories.upsert(category).unwrap();
        storage.transactions.upsert(txn).unwrap();
        storage.save_all().unwrap();

        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.transactions.count().unwrap(), 1);
        assert_eq!(reloaded.categories.count().unwrap(), 1);
    }

    #[test]
    fn test_log_create_writes_audit_entry() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let category = Category::new("Job");
        storage
            .log_create(
                EntityType::Category,
                category.id.to_string(),
                Some(category.title.clone()),
                &category,
            )
            .unwrap();

        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }
}
