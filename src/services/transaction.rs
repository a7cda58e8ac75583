//! Transaction service
//!
//! Creating and deleting transactions. An outcome is only accepted when the
//! current balance covers it, and the category is resolved (or created) by
//! title as part of the same call.

use tracing::{debug, info};

use crate::audit::EntityType;
use crate::config::CategoryMatching;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryId, Money, Transaction, TransactionId, TransactionType};
use crate::services::{BalanceService, CategoryService};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    matching: CategoryMatching,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by category
    pub category_id: Option<CategoryId>,
    /// Filter by type
    pub transaction_type: Option<TransactionType>,
    /// Keep only the most recent N transactions
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub title: String,
    pub value: Money,
    pub transaction_type: TransactionType,
    /// Category title; created on first use
    pub category: String,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            matching: CategoryMatching::default(),
        }
    }

    /// Use a different category matching policy
    pub fn with_matching(mut self, matching: CategoryMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Create a new transaction
    ///
    /// Nothing is written, not even the category, when the input is rejected.
    pub fn create(&self, input: CreateTransactionInput) -> LedgerResult<Transaction> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(LedgerError::Validation(
                "Transaction title cannot be empty".into(),
            ));
        }
        if input.value.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Transaction value cannot be negative: {}",
                input.value
            )));
        }

        let mut txn = Transaction::new(title, input.value, input.transaction_type, None);
        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let balance = BalanceService::new(self.storage).current()?;
        if txn.is_outcome() && !balance.covers(txn.value) {
            debug!(value = %txn.value, available = %balance.total, "rejected outcome");
            return Err(LedgerError::InvalidTransaction {
                value: txn.value,
                available: balance.total,
            });
        }
        let mut projected = balance;
        projected.apply(&txn)?;

        let category_id = CategoryService::new(self.storage)
            .with_matching(self.matching)
            .resolve(&input.category)?;
        txn.category_id = Some(category_id);

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.title.clone()),
            &txn,
        )?;

        info!(
            id = %txn.id,
            title = %txn.title,
            value = %txn.value,
            kind = %txn.transaction_type,
            "created transaction"
        );
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by ID string
    ///
    /// Accepts a full UUID (with or without the `txn-` prefix) or the short
    /// form shown in listings, as long as it names exactly one transaction.
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }

        let needle = identifier.trim();
        let needle = needle.strip_prefix("txn-").unwrap_or(needle).to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let mut matches: Vec<Transaction> = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| t.id.as_uuid().to_string().starts_with(&needle))
            .collect();

        match matches.len() {
            0 | 1 => Ok(matches.pop()),
            n => Err(LedgerError::Validation(format!(
                "Transaction id '{}' is ambiguous ({} matches)",
                identifier, n
            ))),
        }
    }

    /// List transactions, oldest first
    pub fn list(&self, filter: TransactionFilter) -> LedgerResult<Vec<Transaction>> {
        let mut transactions = match filter.category_id {
            Some(category_id) => self.storage.transactions.get_by_category(category_id)?,
            None => self.storage.transactions.get_all()?,
        };

        if let Some(transaction_type) = filter.transaction_type {
            transactions.retain(|t| t.transaction_type == transaction_type);
        }

        if let Some(limit) = filter.limit {
            let start = transactions.len().saturating_sub(limit);
            transactions.drain(..start);
        }

        Ok(transactions)
    }

    /// Delete a transaction, returning the removed record
    pub fn delete(&self, id: TransactionId) -> LedgerResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        if !self.storage.transactions.delete(id)? {
            return Err(LedgerError::transaction_not_found(id.to_string()));
        }
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.title.clone()),
            &txn,
        )?;

        info!(id = %txn.id, title = %txn.title, "deleted transaction");
        Ok(txn)
    }

    /// Number of stored transactions
    pub fn count(&self) -> LedgerResult<usize> {
        self.storage.transactions.count()
    }
}
