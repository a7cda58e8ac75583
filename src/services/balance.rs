//! Balance service
//!
//! Computes the current balance from every stored transaction.

use crate::error::LedgerResult;
use crate::models::Balance;
use crate::storage::Storage;

/// Service for balance queries
pub struct BalanceService<'a> {
    storage: &'a Storage,
}

impl<'a> BalanceService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Balance over the whole ledger
    pub fn current(&self) -> LedgerResult<Balance> {
        let transactions = self.storage.transactions.get_all()?;
        Balance::from_transactions(&transactions)
    }
}
