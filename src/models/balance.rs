//! Balance summary derived from the ledger
//!
//! Never persisted; recomputed from the full transaction set on demand.

use serde::Serialize;

use super::money::Money;
use super::transaction::{Transaction, TransactionType};
use crate::error::{LedgerError, LedgerResult};

/// Income, outcome and net total over a set of transactions
///
/// `total == income - outcome` holds for every value produced by
/// [`Balance::from_transactions`]. Sums that do not fit in the money
/// representation are reported as errors instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Balance {
    pub income: Money,
    pub outcome: Money,
    pub total: Money,
}

impl Balance {
    /// Sum a transaction set into a balance
    pub fn from_transactions<'a, I>(transactions: I) -> LedgerResult<Self>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut balance = Self::default();
        for txn in transactions {
            balance.apply(txn)?;
        }
        Ok(balance)
    }

    /// Add one transaction to the balance
    ///
    /// On overflow the balance is left unchanged.
    pub fn apply(&mut self, txn: &Transaction) -> LedgerResult<()> {
        let overflow = || {
            LedgerError::Validation(format!(
                "Balance overflow: adding {} {} exceeds the supported range",
                txn.transaction_type, txn.value
            ))
        };

        let next = match txn.transaction_type {
            TransactionType::Income => Self {
                income: self.income.checked_add(txn.value).ok_or_else(overflow)?,
                outcome: self.outcome,
                total: self.total.checked_add(txn.value).ok_or_else(overflow)?,
            },
            TransactionType::Outcome => Self {
                income: self.income,
                outcome: self.outcome.checked_add(txn.value).ok_or_else(overflow)?,
                total: self.total.checked_sub(txn.value).ok_or_else(overflow)?,
            },
        };

        *self = next;
        Ok(())
    }

    /// Whether an outcome of `value` is covered by the current total
    pub fn covers(&self, value: Money) -> bool {
        value <= self.total
    }
}
