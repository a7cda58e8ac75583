//! Transaction model
//!
//! A transaction is a single income or outcome entry in the ledger. Records
//! are immutable once stored; removing one is the only way to change history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in
    Income,
    /// Money going out
    Outcome,
}

impl TransactionType {
    /// Lenient parse used by the CSV importer
    ///
    /// Only the exact string `"outcome"` maps to [`TransactionType::Outcome`];
    /// every other value, including typos, other casings and an empty field,
    /// falls back to [`TransactionType::Income`].
    pub fn from_import_field(field: &str) -> Self {
        if field == "outcome" {
            Self::Outcome
        } else {
            Self::Income
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Outcome => "outcome",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse for user input
impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "outcome" => Ok(Self::Outcome),
            other => Err(format!(
                "unknown transaction type '{}' (expected 'income' or 'outcome')",
                other
            )),
        }
    }
}

/// A ledger transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Short description, e.g. "Salary"
    pub title: String,

    /// Non-negative amount; the direction lives in `transaction_type`
    pub value: Money,

    /// Income or outcome
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Linked category, if one was resolved
    pub category_id: Option<CategoryId>,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new, not yet persisted transaction
    pub fn new(
        title: impl Into<String>,
        value: Money,
        transaction_type: TransactionType,
        category_id: Option<CategoryId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            title: title.into(),
            value,
            transaction_type,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_outcome(&self) -> bool {
        self.transaction_type == TransactionType::Outcome
    }

    /// Signed effect on the balance (positive for income)
    pub fn signed_value(&self) -> Money {
        match self.transaction_type {
            TransactionType::Income => self.value,
            TransactionType::Outcome => -self.value,
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.title.trim().is_empty() {
            return Err(TransactionValidationError::EmptyTitle);
        }

        if self.value.is_negative() {
            return Err(TransactionValidationError::NegativeValue(self.value));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.title, self.transaction_type, self.value)
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyTitle,
    NegativeValue(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Transaction title cannot be empty"),
            Self::NegativeValue(value) => {
                write!(f, "Transaction value cannot be negative: {}", value)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
