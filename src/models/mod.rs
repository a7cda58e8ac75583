//! Core data models for ledger-cli
//!
//! This module contains the data structures of the ledger domain:
//! transactions, categories, money amounts and the derived balance.

pub mod balance;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use balance::Balance;
pub use category::Category;
pub use ids::{CategoryId, TransactionId};
pub use money::Money;
pub use transaction::{Transaction, TransactionType};
