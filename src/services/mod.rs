//! Service layer for ledger-cli
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, category resolution, and cross-entity operations.

pub mod balance;
pub mod category;
pub mod import;
pub mod transaction;

pub use balance::BalanceService;
pub use category::{CategoryService, CategorySummary, ResolvedCategories};
pub use import::{ImportOptions, ImportResult, ImportService, ParsedTransaction};
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService};
