//! ledger-cli - terminal-based personal income/outcome ledger
//!
//! This library provides the core functionality for the `ledger` binary:
//! recording transactions against a running balance, resolving categories by
//! title, and bulk-importing transactions from CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, balance, money)
//! - `storage`: Store traits and the JSON file backend
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `cli` / `display`: Command handlers and terminal formatting
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger::config::paths::LedgerPaths;
//! use ledger::services::BalanceService;
//! use ledger::storage::Storage;
//!
//! let mut storage = Storage::new(LedgerPaths::new()?)?;
//! storage.load_all()?;
//! let balance = BalanceService::new(&storage).current()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
