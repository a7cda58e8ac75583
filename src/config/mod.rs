//! Configuration module for ledger-cli
//!
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{CategoryMatching, ImportSettings, MalformedRowPolicy, Settings};
