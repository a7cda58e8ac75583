//! Display formatting for terminal output
//!
//! Turns models and service results into strings; the CLI layer only prints
//! what these functions return.

pub mod balance;
pub mod category;
pub mod transaction;

pub use balance::{format_balance, format_import_result};
pub use category::format_category_list;
pub use transaction::{format_transaction_details, format_transaction_register};
