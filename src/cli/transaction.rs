//! Transaction CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryId, Money, TransactionType};
use crate::services::{
    CategoryService, CreateTransactionInput, TransactionFilter, TransactionService,
};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// What the transaction was for
        title: String,
        /// Amount, e.g. "12.50"
        value: String,
        /// income or outcome
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        transaction_type: TransactionType,
        /// Category title (created if it does not exist)
        #[arg(short, long)]
        category: String,
    },

    /// List transactions, most recent last
    List {
        /// Only show the last N transactions
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Filter by category title
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by type
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        transaction_type: Option<TransactionType>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

fn category_titles(storage: &Storage) -> LedgerResult<HashMap<CategoryId, String>> {
    Ok(storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.title))
        .collect())
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage).with_matching(settings.category_matching);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            title,
            value,
            transaction_type,
            category,
        } => {
            let value = Money::parse(&value)
                .map_err(|e| LedgerError::Validation(format!("Invalid value: {}", e)))?;

            let txn = service.create(CreateTransactionInput {
                title,
                value,
                transaction_type,
                category: category.clone(),
            })?;

            println!("Created transaction: {}", txn.title);
            println!("  ID:       {}", txn.id);
            println!("  Type:     {}", txn.transaction_type);
            println!("  Value:    {}", txn.value.format_with_symbol(symbol));
            println!("  Category: {}", category.trim());
        }

        TransactionCommands::List {
            limit,
            category,
            transaction_type,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);

            if let Some(title) = category {
                let cat = CategoryService::new(storage)
                    .with_matching(settings.category_matching)
                    .find(&title)?
                    .ok_or_else(|| LedgerError::category_not_found(&title))?;
                filter = filter.category(cat.id);
            }
            if let Some(transaction_type) = transaction_type {
                filter = filter.transaction_type(transaction_type);
            }

            let transactions = service.list(filter)?;
            print!(
                "{}",
                format_transaction_register(&transactions, &category_titles(storage)?, symbol)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| LedgerError::transaction_not_found(&id))?;

            let category = match txn.category_id {
                Some(category_id) => storage.categories.get(category_id)?.map(|c| c.title),
                None => None,
            };
            print!(
                "{}",
                format_transaction_details(&txn, category.as_deref(), symbol)
            );
        }

        TransactionCommands::Delete { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| LedgerError::transaction_not_found(&id))?;

            let deleted = service.delete(txn.id)?;
            println!(
                "Deleted transaction: {} ({} {})",
                deleted.title,
                deleted.transaction_type,
                deleted.value.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
