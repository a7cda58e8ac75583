//! Transaction display formatting
//!
//! Register-style tables and detail views for transactions.

use std::collections::HashMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{CategoryId, Transaction};

const UNCATEGORIZED: &str = "(uncategorized)";

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn category_title<'a>(txn: &Transaction, categories: &'a HashMap<CategoryId, String>) -> &'a str {
    txn.category_id
        .and_then(|id| categories.get(&id))
        .map(String::as_str)
        .unwrap_or(UNCATEGORIZED)
}

/// Format a list of transactions as a register table
pub fn format_transaction_register(
    transactions: &[Transaction],
    categories: &HashMap<CategoryId, String>,
    symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: txn.created_at.format("%Y-%m-%d").to_string(),
        title: truncate(&txn.title, 30),
        kind: txn.transaction_type.to_string(),
        category: category_title(txn, categories).to_string(),
        value: txn.signed_value().format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    category: Option<&str>,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Title:       {}\n", txn.title));
    output.push_str(&format!("Type:        {}\n", txn.transaction_type));
    output.push_str(&format!(
        "Value:       {}\n",
        txn.value.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Category:    {}\n",
        category.unwrap_or(UNCATEGORIZED)
    ));
    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// Truncate a string to at most `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_len.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}
