//! Balance and import summaries

use crate::models::Balance;
use crate::services::ImportResult;

/// Format the ledger balance
pub fn format_balance(balance: &Balance, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Income:  {:>14}\n", balance.income.format_with_symbol(symbol)));
    output.push_str(&format!("Outcome: {:>14}\n", balance.outcome.format_with_symbol(symbol)));
    output.push_str(&format!("{:-<23}\n", ""));
    output.push_str(&format!("Total:   {:>14}\n", balance.total.format_with_symbol(symbol)));
    output
}

/// Format the outcome of a CSV import
pub fn format_import_result(result: &ImportResult) -> String {
    let mut output = format!(
        "Imported {} transaction(s), created {} categor{}.\n",
        result.imported(),
        result.categories_created.len(),
        if result.categories_created.len() == 1 { "y" } else { "ies" }
    );

    if !result.categories_created.is_empty() {
        let titles: Vec<&str> = result
            .categories_created
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        output.push_str(&format!("New categories: {}\n", titles.join(", ")));
    }

    if !result.error_messages.is_empty() {
        output.push_str(&format!("Skipped {} row(s):\n", result.skipped()));
        for (row, reason) in &result.error_messages {
            output.push_str(&format!("  row {}: {}\n", row, reason));
        }
    }

    output
}
