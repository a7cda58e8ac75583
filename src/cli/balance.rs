//! Balance and history commands

use crate::config::Settings;
use crate::display::format_balance;
use crate::error::LedgerResult;
use crate::services::BalanceService;
use crate::storage::Storage;

/// Print income, outcome and total over the whole ledger
pub fn handle_balance_command(storage: &Storage, settings: &Settings) -> LedgerResult<()> {
    let balance = BalanceService::new(storage).current()?;
    print!("{}", format_balance(&balance, &settings.currency_symbol));
    Ok(())
}

/// Print the most recent audit log entries, oldest first
pub fn handle_history_command(storage: &Storage, limit: usize) -> LedgerResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
