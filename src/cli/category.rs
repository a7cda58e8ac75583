//! Category CLI commands
//!
//! Categories are created implicitly by transactions and imports, so the only
//! direct command is listing them.

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::LedgerResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with transaction counts
    List,
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> LedgerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let summaries = service.list_with_counts()?;
            print!("{}", format_category_list(&summaries));
        }
    }

    Ok(())
}
