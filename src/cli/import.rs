//! CSV import command

use std::path::Path;

use crate::config::Settings;
use crate::display::format_import_result;
use crate::error::LedgerResult;
use crate::services::{ImportOptions, ImportService};
use crate::storage::Storage;

/// Import a CSV file; the file is removed once its rows are stored
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    file: &Path,
) -> LedgerResult<()> {
    let service = ImportService::new(storage).with_options(ImportOptions::from(settings));

    let result = service.import_file(file)?;
    print!("{}", format_import_result(&result));

    Ok(())
}
