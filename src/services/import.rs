//! CSV import service
//!
//! Bulk-loads transactions from a headed CSV file with the columns
//! `title, type, value, category`. Categories are resolved for the whole
//! file before any transaction is written, so each distinct title is created
//! at most once. Imported rows skip the overdraft check that interactive
//! creation applies, but a file whose totals would not fit the balance is
//! rejected before anything is written.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::config::{CategoryMatching, MalformedRowPolicy, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Money, Transaction, TransactionType};
use crate::services::{BalanceService, CategoryService};
use crate::storage::Storage;

/// Number of columns a data row must carry
const REQUIRED_FIELDS: usize = 4;

/// A parsed row from the CSV before import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTransaction {
    /// Line of the row in the source file (the header is line 1)
    pub row_number: usize,
    pub title: String,
    pub transaction_type: TransactionType,
    pub value: Money,
    /// Category title as written in the file
    pub category: String,
}

/// Import behaviour taken from the user settings
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    pub matching: CategoryMatching,
    pub on_malformed: MalformedRowPolicy,
}

impl From<&Settings> for ImportOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            matching: settings.category_matching,
            on_malformed: settings.import.on_malformed,
        }
    }
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Transactions written, in file order
    pub transactions: Vec<Transaction>,
    /// Categories that did not exist before the import
    pub categories_created: Vec<Category>,
    /// Skipped rows and why, by row number
    pub error_messages: BTreeMap<usize, String>,
}

impl ImportResult {
    pub fn imported(&self) -> usize {
        self.transactions.len()
    }

    pub fn skipped(&self) -> usize {
        self.error_messages.len()
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
    options: ImportOptions,
}

impl<'a> ImportService<'a> {
    /// Create a new import service with default options
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            options: ImportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse a CSV from a reader into transactions
    ///
    /// The first record is always treated as a header and skipped. Rows that
    /// cannot be parsed come back as [`LedgerError::MalformedRecord`]; only
    /// an I/O failure of the reader itself fails the whole call.
    pub fn parse_csv_from_reader<R: Read>(
        &self,
        reader: R,
    ) -> LedgerResult<Vec<LedgerResult<ParsedTransaction>>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut results = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let fallback_row = idx + 2;
            let record = match result {
                Ok(record) => record,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
                Err(e) => {
                    let row = e
                        .position()
                        .map(|p| p.line() as usize)
                        .unwrap_or(fallback_row);
                    results.push(Err(LedgerError::malformed(row, e.to_string())));
                    continue;
                }
            };

            let row = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(fallback_row);
            results.push(Self::parse_record(&record, row));
        }

        Ok(results)
    }

    /// Parse a single CSV record
    fn parse_record(record: &StringRecord, row: usize) -> LedgerResult<ParsedTransaction> {
        if record.len() < REQUIRED_FIELDS {
            return Err(LedgerError::malformed(
                row,
                format!(
                    "expected {} fields (title, type, value, category), found {}",
                    REQUIRED_FIELDS,
                    record.len()
                ),
            ));
        }

        let title = &record[0];
        if title.is_empty() {
            return Err(LedgerError::malformed(row, "title is empty"));
        }

        let transaction_type = TransactionType::from_import_field(&record[1]);

        let value = Money::parse(&record[2]).map_err(|_| {
            LedgerError::malformed(row, format!("value '{}' is not a number", &record[2]))
        })?;
        if value.is_negative() {
            return Err(LedgerError::malformed(
                row,
                format!("value cannot be negative: {}", value),
            ));
        }

        Ok(ParsedTransaction {
            row_number: row,
            title: title.to_string(),
            transaction_type,
            value,
            category: record[3].to_string(),
        })
    }

    /// Import every row of a CSV stream
    ///
    /// Phase one resolves all category titles (creating the missing ones in a
    /// single batch), phase two writes the transactions in one batch. Rows
    /// that would push the balance out of range fail the whole import first.
    pub fn import_from_reader<R: Read>(&self, reader: R) -> LedgerResult<ImportResult> {
        let mut parsed = Vec::new();
        let mut error_messages = BTreeMap::new();

        for result in self.parse_csv_from_reader(reader)? {
            match result {
                Ok(row) => parsed.push(row),
                Err(LedgerError::MalformedRecord { row, reason }) => {
                    if self.options.on_malformed == MalformedRowPolicy::Abort {
                        return Err(LedgerError::MalformedRecord { row, reason });
                    }
                    warn!(row, %reason, "skipping malformed row");
                    error_messages.insert(row, reason);
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            rows = parsed.len(),
            skipped = error_messages.len(),
            "parsed import file"
        );

        let mut transactions: Vec<Transaction> = parsed
            .iter()
            .map(|p| Transaction::new(p.title.clone(), p.value, p.transaction_type, None))
            .collect();

        let mut projected = BalanceService::new(self.storage).current()?;
        for (txn, row) in transactions.iter().zip(&parsed) {
            projected.apply(txn).map_err(|e| {
                warn!(row = row.row_number, error = %e, "import would overflow balance");
                e
            })?;
        }

        let resolved = CategoryService::new(self.storage)
            .with_matching(self.options.matching)
            .resolve_many(parsed.iter().map(|p| p.category.as_str()))?;

        for (txn, row) in transactions.iter_mut().zip(&parsed) {
            txn.category_id = resolved.id_for(&row.category);
        }

        if !transactions.is_empty() {
            self.storage.transactions.upsert_many(transactions.clone())?;
            self.storage.transactions.save()?;

            let entries: Vec<_> = transactions
                .iter()
                .map(|t| {
                    AuditEntry::create(
                        EntityType::Transaction,
                        t.id.to_string(),
                        Some(t.title.clone()),
                        t,
                    )
                })
                .collect();
            self.storage.log_batch(&entries)?;
        }

        info!(
            imported = transactions.len(),
            categories_created = resolved.created().len(),
            skipped = error_messages.len(),
            "import finished"
        );

        Ok(ImportResult {
            transactions,
            categories_created: resolved.created().to_vec(),
            error_messages,
        })
    }

    /// Import a CSV file and remove it once its rows are stored
    ///
    /// On failure the file is left where it is.
    pub fn import_file(&self, path: &Path) -> LedgerResult<ImportResult> {
        let file = File::open(path).map_err(|e| {
            LedgerError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let result = self.import_from_reader(BufReader::new(file))?;

        fs::remove_file(path).map_err(|e| {
            LedgerError::Import(format!(
                "Imported {} transactions but failed to remove {}: {}",
                result.imported(),
                path.display(),
                e
            ))
        })?;
        debug!(path = %path.display(), "removed import file");

        Ok(result)
    }
}
