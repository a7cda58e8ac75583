//! Audit logging for ledger-cli
//!
//! Records every create and delete of a transaction or category in an
//! append-only JSONL file next to the data directory.
//!
//! - `AuditEntry`: one operation with timestamp, entity info and the entity
//!   snapshot (after for creates, before for deletes).
//! - `AuditLogger`: appends entries and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
