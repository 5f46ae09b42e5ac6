//! Audit logging for Bankbook
//!
//! Every successful ledger mutation is appended to a line-delimited JSON
//! log after it has been persisted.
//!
//! - `AuditEntry`: one operation with its account, amount and resulting balance.
//! - `AuditLogger`: appends entries to the audit log file and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
