//! Storage layer for Bankbook
//!
//! JSON file storage with atomic writes and a degrade-to-empty policy for
//! unreadable ledger files.

pub mod file_io;
pub mod ledger_store;

pub use file_io::{quarantine, read_json, write_json_atomic, JsonRead};
pub use ledger_store::{Accounts, LedgerStore, LoadStatus, LoadedLedger};
