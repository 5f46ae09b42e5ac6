//! Bankbook - single-user personal ledger
//!
//! Named accounts with running balances and append-only transaction
//! histories, persisted to a JSON file after every change.
//!
//! # Architecture
//!
//! - `config`: data directory resolution and user settings
//! - `error`: the `LedgerError` taxonomy
//! - `models`: accounts, transactions, account numbers, fixed-point money
//! - `storage`: atomic JSON persistence with degrade-to-empty loading
//! - `services`: the `Ledger` engine (create, deposit, withdraw, transfer, queries)
//! - `audit`: append-only log of successful mutations
//! - `display` / `cli`: terminal formatting and command handlers
//!
//! # Example
//!
//! ```rust,no_run
//! use bankbook::models::Money;
//! use bankbook::services::Ledger;
//! use bankbook::storage::LedgerStore;
//!
//! let mut ledger = Ledger::open(LedgerStore::new("bank_data.json"))?;
//! let alice = ledger.create_account("Alice")?;
//! ledger.deposit(alice.as_str(), Money::from_cents(10_000))?;
//! # Ok::<(), bankbook::LedgerError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use services::Ledger;
