//! Business logic layer
//!
//! The [`Ledger`] engine, split by concern: account creation and queries,
//! deposits and withdrawals, and transfers.

pub mod ledger;
mod transaction;
mod transfer;

pub use ledger::Ledger;
