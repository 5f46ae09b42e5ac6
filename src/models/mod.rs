//! Core data models for Bankbook
//!
//! Accounts, their transaction records, account numbers and the fixed-point
//! money type.

pub mod account;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::Account;
pub use ids::AccountNumber;
pub use money::{Money, MoneyParseError};
pub use transaction::{Action, Transaction, DATE_TIME_FORMAT};
