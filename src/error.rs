//! Custom error types for Bankbook
//!
//! This module defines the error hierarchy for the ledger using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The referenced account number has no matching entry
    #[error("Account not found: {account_number}")]
    AccountNotFound { account_number: String },

    /// Amount failed validation (non-positive or not a number)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Withdrawal or transfer exceeds the source balance
    #[error("Insufficient funds in account {account_number}: requested {requested}, available {available}")]
    InsufficientFunds {
        account_number: String,
        requested: Money,
        available: Money,
    },

    /// The durable write did not complete; the in-memory change was reverted
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Stored ledger could not be parsed
    #[error("Corrupt storage: {0}")]
    CorruptStorage(String),

    /// No free account number was found within the retry bound
    #[error("Could not generate a unique account number after {attempts} attempts")]
    ExhaustedKeyspace { attempts: u32 },

    /// Account holder name failed validation
    #[error("Invalid account holder: {0}")]
    InvalidHolder(String),

    /// Source and target of a transfer are the same account
    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl LedgerError {
    /// Create a "not found" error for an account number
    pub fn account_not_found(account_number: impl Into<String>) -> Self {
        Self::AccountNotFound {
            account_number: account_number.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound { .. })
    }

    /// Errors the caller can fix by retrying with different input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound { .. }
                | Self::InvalidAmount(_)
                | Self::InsufficientFunds { .. }
                | Self::InvalidHolder(_)
                | Self::SameAccount(_)
        )
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::account_not_found("12345678");
        assert_eq!(err.to_string(), "Account not found: 12345678");
        assert!(err.is_not_found());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_insufficient_funds_error() {
        let err = LedgerError::InsufficientFunds {
            account_number: "12345678".into(),
            requested: Money::from_cents(5000),
            available: Money::from_cents(3000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in account 12345678: requested $50.00, available $30.00"
        );
    }

    #[test]
    fn test_persistence_is_not_recoverable() {
        let err = LedgerError::Persistence("disk full".into());
        assert!(!err.is_recoverable());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LedgerError = io_err.into();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
