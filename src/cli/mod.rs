//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger engine. Handlers print
//! results; errors are returned to `main` for reporting.

pub mod account;
pub mod audit;
pub mod transaction;
pub mod transfer;

pub use account::{handle_balance, handle_create, handle_list, handle_receipt};
pub use audit::handle_audit;
pub use transaction::{handle_deposit, handle_withdraw};
pub use transfer::handle_transfer;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

/// Parse an amount typed by the user
pub fn parse_amount(input: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| {
        LedgerError::InvalidAmount(format!(
            "'{}' is not a valid amount. Use a format like '100.00' or '100'. ({})",
            input.trim(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.34").unwrap(), Money::from_cents(1234));
        assert!(matches!(
            parse_amount("twelve"),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_amount("1.234"),
            Err(LedgerError::InvalidAmount(_))
        ));
    }
}
