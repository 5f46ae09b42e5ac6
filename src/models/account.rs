//! Account model
//!
//! An account is a named balance with an append-only history. The balance
//! is only ever changed through [`Account::record`], which keeps it equal to
//! the signed sum of the history.

use std::fmt;

use super::ids::AccountNumber;
use super::money::Money;
use super::transaction::Transaction;
use crate::error::{LedgerError, LedgerResult};

/// A balance-holding account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique identifier, immutable once assigned
    pub account_number: AccountNumber,

    /// Display name of the holder
    pub account_holder: String,

    balance: Money,

    transactions: Vec<Transaction>,
}

impl Account {
    /// Create an empty account with a zero balance
    pub fn new(account_number: AccountNumber, account_holder: impl Into<String>) -> Self {
        Self {
            account_number,
            account_holder: account_holder.into(),
            balance: Money::zero(),
            transactions: Vec::new(),
        }
    }

    /// Rebuild an account exactly as it was stored
    ///
    /// The stored balance is trusted; use [`Account::is_consistent`] to
    /// check it against the history.
    pub fn from_parts(
        account_number: AccountNumber,
        account_holder: String,
        balance: Money,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            account_number,
            account_holder,
            balance,
            transactions,
        }
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Full history, oldest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The last `n` transactions in chronological order
    pub fn recent_transactions(&self, n: usize) -> &[Transaction] {
        let start = self.transactions.len().saturating_sub(n);
        &self.transactions[start..]
    }

    /// Signed sum of the history, `None` if it leaves the money range
    pub fn transaction_total(&self) -> Option<Money> {
        Money::checked_sum(self.transactions.iter().map(Transaction::signed_amount))
    }

    /// Whether the balance matches the history
    pub fn is_consistent(&self) -> bool {
        self.transaction_total() == Some(self.balance)
    }

    /// Append a transaction and apply it to the balance
    pub(crate) fn record(&mut self, transaction: Transaction) -> LedgerResult<Money> {
        let balance = self
            .balance
            .checked_add(transaction.signed_amount())
            .ok_or_else(|| {
                LedgerError::InvalidAmount(format!(
                    "{} would take the balance of account {} past the limit of {}",
                    transaction.amount,
                    self.account_number,
                    Money::MAX
                ))
            })?;

        self.balance = balance;
        self.transactions.push(transaction);
        Ok(balance)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.account_holder, self.account_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;

    fn txn(action: Action, cents: i64) -> Transaction {
        Transaction::new(action, Money::from_cents(cents), Transaction::timestamp_now())
    }

    #[test]
    fn test_new_account_is_empty() {
        let account = Account::new("12345678".into(), "Alice");
        assert_eq!(account.balance(), Money::zero());
        assert!(account.transactions().is_empty());
        assert!(account.is_consistent());
        assert_eq!(account.to_string(), "Alice (12345678)");
    }

    #[test]
    fn test_record_keeps_balance_consistent() {
        let mut account = Account::new("12345678".into(), "Alice");
        account.record(txn(Action::Deposit, 10000)).unwrap();
        account.record(txn(Action::Withdraw, 2500)).unwrap();
        let balance = account
            .record(txn(
                Action::TransferIn {
                    source: "87654321".into(),
                },
                500,
            ))
            .unwrap();

        assert_eq!(balance, Money::from_cents(8000));
        assert_eq!(account.balance(), balance);
        assert!(account.is_consistent());
        assert_eq!(account.transactions().len(), 3);
    }

    #[test]
    fn test_record_overflow_leaves_account_untouched() {
        let mut account = Account::from_parts(
            "12345678".into(),
            "Alice".into(),
            Money::MAX,
            Vec::new(),
        );
        let err = account.record(txn(Action::Deposit, 1)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(account.balance(), Money::MAX);
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_recent_transactions() {
        let mut account = Account::new("12345678".into(), "Alice");
        for cents in 1..=7 {
            account.record(txn(Action::Deposit, cents)).unwrap();
        }

        let recent = account.recent_transactions(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].amount.cents(), 3);
        assert_eq!(recent[4].amount.cents(), 7);

        assert_eq!(account.recent_transactions(50).len(), 7);
        assert!(account.recent_transactions(0).is_empty());
    }

    #[test]
    fn test_from_parts_detects_inconsistency() {
        let account = Account::from_parts(
            "12345678".into(),
            "Alice".into(),
            Money::from_cents(100),
            vec![txn(Action::Deposit, 50)],
        );
        assert!(!account.is_consistent());
    }

    #[test]
    fn test_history_total_outside_range() {
        let account = Account::from_parts(
            "12345678".into(),
            "Alice".into(),
            Money::zero(),
            vec![
                txn(Action::Deposit, Money::MAX.cents()),
                txn(Action::Deposit, Money::MAX.cents()),
            ],
        );
        assert_eq!(account.transaction_total(), None);
        assert!(!account.is_consistent());
    }
}
