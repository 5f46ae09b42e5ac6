//! Deposits and withdrawals

use tracing::debug;

use crate::audit::AuditEntry;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Action, Money, Transaction};

use super::ledger::{Ledger, Undo};

/// Reject zero, negative and out-of-range amounts
pub(super) fn ensure_positive(amount: Money) -> LedgerResult<()> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    if !amount.is_in_range() {
        return Err(LedgerError::InvalidAmount(format!(
            "amount must not exceed {}, got {}",
            Money::MAX,
            amount
        )));
    }
    Ok(())
}

impl Ledger {
    /// Add `amount` to an account and return the new balance
    pub fn deposit(&mut self, account_number: &str, amount: Money) -> LedgerResult<Money> {
        self.apply(account_number, Action::Deposit, amount)
    }

    /// Take `amount` out of an account and return the new balance
    ///
    /// Withdrawing the full balance is allowed; anything more fails with
    /// `InsufficientFunds` and changes nothing.
    pub fn withdraw(&mut self, account_number: &str, amount: Money) -> LedgerResult<Money> {
        self.apply(account_number, Action::Withdraw, amount)
    }

    fn apply(&mut self, account_number: &str, action: Action, amount: Money) -> LedgerResult<Money> {
        let account = self.account_mut(account_number)?;
        ensure_positive(amount)?;

        if !action.is_credit() && amount > account.balance() {
            return Err(LedgerError::InsufficientFunds {
                account_number: account_number.to_string(),
                requested: amount,
                available: account.balance(),
            });
        }

        let snapshot = account.clone();
        let number = snapshot.account_number.clone();
        let balance = account.record(Transaction::new(
            action.clone(),
            amount,
            Transaction::timestamp_now(),
        ))?;
        self.persist(Undo::Restore(vec![snapshot]))?;

        debug!(account = %number, %action, %amount, %balance, "balance updated");
        let entry = match action {
            Action::Deposit => AuditEntry::deposit(&number, amount, balance),
            _ => AuditEntry::withdraw(&number, amount, balance),
        };
        self.audit(entry);

        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, Operation};
    use crate::services::ledger::test_support::{break_storage, reopen, temp_ledger};

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_deposit() {
        let (temp_dir, mut ledger) = temp_ledger();
        let alice = ledger.create_account("Alice").unwrap();

        let balance = ledger.deposit(alice.as_str(), cents(10_000)).unwrap();
        assert_eq!(balance, cents(10_000));

        let history = ledger.recent_transactions(alice.as_str(), 5).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, Action::Deposit);
        assert_eq!(history[0].amount, cents(10_000));

        let reopened = reopen(&temp_dir);
        assert_eq!(reopened.balance_of(alice.as_str()).unwrap(), cents(10_000));
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let (_temp_dir, mut ledger) = temp_ledger();
        let alice = ledger.create_account("Alice").unwrap();

        for amount in [cents(0), cents(-500)] {
            let err = ledger.deposit(alice.as_str(), amount).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount(_)));
        }
        assert_eq!(ledger.balance_of(alice.as_str()).unwrap(), Money::zero());
        assert!(ledger.account(alice.as_str()).unwrap().transactions().is_empty());
    }

    #[test]
    fn test_unknown_account() {
        let (_temp_dir, mut ledger) = temp_ledger();
        assert!(ledger.deposit("12345678", cents(100)).unwrap_err().is_not_found());
        assert!(ledger.withdraw("12345678", cents(100)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_withdraw() {
        let (_temp_dir, mut ledger) = temp_ledger();
        let alice = ledger.create_account("Alice").unwrap();
        ledger.deposit(alice.as_str(), cents(10_000)).unwrap();

        let balance = ledger.withdraw(alice.as_str(), cents(2_550)).unwrap();
        assert_eq!(balance, cents(7_450));

        let account = ledger.account(alice.as_str()).unwrap();
        assert_eq!(account.transactions()[1].action, Action::Withdraw);
        assert!(account.is_consistent());
    }

    #[test]
    fn test_withdraw_full_balance() {
        let (_temp_dir, mut ledger) = temp_ledger();
        let alice = ledger.create_account("Alice").unwrap();
        ledger.deposit(alice.as_str(), cents(4_000)).unwrap();

        let balance = ledger.withdraw(alice.as_str(), cents(4_000)).unwrap();
        assert_eq!(balance, Money::zero());
    }

    #[test]
    fn test_withdraw_insufficient_funds() {
        let (_temp_dir, mut ledger) = temp_ledger();
        let bob = ledger.create_account("Bob").unwrap();
        ledger.deposit(bob.as_str(), cents(4_000)).unwrap();
        let before = ledger.account(bob.as_str()).unwrap().clone();

        let err = ledger.withdraw(bob.as_str(), cents(100_000)).unwrap_err();
        match err {
            LedgerError::InsufficientFunds {
                requested,
                available,
                ..
            } => {
                assert_eq!(requested, cents(100_000));
                assert_eq!(available, cents(4_000));
            }
            other => panic!("expected InsufficientFunds, got {:?}", other),
        }
        assert_eq!(ledger.account(bob.as_str()).unwrap(), &before);

        // One cent over is still too much
        assert!(ledger.withdraw(bob.as_str(), cents(4_001)).is_err());
    }

    #[test]
    fn test_failed_write_reverts_deposit() {
        let (temp_dir, mut ledger) = temp_ledger();
        let alice = ledger.create_account("Alice").unwrap();
        ledger.deposit(alice.as_str(), cents(500)).unwrap();
        break_storage(&temp_dir);

        let err = ledger.deposit(alice.as_str(), cents(700)).unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));

        let account = ledger.account(alice.as_str()).unwrap();
        assert_eq!(account.balance(), cents(500));
        assert_eq!(account.transactions().len(), 1);

        let err = ledger.withdraw(alice.as_str(), cents(100)).unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert_eq!(ledger.balance_of(alice.as_str()).unwrap(), cents(500));
    }

    #[test]
    fn test_mutations_are_audited() {
        let (temp_dir, mut ledger) = temp_ledger();
        let alice = ledger.create_account("Alice").unwrap();
        ledger.deposit(alice.as_str(), cents(1_000)).unwrap();
        ledger.withdraw(alice.as_str(), cents(300)).unwrap();
        let _ = ledger.withdraw(alice.as_str(), cents(5_000));

        let entries = AuditLogger::new(temp_dir.path().join("audit.log"))
            .read_all()
            .unwrap();
        let ops: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            ops,
            vec![Operation::CreateAccount, Operation::Deposit, Operation::Withdraw]
        );
        assert_eq!(entries[2].balance_after, cents(700));
    }
}
