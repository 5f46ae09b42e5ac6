//! Transfers between accounts
//!
//! A transfer debits the source and credits the target as one step: both
//! records carry the same timestamp, the ledger is written once, and a
//! failure at any point leaves both accounts as they were.

use tracing::debug;

use crate::audit::AuditEntry;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountNumber, Action, Money, Transaction};

use super::ledger::{Ledger, Undo};
use super::transaction::ensure_positive;

impl Ledger {
    /// Move `amount` from `source` to `target`
    ///
    /// Returns the new `(source, target)` balances.
    pub fn transfer(
        &mut self,
        source: &str,
        target: &str,
        amount: Money,
    ) -> LedgerResult<(Money, Money)> {
        let source_snapshot = self.account(source)?.clone();
        let target_snapshot = self.account(target)?.clone();
        ensure_positive(amount)?;

        if source_snapshot.account_number == target_snapshot.account_number {
            return Err(LedgerError::SameAccount(source.to_string()));
        }

        if amount > source_snapshot.balance() {
            return Err(LedgerError::InsufficientFunds {
                account_number: source.to_string(),
                requested: amount,
                available: source_snapshot.balance(),
            });
        }

        let source_number = source_snapshot.account_number.clone();
        let target_number = target_snapshot.account_number.clone();
        let undo = Undo::Restore(vec![source_snapshot, target_snapshot]);
        let applied = self.post_transfer(&source_number, &target_number, amount);

        let (source_balance, target_balance) = match applied {
            Ok(balances) => balances,
            Err(err) => {
                self.revert(undo);
                return Err(err);
            }
        };
        self.persist(undo)?;

        debug!(
            source = %source_number,
            target = %target_number,
            %amount,
            "transfer applied"
        );
        self.audit(AuditEntry::transfer(
            &source_number,
            &target_number,
            amount,
            source_balance,
        ));

        Ok((source_balance, target_balance))
    }

    /// Append both transfer records; the caller reverts on error
    fn post_transfer(
        &mut self,
        source: &AccountNumber,
        target: &AccountNumber,
        amount: Money,
    ) -> LedgerResult<(Money, Money)> {
        let when = Transaction::timestamp_now();
        let out = Transaction::new(
            Action::TransferOut {
                target: target.clone(),
            },
            amount,
            when,
        );
        let inc = Transaction::new(
            Action::TransferIn {
                source: source.clone(),
            },
            amount,
            when,
        );

        let source_balance = self.account_mut(source.as_str())?.record(out)?;
        let target_balance = self.account_mut(target.as_str())?.record(inc)?;
        Ok((source_balance, target_balance))
    }
}
