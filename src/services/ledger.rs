//! Ledger engine
//!
//! [`Ledger`] owns the in-memory account set and is the only way to change
//! it. Every mutation is persisted through the [`LedgerStore`] before the
//! method returns; if the write fails, the in-memory change is reverted so
//! memory and disk never disagree.
//!
//! Mutating methods take `&mut self`, so one operation (including its write)
//! always completes before the next starts. Callers sharing a ledger across
//! threads wrap it in a `Mutex`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountNumber, Money, Transaction};
use crate::storage::{Accounts, LedgerStore, LoadStatus};

/// How to undo a mutation whose write failed
pub(super) enum Undo {
    /// Drop a freshly inserted account
    Remove(AccountNumber),
    /// Put back the accounts as they were before the mutation
    Restore(Vec<Account>),
}

/// The account ledger
pub struct Ledger {
    store: LedgerStore,
    pub(super) accounts: Accounts,
    load_status: LoadStatus,
    audit: Option<AuditLogger>,
    max_account_number_attempts: u32,
    rng: StdRng,
}

impl Ledger {
    /// Load the ledger from `store`
    ///
    /// A missing or corrupt file yields an empty ledger; check
    /// [`Ledger::load_status`] to tell the two apart.
    pub fn open(store: LedgerStore) -> LedgerResult<Self> {
        let loaded = store.load()?;

        Ok(Self {
            store,
            accounts: loaded.accounts,
            load_status: loaded.status,
            audit: None,
            max_account_number_attempts: Settings::default().max_account_number_attempts,
            rng: StdRng::from_entropy(),
        })
    }

    /// Open the ledger at the configured location with the user's settings
    pub fn open_with_settings(paths: &LedgerPaths, settings: &Settings) -> LedgerResult<Self> {
        let mut ledger = Self::open(LedgerStore::new(paths.ledger_file()))?
            .with_max_account_number_attempts(settings.max_account_number_attempts);

        if settings.audit_enabled {
            ledger = ledger.with_audit(AuditLogger::new(paths.audit_log()));
        }

        Ok(ledger)
    }

    /// Record successful mutations in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn with_max_account_number_attempts(mut self, attempts: u32) -> Self {
        self.max_account_number_attempts = attempts;
        self
    }

    /// Use a specific random source for account numbers
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Open a new account with a zero balance and return its number
    pub fn create_account(&mut self, holder: &str) -> LedgerResult<AccountNumber> {
        let holder = holder.trim();
        if holder.is_empty() {
            return Err(LedgerError::InvalidHolder(
                "Account holder name cannot be empty".into(),
            ));
        }

        let account_number = self.unused_account_number()?;
        self.accounts.insert(
            account_number.clone(),
            Account::new(account_number.clone(), holder),
        );
        self.persist(Undo::Remove(account_number.clone()))?;

        info!(account = %account_number, "account created");
        self.audit(AuditEntry::create_account(&account_number, holder));

        Ok(account_number)
    }

    /// Draw random numbers until one is free in the live account set
    fn unused_account_number(&mut self) -> LedgerResult<AccountNumber> {
        for _ in 0..self.max_account_number_attempts {
            let candidate = AccountNumber::random(&mut self.rng);
            if !self.accounts.contains_key(candidate.as_str()) {
                return Ok(candidate);
            }
            debug!(candidate = %candidate, "account number collision, drawing again");
        }

        Err(LedgerError::ExhaustedKeyspace {
            attempts: self.max_account_number_attempts,
        })
    }

    /// Look up an account
    pub fn account(&self, account_number: &str) -> LedgerResult<&Account> {
        self.accounts
            .get(account_number)
            .ok_or_else(|| LedgerError::account_not_found(account_number))
    }

    pub(super) fn account_mut(&mut self, account_number: &str) -> LedgerResult<&mut Account> {
        self.accounts
            .get_mut(account_number)
            .ok_or_else(|| LedgerError::account_not_found(account_number))
    }

    /// Current balance of an account
    pub fn balance_of(&self, account_number: &str) -> LedgerResult<Money> {
        Ok(self.account(account_number)?.balance())
    }

    /// The last `n` transactions of an account, oldest first
    pub fn recent_transactions(&self, account_number: &str, n: usize) -> LedgerResult<&[Transaction]> {
        Ok(self.account(account_number)?.recent_transactions(n))
    }

    /// All accounts ordered by account number
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Sum of all balances, `None` if it exceeds the money range
    pub fn total_balance(&self) -> Option<Money> {
        Money::checked_sum(self.accounts.values().map(Account::balance))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Write the ledger, reverting the in-memory change if the write fails
    pub(super) fn persist(&mut self, undo: Undo) -> LedgerResult<()> {
        match self.store.save(&self.accounts) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.revert(undo);
                warn!(error = %err, "ledger write failed, change reverted");
                Err(err)
            }
        }
    }

    pub(super) fn revert(&mut self, undo: Undo) {
        match undo {
            Undo::Remove(number) => {
                self.accounts.remove(number.as_str());
            }
            Undo::Restore(snapshots) => {
                for account in snapshots {
                    self.accounts.insert(account.account_number.clone(), account);
                }
            }
        }
    }

    /// Append to the audit log; the ledger file is already current, so a
    /// failure here is only reported
    pub(super) fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(err) = logger.log(&entry) {
                warn!(error = %err, operation = %entry.operation, "failed to write audit entry");
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    /// A ledger backed by a file in a fresh temp directory
    pub fn temp_ledger() -> (TempDir, Ledger) {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path().join("bank_data.json"));
        let ledger = Ledger::open(store)
            .unwrap()
            .with_audit(AuditLogger::new(temp_dir.path().join("audit.log")));
        (temp_dir, ledger)
    }

    /// Make every later write fail by putting a directory on the temp path
    pub fn break_storage(temp_dir: &TempDir) {
        std::fs::create_dir(temp_dir.path().join("bank_data.json.tmp")).unwrap();
    }

    pub fn reopen(temp_dir: &TempDir) -> Ledger {
        Ledger::open(LedgerStore::new(temp_dir.path().join("bank_data.json"))).unwrap()
    }
}
