//! Ledger file store
//!
//! Loads and saves the full account set as one JSON object keyed by account
//! number. A file that cannot be parsed is moved aside and treated as an
//! empty ledger.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountNumber, Money, Transaction};

use super::file_io::{quarantine, read_json, write_json_atomic, JsonRead};

/// In-memory account set, ordered by account number
pub type Accounts = BTreeMap<AccountNumber, Account>;

/// Stored form of one account; the account number is the map key
#[derive(Debug, Deserialize)]
struct AccountRecord {
    account_holder: String,
    balance: Money,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// The top-level object as written, entries in file order
///
/// Read as a list rather than a map so repeated keys are seen instead of
/// silently overwriting each other.
struct StoredEntries(Vec<(AccountNumber, AccountRecord)>);

impl<'de> Deserialize<'de> for StoredEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = StoredEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping account numbers to accounts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(StoredEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Serialize)]
struct AccountRecordRef<'a> {
    account_holder: &'a str,
    balance: Money,
    transactions: &'a [Transaction],
}

impl<'a> From<&'a Account> for AccountRecordRef<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            account_holder: &account.account_holder,
            balance: account.balance(),
            transactions: account.transactions(),
        }
    }
}

/// How the ledger came out of storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No ledger file existed
    Fresh,
    Loaded,
    /// The file was unreadable and the ledger started empty
    Degraded {
        reason: String,
        /// Where the damaged file was moved, if the move succeeded
        quarantined: Option<PathBuf>,
    },
}

impl LoadStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// The corruption as an error value, for callers that want to report it
    pub fn corruption(&self) -> Option<LedgerError> {
        match self {
            Self::Degraded { reason, .. } => Some(LedgerError::CorruptStorage(reason.clone())),
            Self::Fresh | Self::Loaded => None,
        }
    }

    /// Where a corrupt file was moved
    pub fn quarantined(&self) -> Option<&Path> {
        match self {
            Self::Degraded { quarantined, .. } => quarantined.as_deref(),
            Self::Fresh | Self::Loaded => None,
        }
    }

}

/// Result of [`LedgerStore::load`]
#[derive(Debug)]
pub struct LoadedLedger {
    pub accounts: Accounts,
    pub status: LoadStatus,
}

/// Durable home of the ledger
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ledger file
    ///
    /// A missing file yields an empty ledger. So does a malformed one, after
    /// it has been quarantined. Other I/O failures are returned.
    pub fn load(&self) -> LedgerResult<LoadedLedger> {
        let StoredEntries(records) = match read_json(&self.path)? {
            JsonRead::Missing => {
                debug!(path = %self.path.display(), "no ledger file, starting empty");
                return Ok(LoadedLedger {
                    accounts: Accounts::new(),
                    status: LoadStatus::Fresh,
                });
            }
            JsonRead::Malformed(reason) => return Ok(self.degrade(reason)),
            JsonRead::Parsed(records) => records,
        };

        let mut accounts = Accounts::new();
        for (number, record) in records {
            if number.as_str().is_empty() {
                return Ok(self.degrade("empty account number key".to_string()));
            }
            if accounts.contains_key(number.as_str()) {
                return Ok(self.degrade(format!("account number {} appears twice", number)));
            }
            if let Some(bad) = record.transactions.iter().find(|t| !t.amount.is_positive()) {
                return Ok(self.degrade(format!(
                    "account {} has a non-positive transaction amount {}",
                    number, bad.amount
                )));
            }

            let account = Account::from_parts(
                number.clone(),
                record.account_holder,
                record.balance,
                record.transactions,
            );
            match account.transaction_total() {
                None => {
                    return Ok(self.degrade(format!(
                        "transaction history of account {} exceeds {}",
                        number,
                        Money::MAX
                    )))
                }
                Some(total) if total != account.balance() => warn!(
                    account = %number,
                    balance = %account.balance(),
                    history_total = %total,
                    "stored balance does not match transaction history"
                ),
                Some(_) => {}
            }
            accounts.insert(number, account);
        }

        info!(
            path = %self.path.display(),
            accounts = accounts.len(),
            "ledger loaded"
        );
        Ok(LoadedLedger {
            accounts,
            status: LoadStatus::Loaded,
        })
    }

    /// Write every account and its full history, replacing the file atomically
    pub fn save(&self, accounts: &Accounts) -> LedgerResult<()> {
        let records: BTreeMap<&str, AccountRecordRef<'_>> = accounts
            .iter()
            .map(|(number, account)| (number.as_str(), AccountRecordRef::from(account)))
            .collect();

        write_json_atomic(&self.path, &records)?;
        debug!(path = %self.path.display(), accounts = accounts.len(), "ledger saved");
        Ok(())
    }

    fn degrade(&self, reason: String) -> LoadedLedger {
        let quarantined = match quarantine(&self.path) {
            Ok(moved) => Some(moved),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not quarantine corrupt ledger");
                None
            }
        };

        warn!(
            path = %self.path.display(),
            %reason,
            quarantined = ?quarantined,
            "ledger file is corrupt, starting with an empty ledger"
        );

        LoadedLedger {
            accounts: Accounts::new(),
            status: LoadStatus::Degraded {
                reason,
                quarantined,
            },
        }
    }
}
