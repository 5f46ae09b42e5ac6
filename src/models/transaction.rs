//! Transaction model
//!
//! A transaction is an immutable record of one balance-affecting event. The
//! direction of money is carried by the [`Action`]; the amount is always
//! positive.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountNumber;
use super::money::Money;

/// On-disk timestamp format, second precision
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TRANSFER_TO_PREFIX: &str = "Transfer to ";
const TRANSFER_FROM_PREFIX: &str = "Transfer from ";

/// What a transaction did to its account
///
/// Stored as a display string (`"Deposit"`, `"Transfer to 12345678"`, ...)
/// so ledger files stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    Deposit,
    Withdraw,
    /// Money sent to another account
    TransferOut { target: AccountNumber },
    /// Money received from another account
    TransferIn { source: AccountNumber },
}

impl Action {
    /// True for actions that add money to the account
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn { .. })
    }

    /// The other account involved, for transfers
    pub fn counterparty(&self) -> Option<&AccountNumber> {
        match self {
            Self::TransferOut { target } => Some(target),
            Self::TransferIn { source } => Some(source),
            Self::Deposit | Self::Withdraw => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdraw => write!(f, "Withdraw"),
            Self::TransferOut { target } => write!(f, "{}{}", TRANSFER_TO_PREFIX, target),
            Self::TransferIn { source } => write!(f, "{}{}", TRANSFER_FROM_PREFIX, source),
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}

impl TryFrom<String> for Action {
    type Error = UnknownAction;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "Deposit" => return Ok(Self::Deposit),
            "Withdraw" => return Ok(Self::Withdraw),
            _ => {}
        }

        let counterparty = |rest: &str| {
            let rest = rest.trim();
            (!rest.is_empty()).then(|| AccountNumber::new(rest))
        };

        if let Some(target) = s.strip_prefix(TRANSFER_TO_PREFIX).and_then(counterparty) {
            return Ok(Self::TransferOut { target });
        }
        if let Some(source) = s.strip_prefix(TRANSFER_FROM_PREFIX).and_then(counterparty) {
            return Ok(Self::TransferIn { source });
        }

        Err(UnknownAction(s))
    }
}

/// A stored action string that names no known action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown transaction action: {:?}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

/// A single entry in an account's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub action: Action,

    /// Always positive
    pub amount: Money,

    /// Local time of creation
    #[serde(with = "date_time_format")]
    pub date_time: NaiveDateTime,
}

impl Transaction {
    pub fn new(action: Action, amount: Money, date_time: NaiveDateTime) -> Self {
        Self {
            action,
            amount,
            date_time,
        }
    }

    /// Current local time truncated to whole seconds
    pub fn timestamp_now() -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(0)
    }

    /// Amount with the sign implied by the action
    pub fn signed_amount(&self) -> Money {
        if self.action.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}",
            self.date_time.format(DATE_TIME_FORMAT),
            self.action,
            self.amount
        )
    }
}

mod date_time_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_TIME_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(DATE_TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DATE_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}
