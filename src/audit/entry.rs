//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AccountNumber, Money};

/// Ledger operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateAccount,
    Deposit,
    Withdraw,
    Transfer,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::CreateAccount => write!(f, "CREATE_ACCOUNT"),
            Operation::Deposit => write!(f, "DEPOSIT"),
            Operation::Withdraw => write!(f, "WITHDRAW"),
            Operation::Transfer => write!(f, "TRANSFER"),
        }
    }
}

/// A single audit log entry
///
/// Written only after the ledger file has been updated, so every entry
/// describes a change that is durable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// The account the operation was applied to (the source, for transfers)
    pub account_number: AccountNumber,

    /// Target account of a transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<AccountNumber>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    /// Balance of `account_number` after the operation
    pub balance_after: Money,

    /// Account holder, recorded on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_holder: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, account_number: &AccountNumber, balance_after: Money) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            account_number: account_number.clone(),
            counterparty: None,
            amount: None,
            balance_after,
            account_holder: None,
        }
    }

    pub fn create_account(account_number: &AccountNumber, account_holder: &str) -> Self {
        Self {
            account_holder: Some(account_holder.to_string()),
            ..Self::new(Operation::CreateAccount, account_number, Money::zero())
        }
    }

    pub fn deposit(account_number: &AccountNumber, amount: Money, balance_after: Money) -> Self {
        Self {
            amount: Some(amount),
            ..Self::new(Operation::Deposit, account_number, balance_after)
        }
    }

    pub fn withdraw(account_number: &AccountNumber, amount: Money, balance_after: Money) -> Self {
        Self {
            amount: Some(amount),
            ..Self::new(Operation::Withdraw, account_number, balance_after)
        }
    }

    pub fn transfer(
        source: &AccountNumber,
        target: &AccountNumber,
        amount: Money,
        source_balance_after: Money,
    ) -> Self {
        Self {
            counterparty: Some(target.clone()),
            amount: Some(amount),
            ..Self::new(Operation::Transfer, source, source_balance_after)
        }
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.account_number
        );
        if let Some(target) = &self.counterparty {
            line.push_str(&format!(" -> {}", target));
        }
        if let Some(amount) = self.amount {
            line.push_str(&format!(" {}", amount));
        }
        line.push_str(&format!(" (balance {})", self.balance_after));
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_serialization() {
        let json = serde_json::to_string(&Operation::CreateAccount).unwrap();
        assert_eq!(json, "\"create_account\"");
        let back: Operation = serde_json::from_str("\"transfer\"").unwrap();
        assert_eq!(back, Operation::Transfer);
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create_account(&"12345678".into(), "Alice");
        assert_eq!(entry.operation, Operation::CreateAccount);
        assert_eq!(entry.account_holder.as_deref(), Some("Alice"));
        assert_eq!(entry.balance_after, Money::zero());
        assert!(entry.amount.is_none());

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("counterparty").is_none());
    }

    #[test]
    fn test_transfer_summary() {
        let entry = AuditEntry::transfer(
            &"11111111".into(),
            &"22222222".into(),
            Money::from_cents(4000),
            Money::from_cents(6000),
        );
        let summary = entry.summary();
        assert!(summary.contains("TRANSFER 11111111 -> 22222222 $40.00 (balance $60.00)"));
    }

    #[test]
    fn test_round_trip() {
        let entry = AuditEntry::deposit(
            &"12345678".into(),
            Money::from_cents(150),
            Money::from_cents(150),
        );
        let json = serde_json::to_string(&entry).unwrap();
        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
