//! Account display formatting
//!
//! Formats accounts for terminal output: the account table and the
//! transaction receipt.

use crate::models::{Account, Money, Transaction, DATE_TIME_FORMAT};

const RULE: &str = "-------------------";

/// Format accounts with balances as a table
pub fn format_account_list<'a, I>(accounts: I, symbol: &str) -> String
where
    I: IntoIterator<Item = &'a Account>,
{
    let accounts: Vec<&Account> = accounts.into_iter().collect();
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let holder_width = accounts
        .iter()
        .map(|a| a.account_holder.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<holder_width$}  {:>14}\n",
        "Number",
        "Holder",
        "Balance",
        holder_width = holder_width,
    ));
    output.push_str(&format!(
        "{:-<8}  {:-<holder_width$}  {:->14}\n",
        "",
        "",
        "",
        holder_width = holder_width,
    ));

    for account in &accounts {
        output.push_str(&format!(
            "{:<8}  {:<holder_width$}  {:>14}\n",
            account.account_number,
            account.account_holder,
            account.balance().format_with_symbol(symbol),
            holder_width = holder_width,
        ));
    }

    let total = Money::checked_sum(accounts.iter().map(|a| a.balance()))
        .map(|total| total.format_with_symbol(symbol))
        .unwrap_or_else(|| "(overflow)".to_string());
    output.push_str(&format!(
        "{:-<8}  {:-<holder_width$}  {:->14}\n",
        "",
        "",
        "",
        holder_width = holder_width,
    ));
    output.push_str(&format!(
        "{:<8}  {:<holder_width$}  {:>14}\n",
        "TOTAL",
        "",
        total,
        holder_width = holder_width,
    ));

    output
}

/// Format a receipt: account header plus the given recent transactions
pub fn format_receipt(account: &Account, recent: &[Transaction], symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Transaction Receipt\n");
    output.push_str(RULE);
    output.push('\n');
    output.push_str(&format!("Account Holder: {}\n", account.account_holder));
    output.push_str(&format!("Account Number: {}\n", account.account_number));
    output.push_str(&format!(
        "Balance: {}\n",
        account.balance().format_with_symbol(symbol)
    ));
    output.push_str("Recent Transactions:\n");

    if recent.is_empty() {
        output.push_str("  (none)\n");
    }
    for txn in recent {
        output.push_str(&format!(
            "- {}: {} {}\n",
            txn.date_time.format(DATE_TIME_FORMAT),
            txn.action,
            txn.amount.format_with_symbol(symbol)
        ));
    }

    output.push_str(RULE);
    output.push('\n');
    output
}
