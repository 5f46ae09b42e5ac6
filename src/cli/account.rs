//! Account CLI commands: create, balance, receipt and list.

use crate::config::Settings;
use crate::display::{format_account_list, format_receipt};
use crate::error::LedgerResult;
use crate::services::Ledger;

pub fn handle_create(ledger: &mut Ledger, holder: &str) -> LedgerResult<()> {
    let number = ledger.create_account(holder)?;
    println!("Account created successfully. Account Number: {}", number);
    Ok(())
}

pub fn handle_balance(ledger: &Ledger, settings: &Settings, account: &str) -> LedgerResult<()> {
    let balance = ledger.balance_of(account)?;
    println!(
        "Your balance is: {}",
        balance.format_with_symbol(&settings.currency_symbol)
    );
    Ok(())
}

/// Print the account header and its most recent transactions
pub fn handle_receipt(
    ledger: &Ledger,
    settings: &Settings,
    account: &str,
    count: Option<usize>,
) -> LedgerResult<()> {
    let count = count.unwrap_or(settings.receipt_transactions);
    let recent = ledger.recent_transactions(account, count)?;
    let account = ledger.account(account)?;

    print!(
        "{}",
        format_receipt(account, recent, &settings.currency_symbol)
    );
    Ok(())
}

pub fn handle_list(ledger: &Ledger, settings: &Settings) -> LedgerResult<()> {
    print!(
        "{}",
        format_account_list(ledger.accounts(), &settings.currency_symbol)
    );
    Ok(())
}
