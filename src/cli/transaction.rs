//! Deposit and withdraw CLI commands

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::services::Ledger;

use super::parse_amount;

pub fn handle_deposit(
    ledger: &mut Ledger,
    settings: &Settings,
    account: &str,
    amount: &str,
) -> LedgerResult<()> {
    let amount = parse_amount(amount)?;
    let balance = ledger.deposit(account, amount)?;

    let symbol = &settings.currency_symbol;
    println!(
        "{} has been deposited. New balance: {}",
        amount.format_with_symbol(symbol),
        balance.format_with_symbol(symbol)
    );
    Ok(())
}

pub fn handle_withdraw(
    ledger: &mut Ledger,
    settings: &Settings,
    account: &str,
    amount: &str,
) -> LedgerResult<()> {
    let amount = parse_amount(amount)?;
    let balance = ledger.withdraw(account, amount)?;

    let symbol = &settings.currency_symbol;
    println!(
        "{} has been withdrawn. New balance: {}",
        amount.format_with_symbol(symbol),
        balance.format_with_symbol(symbol)
    );
    Ok(())
}
