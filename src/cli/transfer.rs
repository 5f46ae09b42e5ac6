//! CLI command handler for account transfers

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::services::Ledger;

use super::parse_amount;

/// Handle the transfer command
pub fn handle_transfer(
    ledger: &mut Ledger,
    settings: &Settings,
    from: &str,
    to: &str,
    amount: &str,
) -> LedgerResult<()> {
    let amount = parse_amount(amount)?;
    let (from_balance, to_balance) = ledger.transfer(from, to, amount)?;

    let symbol = &settings.currency_symbol;
    println!(
        "Transferred {} to account {}. New balance: {}",
        amount.format_with_symbol(symbol),
        to.trim(),
        from_balance.format_with_symbol(symbol)
    );
    println!(
        "  Account {} balance: {}",
        to.trim(),
        to_balance.format_with_symbol(symbol)
    );
    Ok(())
}
