use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bankbook::cli;
use bankbook::config::{LedgerPaths, Settings};
use bankbook::{Ledger, LedgerError};

/// Exit status for requests the user can correct (bad amount, unknown account)
const EXIT_REJECTED: u8 = 1;
/// Exit status for storage, configuration and other environment failures
const EXIT_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(
    name = "bankbook",
    version,
    about = "Single-user personal ledger",
    long_about = "Bankbook keeps named accounts with running balances and a full \
                  transaction history, saved to disk after every change."
)]
struct Cli {
    /// Ledger file to use instead of the default location
    #[arg(long, global = true, env = "BANKBOOK_DATA_FILE")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a new account
    Create {
        /// Account holder's name
        holder: String,
    },
    /// Deposit money into an account
    Deposit {
        /// Account number
        account: String,
        /// Amount (e.g. "100.00" or "100")
        amount: String,
    },
    /// Withdraw money from an account
    Withdraw {
        /// Account number
        account: String,
        /// Amount (e.g. "100.00" or "100")
        amount: String,
    },
    /// Transfer money between accounts
    Transfer {
        /// Source account number
        from: String,
        /// Target account number
        to: String,
        /// Amount (e.g. "100.00" or "100")
        amount: String,
    },
    /// Show an account's balance
    Balance {
        /// Account number
        account: String,
    },
    /// Print a receipt with the most recent transactions
    Receipt {
        /// Account number
        account: String,
        /// Number of transactions to show
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// List all accounts
    List,
    /// Show the most recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
    },
    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    bankbook::logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let rejected = err
                .downcast_ref::<LedgerError>()
                .is_some_and(LedgerError::is_recoverable);
            ExitCode::from(if rejected { EXIT_REJECTED } else { EXIT_FAILURE })
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut paths = LedgerPaths::new()?;
    if let Some(file) = cli.data_file {
        paths = paths.with_ledger_file(file);
    }
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Bankbook - single-user personal ledger");
        println!();
        println!("Run 'bankbook --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Config => show_config(&paths, &settings),
        Commands::Create { holder } => {
            cli::handle_create(&mut open_ledger(&paths, &settings)?, &holder)?
        }
        Commands::Deposit { account, amount } => {
            let mut ledger = open_ledger(&paths, &settings)?;
            cli::handle_deposit(&mut ledger, &settings, &account, &amount)?
        }
        Commands::Withdraw { account, amount } => {
            let mut ledger = open_ledger(&paths, &settings)?;
            cli::handle_withdraw(&mut ledger, &settings, &account, &amount)?
        }
        Commands::Transfer { from, to, amount } => {
            let mut ledger = open_ledger(&paths, &settings)?;
            cli::handle_transfer(&mut ledger, &settings, &from, &to, &amount)?
        }
        Commands::Balance { account } => {
            cli::handle_balance(&open_ledger(&paths, &settings)?, &settings, &account)?
        }
        Commands::Receipt { account, count } => {
            let ledger = open_ledger(&paths, &settings)?;
            cli::handle_receipt(&ledger, &settings, &account, count)?
        }
        Commands::List => cli::handle_list(&open_ledger(&paths, &settings)?, &settings)?,
        Commands::Audit { count } => cli::handle_audit(&paths, &settings, count)?,
    }

    Ok(())
}

/// Open the ledger, warning on stderr if the file had to be discarded
fn open_ledger(paths: &LedgerPaths, settings: &Settings) -> Result<Ledger> {
    let ledger = Ledger::open_with_settings(paths, settings)?;

    let status = ledger.load_status();
    if let Some(err) = status.corruption() {
        eprintln!(
            "Warning: ledger file could not be read ({}); starting with an empty ledger.",
            err
        );
        if let Some(moved) = status.quarantined() {
            eprintln!("The unreadable file was moved to {}", moved.display());
        }
    }

    Ok(ledger)
}

fn show_config(paths: &LedgerPaths, settings: &Settings) {
    println!("Bankbook Configuration");
    println!("======================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Ledger file:    {}", paths.ledger_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:      {}", settings.currency_symbol);
    println!("  Receipt transactions: {}", settings.receipt_transactions);
    println!("  Audit enabled:        {}", settings.audit_enabled);
}
