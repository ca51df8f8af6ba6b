//! Wallet CLI commands

use clap::Subcommand;

use super::args::{parse_amount, resolve_wallet};
use crate::config::Settings;
use crate::display::{format_wallet_table, DisplayOptions};
use crate::error::LedgerResult;
use crate::store::{LedgerStore, NewWallet, WalletPatch};

/// Wallet subcommands
#[derive(Subcommand, Debug)]
pub enum WalletCommands {
    /// Create a wallet
    Add {
        /// Wallet name
        name: String,
        /// Explicit ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// ISO currency code
        #[arg(long, default_value = "USD")]
        currency: String,
        /// Current balance
        #[arg(short, long)]
        balance: Option<String>,
    },

    /// List all wallets
    List,

    /// Rename a wallet or record its balance
    Edit {
        /// Wallet name or ID
        wallet: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        balance: Option<String>,
        #[arg(long)]
        currency: Option<String>,
    },

    /// Delete a wallet no expense uses
    Delete {
        /// Wallet name or ID
        wallet: String,
    },
}

/// Handle a wallet command
pub fn handle_wallet_command(
    store: &LedgerStore,
    settings: &Settings,
    cmd: WalletCommands,
) -> LedgerResult<()> {
    let options = DisplayOptions::from(settings);

    match cmd {
        WalletCommands::Add {
            name,
            id,
            currency,
            balance,
        } => {
            let mut input = NewWallet::new(name, currency);
            if let Some(id) = id {
                input = input.with_id(id);
            }
            if let Some(balance) = balance {
                input = input.balance(parse_amount(&balance)?);
            }
            let wallet = store.add_wallet(input)?;
            println!("Created wallet: {}", wallet);
            println!("  Balance: {}", options.money(wallet.balance));
            println!("  ID:      {}", wallet.id);
        }

        WalletCommands::List => {
            print!("{}", format_wallet_table(&store.wallets()?, &options));
        }

        WalletCommands::Edit {
            wallet,
            name,
            balance,
            currency,
        } => {
            let existing = resolve_wallet(store, &wallet)?;
            let patch = WalletPatch {
                name,
                balance: balance.as_deref().map(parse_amount).transpose()?,
                currency,
            };
            let updated = store.update_wallet(&existing.id, patch)?;
            println!("Updated wallet: {}", updated);
        }

        WalletCommands::Delete { wallet } => {
            let existing = resolve_wallet(store, &wallet)?;
            store.delete_wallet(&existing.id)?;
            println!("Deleted wallet: {}", existing.name);
        }
    }

    Ok(())
}
