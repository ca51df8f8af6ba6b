//! Expense CLI commands

use clap::Subcommand;

use super::args::{parse_amount, parse_date, resolve_category, resolve_wallet, today, FilterArgs};
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_table, DisplayOptions};
use crate::error::{LedgerError, LedgerResult};
use crate::models::ExpenseId;
use crate::reports::filter;
use crate::store::{ExpensePatch, LedgerStore, NewExpense};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Short description
        title: String,
        /// Amount (e.g. "12.50")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Wallet name or ID
        #[arg(short, long)]
        wallet: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Merchant name
        #[arg(short, long)]
        merchant: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List expenses, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Show at most this many expenses
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one expense
    Show {
        /// Expense ID
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// Category name or ID
        #[arg(long)]
        category: Option<String>,
        /// Wallet name or ID
        #[arg(long)]
        wallet: Option<String>,
        #[arg(long)]
        merchant: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    store: &LedgerStore,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let options = DisplayOptions::from(settings);

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            category,
            wallet,
            date,
            merchant,
            notes,
        } => {
            let category = resolve_category(store, &category)?;
            let wallet = resolve_wallet(store, &wallet)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };

            let input = NewExpense::new(title, parse_amount(&amount)?, date, category.id, wallet.id)
                .merchant(merchant.unwrap_or_default())
                .notes(notes.unwrap_or_default());
            let expense = store.add_expense(input)?;

            println!(
                "Recorded {} for '{}' on {}",
                options.money(expense.amount),
                expense.title,
                options.date(expense.date)
            );
            println!("  Category: {}", category.name);
            println!("  Wallet:   {}", wallet.name);
            println!("  ID:       {}", expense.id);
        }

        ExpenseCommands::List { filter: args, limit } => {
            let spec = args.to_spec(store)?;
            let mut expenses = filter(&store.expenses()?, &spec);
            expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }

            print!(
                "{}",
                format_expense_table(&expenses, &store.categories()?, &store.wallets()?, &options)
            );
        }

        ExpenseCommands::Show { id } => {
            let id = ExpenseId::from(id.as_str());
            let expense = store
                .expense(&id)?
                .ok_or_else(|| LedgerError::expense_not_found(id.as_str()))?;

            let category = match expense.category_id {
                Some(ref category_id) => store.category(category_id)?,
                None => None,
            };
            let wallet = store.wallet(&expense.wallet_id)?;

            print!(
                "{}",
                format_expense_details(
                    &expense,
                    category.as_ref().map(|c| c.name.as_str()),
                    wallet.as_ref().map(|w| w.name.as_str()),
                    &options
                )
            );
        }

        ExpenseCommands::Edit {
            id,
            title,
            amount,
            date,
            category,
            wallet,
            merchant,
            notes,
        } => {
            let patch = ExpensePatch {
                title,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                category_id: match category {
                    Some(c) => Some(resolve_category(store, &c)?.id),
                    None => None,
                },
                wallet_id: match wallet {
                    Some(w) => Some(resolve_wallet(store, &w)?.id),
                    None => None,
                },
                merchant,
                notes,
            };

            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            let expense = store.update_expense(&ExpenseId::from(id.as_str()), patch)?;
            println!("Updated expense {}", expense.id);
        }

        ExpenseCommands::Delete { id } => {
            store.delete_expense(&ExpenseId::from(id.as_str()))?;
            println!("Deleted expense {}", id);
        }
    }

    Ok(())
}
