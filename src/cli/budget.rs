//! Budget CLI commands

use clap::Subcommand;

use super::args::{parse_amount, parse_date, resolve_category, today};
use crate::config::Settings;
use crate::display::{format_budget_table, DisplayOptions};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetId, BudgetPeriod};
use crate::reports::{evaluate_all, BudgetStatus};
use crate::store::{LedgerStore, NewBudget};

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set a spending limit for a category
    Add {
        /// Category name or ID
        category: String,
        /// Spending limit (e.g. "400")
        limit: String,
        /// weekly, monthly or yearly (defaults to the configured period)
        #[arg(short, long)]
        period: Option<String>,
        /// Any date inside the period to budget (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Explicit start date, overrides --date (requires --end)
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// Explicit end date (requires --start)
        #[arg(long, requires = "start")]
        end: Option<String>,
    },

    /// List every budget with its current spend
    List,

    /// Show budgets covering today and flag the ones at risk
    Status,

    /// Delete a budget
    Delete {
        /// Budget ID
        id: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    store: &LedgerStore,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    let options = DisplayOptions::from(settings);

    match cmd {
        BudgetCommands::Add {
            category,
            limit,
            period,
            date,
            start,
            end,
        } => {
            let category = resolve_category(store, &category)?;
            let period = match period {
                Some(p) => BudgetPeriod::parse(&p).ok_or_else(|| {
                    LedgerError::Validation(format!(
                        "Unknown period '{}', expected weekly, monthly or yearly",
                        p
                    ))
                })?,
                None => settings.budget_period,
            };
            let anchor = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };

            let mut input = NewBudget::new(category.id, parse_amount(&limit)?, period, anchor);
            if let (Some(start), Some(end)) = (start, end) {
                input = input.with_range(parse_date(&start)?, parse_date(&end)?);
            }

            let budget = store.add_budget(input)?;
            println!(
                "Budget of {} set for {} ({} to {})",
                options.money(budget.limit),
                category.name,
                options.date(budget.period_start),
                options.date(budget.period_end)
            );
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::List => {
            let evaluated = evaluate_all(&store.budgets()?, &store.expenses()?);
            print!(
                "{}",
                format_budget_table(&evaluated, &store.categories()?, &options)
            );
        }

        BudgetCommands::Status => {
            let today = today();
            let active: Vec<_> = store
                .budgets()?
                .into_iter()
                .filter(|b| b.covers(today))
                .collect();
            let evaluated = evaluate_all(&active, &store.expenses()?);

            print!(
                "{}",
                format_budget_table(&evaluated, &store.categories()?, &options)
            );

            let count = |status: BudgetStatus| {
                evaluated
                    .iter()
                    .filter(|(_, e)| e.status == status)
                    .count()
            };
            if !evaluated.is_empty() {
                println!(
                    "{} good, {} warning, {} exceeded",
                    count(BudgetStatus::Good),
                    count(BudgetStatus::Warning),
                    count(BudgetStatus::Exceeded)
                );
            }
        }

        BudgetCommands::Delete { id } => {
            store.delete_budget(&BudgetId::from(id.as_str()))?;
            println!("Deleted budget {}", id);
        }
    }

    Ok(())
}
