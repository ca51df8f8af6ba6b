//! Report CLI commands

use chrono::{Duration, NaiveDate};
use clap::Subcommand;

use super::args::{today, FilterArgs};
use crate::config::Settings;
use crate::display::{format_insights, format_merchants, format_summary, format_trend, DisplayOptions};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Expense};
use crate::reports::{filter_on, generate_insights, summarize, FilterSpec, Summary};
use crate::store::LedgerStore;

/// Longest trend a report will render
pub const MAX_TREND_MONTHS: usize = 240;

/// Longest insight comparison period, about ten years
pub const MAX_INSIGHT_DAYS: i64 = 3650;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals and category breakdown
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Monthly totals ending with the current month
    Trend {
        /// Number of months (defaults to the configured value)
        #[arg(
            short = 'n',
            long,
            value_parser = clap::value_parser!(u16).range(1..=MAX_TREND_MONTHS as i64)
        )]
        months: Option<u16>,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Merchants ranked by spend
    Merchants {
        /// How many merchants to show (defaults to the configured value)
        #[arg(short = 'n', long)]
        top: Option<usize>,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Observations comparing the last N days with the N days before
    Insights {
        /// Length of each period in days
        #[arg(
            short,
            long,
            default_value = "30",
            value_parser = clap::value_parser!(i64).range(1..=MAX_INSIGHT_DAYS)
        )]
        days: i64,
    },
}

/// Handle a report command
pub fn handle_report_command(
    store: &LedgerStore,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let options = DisplayOptions::from(settings);
    let today = today();
    let expenses = store.expenses()?;
    let categories = store.categories()?;

    match cmd {
        ReportCommands::Summary { filter } => {
            let spec = filter.to_spec(store)?;
            let summary = summarize(&filter_on(&expenses, &spec, today), &categories);
            let period_start = filter
                .period_start(today)?
                .filter(|d| *d > NaiveDate::MIN)
                .or(summary.first_date)
                .unwrap_or(today);

            print!(
                "{}",
                format_summary(&summary, summary.daily_average(period_start, today), &options)
            );
        }

        ReportCommands::Trend { months, filter } => {
            let spec = filter.to_spec(store)?;
            let summary = summarize(&filter_on(&expenses, &spec, today), &categories);
            let months = months.map_or(settings.trend_months, usize::from);
            if !(1..=MAX_TREND_MONTHS).contains(&months) {
                return Err(LedgerError::Validation(format!(
                    "Trend length must be between 1 and {} months (got {})",
                    MAX_TREND_MONTHS, months
                )));
            }
            print!(
                "{}",
                format_trend(&summary.by_month_ending(months, today), &options)
            );
        }

        ReportCommands::Merchants { top, filter } => {
            let spec = filter.to_spec(store)?;
            let summary = summarize(&filter_on(&expenses, &spec, today), &categories);
            let top = top.unwrap_or(settings.top_merchants);
            print!("{}", format_merchants(&summary.top_merchants(top), &options));
        }

        ReportCommands::Insights { days } => {
            let (current, prior) = comparable_periods(&expenses, &categories, today, days)?;
            print!("{}", format_insights(&generate_insights(&current, &prior)));
        }
    }

    Ok(())
}

/// Summaries of the `days` days ending today and the `days` days before
fn comparable_periods(
    expenses: &[Expense],
    categories: &[Category],
    today: NaiveDate,
    days: i64,
) -> LedgerResult<(Summary, Summary)> {
    let out_of_range = || {
        LedgerError::Validation(format!(
            "Insight period of {} days reaches outside the supported calendar",
            days
        ))
    };
    if days < 1 {
        return Err(LedgerError::Validation(
            "Insight period must be at least one day".into(),
        ));
    }

    let span = Duration::try_days(days - 1).ok_or_else(out_of_range)?;
    let current_start = today.checked_sub_signed(span).ok_or_else(out_of_range)?;
    let prior_end = current_start.pred_opt().ok_or_else(out_of_range)?;
    let prior_start = prior_end.checked_sub_signed(span).ok_or_else(out_of_range)?;

    let current = FilterSpec::new().date_range(current_start, today);
    let prior = FilterSpec::new().date_range(prior_start, prior_end);

    Ok((
        summarize(&filter_on(expenses, &current, today), categories),
        summarize(&filter_on(expenses, &prior, today), categories),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, WalletId};

    #[test]
    fn test_comparable_periods_do_not_overlap() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let expense = |on: NaiveDate, cents: i64| {
            Expense::new(
                "x",
                Money::from_cents(cents),
                on,
                Some(CategoryId::from("food")),
                WalletId::from("cash"),
            )
        };
        let expenses = vec![
            expense(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(), 100),
            expense(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), 200),
            expense(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 400),
            expense(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(), 800),
            expense(NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(), 1600),
        ];
        let categories = vec![Category::with_id("food", "Food")];

        let (current, prior) = comparable_periods(&expenses, &categories, today, 30).unwrap();
        assert_eq!(current.total.cents(), 300);
        assert_eq!(prior.total.cents(), 1200);
    }

    #[test]
    fn test_comparable_periods_reject_out_of_calendar_spans() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        for days in [0, 100_000_000, i64::MAX] {
            let err = comparable_periods(&[], &[], today, days).unwrap_err();
            assert!(err.is_validation(), "days {}", days);
        }
    }
}
