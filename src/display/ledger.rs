//! Category, wallet and budget tables

use std::collections::HashMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::format::{format_bar, format_percentage, DisplayOptions};
use crate::models::{Budget, Category, Wallet};
use crate::reports::{BudgetEvaluation, BudgetStatus};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Icon")]
    icon: String,
}

pub fn format_category_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories yet.\n".to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        name: c.name.clone(),
        color: c.color.clone(),
        icon: c.icon.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

pub fn format_wallet_table(wallets: &[Wallet], options: &DisplayOptions) -> String {
    if wallets.is_empty() {
        return "No wallets yet.\n".to_string();
    }

    let rows = wallets.iter().map(|w| WalletRow {
        id: w.id.to_string(),
        name: w.name.clone(),
        currency: w.currency.clone(),
        balance: options.money(w.balance),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(3), Alignment::right());
    format!("{}\n", table)
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn status_label(evaluation: &BudgetEvaluation, options: &DisplayOptions) -> String {
    match (evaluation.status, evaluation.overage) {
        (BudgetStatus::Exceeded, Some(over)) => format!("Exceeded by {}", options.money(over)),
        (status, _) => status.to_string(),
    }
}

/// Budgets alongside their evaluation
pub fn format_budget_table(
    evaluated: &[(Budget, BudgetEvaluation)],
    categories: &[Category],
    options: &DisplayOptions,
) -> String {
    if evaluated.is_empty() {
        return "No budgets yet.\n".to_string();
    }

    let names: HashMap<_, _> = categories.iter().map(|c| (&c.id, &c.name)).collect();

    let rows = evaluated.iter().map(|(budget, evaluation)| BudgetRow {
        id: budget.id.to_string(),
        category: names
            .get(&budget.category_id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| budget.category_id.to_string()),
        period: budget.period.to_string(),
        range: format!(
            "{} - {}",
            options.date(budget.period_start),
            options.date(budget.period_end)
        ),
        spent: options.money(evaluation.spent),
        limit: options.money(evaluation.limit),
        remaining: options.money(evaluation.remaining),
        used: format!(
            "{} {}",
            format_bar(evaluation.utilization, 1.0, 10),
            format_percentage(evaluation.utilization * 100.0)
        ),
        status: status_label(evaluation, options),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(4..7), Alignment::right());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, CategoryId, Money};
    use crate::reports::evaluate;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_tables() {
        let options = DisplayOptions::default();
        assert_eq!(format_category_table(&[]), "No categories yet.\n");
        assert_eq!(format_wallet_table(&[], &options), "No wallets yet.\n");
        assert_eq!(format_budget_table(&[], &[], &options), "No budgets yet.\n");
    }

    #[test]
    fn test_wallet_table() {
        let wallets = vec![
            Wallet::with_id("cash", "Cash", "usd").with_balance(Money::from_cents(2500)),
        ];
        let output = format_wallet_table(&wallets, &DisplayOptions::default());
        assert!(output.contains("USD"));
        assert!(output.contains("$25.00"));
    }

    #[test]
    fn test_budget_table_shows_overage() {
        let budget = Budget::for_period_containing(
            CategoryId::from("food"),
            Money::from_cents(10000),
            BudgetPeriod::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        );
        let evaluation = evaluate(&budget, Money::from_cents(15000));
        let categories = vec![Category::with_id("food", "Food")];

        let output = format_budget_table(
            &[(budget, evaluation)],
            &categories,
            &DisplayOptions::default(),
        );
        assert!(output.contains("Food"));
        assert!(output.contains("Exceeded by $50.00"));
        assert!(output.contains("2024-01-01 - 2024-01-31"));
    }
}
