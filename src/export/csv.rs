//! CSV export
//!
//! Expenses with category and wallet names resolved, and the per-category
//! breakdown of a summary. Amounts are written in major units with two
//! decimals.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Expense, Money, Wallet, UNCATEGORIZED};
use crate::reports::Summary;

#[derive(Serialize)]
struct ExpenseRow<'a> {
    id: &'a str,
    date: String,
    title: &'a str,
    amount: String,
    category: &'a str,
    wallet: &'a str,
    merchant: &'a str,
    notes: &'a str,
}

#[derive(Serialize)]
struct CategoryRow<'a> {
    category: &'a str,
    count: usize,
    total: String,
    percentage: String,
}

fn plain_amount(money: Money) -> String {
    let sign = if money.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, money.units().abs(), money.cents_part())
}

fn export_err(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Export(e.to_string())
}

/// Write expenses as CSV, one row per expense
pub fn export_expenses_csv<W: Write>(
    expenses: &[Expense],
    categories: &[Category],
    wallets: &[Wallet],
    writer: W,
) -> LedgerResult<()> {
    let category_names: HashMap<_, _> = categories
        .iter()
        .map(|c| (&c.id, c.name.as_str()))
        .collect();
    let wallet_names: HashMap<_, _> = wallets.iter().map(|w| (&w.id, w.name.as_str())).collect();

    let mut csv = csv::Writer::from_writer(writer);
    for expense in expenses {
        let category = expense
            .category_id
            .as_ref()
            .and_then(|id| category_names.get(id).copied())
            .unwrap_or(UNCATEGORIZED);
        let wallet = wallet_names
            .get(&expense.wallet_id)
            .copied()
            .unwrap_or_else(|| expense.wallet_id.as_str());

        csv.serialize(ExpenseRow {
            id: expense.id.as_str(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            title: &expense.title,
            amount: plain_amount(expense.amount),
            category,
            wallet,
            merchant: &expense.merchant,
            notes: &expense.notes,
        })
        .map_err(export_err)?;
    }
    csv.flush().map_err(export_err)?;
    Ok(())
}

/// Write the category breakdown of `summary` as CSV
pub fn export_summary_csv<W: Write>(summary: &Summary, writer: W) -> LedgerResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in &summary.by_category {
        csv.serialize(CategoryRow {
            category: &row.name,
            count: row.count,
            total: plain_amount(row.total),
            percentage: format!("{:.2}", row.percentage),
        })
        .map_err(export_err)?;
    }
    csv.flush().map_err(export_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, WalletId};
    use crate::reports::summarize;
    use chrono::NaiveDate;

    fn fixtures() -> (Vec<Expense>, Vec<Category>, Vec<Wallet>) {
        let on = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let expenses = vec![
            Expense::new(
                "Coffee, large",
                Money::from_cents(450),
                on,
                Some(CategoryId::from("food")),
                WalletId::from("cash"),
            )
            .at_merchant("Bean There"),
            Expense::new(
                "Parking",
                Money::from_cents(1200),
                on,
                None,
                WalletId::from("cash"),
            ),
        ];
        let categories = vec![Category::with_id("food", "Food")];
        let wallets = vec![Wallet::with_id("cash", "Cash", "USD")];
        (expenses, categories, wallets)
    }

    #[test]
    fn test_expenses_csv() {
        let (expenses, categories, wallets) = fixtures();
        let mut output = Vec::new();
        export_expenses_csv(&expenses, &categories, &wallets, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "id,date,title,amount,category,wallet,merchant,notes");
        assert!(lines[1].contains("2024-05-01,\"Coffee, large\",4.50,Food,Cash,Bean There,"));
        assert!(lines[2].contains("Parking,12.00,Uncategorized,Cash"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_summary_csv() {
        let (expenses, categories, _) = fixtures();
        let summary = summarize(&expenses, &categories);
        let mut output = Vec::new();
        export_summary_csv(&summary, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(
            text,
            "category,count,total,percentage\nUncategorized,1,12.00,72.73\nFood,1,4.50,27.27\n"
        );
    }

    #[test]
    fn test_plain_amount() {
        assert_eq!(plain_amount(Money::from_cents(5)), "0.05");
        assert_eq!(plain_amount(Money::from_cents(-1050)), "-10.50");
    }
}
