//! Expense display formatting

use std::collections::HashMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::format::{truncate, DisplayOptions};
use crate::models::{Category, Expense, Money, Wallet, UNCATEGORIZED};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Wallet")]
    wallet: String,
    #[tabled(rename = "Merchant")]
    merchant: String,
}

/// Render expenses as a table with a total line
pub fn format_expense_table(
    expenses: &[Expense],
    categories: &[Category],
    wallets: &[Wallet],
    options: &DisplayOptions,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let category_names: HashMap<_, _> = categories.iter().map(|c| (&c.id, &c.name)).collect();
    let wallet_names: HashMap<_, _> = wallets.iter().map(|w| (&w.id, &w.name)).collect();

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: options.date(e.date),
        title: truncate(&e.title, 30),
        amount: options.money(e.amount),
        category: e
            .category_id
            .as_ref()
            .and_then(|id| category_names.get(id))
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNCATEGORIZED.to_string()),
        wallet: wallet_names
            .get(&e.wallet_id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| e.wallet_id.to_string()),
        merchant: truncate(&e.merchant, 20),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(3), Alignment::right());

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n{} expense(s), total {}\n",
        table,
        expenses.len(),
        options.money(total)
    )
}

/// Multi-line description of one expense
pub fn format_expense_details(
    expense: &Expense,
    category_name: Option<&str>,
    wallet_name: Option<&str>,
    options: &DisplayOptions,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:   {}\n", expense.id));
    output.push_str(&format!("Title:     {}\n", expense.title));
    output.push_str(&format!("Date:      {}\n", options.date(expense.date)));
    output.push_str(&format!("Amount:    {}\n", options.money(expense.amount)));
    output.push_str(&format!(
        "Category:  {}\n",
        category_name.unwrap_or(UNCATEGORIZED)
    ));
    output.push_str(&format!(
        "Wallet:    {}\n",
        wallet_name.unwrap_or(expense.wallet_id.as_str())
    ));

    if !expense.merchant.is_empty() {
        output.push_str(&format!("Merchant:  {}\n", expense.merchant));
    }
    if !expense.notes.is_empty() {
        output.push_str(&format!("Notes:     {}\n", expense.notes));
    }

    output.push_str(&format!(
        "Recorded:  {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, WalletId};
    use chrono::NaiveDate;

    fn lunch() -> Expense {
        Expense::new(
            "Lunch",
            Money::from_cents(1250),
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            Some(CategoryId::from("food")),
            WalletId::from("cash"),
        )
        .at_merchant("Noodle Bar")
    }

    #[test]
    fn test_empty_table() {
        let output = format_expense_table(&[], &[], &[], &DisplayOptions::default());
        assert_eq!(output, "No expenses found.\n");
    }

    #[test]
    fn test_table_resolves_names() {
        let categories = vec![Category::with_id("food", "Food")];
        let wallets = vec![Wallet::with_id("cash", "Pocket Cash", "USD")];
        let output =
            format_expense_table(&[lunch()], &categories, &wallets, &DisplayOptions::default());

        assert!(output.contains("Lunch"));
        assert!(output.contains("Food"));
        assert!(output.contains("Pocket Cash"));
        assert!(output.contains("$12.50"));
        assert!(output.contains("1 expense(s), total $12.50"));
    }

    #[test]
    fn test_details() {
        let output = format_expense_details(&lunch(), None, Some("Cash"), &DisplayOptions::default());
        assert!(output.contains("Category:  Uncategorized"));
        assert!(output.contains("Merchant:  Noodle Bar"));
        assert!(!output.contains("Notes:"));
    }
}
