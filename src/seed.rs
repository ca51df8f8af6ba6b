//! Demonstration data
//!
//! A small but realistic ledger used on first run so reports have
//! something to show. Dates are laid out relative to `today` over the
//! trailing six months and never fall in the future.

use chrono::{Datelike, Months, NaiveDate};

use crate::models::{
    budget::last_day_of_month, Budget, BudgetId, BudgetPeriod, Category, CategoryId, Expense,
    ExpenseId, Money, Wallet, WalletId,
};

/// Records handed to [`crate::store::LedgerStore::seed`], plus budgets
#[derive(Debug, Clone)]
pub struct DemoData {
    pub categories: Vec<Category>,
    pub wallets: Vec<Wallet>,
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
}

const CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("food", "Food & Dining", "#f97316", "utensils"),
    ("transport", "Transport", "#3b82f6", "car"),
    ("shopping", "Shopping", "#a855f7", "bag"),
    ("bills", "Bills & Utilities", "#ef4444", "bolt"),
    ("entertainment", "Entertainment", "#22c55e", "film"),
    ("health", "Health", "#14b8a6", "heart"),
];

const WALLETS: &[(&str, &str, i64)] = &[
    ("cash", "Cash", 25_000),
    ("checking", "Checking Account", 482_500),
    ("credit", "Credit Card", -61_240),
];

// (months back, day of month, title, cents, category, wallet, merchant)
const EXPENSES: &[(u32, u32, &str, i64, &str, &str, &str)] = &[
    (5, 3, "Weekly groceries", 8_640, "food", "checking", "FreshMart"),
    (5, 12, "Electricity bill", 9_800, "bills", "checking", "City Power"),
    (5, 20, "Cinema tickets", 2_400, "entertainment", "credit", "Starlight Cinema"),
    (4, 2, "Weekly groceries", 9_120, "food", "checking", "FreshMart"),
    (4, 9, "Bus pass", 6_500, "transport", "cash", "Metro Transit"),
    (4, 22, "Running shoes", 11_999, "shopping", "credit", "Stride Sports"),
    (3, 4, "Weekly groceries", 7_815, "food", "checking", "FreshMart"),
    (3, 14, "Internet", 5_999, "bills", "checking", "Fibernet"),
    (3, 18, "Pharmacy", 2_350, "health", "cash", "Corner Pharmacy"),
    (3, 27, "Dinner with friends", 6_480, "food", "credit", "Trattoria Roma"),
    (2, 1, "Weekly groceries", 8_960, "food", "checking", "FreshMart"),
    (2, 11, "Fuel", 5_420, "transport", "credit", "QuickFuel"),
    (2, 16, "Concert", 8_500, "entertainment", "credit", "Arena Box Office"),
    (2, 25, "Electricity bill", 10_450, "bills", "checking", "City Power"),
    (1, 5, "Weekly groceries", 9_330, "food", "checking", "FreshMart"),
    (1, 8, "Winter jacket", 15_900, "shopping", "credit", "Northwind Outfitters"),
    (1, 15, "Dentist", 12_000, "health", "checking", "Bright Smile Dental"),
    (1, 19, "Lunch", 1_575, "food", "cash", "Noodle Bar"),
    (1, 28, "Fuel", 4_980, "transport", "credit", "QuickFuel"),
    (0, 1, "Weekly groceries", 8_275, "food", "checking", "FreshMart"),
    (0, 3, "Coffee beans", 1_890, "food", "cash", "Bean There"),
    (0, 6, "Internet", 5_999, "bills", "checking", "Fibernet"),
    (0, 9, "Streaming subscription", 1_599, "entertainment", "credit", "Streamly"),
    (0, 12, "Taxi", 2_740, "transport", "cash", "City Cabs"),
];

/// Build the demonstration ledger relative to `today`
pub fn demo_data(today: NaiveDate) -> DemoData {
    let categories = CATEGORIES
        .iter()
        .map(|(id, name, color, icon)| Category::with_id(*id, *name).styled(*color, *icon))
        .collect();

    let wallets = WALLETS
        .iter()
        .map(|(id, name, balance)| {
            Wallet::with_id(*id, *name, "USD").with_balance(Money::from_cents(*balance))
        })
        .collect();

    let expenses = EXPENSES
        .iter()
        .enumerate()
        .map(|(i, (back, day, title, cents, category, wallet, merchant))| {
            let mut expense = Expense::new(
                *title,
                Money::from_cents(*cents),
                demo_date(today, *back, *day),
                Some(CategoryId::from(*category)),
                WalletId::from(*wallet),
            )
            .at_merchant(*merchant);
            expense.id = ExpenseId::from(format!("exp-demo-{:03}", i + 1));
            expense
        })
        .collect();

    let budgets = [("food", 40_000), ("entertainment", 5_000), ("transport", 15_000)]
        .iter()
        .map(|(category, limit)| {
            let mut budget = Budget::for_period_containing(
                CategoryId::from(*category),
                Money::from_cents(*limit),
                BudgetPeriod::Monthly,
                today,
            );
            budget.id = BudgetId::from(format!("bud-demo-{}", category));
            budget
        })
        .collect();

    DemoData {
        categories,
        wallets,
        expenses,
        budgets,
    }
}

/// `day` of the month `months_back` before today's, clamped to the month
/// length and to today
fn demo_date(today: NaiveDate, months_back: u32, day: u32) -> NaiveDate {
    let month_start = today
        .with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(months_back)))
        .unwrap_or(today);
    let last = last_day_of_month(month_start.year(), month_start.month());
    let date = month_start.with_day(day.min(last.day())).unwrap_or(month_start);
    date.min(today)
}
