//! Spending summary
//!
//! Aggregates a set of expenses into totals per category, per calendar
//! month and per merchant. All sums are exact `Money`; percentages and
//! averages are derived from the exact sums and rounded only for display.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::models::{Category, CategoryId, Expense, Money, UNCATEGORIZED};

/// Spending for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// `None` for uncategorized or dangling expenses
    pub category_id: Option<CategoryId>,
    /// Category name at the time of the summary
    pub name: String,
    pub total: Money,
    pub count: usize,
    /// Share of the grand total, 0-100
    pub percentage: f64,
}

/// Spending for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    /// Display label, e.g. "Jan 2024"
    pub label: String,
    pub total: Money,
    pub count: usize,
}

/// Spending at one merchant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchantTotal {
    pub merchant: String,
    pub total: Money,
    pub count: usize,
}

/// Aggregated view over a set of expenses
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: Money,
    pub count: usize,
    /// Sorted by total descending, then by id (uncategorized first)
    pub by_category: Vec<CategoryTotal>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    #[serde(skip)]
    months: BTreeMap<(i32, u32), (Money, usize)>,
    #[serde(skip)]
    merchants: Vec<MerchantTotal>,
}

/// Aggregate `expenses`, resolving category names against `categories`
pub fn summarize(expenses: &[Expense], categories: &[Category]) -> Summary {
    let names: HashMap<&CategoryId, &str> = categories
        .iter()
        .map(|c| (&c.id, c.name.as_str()))
        .collect();

    let mut total = Money::zero();
    let mut first_date: Option<NaiveDate> = None;
    let mut last_date: Option<NaiveDate> = None;
    let mut category_totals: BTreeMap<Option<CategoryId>, (Money, usize)> = BTreeMap::new();
    let mut months: BTreeMap<(i32, u32), (Money, usize)> = BTreeMap::new();
    // Keyed by lower-cased name; keeps the first spelling seen
    let mut merchants: HashMap<String, MerchantTotal> = HashMap::new();

    for expense in expenses {
        total += expense.amount;
        first_date = Some(first_date.map_or(expense.date, |d| d.min(expense.date)));
        last_date = Some(last_date.map_or(expense.date, |d| d.max(expense.date)));

        // Dangling references aggregate with uncategorized spending
        let key = expense
            .category_id
            .as_ref()
            .filter(|id| names.contains_key(id))
            .cloned();
        let entry = category_totals.entry(key).or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;

        let month = months
            .entry((expense.date.year(), expense.date.month()))
            .or_insert((Money::zero(), 0));
        month.0 += expense.amount;
        month.1 += 1;

        let merchant = expense.merchant.trim();
        if !merchant.is_empty() {
            let entry = merchants
                .entry(merchant.to_lowercase())
                .or_insert_with(|| MerchantTotal {
                    merchant: merchant.to_string(),
                    total: Money::zero(),
                    count: 0,
                });
            entry.total += expense.amount;
            entry.count += 1;
        }
    }

    let mut by_category: Vec<CategoryTotal> = category_totals
        .into_iter()
        .map(|(category_id, (cat_total, count))| {
            let name = category_id
                .as_ref()
                .and_then(|id| names.get(id))
                .map(|n| n.to_string())
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            CategoryTotal {
                category_id,
                name,
                total: cat_total,
                count,
                percentage: share(cat_total, total),
            }
        })
        .collect();
    // BTreeMap order already gives ascending ids; the sort is stable
    by_category.sort_by(|a, b| b.total.cmp(&a.total));

    let mut merchants: Vec<MerchantTotal> = merchants.into_values().collect();
    merchants.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.merchant.cmp(&b.merchant))
    });

    Summary {
        total,
        count: expenses.len(),
        by_category,
        first_date,
        last_date,
        months,
        merchants,
    }
}

fn share(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}

impl Summary {
    /// Monthly totals for the `window` months ending with the current month
    pub fn by_month(&self, window: usize) -> Vec<MonthBucket> {
        self.by_month_ending(window, Local::now().date_naive())
    }

    /// Monthly totals for the `window` months ending with `anchor`'s month
    ///
    /// Always returns exactly `window` buckets, oldest first. Months
    /// without spending are zero-filled.
    pub fn by_month_ending(&self, window: usize, anchor: NaiveDate) -> Vec<MonthBucket> {
        let last = anchor.year() as i64 * 12 + anchor.month0() as i64;
        let first = last - window as i64 + 1;

        (first..=last)
            .map(|index| {
                let year = index.div_euclid(12) as i32;
                let month = index.rem_euclid(12) as u32 + 1;
                let (total, count) = self
                    .months
                    .get(&(year, month))
                    .copied()
                    .unwrap_or((Money::zero(), 0));
                MonthBucket {
                    year,
                    month,
                    label: month_label(year, month),
                    total,
                    count,
                }
            })
            .collect()
    }

    /// Up to `n` merchants by total spend, ties by name
    ///
    /// Expenses without a merchant are not ranked.
    pub fn top_merchants(&self, n: usize) -> Vec<MerchantTotal> {
        self.merchants.iter().take(n).cloned().collect()
    }

    /// Average spend per day in cents
    ///
    /// Days are counted inclusively from `period_start` to `today`, with a
    /// floor of one day.
    pub fn daily_average(&self, period_start: NaiveDate, today: NaiveDate) -> f64 {
        let elapsed = ((today - period_start).num_days() + 1).max(1);
        self.total.cents() as f64 / elapsed as f64
    }

    /// The largest category, if any expense was summarized
    pub fn top_category(&self) -> Option<&CategoryTotal> {
        self.by_category.first()
    }

    /// Category percentages rounded for display, summing to 100
    pub fn rounded_percentages(&self, decimals: u32) -> Vec<f64> {
        let values: Vec<f64> = self.by_category.iter().map(|c| c.percentage).collect();
        round_percentages(&values, decimals)
    }
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{:02}/{}", month, year))
}

/// Round percentages with the largest-remainder method
///
/// Each value is truncated to `decimals` places, then the units lost to
/// truncation are handed back one at a time to the values with the largest
/// remainders. When the inputs sum to 100 so do the outputs.
pub fn round_percentages(values: &[f64], decimals: u32) -> Vec<f64> {
    let scale = 10f64.powi(decimals as i32);
    let scaled: Vec<f64> = values.iter().map(|v| v * scale).collect();
    // Small epsilon so 28.6 * 10 does not floor to 285
    let mut floors: Vec<i64> = scaled.iter().map(|v| (v + 1e-9).floor() as i64).collect();

    let target = scaled.iter().sum::<f64>().round() as i64;
    let assigned: i64 = floors.iter().sum();
    let missing = (target - assigned).clamp(0, values.len() as i64) as usize;

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = scaled[a] - floors[a] as f64;
        let rb = scaled[b] - floors[b] as f64;
        rb.total_cmp(&ra).then(a.cmp(&b))
    });
    for &index in order.iter().take(missing) {
        floors[index] += 1;
    }

    floors.into_iter().map(|f| f as f64 / scale).collect()
}
