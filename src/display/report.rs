//! Report formatting for terminal output
//!
//! Category breakdowns, monthly trends, merchant rankings and insights.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::format::{format_bar, DisplayOptions};
use crate::models::Money;
use crate::reports::{Insight, InsightKind, MerchantTotal, MonthBucket, Summary, TrendDirection};

const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct CategoryShareRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Totals, daily average and the per-category breakdown
pub fn format_summary(summary: &Summary, daily_average_cents: f64, options: &DisplayOptions) -> String {
    if summary.count == 0 {
        return "No expenses in this period.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Total spent:    {}\n",
        options.money(summary.total)
    ));
    output.push_str(&format!("Expenses:       {}\n", summary.count));
    output.push_str(&format!(
        "Daily average:  {}\n",
        options.money(Money::from_cents_rounded(daily_average_cents))
    ));
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        output.push_str(&format!(
            "Date span:      {} to {}\n",
            options.date(first),
            options.date(last)
        ));
    }
    output.push('\n');

    let shares = summary.rounded_percentages(1);
    let rows = summary
        .by_category
        .iter()
        .zip(shares)
        .map(|(category, share)| CategoryShareRow {
            name: category.name.clone(),
            count: category.count,
            total: options.money(category.total),
            share: format!("{:.1}%", share),
            bar: format_bar(category.percentage, 100.0, BAR_WIDTH),
        });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..4), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    label: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Monthly totals, oldest first, with bars scaled to the largest month
pub fn format_trend(months: &[MonthBucket], options: &DisplayOptions) -> String {
    if months.is_empty() {
        return "No months to show.\n".to_string();
    }

    let max = months
        .iter()
        .map(|m| m.total.cents())
        .max()
        .unwrap_or(0) as f64;

    let rows = months.iter().map(|m| MonthRow {
        label: m.label.clone(),
        count: m.count,
        total: options.money(m.total),
        bar: format_bar(m.total.cents() as f64, max, BAR_WIDTH),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..3), Alignment::right());
    format!("{}\n", table)
}

#[derive(Tabled)]
struct MerchantRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Merchant")]
    merchant: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
}

pub fn format_merchants(merchants: &[MerchantTotal], options: &DisplayOptions) -> String {
    if merchants.is_empty() {
        return "No merchants recorded.\n".to_string();
    }

    let rows = merchants.iter().enumerate().map(|(i, m)| MerchantRow {
        rank: i + 1,
        merchant: m.merchant.clone(),
        count: m.count,
        total: options.money(m.total),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(3), Alignment::right());
    format!("{}\n", table)
}

pub fn format_insights(insights: &[Insight]) -> String {
    if insights.is_empty() {
        return "Not enough data for insights yet.\n".to_string();
    }

    let mut output = String::new();
    for insight in insights {
        let marker = match insight.kind {
            InsightKind::TopCategory => "*",
            InsightKind::Trend(TrendDirection::Increase) => "↑",
            InsightKind::Trend(TrendDirection::Decrease) => "↓",
            InsightKind::Trend(TrendDirection::Unchanged) => "=",
        };
        output.push_str(&format!("{} {}\n  {}\n", marker, insight.title, insight.message));
    }
    output
}
