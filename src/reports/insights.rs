//! Rule-based spending insights
//!
//! Compares a current summary with the summary of a comparable prior
//! period and produces short observations. Rules run in a fixed order and
//! each emits at most one insight.

use serde::Serialize;
use std::fmt;

use super::summary::Summary;

/// Below this many expenses no insights are produced
pub const MIN_EXPENSES_FOR_INSIGHTS: usize = 3;

/// Direction of period-over-period change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increase,
    Decrease,
    Unchanged,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Increase => write!(f, "increase"),
            TrendDirection::Decrease => write!(f, "decrease"),
            TrendDirection::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// What an insight is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    TopCategory,
    Trend(TrendDirection),
}

/// A human-readable observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
}

/// Percent change from `prior` to `current` total; `None` when prior is zero
pub fn percent_change(current: &Summary, prior: &Summary) -> Option<f64> {
    if !prior.total.is_positive() {
        return None;
    }
    let delta = (current.total - prior.total).cents() as f64;
    Some(delta / prior.total.cents() as f64 * 100.0)
}

/// Derive insights from a current and a prior period
pub fn generate_insights(current: &Summary, prior: &Summary) -> Vec<Insight> {
    let mut insights = Vec::new();
    if current.count < MIN_EXPENSES_FOR_INSIGHTS {
        return insights;
    }

    if let Some(top) = current.top_category() {
        insights.push(Insight {
            kind: InsightKind::TopCategory,
            title: "Top spending category".to_string(),
            message: format!(
                "{} accounts for {:.1}% of your spending ({})",
                top.name, top.percentage, top.total
            ),
        });
    }

    if let Some(change) = percent_change(current, prior) {
        let direction = if current.total > prior.total {
            TrendDirection::Increase
        } else if current.total < prior.total {
            TrendDirection::Decrease
        } else {
            TrendDirection::Unchanged
        };

        let (title, message) = match direction {
            TrendDirection::Increase => (
                "Spending is up",
                format!(
                    "You spent {:.1}% more than the previous period ({} vs {})",
                    change, current.total, prior.total
                ),
            ),
            TrendDirection::Decrease => (
                "Spending is down",
                format!(
                    "You spent {:.1}% less than the previous period ({} vs {})",
                    change.abs(),
                    current.total,
                    prior.total
                ),
            ),
            TrendDirection::Unchanged => (
                "Spending is steady",
                format!(
                    "You spent the same as the previous period ({})",
                    current.total
                ),
            ),
        };

        insights.push(Insight {
            kind: InsightKind::Trend(direction),
            title: title.to_string(),
            message,
        });
    }

    insights
}
