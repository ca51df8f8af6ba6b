//! Budget evaluation
//!
//! Classifies spend against a budget limit. Thresholds are compared with
//! integer arithmetic on cents so 80% and 100% are exact boundaries.

use serde::Serialize;
use std::fmt;

use crate::models::{Budget, Expense, Money};

/// Health of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Below 80% of the limit
    Good,
    /// At least 80% of the limit
    Warning,
    /// At or over the limit
    Exceeded,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::Good => write!(f, "Good"),
            BudgetStatus::Warning => write!(f, "Warning"),
            BudgetStatus::Exceeded => write!(f, "Exceeded"),
        }
    }
}

/// Result of evaluating a budget against its spend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetEvaluation {
    pub status: BudgetStatus,
    pub spent: Money,
    pub limit: Money,
    /// Never negative
    pub remaining: Money,
    /// Amount over the limit, only when spend exceeds it
    pub overage: Option<Money>,
    /// spent / limit, e.g. 0.85
    pub utilization: f64,
}

/// Evaluate `spent` against the budget limit
pub fn evaluate(budget: &Budget, spent: Money) -> BudgetEvaluation {
    let limit = budget.limit;
    let spent_cents = spent.cents() as i128;
    let limit_cents = limit.cents() as i128;

    let status = if spent_cents >= limit_cents {
        BudgetStatus::Exceeded
    } else if spent_cents * 5 >= limit_cents * 4 {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Good
    };

    let remaining = if spent < limit {
        limit - spent
    } else {
        Money::zero()
    };
    let overage = (spent > limit).then(|| spent - limit);

    let utilization = if limit.is_positive() {
        spent.cents() as f64 / limit.cents() as f64
    } else {
        0.0
    };

    BudgetEvaluation {
        status,
        spent,
        limit,
        remaining,
        overage,
        utilization,
    }
}

/// Sum the expenses in the budget's category and period
pub fn matching_spend(budget: &Budget, expenses: &[Expense]) -> Money {
    expenses
        .iter()
        .filter(|e| e.category_id.as_ref() == Some(&budget.category_id) && budget.covers(e.date))
        .map(|e| e.amount)
        .sum()
}

/// Evaluate every budget against `expenses`
pub fn evaluate_all(budgets: &[Budget], expenses: &[Expense]) -> Vec<(Budget, BudgetEvaluation)> {
    budgets
        .iter()
        .map(|budget| {
            let evaluation = evaluate(budget, matching_spend(budget, expenses));
            (budget.clone(), evaluation)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, CategoryId, WalletId};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn food_budget(limit_cents: i64) -> Budget {
        Budget::for_period_containing(
            CategoryId::from("food"),
            Money::from_cents(limit_cents),
            BudgetPeriod::Monthly,
            date(2024, 1, 1),
        )
    }

    #[test]
    fn test_threshold_boundaries() {
        let budget = food_budget(10000);

        let eval = evaluate(&budget, Money::from_cents(7999));
        assert_eq!(eval.status, BudgetStatus::Good);
        assert_eq!(eval.remaining.cents(), 2001);
        assert!(eval.overage.is_none());

        let eval = evaluate(&budget, Money::from_cents(8000));
        assert_eq!(eval.status, BudgetStatus::Warning);

        let eval = evaluate(&budget, Money::from_cents(10000));
        assert_eq!(eval.status, BudgetStatus::Exceeded);
        assert!(eval.remaining.is_zero());
        assert!(eval.overage.is_none());

        let eval = evaluate(&budget, Money::from_cents(15000));
        assert_eq!(eval.status, BudgetStatus::Exceeded);
        assert!(eval.remaining.is_zero());
        assert_eq!(eval.overage, Some(Money::from_cents(5000)));
        assert!((eval.utilization - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_spend_is_good() {
        let eval = evaluate(&food_budget(10000), Money::zero());
        assert_eq!(eval.status, BudgetStatus::Good);
        assert_eq!(eval.remaining.cents(), 10000);
        assert_eq!(eval.utilization, 0.0);
    }

    #[test]
    fn test_matching_spend_respects_category_and_period() {
        let budget = food_budget(50000);
        let expense = |cents: i64, on: NaiveDate, cat: Option<&str>| {
            Expense::new(
                "item",
                Money::from_cents(cents),
                on,
                cat.map(CategoryId::from),
                WalletId::from("cash"),
            )
        };
        let expenses = vec![
            expense(1000, date(2024, 1, 1), Some("food")),
            expense(2000, date(2024, 1, 31), Some("food")),
            expense(4000, date(2024, 2, 1), Some("food")),
            expense(8000, date(2024, 1, 15), Some("travel")),
            expense(16000, date(2024, 1, 15), None),
        ];

        assert_eq!(matching_spend(&budget, &expenses).cents(), 3000);

        let all = evaluate_all(&[budget.clone()], &expenses);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].0, budget);
        assert_eq!(all[0].1.spent.cents(), 3000);
        assert_eq!(all[0].1.status, BudgetStatus::Good);
    }
}
