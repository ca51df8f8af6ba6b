//! Budget model
//!
//! A budget caps spending in one category over an inclusive date range.
//! The period kind names the cadence; the explicit range is what spend is
//! measured against.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::{Money, MAX_AMOUNT_CENTS};

/// Budget cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Monday through Sunday
    Weekly,
    /// Calendar month
    #[default]
    Monthly,
    /// Calendar year
    Yearly,
}

impl BudgetPeriod {
    /// Parse a period from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Some(Self::Weekly),
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "yearly" | "year" | "annual" | "y" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// The inclusive range of this cadence that contains `date`
    pub fn bounds_containing(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Weekly => {
                let start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                (start, start + Duration::days(6))
            }
            Self::Monthly => {
                let start = date.with_day(1).unwrap_or(date);
                (start, last_day_of_month(date.year(), date.month()))
            }
            Self::Yearly => {
                let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
                let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
                (start, end)
            }
        }
    }
}

/// Last calendar day of the given month
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

/// A spending limit for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Category whose spending is capped
    pub category_id: CategoryId,

    /// Spending limit, strictly positive
    pub limit: Money,

    /// Cadence of the budget
    pub period: BudgetPeriod,

    /// First day of the measured range (inclusive)
    pub period_start: NaiveDate,

    /// Last day of the measured range (inclusive)
    pub period_end: NaiveDate,
}

impl Budget {
    /// Create a budget covering the period that contains `anchor`
    pub fn for_period_containing(
        category_id: CategoryId,
        limit: Money,
        period: BudgetPeriod,
        anchor: NaiveDate,
    ) -> Self {
        let (period_start, period_end) = period.bounds_containing(anchor);
        Self {
            id: BudgetId::new(),
            category_id,
            limit,
            period,
            period_start,
            period_end,
        }
    }

    /// Whether `date` falls in the budget range
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.id.is_blank() {
            return Err(BudgetValidationError::EmptyId);
        }

        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.limit));
        }

        if self.limit.cents() > MAX_AMOUNT_CENTS {
            return Err(BudgetValidationError::LimitTooLarge(self.limit));
        }

        if self.period_start > self.period_end {
            return Err(BudgetValidationError::InvertedRange {
                start: self.period_start,
                end: self.period_end,
            });
        }

        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyId,
    NonPositiveLimit(Money),
    LimitTooLarge(Money),
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Budget id cannot be empty"),
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be greater than zero (got {})", limit)
            }
            Self::LimitTooLarge(limit) => write!(
                f,
                "Budget limit {} exceeds the maximum of {}",
                limit,
                Money::from_cents(MAX_AMOUNT_CENTS)
            ),
            Self::InvertedRange { start, end } => {
                write!(f, "Budget period starts ({}) after it ends ({})", start, end)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekly_bounds() {
        // 2024-01-10 is a Wednesday
        let (start, end) = BudgetPeriod::Weekly.bounds_containing(date(2024, 1, 10));
        assert_eq!(start, date(2024, 1, 8));
        assert_eq!(end, date(2024, 1, 14));
    }

    #[test]
    fn test_monthly_bounds() {
        let (start, end) = BudgetPeriod::Monthly.bounds_containing(date(2024, 2, 17));
        assert_eq!(start, date(2024, 2, 1));
        assert_eq!(end, date(2024, 2, 29));

        let (_, december_end) = BudgetPeriod::Monthly.bounds_containing(date(2023, 12, 5));
        assert_eq!(december_end, date(2023, 12, 31));
    }

    #[test]
    fn test_yearly_bounds() {
        let (start, end) = BudgetPeriod::Yearly.bounds_containing(date(2024, 6, 1));
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(end, date(2024, 12, 31));
    }

    #[test]
    fn test_covers_is_inclusive() {
        let budget = Budget::for_period_containing(
            CategoryId::from("food"),
            Money::from_cents(10000),
            BudgetPeriod::Monthly,
            date(2024, 1, 15),
        );
        assert!(budget.covers(date(2024, 1, 1)));
        assert!(budget.covers(date(2024, 1, 31)));
        assert!(!budget.covers(date(2024, 2, 1)));
    }

    #[test]
    fn test_validation() {
        let mut budget = Budget::for_period_containing(
            CategoryId::from("food"),
            Money::zero(),
            BudgetPeriod::Monthly,
            date(2024, 1, 15),
        );
        assert!(matches!(
            budget.validate(),
            Err(BudgetValidationError::NonPositiveLimit(_))
        ));

        budget.limit = Money::from_cents(100);
        budget.period_end = date(2023, 12, 1);
        assert!(matches!(
            budget.validate(),
            Err(BudgetValidationError::InvertedRange { .. })
        ));

        budget.period_end = date(2024, 1, 31);
        budget.limit = Money::from_cents(MAX_AMOUNT_CENTS + 1);
        assert!(matches!(
            budget.validate(),
            Err(BudgetValidationError::LimitTooLarge(_))
        ));
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(BudgetPeriod::parse("Weekly"), Some(BudgetPeriod::Weekly));
        assert_eq!(BudgetPeriod::parse("annual"), Some(BudgetPeriod::Yearly));
        assert_eq!(BudgetPeriod::parse("fortnight"), None);
    }
}
