//! Expense model
//!
//! An expense is a single outflow paid from a wallet, optionally labelled
//! with a category. Amounts are always positive; direction is implied.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId, WalletId};
use super::money::{Money, MAX_AMOUNT_CENTS};

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Short description (non-empty)
    pub title: String,

    /// Amount spent, strictly positive
    pub amount: Money,

    /// Date the expense occurred
    pub date: NaiveDate,

    /// Category, `None` once the category has been deleted
    pub category_id: Option<CategoryId>,

    /// Wallet the expense was paid from
    pub wallet_id: WalletId,

    /// Merchant or payee name
    #[serde(default)]
    pub merchant: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the expense was recorded; never changes afterwards
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense with a generated id
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category_id: Option<CategoryId>,
        wallet_id: WalletId,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            title: title.into(),
            amount,
            date,
            category_id,
            wallet_id,
            merchant: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the merchant
    pub fn at_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = merchant.into();
        self
    }

    /// Whether the expense has no category
    pub fn is_uncategorized(&self) -> bool {
        self.category_id.is_none()
    }

    /// Whether the title or merchant contains `needle` (case-insensitive)
    pub fn mentions(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.merchant.to_lowercase().contains(needle_lower)
    }

    /// Validate the fields that do not depend on other records
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.id.is_blank() {
            return Err(ExpenseValidationError::EmptyId);
        }

        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount.cents() > MAX_AMOUNT_CENTS {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.title,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyId,
    EmptyTitle,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Expense id cannot be empty"),
            Self::EmptyTitle => write!(f, "Expense title cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Expense amount {} exceeds the maximum of {}",
                amount,
                Money::from_cents(MAX_AMOUNT_CENTS)
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
