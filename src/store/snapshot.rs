//! Whole-ledger snapshots
//!
//! A snapshot is the plain record-list shape handed across the
//! persistence, import and export boundaries.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Category, Expense, Wallet};

/// Every collection the ledger owns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub wallets: Vec<Wallet>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl LedgerSnapshot {
    /// Check record validity, id uniqueness and cross references
    pub fn validate(&self) -> LedgerResult<()> {
        for category in &self.categories {
            category
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
        }
        ensure_unique("Category", self.categories.iter().map(|c| &c.id))?;

        for wallet in &self.wallets {
            wallet
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
        }
        ensure_unique("Wallet", self.wallets.iter().map(|w| &w.id))?;

        let category_ids: HashSet<_> = self.categories.iter().map(|c| &c.id).collect();
        let wallet_ids: HashSet<_> = self.wallets.iter().map(|w| &w.id).collect();

        for expense in &self.expenses {
            expense
                .validate()
                .map_err(|e| LedgerError::Validation(format!("{} ({})", e, expense.id)))?;
            if !wallet_ids.contains(&expense.wallet_id) {
                return Err(LedgerError::Validation(format!(
                    "Expense {} references unknown wallet {}",
                    expense.id, expense.wallet_id
                )));
            }
            if let Some(category_id) = &expense.category_id {
                if !category_ids.contains(category_id) {
                    return Err(LedgerError::Validation(format!(
                        "Expense {} references unknown category {}",
                        expense.id, category_id
                    )));
                }
            }
        }
        ensure_unique("Expense", self.expenses.iter().map(|e| &e.id))?;

        for budget in &self.budgets {
            budget
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
            if !category_ids.contains(&budget.category_id) {
                return Err(LedgerError::Validation(format!(
                    "Budget {} references unknown category {}",
                    budget.id, budget.category_id
                )));
            }
        }
        ensure_unique("Budget", self.budgets.iter().map(|b| &b.id))?;

        Ok(())
    }

    /// Total number of records
    pub fn record_count(&self) -> usize {
        self.categories.len() + self.wallets.len() + self.expenses.len() + self.budgets.len()
    }
}

fn ensure_unique<'a, T, I>(entity_type: &'static str, ids: I) -> LedgerResult<()>
where
    T: Eq + Hash + ToString + 'a,
    I: Iterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LedgerError::Duplicate {
                entity_type,
                identifier: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, WalletId};
    use chrono::NaiveDate;

    fn snapshot() -> LedgerSnapshot {
        LedgerSnapshot {
            categories: vec![Category::with_id("food", "Food")],
            wallets: vec![Wallet::with_id("cash", "Cash", "USD")],
            expenses: vec![Expense::new(
                "Lunch",
                Money::from_cents(1200),
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                Some(CategoryId::from("food")),
                WalletId::from("cash"),
            )],
            budgets: Vec::new(),
        }
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(snapshot().validate().is_ok());
        assert_eq!(snapshot().record_count(), 3);
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut snap = snapshot();
        snap.categories.push(Category::with_id("food", "Food again"));
        let err = snap.validate().unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate { entity_type: "Category", .. }));
    }

    #[test]
    fn test_dangling_wallet_rejected() {
        let mut snap = snapshot();
        snap.expenses[0].wallet_id = WalletId::from("missing");
        assert!(snap.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_dangling_category_rejected() {
        let mut snap = snapshot();
        snap.expenses[0].category_id = Some(CategoryId::from("missing"));
        assert!(snap.validate().is_err());

        snap.expenses[0].category_id = None;
        assert!(snap.validate().is_ok());
    }
}
