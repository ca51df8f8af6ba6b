//! Expense mutations

use chrono::{NaiveDate, Utc};
use tracing::debug;

use super::{LedgerData, LedgerStore};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryId, Expense, ExpenseId, Money, WalletId};

/// Input for recording a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// Caller-chosen id; one is generated when `None`
    pub id: Option<ExpenseId>,
    pub title: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category_id: CategoryId,
    pub wallet_id: WalletId,
    pub merchant: String,
    pub notes: String,
}

impl NewExpense {
    /// Input with the required fields and no merchant or notes
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category_id: impl Into<CategoryId>,
        wallet_id: impl Into<WalletId>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            amount,
            date,
            category_id: category_id.into(),
            wallet_id: wallet_id.into(),
            merchant: String::new(),
            notes: String::new(),
        }
    }

    pub fn merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = merchant.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Partial update for an expense; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub title: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
    pub wallet_id: Option<WalletId>,
    pub merchant: Option<String>,
    pub notes: Option<String>,
}

impl ExpensePatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.category_id.is_none()
            && self.wallet_id.is_none()
            && self.merchant.is_none()
            && self.notes.is_none()
    }
}

impl LedgerData {
    /// Field rules plus reference checks shared by add and update
    fn check_expense(&self, expense: &Expense) -> LedgerResult<()> {
        expense
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if self.wallet(&expense.wallet_id).is_none() {
            return Err(LedgerError::Validation(format!(
                "Unknown wallet: {}",
                expense.wallet_id
            )));
        }

        if let Some(category_id) = &expense.category_id {
            if self.category(category_id).is_none() {
                return Err(LedgerError::Validation(format!(
                    "Unknown category: {}",
                    category_id
                )));
            }
        }

        Ok(())
    }
}

impl LedgerStore {
    /// Record a new expense
    pub fn add_expense(&self, input: NewExpense) -> LedgerResult<Expense> {
        let mut data = self.write()?;

        let id = input.id.unwrap_or_default();
        if data.expense_index(&id).is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Expense",
                identifier: id.to_string(),
            });
        }

        let expense = Expense {
            id,
            title: input.title.trim().to_string(),
            amount: input.amount,
            date: input.date,
            category_id: Some(input.category_id),
            wallet_id: input.wallet_id,
            merchant: input.merchant.trim().to_string(),
            notes: input.notes,
            created_at: Utc::now(),
        };

        if let Err(err) = data.check_expense(&expense) {
            debug!(error = %err, "rejected new expense");
            return Err(err);
        }

        debug!(expense_id = %expense.id, amount = expense.amount.cents(), "expense added");
        data.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Apply a partial update to an expense
    ///
    /// The id and creation timestamp never change.
    pub fn update_expense(&self, id: &ExpenseId, patch: ExpensePatch) -> LedgerResult<Expense> {
        let mut data = self.write()?;
        let index = data
            .expense_index(id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        let mut expense = data.expenses[index].clone();
        if let Some(title) = patch.title {
            expense.title = title.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            expense.amount = amount;
        }
        if let Some(date) = patch.date {
            expense.date = date;
        }
        if let Some(category_id) = patch.category_id {
            expense.category_id = Some(category_id);
        }
        if let Some(wallet_id) = patch.wallet_id {
            expense.wallet_id = wallet_id;
        }
        if let Some(merchant) = patch.merchant {
            expense.merchant = merchant.trim().to_string();
        }
        if let Some(notes) = patch.notes {
            expense.notes = notes;
        }

        if let Err(err) = data.check_expense(&expense) {
            debug!(expense_id = %id, error = %err, "rejected expense update");
            return Err(err);
        }

        debug!(expense_id = %id, "expense updated");
        data.expenses[index] = expense.clone();
        Ok(expense)
    }

    /// Remove an expense; wallet balances are left as they are
    pub fn delete_expense(&self, id: &ExpenseId) -> LedgerResult<()> {
        let mut data = self.write()?;
        let index = data
            .expense_index(id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        data.expenses.remove(index);
        debug!(expense_id = %id, "expense deleted");
        Ok(())
    }
}
