//! Budget mutations
//!
//! Budgets are stored independently of expenses and evaluated on demand by
//! [`crate::reports::budget_status`].

use chrono::NaiveDate;
use tracing::debug;

use super::{LedgerData, LedgerStore};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, BudgetId, BudgetPeriod, CategoryId, Money};

/// Input for creating a budget
#[derive(Debug, Clone)]
pub struct NewBudget {
    /// Caller-chosen id; one is generated when `None`
    pub id: Option<BudgetId>,
    pub category_id: CategoryId,
    pub limit: Money,
    pub period: BudgetPeriod,
    /// Date whose enclosing period becomes the budget range
    pub anchor: NaiveDate,
    /// Explicit inclusive range, overriding `anchor`
    pub range: Option<(NaiveDate, NaiveDate)>,
}

impl NewBudget {
    pub fn new(
        category_id: impl Into<CategoryId>,
        limit: Money,
        period: BudgetPeriod,
        anchor: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            category_id: category_id.into(),
            limit,
            period,
            anchor,
            range: None,
        }
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.range = Some((start, end));
        self
    }
}

/// Partial update for a budget
#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    pub limit: Option<Money>,
    pub period: Option<BudgetPeriod>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

impl LedgerData {
    fn check_budget(&self, budget: &Budget) -> LedgerResult<()> {
        budget
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if self.category(&budget.category_id).is_none() {
            return Err(LedgerError::Validation(format!(
                "Unknown category: {}",
                budget.category_id
            )));
        }

        Ok(())
    }
}

impl LedgerStore {
    /// Create a budget
    pub fn add_budget(&self, input: NewBudget) -> LedgerResult<Budget> {
        let mut data = self.write()?;

        let (period_start, period_end) = input
            .range
            .unwrap_or_else(|| input.period.bounds_containing(input.anchor));
        let budget = Budget {
            id: input.id.unwrap_or_default(),
            category_id: input.category_id,
            limit: input.limit,
            period: input.period,
            period_start,
            period_end,
        };

        data.check_budget(&budget)?;
        if data.budget_index(&budget.id).is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Budget",
                identifier: budget.id.to_string(),
            });
        }

        debug!(budget_id = %budget.id, category_id = %budget.category_id, "budget added");
        data.budgets.push(budget.clone());
        Ok(budget)
    }

    /// Change a budget's limit, cadence or range
    ///
    /// A new cadence without an explicit range moves the budget to the
    /// period of that cadence containing its current start date.
    pub fn update_budget(&self, id: &BudgetId, patch: BudgetPatch) -> LedgerResult<Budget> {
        let mut data = self.write()?;
        let index = data
            .budget_index(id)
            .ok_or_else(|| LedgerError::budget_not_found(id.to_string()))?;

        let mut budget = data.budgets[index].clone();
        if let Some(limit) = patch.limit {
            budget.limit = limit;
        }
        if let Some(period) = patch.period {
            budget.period = period;
            if patch.period_start.is_none() && patch.period_end.is_none() {
                let (start, end) = period.bounds_containing(budget.period_start);
                budget.period_start = start;
                budget.period_end = end;
            }
        }
        if let Some(start) = patch.period_start {
            budget.period_start = start;
        }
        if let Some(end) = patch.period_end {
            budget.period_end = end;
        }

        data.check_budget(&budget)?;

        debug!(budget_id = %id, "budget updated");
        data.budgets[index] = budget.clone();
        Ok(budget)
    }

    pub fn delete_budget(&self, id: &BudgetId) -> LedgerResult<()> {
        let mut data = self.write()?;
        let index = data
            .budget_index(id)
            .ok_or_else(|| LedgerError::budget_not_found(id.to_string()))?;

        data.budgets.remove(index);
        debug!(budget_id = %id, "budget deleted");
        Ok(())
    }
}
