//! Category mutations
//!
//! Deleting a category keeps the expenses that used it: they are detached
//! and show up as "Uncategorized". Budgets bound to the category go with it.

use tracing::debug;

use super::LedgerStore;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId};

/// Input for creating a category
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    /// Caller-chosen id; one is generated when `None`
    pub id: Option<CategoryId>,
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<CategoryId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn styled(mut self, color: impl Into<String>, icon: impl Into<String>) -> Self {
        self.color = color.into();
        self.icon = icon.into();
        self
    }
}

/// Rename or restyle a category; the id is fixed
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// What a category deletion touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryDeletion {
    /// Expenses now uncategorized
    pub detached_expenses: usize,
    /// Budgets removed along with the category
    pub removed_budgets: usize,
}

impl LedgerStore {
    /// Create a category
    pub fn add_category(&self, input: NewCategory) -> LedgerResult<Category> {
        let mut data = self.write()?;

        let category = Category {
            id: input.id.unwrap_or_default(),
            name: input.name.trim().to_string(),
            color: input.color,
            icon: input.icon,
        };

        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if data.category(&category.id).is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Category",
                identifier: category.id.to_string(),
            });
        }

        debug!(category_id = %category.id, "category added");
        data.categories.push(category.clone());
        Ok(category)
    }

    /// Rename or restyle a category
    pub fn update_category(&self, id: &CategoryId, patch: CategoryPatch) -> LedgerResult<Category> {
        let mut data = self.write()?;
        let index = data
            .categories
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;

        let mut category = data.categories[index].clone();
        if let Some(name) = patch.name {
            category.name = name.trim().to_string();
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        if let Some(icon) = patch.icon {
            category.icon = icon;
        }

        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        debug!(category_id = %id, "category updated");
        data.categories[index] = category.clone();
        Ok(category)
    }

    /// Delete a category, detaching its expenses
    pub fn delete_category(&self, id: &CategoryId) -> LedgerResult<CategoryDeletion> {
        let mut data = self.write()?;
        let index = data
            .categories
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;

        data.categories.remove(index);

        let mut deletion = CategoryDeletion::default();
        for expense in data
            .expenses
            .iter_mut()
            .filter(|e| e.category_id.as_ref() == Some(id))
        {
            expense.category_id = None;
            deletion.detached_expenses += 1;
        }

        let budgets_before = data.budgets.len();
        data.budgets.retain(|b| &b.category_id != id);
        deletion.removed_budgets = budgets_before - data.budgets.len();

        debug!(
            category_id = %id,
            detached = deletion.detached_expenses,
            budgets = deletion.removed_budgets,
            "category deleted"
        );
        Ok(deletion)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{date, seeded_store};
    use super::*;
    use crate::models::{BudgetPeriod, Money, UNCATEGORIZED};
    use crate::reports::summarize;
    use crate::store::NewBudget;

    #[test]
    fn test_add_category() {
        let store = seeded_store();
        let category = store
            .add_category(NewCategory::new(" Rent ").styled("#111111", "home"))
            .unwrap();

        assert_eq!(category.name, "Rent");
        assert!(category.id.as_str().starts_with("cat-"));
        assert_eq!(store.categories().unwrap().len(), 3);
    }

    #[test]
    fn test_add_rejects_empty_name_and_duplicate_id() {
        let store = seeded_store();
        assert!(store
            .add_category(NewCategory::new(""))
            .unwrap_err()
            .is_validation());

        let err = store
            .add_category(NewCategory::new("Food 2").with_id("food"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate { .. }));
        assert_eq!(store.categories().unwrap().len(), 2);
    }

    #[test]
    fn test_rename_and_recolor() {
        let store = seeded_store();
        let updated = store
            .update_category(
                &CategoryId::from("food"),
                CategoryPatch {
                    name: Some("Groceries & Dining".into()),
                    color: Some("#22c55e".into()),
                    icon: None,
                },
            )
            .unwrap();

        assert_eq!(updated.id.as_str(), "food");
        assert_eq!(updated.name, "Groceries & Dining");
        assert_eq!(updated.color, "#22c55e");
    }

    #[test]
    fn test_update_unknown_category() {
        let store = seeded_store();
        let err = store
            .update_category(&CategoryId::from("rent"), CategoryPatch::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_detaches_expenses() {
        let store = seeded_store();
        let deletion = store.delete_category(&CategoryId::from("food")).unwrap();

        assert_eq!(deletion.detached_expenses, 2);
        let expenses = store.expenses().unwrap();
        assert_eq!(expenses.len(), 3);
        assert_eq!(expenses.iter().filter(|e| e.is_uncategorized()).count(), 2);

        let summary = summarize(&expenses, &store.categories().unwrap());
        assert_eq!(summary.total.cents(), 35000);
        assert!(summary
            .by_category
            .iter()
            .any(|c| c.category_id.is_none() && c.name == UNCATEGORIZED));
    }

    #[test]
    fn test_delete_removes_bound_budgets() {
        let store = seeded_store();
        store
            .add_budget(NewBudget::new(
                "food",
                Money::from_cents(50000),
                BudgetPeriod::Monthly,
                date(2024, 1, 1),
            ))
            .unwrap();

        let deletion = store.delete_category(&CategoryId::from("food")).unwrap();
        assert_eq!(deletion.removed_budgets, 1);
        assert!(store.budgets().unwrap().is_empty());
    }
}
