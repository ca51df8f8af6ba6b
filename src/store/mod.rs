//! Ledger store for Spendwise
//!
//! `LedgerStore` is the sole owner of categories, wallets, expenses and
//! budgets. Mutations validate first and apply second under one write
//! lock, so a failed call leaves every collection untouched. Reads hand out
//! cloned snapshots; the query functions in [`crate::reports`] work on
//! those and never touch the store.

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod snapshot;
pub mod wallets;

pub use budgets::{BudgetPatch, NewBudget};
pub use categories::{CategoryDeletion, CategoryPatch, NewCategory};
pub use expenses::{ExpensePatch, NewExpense};
pub use snapshot::LedgerSnapshot;
pub use wallets::{NewWallet, WalletPatch};

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Budget, BudgetId, Category, CategoryId, Expense, ExpenseId, Wallet, WalletId,
};

/// The collections behind the lock
#[derive(Debug, Default)]
struct LedgerData {
    categories: Vec<Category>,
    wallets: Vec<Wallet>,
    expenses: Vec<Expense>,
    budgets: Vec<Budget>,
    seeded: bool,
}

impl LedgerData {
    fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    fn wallet(&self, id: &WalletId) -> Option<&Wallet> {
        self.wallets.iter().find(|w| &w.id == id)
    }

    fn expense_index(&self, id: &ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| &e.id == id)
    }

    fn budget_index(&self, id: &BudgetId) -> Option<usize> {
        self.budgets.iter().position(|b| &b.id == id)
    }

    fn replace_with(&mut self, snapshot: LedgerSnapshot) {
        self.categories = snapshot.categories;
        self.wallets = snapshot.wallets;
        self.expenses = snapshot.expenses;
        self.budgets = snapshot.budgets;
    }

    fn to_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            categories: self.categories.clone(),
            wallets: self.wallets.clone(),
            expenses: self.expenses.clone(),
            budgets: self.budgets.clone(),
        }
    }
}

/// In-memory ledger, safe to share between threads
#[derive(Debug, Default)]
pub struct LedgerStore {
    data: RwLock<LedgerData>,
}

impl LedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an existing snapshot
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> LedgerResult<Self> {
        let store = Self::new();
        store.restore(snapshot)?;
        Ok(store)
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, LedgerData>> {
        self.data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, LedgerData>> {
        self.data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    // === Seeding and snapshots ===

    /// Populate the ledger with initial data, once
    ///
    /// Replaces categories, wallets and expenses wholesale the first time it
    /// is called. Later calls leave the store untouched and return `false`.
    /// Malformed seed data is rejected without applying anything.
    pub fn seed(
        &self,
        categories: Vec<Category>,
        wallets: Vec<Wallet>,
        expenses: Vec<Expense>,
    ) -> LedgerResult<bool> {
        let mut data = self.write()?;
        if data.seeded {
            debug!("ledger already seeded, skipping");
            return Ok(false);
        }

        let snapshot = LedgerSnapshot {
            categories,
            wallets,
            expenses,
            budgets: Vec::new(),
        };
        snapshot.validate()?;

        info!(
            categories = snapshot.categories.len(),
            wallets = snapshot.wallets.len(),
            expenses = snapshot.expenses.len(),
            "seeding ledger"
        );
        data.replace_with(snapshot);
        data.seeded = true;
        Ok(true)
    }

    /// Whether [`LedgerStore::seed`] has been applied
    pub fn is_seeded(&self) -> LedgerResult<bool> {
        Ok(self.read()?.seeded)
    }

    /// Replace every collection with a validated snapshot
    ///
    /// A restored ledger counts as seeded.
    pub fn restore(&self, snapshot: LedgerSnapshot) -> LedgerResult<()> {
        snapshot.validate()?;
        let mut data = self.write()?;
        debug!(records = snapshot.record_count(), "restoring ledger snapshot");
        data.replace_with(snapshot);
        data.seeded = true;
        Ok(())
    }

    /// Clone every collection
    pub fn snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        Ok(self.read()?.to_snapshot())
    }

    // === Reads ===

    /// All expenses in insertion order
    pub fn expenses(&self) -> LedgerResult<Vec<Expense>> {
        Ok(self.read()?.expenses.clone())
    }

    /// All categories in insertion order
    pub fn categories(&self) -> LedgerResult<Vec<Category>> {
        Ok(self.read()?.categories.clone())
    }

    /// All wallets in insertion order
    pub fn wallets(&self) -> LedgerResult<Vec<Wallet>> {
        Ok(self.read()?.wallets.clone())
    }

    /// All budgets in insertion order
    pub fn budgets(&self) -> LedgerResult<Vec<Budget>> {
        Ok(self.read()?.budgets.clone())
    }

    pub fn expense(&self, id: &ExpenseId) -> LedgerResult<Option<Expense>> {
        let data = self.read()?;
        Ok(data.expense_index(id).map(|i| data.expenses[i].clone()))
    }

    pub fn category(&self, id: &CategoryId) -> LedgerResult<Option<Category>> {
        Ok(self.read()?.category(id).cloned())
    }

    pub fn wallet(&self, id: &WalletId) -> LedgerResult<Option<Wallet>> {
        Ok(self.read()?.wallet(id).cloned())
    }

    pub fn budget(&self, id: &BudgetId) -> LedgerResult<Option<Budget>> {
        let data = self.read()?;
        Ok(data.budget_index(id).map(|i| data.budgets[i].clone()))
    }

    /// Find a category by id, or by name (case-insensitive)
    pub fn find_category(&self, identifier: &str) -> LedgerResult<Option<Category>> {
        let data = self.read()?;
        let needle = identifier.trim();
        Ok(data
            .categories
            .iter()
            .find(|c| c.id.as_str() == needle)
            .or_else(|| {
                data.categories
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(needle))
            })
            .cloned())
    }

    /// Find a wallet by id, or by name (case-insensitive)
    pub fn find_wallet(&self, identifier: &str) -> LedgerResult<Option<Wallet>> {
        let data = self.read()?;
        let needle = identifier.trim();
        Ok(data
            .wallets
            .iter()
            .find(|w| w.id.as_str() == needle)
            .or_else(|| data.wallets.iter().find(|w| w.name.eq_ignore_ascii_case(needle)))
            .cloned())
    }
}
