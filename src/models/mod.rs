//! Core data models for Spendwise
//!
//! This module contains the record shapes the ledger owns: categories,
//! wallets, expenses and budgets, plus the money and id types they share.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod wallet;

pub use budget::{Budget, BudgetPeriod};
pub use category::{Category, UNCATEGORIZED};
pub use expense::Expense;
pub use ids::{BudgetId, CategoryId, ExpenseId, WalletId};
pub use money::{Money, MAX_AMOUNT_CENTS};
pub use wallet::Wallet;
