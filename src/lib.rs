//! Spendwise - expense ledger and spending analytics
//!
//! This library holds an in-memory ledger of categories, wallets, expenses
//! and budgets, and derives every analytic view from it: filtered subsets,
//! category and monthly totals, merchant rankings, budget health and
//! rule-based insights.
//!
//! # Architecture
//!
//! - `models`: record types, money and ids
//! - `store`: the ledger, sole owner of all records and all mutations
//! - `reports`: pure query functions over expense snapshots
//! - `seed`: demonstration data for a first run
//! - `storage`, `export`: JSON snapshot file, JSON/YAML/CSV export and import
//! - `config`, `logging`, `display`, `cli`: the command-line application
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use spendwise::models::Money;
//! use spendwise::reports::summarize;
//! use spendwise::store::{LedgerStore, NewCategory, NewExpense, NewWallet};
//!
//! let store = LedgerStore::new();
//! store.add_category(NewCategory::new("Food").with_id("food")).unwrap();
//! store.add_wallet(NewWallet::new("Cash", "USD").with_id("cash")).unwrap();
//! store
//!     .add_expense(NewExpense::new(
//!         "Groceries",
//!         Money::from_cents(4250),
//!         NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
//!         "food",
//!         "cash",
//!     ))
//!     .unwrap();
//!
//! let summary = summarize(&store.expenses().unwrap(), &store.categories().unwrap());
//! assert_eq!(summary.total, Money::from_cents(4250));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod seed;
pub mod storage;
pub mod store;

pub use error::{LedgerError, LedgerResult};
