//! Display formatting for terminal output
//!
//! Renders ledger records and report results as tables. Nothing here
//! computes; every function takes finished values from `store` or
//! `reports`.

pub mod expense;
pub mod format;
pub mod ledger;
pub mod report;

pub use expense::{format_expense_details, format_expense_table};
pub use format::DisplayOptions;
pub use ledger::{format_budget_table, format_category_table, format_wallet_table};
pub use report::{format_insights, format_merchants, format_summary, format_trend};
