//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger store and the report
//! functions. Handlers print their results; persistence is left to `main`.

pub mod args;
pub mod budget;
pub mod category;
pub mod expense;
pub mod export;
pub mod report;
pub mod wallet;

pub use args::FilterArgs;
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, handle_import_command, ExportCommands};
pub use report::{handle_report_command, ReportCommands};
pub use wallet::{handle_wallet_command, WalletCommands};
