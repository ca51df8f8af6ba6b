//! JSON export and import
//!
//! A full export carries every collection plus a schema version so older
//! or foreign files are refused before anything is restored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Category, Expense, Wallet};
use crate::store::{LedgerSnapshot, LedgerStore};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub categories: Vec<Category>,
    pub wallets: Vec<Wallet>,
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub budgets: Vec<Budget>,

    pub metadata: ExportMetadata,
}

/// Counts and date span, for a reader skimming the file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub category_count: usize,
    pub wallet_count: usize,
    pub expense_count: usize,
    pub budget_count: usize,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Build an export from the current store contents
    pub fn from_store(store: &LedgerStore) -> LedgerResult<Self> {
        Ok(Self::from_snapshot(store.snapshot()?))
    }

    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let earliest_expense = snapshot
            .expenses
            .iter()
            .map(|e| e.date)
            .min()
            .map(|d| d.to_string());
        let latest_expense = snapshot
            .expenses
            .iter()
            .map(|e| e.date)
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            category_count: snapshot.categories.len(),
            wallet_count: snapshot.wallets.len(),
            expense_count: snapshot.expenses.len(),
            budget_count: snapshot.budgets.len(),
            earliest_expense,
            latest_expense,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories: snapshot.categories,
            wallets: snapshot.wallets,
            expenses: snapshot.expenses,
            budgets: snapshot.budgets,
            metadata,
        }
    }

    /// Check the schema version and referential integrity
    pub fn validate(&self) -> LedgerResult<()> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(LedgerError::Import(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            )));
        }
        self.to_snapshot().validate()
    }

    fn to_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            categories: self.categories.clone(),
            wallets: self.wallets.clone(),
            expenses: self.expenses.clone(),
            budgets: self.budgets.clone(),
        }
    }

    /// Validate and unwrap into a snapshot ready for `LedgerStore::restore`
    pub fn into_snapshot(self) -> LedgerResult<LedgerSnapshot> {
        self.validate()?;
        Ok(LedgerSnapshot {
            categories: self.categories,
            wallets: self.wallets,
            expenses: self.expenses,
            budgets: self.budgets,
        })
    }
}

/// Write the full ledger as JSON
pub fn export_full_json<W: Write>(
    store: &LedgerStore,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = FullExport::from_store(store)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn import_json(json_str: &str) -> LedgerResult<LedgerSnapshot> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| LedgerError::Import(e.to_string()))?;
    export.into_snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::store::{NewCategory, NewExpense, NewWallet};
    use chrono::NaiveDate;

    fn populated_store() -> LedgerStore {
        let store = LedgerStore::new();
        store
            .add_category(NewCategory::new("Groceries").with_id("food"))
            .unwrap();
        store
            .add_wallet(NewWallet::new("Checking", "USD").with_id("bank"))
            .unwrap();
        for (day, cents) in [(3, 4599), (17, 1250)] {
            store
                .add_expense(NewExpense::new(
                    "Market run",
                    Money::from_cents(cents),
                    NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                    "food",
                    "bank",
                ))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_full_export() {
        let export = FullExport::from_store(&populated_store()).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.expense_count, 2);
        assert_eq!(export.metadata.wallet_count, 1);
        assert_eq!(export.metadata.earliest_expense.as_deref(), Some("2025-01-03"));
        assert_eq!(export.metadata.latest_expense.as_deref(), Some("2025-01-17"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_import_restores_store() {
        let store = populated_store();
        let mut output = Vec::new();
        export_full_json(&store, &mut output, true).unwrap();

        let snapshot = import_json(&String::from_utf8(output).unwrap()).unwrap();
        let restored = LedgerStore::from_snapshot(snapshot).unwrap();
        assert_eq!(restored.snapshot().unwrap(), store.snapshot().unwrap());
    }

    #[test]
    fn test_import_rejects_wrong_schema() {
        let mut export = FullExport::from_store(&populated_store()).unwrap();
        export.schema_version = "0.1.0".to_string();
        let json = serde_json::to_string(&export).unwrap();

        assert!(matches!(import_json(&json), Err(LedgerError::Import(_))));
    }

    #[test]
    fn test_import_rejects_dangling_wallet() {
        let mut export = FullExport::from_store(&populated_store()).unwrap();
        export.wallets.clear();
        let json = serde_json::to_string(&export).unwrap();

        assert!(import_json(&json).unwrap_err().is_validation());
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(import_json("[1, 2"), Err(LedgerError::Import(_))));
    }
}
