//! Storage layer for Spendwise
//!
//! The ledger lives in memory in [`crate::store::LedgerStore`]; this module
//! persists its snapshot as a single JSON file between runs.

pub mod file_io;

pub use file_io::{read_json_optional, read_json_required, write_json_atomic};

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::paths::SpendwisePaths;
use crate::error::{LedgerError, LedgerResult};
use crate::store::LedgerSnapshot;

/// Current on-disk schema version
pub const LEDGER_SCHEMA_VERSION: u32 = 1;

/// On-disk layout of the ledger file
#[derive(Debug, Serialize, Deserialize)]
struct StoredLedger {
    schema_version: u32,
    saved_at: DateTime<Utc>,
    #[serde(flatten)]
    ledger: LedgerSnapshot,
}

/// The ledger snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The ledger file under the configured data directory
    pub fn at(paths: &SpendwisePaths) -> Self {
        Self::new(paths.ledger_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot, or `None` when nothing has been saved yet
    ///
    /// The snapshot is validated; a file with dangling references or
    /// duplicate ids is rejected rather than half-loaded.
    pub fn load(&self) -> LedgerResult<Option<LedgerSnapshot>> {
        let Some(stored) = read_json_optional::<StoredLedger, _>(&self.path)? else {
            return Ok(None);
        };

        if stored.schema_version > LEDGER_SCHEMA_VERSION {
            return Err(LedgerError::Storage(format!(
                "{} was written by a newer version (schema {})",
                self.path.display(),
                stored.schema_version
            )));
        }

        stored.ledger.validate()?;
        debug!(
            path = %self.path.display(),
            records = stored.ledger.record_count(),
            "ledger loaded"
        );
        Ok(Some(stored.ledger))
    }

    /// Atomically replace the file with `snapshot`
    pub fn save(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()> {
        let stored = StoredLedger {
            schema_version: LEDGER_SCHEMA_VERSION,
            saved_at: Utc::now(),
            ledger: snapshot.clone(),
        };
        write_json_atomic(&self.path, &stored)?;
        debug!(path = %self.path.display(), records = snapshot.record_count(), "ledger saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expense, Money, Wallet, WalletId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn snapshot() -> LedgerSnapshot {
        LedgerSnapshot {
            categories: vec![Category::with_id("food", "Food")],
            wallets: vec![Wallet::with_id("cash", "Cash", "USD")],
            expenses: vec![Expense::new(
                "Lunch",
                Money::from_cents(1250),
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                Some("food".into()),
                WalletId::from("cash"),
            )],
            budgets: Vec::new(),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = SnapshotFile::at(&SpendwisePaths::with_base_dir(temp_dir.path()));
        assert!(!file.exists());
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = SnapshotFile::at(&SpendwisePaths::with_base_dir(temp_dir.path()));

        file.save(&snapshot()).unwrap();
        assert!(file.path().ends_with("data/ledger.json"));
        assert_eq!(file.load().unwrap(), Some(snapshot()));
    }

    #[test]
    fn test_rejects_newer_schema() {
        let temp_dir = TempDir::new().unwrap();
        let file = SnapshotFile::new(temp_dir.path().join("ledger.json"));
        std::fs::write(
            file.path(),
            r#"{"schema_version": 99, "saved_at": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert!(matches!(file.load(), Err(LedgerError::Storage(_))));
    }

    #[test]
    fn test_rejects_dangling_references() {
        let temp_dir = TempDir::new().unwrap();
        let file = SnapshotFile::new(temp_dir.path().join("ledger.json"));
        let mut broken = snapshot();
        broken.wallets.clear();
        file.save(&broken).unwrap();

        assert!(file.load().unwrap_err().is_validation());
    }
}
