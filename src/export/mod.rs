//! Export module for Spendwise
//!
//! - CSV: expenses and category breakdowns (spreadsheet-compatible)
//! - JSON: machine-readable full ledger export, re-importable
//! - YAML: human-readable full ledger export, re-importable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_expenses_csv, export_summary_csv};
pub use json::{export_full_json, import_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_yaml};

use std::path::Path;

use crate::error::{LedgerError, LedgerResult};
use crate::store::LedgerSnapshot;

/// Import a JSON or YAML export, choosing the parser by file extension
pub fn import_file(path: &Path) -> LedgerResult<LedgerSnapshot> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| LedgerError::Import(format!("Failed to read {}: {}", path.display(), e)))?;

    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("yaml") | Some("yml") => import_yaml(&contents),
        Some("json") => import_json(&contents),
        _ => Err(LedgerError::Import(format!(
            "Unsupported import format: {} (expected .json, .yaml or .yml)",
            path.display()
        ))),
    }
}
