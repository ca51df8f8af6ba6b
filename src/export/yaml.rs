//! YAML export and import
//!
//! Same content as the JSON export, in a form that is easier to read.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::FullExport;
use crate::store::{LedgerSnapshot, LedgerStore};

/// Write the full ledger as YAML with a short comment header
pub fn export_full_yaml<W: Write>(store: &LedgerStore, writer: &mut W) -> LedgerResult<()> {
    let export = FullExport::from_store(store)?;
    let export_err = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# Spendwise ledger export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn import_yaml(yaml_str: &str) -> LedgerResult<LedgerSnapshot> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| LedgerError::Import(e.to_string()))?;
    export.into_snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Wallet};

    fn store() -> LedgerStore {
        LedgerStore::from_snapshot(LedgerSnapshot {
            categories: vec![Category::with_id("food", "Groceries")],
            wallets: vec![Wallet::with_id("bank", "Checking", "USD")],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_yaml_export_has_header_and_data() {
        let mut output = Vec::new();
        export_full_yaml(&store(), &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# Spendwise ledger export"));
        assert!(yaml.contains("Checking"));
        assert!(yaml.contains("Groceries"));
    }

    #[test]
    fn test_yaml_import() {
        let mut output = Vec::new();
        export_full_yaml(&store(), &mut output).unwrap();

        // Comment lines are plain YAML comments and parse as-is
        let snapshot = import_yaml(&String::from_utf8(output).unwrap()).unwrap();
        assert_eq!(snapshot.categories[0].name, "Groceries");
        assert_eq!(snapshot.wallets[0].currency, "USD");
    }
}
