//! CLI commands for data export and import

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::info;

use super::args::{today, FilterArgs};
use crate::config::SpendwisePaths;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{csv, import_file, json, yaml};
use crate::reports::{filter_on, summarize};
use crate::store::LedgerStore;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Full ledger as JSON (re-importable)
    Json {
        /// Output file ("-" for stdout); defaults to the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Compact instead of pretty-printed output
        #[arg(long)]
        compact: bool,
    },

    /// Full ledger as YAML (re-importable)
    Yaml {
        /// Output file ("-" for stdout); defaults to the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expenses, or the category breakdown, as CSV
    Csv {
        /// Output file ("-" for stdout); defaults to the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the per-category summary instead of individual expenses
        #[arg(long)]
        summary: bool,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

fn default_output(paths: &SpendwisePaths, stem: &str, extension: &str) -> PathBuf {
    paths.export_dir().join(format!(
        "spendwise-{}-{}.{}",
        stem,
        today().format("%Y%m%d"),
        extension
    ))
}

/// Open the destination, treating "-" as stdout
fn open_output(path: &Path) -> LedgerResult<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(std::io::stdout()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Export(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(Box::new(BufWriter::new(file)))
}

fn finish(mut writer: Box<dyn Write>, path: &Path, what: &str) -> LedgerResult<()> {
    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    if path.as_os_str() != "-" {
        println!("{} exported to: {}", what, path.display());
    }
    Ok(())
}

/// Handle export commands
pub fn handle_export_command(
    store: &LedgerStore,
    paths: &SpendwisePaths,
    cmd: ExportCommands,
) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Json { output, compact } => {
            let output = output.unwrap_or_else(|| default_output(paths, "ledger", "json"));
            let mut writer = open_output(&output)?;
            json::export_full_json(store, &mut writer, !compact)?;
            finish(writer, &output, "Ledger")
        }

        ExportCommands::Yaml { output } => {
            let output = output.unwrap_or_else(|| default_output(paths, "ledger", "yaml"));
            let mut writer = open_output(&output)?;
            yaml::export_full_yaml(store, &mut writer)?;
            finish(writer, &output, "Ledger")
        }

        ExportCommands::Csv {
            output,
            summary,
            filter,
        } => {
            let stem = if summary { "summary" } else { "expenses" };
            let output = output.unwrap_or_else(|| default_output(paths, stem, "csv"));

            let spec = filter.to_spec(store)?;
            let expenses = filter_on(&store.expenses()?, &spec, today());
            let categories = store.categories()?;

            let mut writer = open_output(&output)?;
            if summary {
                csv::export_summary_csv(&summarize(&expenses, &categories), &mut writer)?;
                finish(writer, &output, "Category summary")
            } else {
                csv::export_expenses_csv(&expenses, &categories, &store.wallets()?, &mut writer)?;
                finish(writer, &output, &format!("{} expense(s)", expenses.len()))
            }
        }
    }
}

/// Replace the ledger with the contents of a JSON or YAML export
pub fn handle_import_command(store: &LedgerStore, file: &Path, dry_run: bool) -> LedgerResult<()> {
    let snapshot = import_file(file)?;

    println!("Read {}", file.display());
    println!("  Categories: {}", snapshot.categories.len());
    println!("  Wallets:    {}", snapshot.wallets.len());
    println!("  Expenses:   {}", snapshot.expenses.len());
    println!("  Budgets:    {}", snapshot.budgets.len());

    if dry_run {
        println!("Dry run: the file is valid, nothing was changed.");
        return Ok(());
    }

    let records = snapshot.record_count();
    store.restore(snapshot)?;
    info!(file = %file.display(), records, "ledger replaced from import");
    println!("Ledger replaced with imported data.");
    Ok(())
}
