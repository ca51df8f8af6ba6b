use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use spendwise::cli::{
    handle_budget_command, handle_category_command, handle_expense_command,
    handle_export_command, handle_import_command, handle_report_command, handle_wallet_command,
    BudgetCommands, CategoryCommands, ExpenseCommands, ExportCommands, ReportCommands,
    WalletCommands,
};
use spendwise::config::{SpendwisePaths, Settings};
use spendwise::seed::demo_data;
use spendwise::storage::SnapshotFile;
use spendwise::store::{LedgerStore, NewBudget};

#[derive(Parser)]
#[command(
    name = "spendwise",
    version,
    about = "Track expenses and see where the money goes",
    long_about = "Spendwise records expenses against categories and wallets, \
                  keeps budgets per category, and reports category breakdowns, \
                  monthly trends, top merchants and spending insights."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and settings, with demo data unless --empty
    Init {
        /// Start with an empty ledger
        #[arg(long)]
        empty: bool,
    },

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Wallet management commands
    #[command(subcommand)]
    Wallet(WalletCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export the ledger
    #[command(subcommand)]
    Export(ExportCommands),

    /// Replace the ledger with a JSON or YAML export
    Import {
        /// Export file (.json, .yaml or .yml)
        file: PathBuf,
        /// Validate the file without changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Show current configuration and paths
    Config,
}

impl Commands {
    /// Whether the command can change the ledger
    fn mutates(&self) -> bool {
        match self {
            Commands::Init { .. } => true,
            Commands::Expense(cmd) => !matches!(
                cmd,
                ExpenseCommands::List { .. } | ExpenseCommands::Show { .. }
            ),
            Commands::Category(cmd) => !matches!(cmd, CategoryCommands::List),
            Commands::Wallet(cmd) => !matches!(cmd, WalletCommands::List),
            Commands::Budget(cmd) => !matches!(cmd, BudgetCommands::List | BudgetCommands::Status),
            Commands::Import { dry_run, .. } => !dry_run,
            Commands::Report(_) | Commands::Export(_) | Commands::Config => false,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    spendwise::logging::init(cli.verbose);

    let paths = SpendwisePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let ledger_file = SnapshotFile::at(&paths);
    let store = match ledger_file
        .load()
        .with_context(|| format!("Failed to load {}", ledger_file.path().display()))?
    {
        Some(snapshot) => LedgerStore::from_snapshot(snapshot)?,
        None => LedgerStore::new(),
    };

    let Some(command) = cli.command else {
        println!("Spendwise - expense tracking and spending analytics");
        println!();
        println!("Run 'spendwise init' to get started.");
        println!("Run 'spendwise --help' for usage information.");
        return Ok(());
    };

    let mutates = command.mutates();
    match command {
        Commands::Init { empty } => init(&paths, &settings, &store, empty)?,
        Commands::Expense(cmd) => handle_expense_command(&store, &settings, cmd)?,
        Commands::Category(cmd) => handle_category_command(&store, cmd)?,
        Commands::Wallet(cmd) => handle_wallet_command(&store, &settings, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&store, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&store, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&store, &paths, cmd)?,
        Commands::Import { file, dry_run } => handle_import_command(&store, &file, dry_run)?,
        Commands::Config => show_config(&paths, &settings),
    }

    if mutates {
        ledger_file.save(&store.snapshot()?)?;
    }

    Ok(())
}

fn init(paths: &SpendwisePaths, settings: &Settings, store: &LedgerStore, empty: bool) -> Result<()> {
    println!("Initializing Spendwise at: {}", paths.base_dir().display());
    paths.ensure_directories()?;
    settings.save(paths)?;

    if empty || !settings.seed_demo_data {
        println!("Initialization complete with an empty ledger.");
        println!();
        println!("Next: 'spendwise category add <name>' and 'spendwise wallet add <name>'.");
        return Ok(());
    }

    if store.is_seeded()? {
        info!("ledger already populated, demo data not loaded");
        println!("Existing ledger kept; demo data not loaded.");
        return Ok(());
    }

    let demo = demo_data(spendwise::cli::args::today());
    store.seed(demo.categories, demo.wallets, demo.expenses)?;
    for budget in demo.budgets {
        debug!(budget_id = %budget.id, "adding demo budget");
        let mut input = NewBudget::new(budget.category_id, budget.limit, budget.period, budget.period_start)
            .with_range(budget.period_start, budget.period_end);
        input.id = Some(budget.id);
        store.add_budget(input)?;
    }

    let snapshot = store.snapshot()?;
    println!("Initialization complete!");
    println!();
    println!(
        "Demo data loaded: {} categories, {} wallets, {} expenses, {} budgets.",
        snapshot.categories.len(),
        snapshot.wallets.len(),
        snapshot.expenses.len(),
        snapshot.budgets.len()
    );
    println!("Try 'spendwise report summary' or 'spendwise budget status'.");
    Ok(())
}

fn show_config(paths: &SpendwisePaths, settings: &Settings) {
    println!("Spendwise Configuration");
    println!("=======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Ledger file:      {}", paths.ledger_file().display());
    println!("Export directory: {}", paths.export_dir().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Date format:      {}", settings.date_format);
    println!("  Trend months:     {}", settings.trend_months);
    println!("  Top merchants:    {}", settings.top_merchants);
    println!("  Budget period:    {}", settings.budget_period);
    println!("  Seed demo data:   {}", settings.seed_demo_data);
}
