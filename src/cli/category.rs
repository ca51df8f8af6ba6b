//! Category CLI commands

use clap::Subcommand;

use super::args::resolve_category;
use crate::display::format_category_table;
use crate::error::LedgerResult;
use crate::store::{CategoryPatch, LedgerStore, NewCategory};

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        /// Category name
        name: String,
        /// Explicit ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Display color, e.g. "#22c55e"
        #[arg(long, default_value = "")]
        color: String,
        /// Icon name
        #[arg(long, default_value = "")]
        icon: String,
    },

    /// List all categories
    List,

    /// Rename or restyle a category
    Edit {
        /// Category name or ID
        category: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },

    /// Delete a category; its expenses become uncategorized
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(store: &LedgerStore, cmd: CategoryCommands) -> LedgerResult<()> {
    match cmd {
        CategoryCommands::Add {
            name,
            id,
            color,
            icon,
        } => {
            let mut input = NewCategory::new(name).styled(color, icon);
            if let Some(id) = id {
                input = input.with_id(id);
            }
            let category = store.add_category(input)?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List => {
            print!("{}", format_category_table(&store.categories()?));
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
            icon,
        } => {
            let existing = resolve_category(store, &category)?;
            let updated = store.update_category(&existing.id, CategoryPatch { name, color, icon })?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let existing = resolve_category(store, &category)?;
            let deletion = store.delete_category(&existing.id)?;
            println!("Deleted category: {}", existing.name);
            if deletion.detached_expenses > 0 {
                println!(
                    "  {} expense(s) are now uncategorized",
                    deletion.detached_expenses
                );
            }
            if deletion.removed_budgets > 0 {
                println!("  {} budget(s) removed", deletion.removed_budgets);
            }
        }
    }

    Ok(())
}
