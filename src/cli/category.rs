//! Category CLI commands

use clap::Subcommand;
use tracing::info;

use crate::display::format_category_list;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryCatalog, TransactionType};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List the categories offered for each type
    Categories {
        /// Only list categories for this type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<TransactionType>,
    },

    /// Add a custom category
    #[command(name = "category-add")]
    CategoryAdd {
        /// Transaction type the category belongs to
        #[arg(value_name = "TYPE")]
        kind: TransactionType,
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    catalog: &mut CategoryCatalog,
    cmd: CategoryCommands,
) -> LedgerResult<()> {
    match cmd {
        CategoryCommands::Categories { kind } => {
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => TransactionType::ALL.to_vec(),
            };
            for kind in kinds {
                print!("{}", format_category_list(catalog, kind));
            }
        }

        CategoryCommands::CategoryAdd { kind, name } => {
            if !catalog.add_custom(kind, &name) {
                return Err(LedgerError::Validation(format!(
                    "Category '{}' is empty or already exists for {}",
                    name.trim(),
                    kind
                )));
            }
            info!(%kind, name = name.trim(), "custom category added");
            println!("Added {} category '{}'", kind, name.trim());
        }
    }

    Ok(())
}
