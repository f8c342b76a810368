//! Transaction CLI commands
//!
//! `add`, `edit`, `remove`, `show` and `list`. Mutations go through the
//! store; `list` renders a derived month view.

use clap::Subcommand;
use tracing::{info, warn};

use super::{parse_amount, parse_date, parse_month};
use crate::config::Settings;
use crate::display::{format_ledger_view, format_transaction_details};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    CategoryCatalog, Currency, Month, TransactionId, TransactionPatch, TransactionRecord,
    TransactionType,
};
use crate::services::{derive_view, TypeFilter, ViewParams};
use crate::storage::LedgerStore;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Transaction type (income or expense)
        #[arg(value_name = "TYPE")]
        kind: TransactionType,
        /// Amount, stored as given (e.g. "1000", "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Short title
        title: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Currency code, defaults to the configured currency
        #[arg(long)]
        currency: Option<Currency>,
        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Edit fields of an existing transaction
    Edit {
        /// Transaction ID or unique prefix
        id: String,
        /// New type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<TransactionType>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New currency
        #[arg(long)]
        currency: Option<Currency>,
        /// New note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Remove a transaction
    #[command(alias = "delete")]
    Remove {
        /// Transaction ID or unique prefix
        id: String,
    },

    /// Show transaction details
    Show {
        /// Transaction ID or unique prefix
        id: String,
    },

    /// Show one month of transactions grouped by day
    List {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Move the month by this many months (negative goes back)
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
        /// Case-insensitive title search
        #[arg(short, long)]
        title: Option<String>,
        /// Only records counting toward this type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<TypeFilter>,
        /// Exact category name
        #[arg(short, long)]
        category: Option<String>,
        /// Currency code
        #[arg(long)]
        currency: Option<Currency>,
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    store: &LedgerStore,
    catalog: &CategoryCatalog,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            title,
            category,
            date,
            currency,
            note,
        } => {
            let date = match date {
                Some(value) => parse_date(&value)?,
                None => chrono::Local::now().date_naive(),
            };

            let record = TransactionRecord::new(
                TransactionId::new(),
                kind,
                date,
                parse_amount(&amount)?,
                category.trim(),
                currency.unwrap_or(settings.default_currency),
                title.trim(),
            )
            .with_note(note.unwrap_or_default());

            record.validate()?;
            warn_unknown_category(catalog, &record);
            if !record.amount.is_positive() {
                warn!(amount = %record.amount, "amount is not positive, record will not count toward totals");
            }

            store.add(record.clone())?;
            info!(id = %record.id, "transaction added");

            println!("Created transaction:");
            print!("{}", format_transaction_details(&record));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            title,
            category,
            date,
            currency,
            note,
        } => {
            let id = store.resolve(&id)?;

            let mut patch = TransactionPatch::new();
            if let Some(kind) = kind {
                patch = patch.kind(kind);
            }
            if let Some(amount) = amount {
                patch = patch.amount(parse_amount(&amount)?);
            }
            if let Some(title) = title {
                patch = patch.title(title.trim());
            }
            if let Some(category) = category {
                patch = patch.category(category.trim());
            }
            if let Some(date) = date {
                patch = patch.date(parse_date(&date)?);
            }
            if let Some(currency) = currency {
                patch = patch.currency(currency);
            }
            if let Some(note) = note {
                patch = patch.note(note);
            }

            if patch.is_empty() {
                return Err(LedgerError::Validation(
                    "Nothing to edit. Pass at least one field to change".into(),
                ));
            }

            // Validate the merged result before touching the store
            let mut candidate = store
                .get(id)?
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
            patch.apply_to(&mut candidate);
            candidate.validate()?;
            warn_unknown_category(catalog, &candidate);

            let updated = store
                .edit(id, &patch)?
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

            println!("Updated transaction:");
            print!("{}", format_transaction_details(&updated));
        }

        TransactionCommands::Remove { id } => {
            let id = store.resolve(&id)?;
            let removed = store
                .remove(id)?
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

            println!("Removed transaction {} ({})", removed.id.short(), removed.title);
        }

        TransactionCommands::Show { id } => {
            let id = store.resolve(&id)?;
            let record = store
                .get(id)?
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

            print!("{}", format_transaction_details(&record));
        }

        TransactionCommands::List {
            month,
            offset,
            title,
            kind,
            category,
            currency,
            json,
        } => {
            let month = match month {
                Some(value) => parse_month(&value)?,
                None => Month::current(),
            };

            let mut params = ViewParams::for_month(month.shift(offset));
            if let Some(title) = title {
                params = params.title(title);
            }
            if let Some(kind) = kind {
                params = params.kind(kind);
            }
            if let Some(category) = category {
                params = params.category(category);
            }
            if let Some(currency) = currency {
                params = params.currency(currency);
            }

            let view = derive_view(&store.records()?, &params);

            if json {
                let output = serde_json::to_string_pretty(&view)?;
                println!("{}", output);
            } else {
                print!("{}", format_ledger_view(&view, &settings.date_format));
            }
        }
    }

    Ok(())
}

fn warn_unknown_category(catalog: &CategoryCatalog, record: &TransactionRecord) {
    if !catalog.contains(record.kind, &record.category) {
        warn!(
            category = %record.category,
            kind = %record.kind,
            "category is not in the catalog for this type"
        );
    }
}
