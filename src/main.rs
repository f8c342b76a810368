use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use monthly_ledger::cli::{
    handle_category_command, handle_transaction_command, CategoryCommands, TransactionCommands,
};
use monthly_ledger::config::{LedgerPaths, Settings};
use monthly_ledger::models::Currency;
use monthly_ledger::storage::LedgerFile;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal income and expense ledger",
    long_about = "Record income and expense transactions and review them one month at a \
                  time, grouped by day, with income and expense totals."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    #[command(flatten)]
    Category(CategoryCommands),

    /// Show current configuration and paths
    Config {
        /// Set the currency used when `add` is given none
        #[arg(long)]
        default_currency: Option<Currency>,
        /// Set the strftime format for day headers (date fields only)
        #[arg(long)]
        date_format: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(verbosity(cli.verbose));

    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "resolved data directory");

    let ledger_path = paths.ledger_file();
    let (store, mut catalog) = LedgerFile::load(&ledger_path)?.into_parts()?;
    let catalog_before = catalog.clone();

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&store, &catalog, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&mut catalog, cmd)?;
        }
        Some(Commands::Config {
            default_currency,
            date_format,
        }) => {
            let changed = default_currency.is_some() || date_format.is_some();
            if let Some(currency) = default_currency {
                settings.default_currency = currency;
            }
            if let Some(format) = date_format {
                settings.date_format = format;
            }
            if changed {
                settings.save(&paths)?;
                println!("Settings saved");
                println!();
            }
            println!("Ledger Configuration");
            println!("====================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Ledger file:    {}", ledger_path.display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Default currency: {}", settings.default_currency);
            println!("  Date format:      {}", settings.date_format);
        }
        None => {
            println!("ledger - personal income and expense ledger");
            println!();
            println!("Run 'ledger --help' for usage information.");
            println!("Run 'ledger list' to see the current month.");
        }
    }

    if store.version()? > 0 || catalog != catalog_before {
        paths.ensure_directories()?;
        LedgerFile::capture(&store, &catalog)?.save(&ledger_path)?;
    }

    Ok(())
}

fn verbosity(count: u8) -> LevelFilter {
    match count {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "monthly_ledger={},{}={}",
            level,
            env!("CARGO_CRATE_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
