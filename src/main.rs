use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger::cli::{
    handle_balance_command, handle_category_command, handle_history_command,
    handle_import_command, handle_transaction_command, CategoryCommands, TransactionCommands,
};
use ledger::config::{paths::LedgerPaths, settings::Settings};
use ledger::logging::init_tracing;
use ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal income/outcome ledger",
    long_about = "ledger-cli records income and outcome transactions, keeps a running \
                  balance that never goes negative through manual entry, and bulk-loads \
                  transactions from CSV files."
)]
struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Import transactions from a CSV file (title,type,value,category)
    Import {
        /// Path to the CSV file; removed after a successful import
        file: PathBuf,
    },

    /// Show income, outcome and total
    Balance,

    /// Category commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, &settings, &file)?;
        }
        Some(Commands::Balance) => {
            handle_balance_command(&storage, &settings)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, limit)?;
        }
        Some(Commands::Config) => {
            println!("ledger-cli Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Category matching:   {:?}", settings.category_matching);
            println!("  Malformed CSV rows:  {:?}", settings.import.on_malformed);
            println!("  Currency symbol:     {}", settings.currency_symbol);
        }
        None => {
            println!("ledger-cli - personal income/outcome ledger");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
