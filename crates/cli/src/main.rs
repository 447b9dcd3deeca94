//! Vitrine CLI - Browse the catalog and edit the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products, with the same filters as the storefront
//! vitrine catalog --search robe --sort desc
//!
//! # Edit the persisted cart
//! vitrine cart add 5
//! vitrine cart show
//! ```
//!
//! # Commands
//!
//! - `catalog` - Filter and sort the catalog
//! - `cart` - Show, add, remove, change quantities, clear
//!
//! The catalog and data directory come from `--catalog` and `--data-dir`,
//! falling back to `STOREFRONT_CATALOG` and `STOREFRONT_DATA_DIR`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vitrine_storefront::cart::CartStore;
use vitrine_storefront::catalog::Catalog;
use vitrine_storefront::snapshot::FileSnapshotStore;

mod commands;
mod presenter;

use commands::CommandError;
use commands::cart::CartAction;
use commands::catalog::CatalogFilters;
use presenter::TextPresenter;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine catalog and cart tools")]
struct Cli {
    /// Directory holding the cart snapshot
    #[arg(long, env = "STOREFRONT_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    /// JSON catalog file (built-in catalog when omitted)
    #[arg(long, env = "STOREFRONT_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog(CatalogFilters),
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

fn main() -> ExitCode {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Logs go to stderr, command output to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                print!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, CommandError> {
    let catalog = Catalog::load(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Catalog(filters) => Ok(commands::catalog::list(
            &catalog,
            &filters,
            &TextPresenter,
        )),
        Commands::Cart { action } => {
            let mut store = CartStore::open(catalog, FileSnapshotStore::new(cli.data_dir))?;
            commands::cart::run(&mut store, &action, &TextPresenter)
        }
    }
}
