//! # cart-cli
//!
//! Prices a basket file from the command line.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            cart-cli run                                 │
//! │                                                                         │
//! │  args ──► CartConfig::load ──► BasketFile::load ──► into_cart()         │
//! │                  │                                      │               │
//! │                  ▼                                      ▼               │
//! │        DeliveryCostCalculator ─────────────────► Report::new            │
//! │                                                         │               │
//! │                                             text (default) / --json     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! cart-cli --basket ./basket.toml
//! cart-cli --basket ./basket.toml --config ./cart.toml --json
//! RUST_LOG=cart_core=trace cart-cli -b ./basket.toml
//! ```

pub mod basket;
pub mod config;
pub mod error;
pub mod report;

use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use basket::BasketFile;
use config::CartConfig;
use error::{CliError, CliResult};
use report::Report;

const USAGE: &str = "\
Cart Pricing CLI

Usage: cart-cli --basket <PATH> [OPTIONS]

Options:
  -b, --basket <PATH>    Basket file to price (required)
  -c, --config <PATH>    Config file (default: platform config dir)
      --json             Print totals as JSON
  -h, --help             Show this help message";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub basket: PathBuf,
    pub config: Option<PathBuf>,
    pub json: bool,
}

/// Parses arguments (without the program name).
///
/// Returns `Ok(None)` when help was requested.
pub fn parse_args<I>(args: I) -> CliResult<Option<Options>>
where
    I: IntoIterator<Item = String>,
{
    let mut basket = None;
    let mut config = None;
    let mut json = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--basket" | "-b" => basket = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--config" | "-c" => config = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--json" => json = true,
            "--help" | "-h" => return Ok(None),
            other => {
                return Err(CliError::InvalidArgs(format!("unknown argument '{}'", other)));
            }
        }
    }

    let basket =
        basket.ok_or_else(|| CliError::InvalidArgs("--basket <PATH> is required".to_string()))?;

    Ok(Some(Options {
        basket,
        config,
        json,
    }))
}

fn value_for(flag: &str, value: Option<String>) -> CliResult<String> {
    value.ok_or_else(|| CliError::InvalidArgs(format!("{} expects a value", flag)))
}

/// Runs the CLI and returns what should go to stdout.
///
/// An explicit `--config` must load cleanly; the platform default falls
/// back to built-in values if it is unreadable.
pub fn run<I>(args: I) -> CliResult<String>
where
    I: IntoIterator<Item = String>,
{
    let options = match parse_args(args)? {
        Some(options) => options,
        None => return Ok(USAGE.to_string()),
    };
    debug!(?options, "Parsed arguments");

    let config = match options.config {
        Some(path) => CartConfig::load(Some(path))?,
        None => CartConfig::load_or_default(None),
    };
    let calculator = config.delivery.calculator()?;

    let cart = BasketFile::load(&options.basket)?.into_cart()?;
    let report = Report::new(&cart, &calculator);
    info!(
        items = report.totals.item_count,
        grand_total = %report.grand_total,
        "Cart priced"
    );

    if options.json {
        report.to_json()
    } else {
        Ok(report.to_text(&cart, &config.display))
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout stays clean for the report.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cart_core=trace` - Show per-campaign qualification
/// - Default: INFO, DEBUG for the cart crates
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,cart=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
