//! Checkout Example
//!
//! Prices a cart from the command line.
//!
//! Use `-i` once per unit to add (e.g. `-i CLASSIC -i CLASSIC`)
//! Use `-s` to load strategies from YAML (e.g. `fixtures/strategies/myer.yaml`)
//! Use `-c` to load a catalog from YAML instead of the standard catalog
//! Use `-r` to print a receipt table
//!
//! Set `RUST_LOG=adcheckout=debug` to see each priced line.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use adcheckout::{
    catalog::{self, Catalog},
    checkout::Checkout,
    config,
    utils::ExampleCheckoutArgs,
};

/// Checkout Example
pub fn main() -> Result<()> {
    fmt()
        .compact()
        .with_target(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = ExampleCheckoutArgs::parse();

    let loaded;
    let catalog = match &args.catalog {
        Some(path) => {
            loaded = Catalog::from_path(path)?;
            &loaded
        }
        None => catalog::standard(),
    };

    let strategies = match &args.strategies {
        Some(path) => config::load_strategies_path(path, catalog)?,
        None => Vec::new(),
    };

    let mut checkout = Checkout::with_catalog(catalog, strategies);

    for item in &args.items {
        checkout.add_item(*item)?;
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.receipt {
        checkout.receipt()?.write_to(&mut handle)?;
    } else {
        writeln!(handle, "{}", checkout.formatted_total()?)?;
    }

    Ok(())
}
