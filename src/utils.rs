//! Utils

use std::path::PathBuf;

use clap::Parser;

use crate::products::ProductId;

/// Arguments for the checkout example
#[derive(Debug, Parser)]
pub struct ExampleCheckoutArgs {
    /// Product to add to the cart; repeat for more units
    #[clap(short, long = "item")]
    pub items: Vec<ProductId>,

    /// Catalog YAML file; defaults to the standard catalog
    #[clap(short, long)]
    pub catalog: Option<PathBuf>,

    /// Strategies YAML file
    #[clap(short, long)]
    pub strategies: Option<PathBuf>,

    /// Print a receipt table instead of just the total
    #[clap(short, long)]
    pub receipt: bool,
}
