//! Ad Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    catalog::{Catalog, CatalogError, get_product},
    checkout::{Checkout, CheckoutError, StrategyAssignment},
    config::{ConfigError, StrategyFixture, load_strategies_path, load_strategies_str},
    prices::Price,
    products::{Product, ProductId},
    receipt::{Receipt, ReceiptError, ReceiptLine},
    strategies::{
        FixedDiscount, GroupBuy, GroupBuyLimits, PricingError, PricingStrategy, Strategy,
    },
};
