//! Ad Checkout
//!
//! Prices a cart of advertisement products. Each product can carry its own
//! pricing strategy, either a group buy ("3 for 2") or a fixed amount off
//! every unit; products without one are charged at full unit price.
//!
//! ```
//! use adcheckout::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut checkout = Checkout::new([GroupBuy::for_product(
//!     ProductId::Classic,
//!     GroupBuyLimits::new(2, 3),
//! )?]);
//!
//! checkout
//!     .add_item(ProductId::Classic)?
//!     .add_item(ProductId::Classic)?
//!     .add_item(ProductId::Classic)?;
//!
//! assert_eq!(checkout.formatted_total()?, "$539.98");
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod receipt;
pub mod strategies;
pub mod utils;
