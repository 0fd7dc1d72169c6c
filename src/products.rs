//! Products

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::catalog::CatalogError;

/// Identifier of a purchasable advertisement product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductId {
    /// Classic ad
    Classic,

    /// Stand out ad
    StandOut,

    /// Premium ad
    Premium,
}

impl ProductId {
    /// Every known product id, in catalog order.
    pub const ALL: [ProductId; 3] = [ProductId::Classic, ProductId::StandOut, ProductId::Premium];

    /// The identifier as it appears in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            ProductId::Classic => "CLASSIC",
            ProductId::StandOut => "STAND_OUT",
            ProductId::Premium => "PREMIUM",
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownProduct(s.to_string()))
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Human friendly name
    pub name: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Product description
    pub description: String,
}

impl Product {
    /// Unit price in minor currency units.
    pub fn unit_price_minor(&self) -> i64 {
        self.price.to_minor_units()
    }

    /// Currency the product is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.price.currency()
    }
}
