//! Catalog
//!
//! The read-only table of purchasable products. A standard catalog is built
//! once per process; alternative catalogs can be loaded from YAML.

use std::{fs, path::Path, sync::LazyLock};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{AUD, Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Catalog lookup and loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product id is not part of the catalog
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Prices can't be negative
    #[error("Price of {0} must not be negative")]
    NegativePrice(ProductId),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product priced in a different currency to the catalog
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

static STANDARD: LazyLock<Catalog> = LazyLock::new(Catalog::standard_ads);

/// Returns the process-wide standard catalog.
pub fn standard() -> &'static Catalog {
    &STANDARD
}

/// Look up a product in the standard catalog.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownProduct`] if the product is not in the catalog.
pub fn get_product(id: ProductId) -> Result<&'static Product, CatalogError> {
    standard().product(id)
}

/// Product catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: &'static Currency,
    products: FxHashMap<ProductId, Product>,
}

impl Catalog {
    /// Create a catalog from a list of products.
    ///
    /// A later product with the same id replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if a product has a negative price or is priced in a
    /// currency other than `currency`.
    pub fn new(
        currency: &'static Currency,
        products: impl IntoIterator<Item = Product>,
    ) -> Result<Self, CatalogError> {
        let mut map = FxHashMap::default();

        for product in products {
            if product.currency() != currency {
                return Err(CatalogError::CurrencyMismatch(
                    currency.iso_alpha_code.to_string(),
                    product.currency().iso_alpha_code.to_string(),
                ));
            }

            if product.unit_price_minor() < 0 {
                return Err(CatalogError::NegativePrice(product.id));
            }

            map.insert(product.id, product);
        }

        Ok(Catalog {
            currency,
            products: map,
        })
    }

    fn standard_ads() -> Self {
        let products = [
            (
                ProductId::Classic,
                "Classic ad",
                26_999,
                "Classic Ad Offers the most basic level of advertisement",
            ),
            (
                ProductId::StandOut,
                "Stand out ad",
                32_299,
                "Stand out Ad Allows advertisers to use a company logo and use a longer presentation text",
            ),
            (
                ProductId::Premium,
                "Premium ad",
                39_499,
                "Premium Ad Same benefits as Standout Ad, but also puts the advertisement at the top of the results, allowing higher visibility",
            ),
        ];

        let products = products
            .into_iter()
            .map(|(id, name, price, description)| {
                (
                    id,
                    Product {
                        id,
                        name: name.to_string(),
                        price: Money::from_minor(price, AUD),
                        description: description.to_string(),
                    },
                )
            })
            .collect();

        Catalog {
            currency: AUD,
            products,
        }
    }

    /// Parse a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or any product fails validation.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        fixture.try_into()
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if the product is not in the catalog.
    pub fn product(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.products
            .get(&id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.to_string()))
    }

    /// Whether the catalog lists the product.
    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    /// Products in catalog order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        ProductId::ALL
            .iter()
            .filter_map(|id| self.products.get(id))
    }

    /// Currency every product is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Catalog document in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Catalog currency code (e.g., "AUD")
    pub currency: String,

    /// Map of product id -> product fixture
    pub products: FxHashMap<ProductId, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product price (e.g., "269.99 AUD")
    pub price: String,

    /// Product description
    #[serde(default)]
    pub description: String,
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = CatalogError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let currency = currency_from_code(&fixture.currency)?;

        let products = fixture
            .products
            .into_iter()
            .map(|(id, product)| {
                let (minor_units, product_currency) = parse_price(&product.price)?;

                Ok(Product {
                    id,
                    name: product.name,
                    price: Money::from_minor(minor_units, product_currency),
                    description: product.description,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Catalog::new(currency, products)
    }
}

/// Parse price string (e.g., "269.99 AUD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = currency_from_code(code)?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .filter(|value| value.fract().is_zero())
        .and_then(|value| value.to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

fn currency_from_code(code: &str) -> Result<&'static Currency, CatalogError> {
    match code {
        "AUD" => Ok(AUD),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(CatalogError::UnknownCurrency(other.to_string())),
    }
}
