//! Config
//!
//! Strategy assignments loaded from YAML:
//!
//! ```yaml
//! strategies:
//!   - product: STAND_OUT
//!     type: group_buy
//!     lower_limit: 4
//!     upper_limit: 5
//!   - product: PREMIUM
//!     type: fixed_discount
//!     discount: 500
//! ```
//!
//! Missing or non-integer parameters are kept as missing so that the strategy
//! reports them when it is priced.

use std::{fs, path::Path};

use serde::{Deserialize, Deserializer, de::IgnoredAny};
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    products::ProductId,
    strategies::{FixedDiscount, GroupBuy, GroupBuyLimits, Strategy},
};

/// Config Parsing Errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config files
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Strategy refers to a product the catalog doesn't list
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Wrapper for strategies in YAML
#[derive(Debug, Deserialize)]
pub struct StrategiesFixture {
    /// Strategies in assignment order; later entries win
    #[serde(default)]
    pub strategies: Vec<StrategyFixture>,
}

/// Strategy Fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyFixture {
    /// Group buy
    GroupBuy {
        /// Bound product
        product: ProductId,

        /// Units charged per bundle
        #[serde(default, deserialize_with = "integer_or_missing")]
        lower_limit: Option<i64>,

        /// Units per bundle
        #[serde(default, deserialize_with = "integer_or_missing")]
        upper_limit: Option<i64>,
    },

    /// Fixed discount
    FixedDiscount {
        /// Bound product
        product: ProductId,

        /// Discount per unit, in minor units
        #[serde(default, deserialize_with = "integer_or_missing")]
        discount: Option<i64>,
    },
}

impl StrategyFixture {
    /// Product the strategy targets
    pub fn product(&self) -> ProductId {
        match self {
            StrategyFixture::GroupBuy { product, .. }
            | StrategyFixture::FixedDiscount { product, .. } => *product,
        }
    }

    /// Bind the strategy to its product in `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if the catalog doesn't list the product.
    pub fn bind<'a>(&self, catalog: &'a Catalog) -> Result<Strategy<'a>, CatalogError> {
        let product = catalog.product(self.product())?;

        let strategy = match *self {
            StrategyFixture::GroupBuy {
                lower_limit,
                upper_limit,
                ..
            } => GroupBuy::new(
                product,
                GroupBuyLimits {
                    lower_limit,
                    upper_limit,
                },
            )
            .into(),
            StrategyFixture::FixedDiscount { discount, .. } => {
                FixedDiscount::with_discount(product, discount).into()
            }
        };

        Ok(strategy)
    }
}

/// Parse strategies from YAML and bind them to `catalog`.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or names a product the catalog
/// doesn't list.
pub fn load_strategies_str<'a>(
    yaml: &str,
    catalog: &'a Catalog,
) -> Result<Vec<Strategy<'a>>, ConfigError> {
    let fixture: StrategiesFixture = serde_norway::from_str(yaml)?;

    let strategies = fixture
        .strategies
        .iter()
        .map(|strategy| strategy.bind(catalog))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(strategies)
}

/// Load strategies from a YAML file and bind them to `catalog`.
///
/// # Errors
///
/// Returns an error if the file can't be read or parsed.
pub fn load_strategies_path<'a>(
    path: impl AsRef<Path>,
    catalog: &'a Catalog,
) -> Result<Vec<Strategy<'a>>, ConfigError> {
    let contents = fs::read_to_string(path)?;

    load_strategies_str(&contents, catalog)
}

fn integer_or_missing<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeInteger {
        Integer(i64),
        Other(IgnoredAny),
    }

    Ok(match MaybeInteger::deserialize(deserializer)? {
        MaybeInteger::Integer(value) => Some(value),
        MaybeInteger::Other(_) => None,
    })
}
