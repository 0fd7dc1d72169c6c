//! Group Buy
//!
//! "Buy `upper_limit`, pay for `lower_limit`" bundling. Bundles repeat across
//! multiples of `upper_limit`; any leftover units are charged at full price,
//! so 7 units under a 5-for-4 deal cost 4 + 2 = 6 units.

use std::fmt;

use crate::{
    catalog::{self, CatalogError},
    products::{Product, ProductId},
    strategies::{PricingError, PricingStrategy},
};

/// Group buy configuration. Either limit may be missing until validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupBuyLimits {
    /// Number of units charged per bundle
    pub lower_limit: Option<i64>,

    /// Number of units in a bundle
    pub upper_limit: Option<i64>,
}

impl GroupBuyLimits {
    /// Create group buy limits, e.g. `GroupBuyLimits::new(2, 3)` for "3 for 2".
    pub fn new(lower_limit: i64, upper_limit: i64) -> Self {
        Self {
            lower_limit: Some(lower_limit),
            upper_limit: Some(upper_limit),
        }
    }
}

/// Group buy pricing strategy for a single product
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBuy<'a> {
    product: &'a Product,
    limits: GroupBuyLimits,
}

impl<'a> GroupBuy<'a> {
    /// Create a new group buy strategy for the given product.
    pub fn new(product: &'a Product, limits: GroupBuyLimits) -> Self {
        Self { product, limits }
    }

    /// Return the configured limits
    pub fn limits(&self) -> GroupBuyLimits {
        self.limits
    }
}

impl GroupBuy<'static> {
    /// Create a group buy strategy for a product in the standard catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if the standard catalog doesn't list the product.
    pub fn for_product(id: ProductId, limits: GroupBuyLimits) -> Result<Self, CatalogError> {
        Ok(Self::new(catalog::get_product(id)?, limits))
    }
}

impl GroupBuy<'_> {
    fn checked_limits(&self, quantity: i64) -> Result<(i64, i64), PricingError> {
        let (Some(lower), Some(upper)) = (self.limits.lower_limit, self.limits.upper_limit) else {
            return Err(PricingError::InvalidInputType(
                "lower_limit, upper_limit and quantity",
            ));
        };

        if quantity < 0 {
            return Err(PricingError::NegativeQuantity(quantity));
        }

        if upper < 2 {
            return Err(PricingError::UpperLimitTooSmall(upper));
        }

        if lower < 1 {
            return Err(PricingError::LowerLimitTooSmall(lower));
        }

        if upper <= lower {
            return Err(PricingError::UpperNotGreaterThanLower { lower, upper });
        }

        Ok((lower, upper))
    }
}

impl fmt::Display for GroupBuy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.limits.lower_limit, self.limits.upper_limit) {
            (Some(lower), Some(upper)) => write!(f, "{upper} for {lower}"),
            _ => f.write_str("group buy"),
        }
    }
}

impl PricingStrategy for GroupBuy<'_> {
    fn product(&self) -> &Product {
        self.product
    }

    fn validate_inputs(&self, quantity: i64) -> Result<(), PricingError> {
        self.checked_limits(quantity).map(|_limits| ())
    }

    fn calculate_price(&self, quantity: i64) -> Result<i64, PricingError> {
        if quantity == 0 {
            return Ok(0);
        }

        let (lower, upper) = self.checked_limits(quantity)?;
        let unit_price = self.product.unit_price_minor();

        let groups = quantity / upper;
        let remainder = quantity % upper;

        let grouped = groups
            .checked_mul(lower)
            .and_then(|units| units.checked_mul(unit_price))
            .ok_or(PricingError::Overflow)?;

        remainder
            .checked_mul(unit_price)
            .and_then(|rest| grouped.checked_add(rest))
            .ok_or(PricingError::Overflow)
    }
}
