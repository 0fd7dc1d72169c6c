//! Pricing strategies
//!
//! A pricing strategy replaces the default `quantity × unit price` rule for a
//! single product. Each strategy is bound to one product when it is built and
//! validates its own configuration every time a price is calculated.

use std::fmt;

use thiserror::Error;

use crate::products::{Product, ProductId};

pub mod fixed_discount;
pub mod group_buy;

pub use fixed_discount::FixedDiscount;
pub use group_buy::{GroupBuy, GroupBuyLimits};

/// Errors raised while calculating a strategy price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A required numeric parameter was missing or not an integer.
    #[error("{0} must be of type number")]
    InvalidInputType(&'static str),

    /// Quantity was negative.
    #[error("quantity must be greater or equal to 0, got {0}")]
    NegativeQuantity(i64),

    /// Group buy upper limit was below 2.
    #[error("the group buy upper limit must be at least 2, got {0}")]
    UpperLimitTooSmall(i64),

    /// Group buy lower limit was below 1.
    #[error("the group buy lower limit must be at least 1, got {0}")]
    LowerLimitTooSmall(i64),

    /// Group buy upper limit was not above the lower limit.
    #[error("the upper limit ({upper}) must be greater than the lower limit ({lower})")]
    UpperNotGreaterThanLower {
        /// Configured lower limit
        lower: i64,
        /// Configured upper limit
        upper: i64,
    },

    /// Fixed discount was zero or negative.
    #[error("the fixed discount must be a positive number, got {0}")]
    DiscountNotPositive(i64),

    /// Fixed discount was larger than the product's unit price.
    #[error("the fixed discount ({discount}) must not exceed the unit price of {product} ({unit_price})")]
    DiscountExceedsUnitPrice {
        /// Discounted product
        product: ProductId,
        /// Configured discount in minor units
        discount: i64,
        /// Unit price in minor units
        unit_price: i64,
    },

    /// Price doesn't fit in minor units.
    #[error("price calculation overflowed")]
    Overflow,
}

/// A per-product pricing rule.
pub trait PricingStrategy {
    /// The product this strategy is bound to.
    fn product(&self) -> &Product;

    /// Id of the bound product.
    fn product_id(&self) -> ProductId {
        self.product().id
    }

    /// Check the quantity and the strategy configuration.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`PricingError`].
    fn validate_inputs(&self, quantity: i64) -> Result<(), PricingError>;

    /// Price `quantity` units of the bound product, in minor units.
    ///
    /// A quantity of zero is always free and skips validation.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if validation fails or the price overflows.
    fn calculate_price(&self, quantity: i64) -> Result<i64, PricingError>;
}

/// One of the supported pricing strategies.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy<'a> {
    /// Buy `upper_limit`, pay for `lower_limit`
    GroupBuy(GroupBuy<'a>),

    /// Fixed amount off every unit
    FixedDiscount(FixedDiscount<'a>),
}

impl PricingStrategy for Strategy<'_> {
    fn product(&self) -> &Product {
        match self {
            Strategy::GroupBuy(strategy) => strategy.product(),
            Strategy::FixedDiscount(strategy) => strategy.product(),
        }
    }

    fn validate_inputs(&self, quantity: i64) -> Result<(), PricingError> {
        match self {
            Strategy::GroupBuy(strategy) => strategy.validate_inputs(quantity),
            Strategy::FixedDiscount(strategy) => strategy.validate_inputs(quantity),
        }
    }

    fn calculate_price(&self, quantity: i64) -> Result<i64, PricingError> {
        match self {
            Strategy::GroupBuy(strategy) => strategy.calculate_price(quantity),
            Strategy::FixedDiscount(strategy) => strategy.calculate_price(quantity),
        }
    }
}

impl fmt::Display for Strategy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::GroupBuy(strategy) => fmt::Display::fmt(strategy, f),
            Strategy::FixedDiscount(strategy) => fmt::Display::fmt(strategy, f),
        }
    }
}

impl<'a> From<GroupBuy<'a>> for Strategy<'a> {
    fn from(strategy: GroupBuy<'a>) -> Self {
        Strategy::GroupBuy(strategy)
    }
}

impl<'a> From<FixedDiscount<'a>> for Strategy<'a> {
    fn from(strategy: FixedDiscount<'a>) -> Self {
        Strategy::FixedDiscount(strategy)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::catalog;

    use super::*;

    #[test]
    fn strategy_dispatches_to_group_buy() -> TestResult {
        let strategy: Strategy<'_> =
            GroupBuy::for_product(ProductId::Classic, GroupBuyLimits::new(2, 3))?.into();

        assert_eq!(strategy.product_id(), ProductId::Classic);
        assert_eq!(strategy.calculate_price(3)?, 2 * 26_999);

        Ok(())
    }

    #[test]
    fn strategy_dispatches_to_fixed_discount() -> TestResult {
        let product = catalog::get_product(ProductId::Premium)?;
        let strategy = Strategy::from(FixedDiscount::new(product, 500));

        assert_eq!(strategy.product().name, "Premium ad");
        assert_eq!(strategy.calculate_price(1)?, 38_999);
        assert_eq!(
            strategy.validate_inputs(-1),
            Err(PricingError::NegativeQuantity(-1))
        );

        Ok(())
    }

    #[test]
    fn error_messages_name_the_problem() {
        assert_eq!(
            PricingError::InvalidInputType("discount").to_string(),
            "discount must be of type number"
        );
        assert_eq!(
            PricingError::DiscountExceedsUnitPrice {
                product: ProductId::Premium,
                discount: 50_000,
                unit_price: 39_499,
            }
            .to_string(),
            "the fixed discount (50000) must not exceed the unit price of PREMIUM (39499)"
        );
    }
}
