//! Fixed Discount
//!
//! A flat amount off every unit of the bound product.

use std::fmt;

use crate::{
    catalog::{self, CatalogError},
    prices::Price,
    products::{Product, ProductId},
    strategies::{PricingError, PricingStrategy},
};

/// Fixed per-unit discount for a single product
#[derive(Debug, Clone, PartialEq)]
pub struct FixedDiscount<'a> {
    product: &'a Product,
    discount: Option<i64>,
}

impl<'a> FixedDiscount<'a> {
    /// Create a new fixed discount, in minor units, for the given product.
    pub fn new(product: &'a Product, discount: i64) -> Self {
        Self::with_discount(product, Some(discount))
    }

    /// Create a fixed discount whose amount may be missing.
    ///
    /// A missing amount is reported when a price is calculated.
    pub fn with_discount(product: &'a Product, discount: Option<i64>) -> Self {
        Self { product, discount }
    }

    /// Return the discount in minor units
    pub fn discount(&self) -> Option<i64> {
        self.discount
    }
}

impl FixedDiscount<'static> {
    /// Create a fixed discount for a product in the standard catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if the standard catalog doesn't list the product.
    pub fn for_product(id: ProductId, discount: i64) -> Result<Self, CatalogError> {
        Ok(Self::new(catalog::get_product(id)?, discount))
    }
}

impl FixedDiscount<'_> {
    fn checked_discount(&self, quantity: i64) -> Result<i64, PricingError> {
        let Some(discount) = self.discount else {
            return Err(PricingError::InvalidInputType("discount and quantity"));
        };

        if quantity < 0 {
            return Err(PricingError::NegativeQuantity(quantity));
        }

        if discount <= 0 {
            return Err(PricingError::DiscountNotPositive(discount));
        }

        let unit_price = self.product.unit_price_minor();

        if discount > unit_price {
            return Err(PricingError::DiscountExceedsUnitPrice {
                product: self.product.id,
                discount,
                unit_price,
            });
        }

        Ok(discount)
    }
}

impl fmt::Display for FixedDiscount<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.discount {
            Some(discount) => write!(
                f,
                "{} off each",
                Price::new(discount, self.product.currency())
            ),
            None => f.write_str("fixed discount"),
        }
    }
}

impl PricingStrategy for FixedDiscount<'_> {
    fn product(&self) -> &Product {
        self.product
    }

    fn validate_inputs(&self, quantity: i64) -> Result<(), PricingError> {
        self.checked_discount(quantity).map(|_discount| ())
    }

    fn calculate_price(&self, quantity: i64) -> Result<i64, PricingError> {
        if quantity == 0 {
            return Ok(0);
        }

        let discount = self.checked_discount(quantity)?;

        // discount <= unit price, so this can't go negative
        let discounted_unit = self.product.unit_price_minor() - discount;

        quantity
            .checked_mul(discounted_unit)
            .ok_or(PricingError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn zero_quantity_is_free() -> TestResult {
        let strategy = FixedDiscount::for_product(ProductId::Premium, 10)?;

        assert_eq!(strategy.calculate_price(0)?, 0);

        Ok(())
    }

    #[test]
    fn zero_quantity_skips_validation() -> TestResult {
        let strategy = FixedDiscount::for_product(ProductId::Premium, 999_999_999)?;

        assert_eq!(strategy.calculate_price(0)?, 0);

        Ok(())
    }

    #[test]
    fn negative_quantity_errors() -> TestResult {
        let strategy = FixedDiscount::for_product(ProductId::Premium, 10)?;

        assert_eq!(
            strategy.calculate_price(-1),
            Err(PricingError::NegativeQuantity(-1))
        );

        Ok(())
    }

    #[test]
    fn discount_above_unit_price_errors() -> TestResult {
        let strategy = FixedDiscount::for_product(ProductId::Premium, 999_999_999)?;

        assert_eq!(
            strategy.calculate_price(1),
            Err(PricingError::DiscountExceedsUnitPrice {
                product: ProductId::Premium,
                discount: 999_999_999,
                unit_price: 39_499,
            })
        );

        Ok(())
    }

    #[test]
    fn discount_equal_to_unit_price_is_free() -> TestResult {
        let strategy = FixedDiscount::for_product(ProductId::Premium, 39_499)?;

        assert_eq!(strategy.calculate_price(2)?, 0);

        Ok(())
    }

    #[test]
    fn non_positive_discount_errors() -> TestResult {
        let negative = FixedDiscount::for_product(ProductId::Premium, -10)?;
        let zero = FixedDiscount::for_product(ProductId::Premium, 0)?;

        assert_eq!(
            negative.calculate_price(5),
            Err(PricingError::DiscountNotPositive(-10))
        );
        assert_eq!(
            zero.validate_inputs(5),
            Err(PricingError::DiscountNotPositive(0))
        );

        Ok(())
    }

    #[test]
    fn missing_discount_is_invalid_input() -> TestResult {
        let product = catalog::get_product(ProductId::Premium)?;
        let strategy = FixedDiscount::with_discount(product, None);

        assert!(matches!(
            strategy.calculate_price(1),
            Err(PricingError::InvalidInputType(_))
        ));

        Ok(())
    }

    #[test]
    fn one_premium_drops_to_389_99() -> TestResult {
        let strategy = FixedDiscount::for_product(ProductId::Premium, 500)?;

        assert_eq!(strategy.calculate_price(1)?, 38_999);

        Ok(())
    }

    #[test]
    fn three_premium_drop_to_1169_97() -> TestResult {
        let strategy = FixedDiscount::for_product(ProductId::Premium, 500)?;

        assert_eq!(strategy.calculate_price(3)?, 116_997);

        Ok(())
    }

    #[test]
    fn displays_amount_off() -> TestResult {
        let strategy = FixedDiscount::for_product(ProductId::StandOut, 2_300)?;

        assert_eq!(strategy.to_string(), "$23.00 off each");

        Ok(())
    }

    #[test]
    fn overflow_is_reported() -> TestResult {
        let strategy = FixedDiscount::for_product(ProductId::Classic, 1)?;

        assert_eq!(
            strategy.calculate_price(i64::MAX),
            Err(PricingError::Overflow)
        );

        Ok(())
    }
}
