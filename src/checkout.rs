//! Checkout
//!
//! Accumulates a cart and prices it. Each product is priced by its assigned
//! strategy, or at full unit price when it has none. Totals are recomputed
//! from the cart on every call.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    cart::Cart,
    catalog::{self, Catalog, CatalogError},
    prices::Price,
    products::{Product, ProductId},
    receipt::{Receipt, ReceiptLine},
    strategies::{PricingError, PricingStrategy, Strategy},
};

/// Errors raised by checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Product lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A pricing strategy rejected its inputs.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Total doesn't fit in minor units.
    #[error("checkout total overflowed")]
    Overflow,
}

/// Which strategy, if any, prices each catalog product.
#[derive(Debug, Clone, Default)]
pub struct StrategyAssignment<'a> {
    strategies: FxHashMap<ProductId, Option<Strategy<'a>>>,
}

impl<'a> StrategyAssignment<'a> {
    /// Assign strategies to the products of a catalog.
    ///
    /// When several strategies target the same product the last one wins.
    /// Strategies for products outside the catalog, or bound to a product
    /// record other than the catalog's own, are ignored.
    pub fn new<I, S>(catalog: &Catalog, strategies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Strategy<'a>>,
    {
        let mut assigned: FxHashMap<ProductId, Option<Strategy<'a>>> =
            catalog.products().map(|product| (product.id, None)).collect();

        for strategy in strategies {
            let strategy = strategy.into();
            let product = strategy.product_id();

            let Some(slot) = assigned.get_mut(&product) else {
                warn!(%product, %strategy, "ignoring pricing strategy for product outside the catalog");
                continue;
            };

            // The bound product must be this catalog's own record
            if catalog.product(product).ok() != Some(strategy.product()) {
                warn!(%product, %strategy, "ignoring pricing strategy bound to another catalog's product");
                continue;
            }

            if let Some(previous) = slot.replace(strategy) {
                warn!(%product, %previous, "replacing earlier pricing strategy");
            }
        }

        StrategyAssignment {
            strategies: assigned,
        }
    }

    /// Strategy assigned to a product.
    pub fn get(&self, id: ProductId) -> Option<&Strategy<'a>> {
        self.strategies.get(&id).and_then(Option::as_ref)
    }
}

/// A single customer's checkout session.
#[derive(Debug, Clone)]
pub struct Checkout<'a> {
    catalog: &'a Catalog,
    cart: Cart,
    strategies: StrategyAssignment<'a>,
}

impl Checkout<'static> {
    /// Create a checkout over the standard catalog.
    pub fn new<I, S>(strategies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Strategy<'static>>,
    {
        Self::with_catalog(catalog::standard(), strategies)
    }
}

impl Default for Checkout<'static> {
    fn default() -> Self {
        Self::new(std::iter::empty::<Strategy<'static>>())
    }
}

impl<'a> Checkout<'a> {
    /// Create a checkout over the given catalog.
    pub fn with_catalog<I, S>(catalog: &'a Catalog, strategies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Strategy<'a>>,
    {
        Checkout {
            catalog,
            cart: Cart::new(catalog),
            strategies: StrategyAssignment::new(catalog, strategies),
        }
    }

    /// Add one unit of a product.
    ///
    /// Returns the checkout so calls can be chained with `?`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if the catalog doesn't list the product.
    pub fn add_item(&mut self, id: ProductId) -> Result<&mut Self, CheckoutError> {
        let quantity = self.cart.add(id)?;

        trace!(product = %id, quantity, "added item");

        Ok(self)
    }

    /// Number of units of a product in the cart.
    pub fn quantity(&self, id: ProductId) -> u64 {
        self.cart.quantity(id)
    }

    /// Cart contents
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Catalog the checkout prices against
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Strategy assigned to a product, if any
    pub fn strategy(&self, id: ProductId) -> Option<&Strategy<'a>> {
        self.strategies.get(id)
    }

    /// Currency of every total
    pub fn currency(&self) -> &'static Currency {
        self.catalog.currency()
    }

    /// Calculate the total price of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if a strategy rejects its inputs or the
    /// total overflows. The cart is left untouched.
    pub fn compute_total(&self) -> Result<Money<'static, Currency>, CheckoutError> {
        let total = self
            .catalog
            .products()
            .try_fold(0_i64, |total, product| -> Result<i64, CheckoutError> {
                let quantity = self.quantity_of(product.id)?;
                let line_total = self.line_total(product, quantity)?;

                debug!(product = %product.id, quantity, line_total, "priced line");

                total
                    .checked_add(line_total)
                    .ok_or(CheckoutError::Overflow)
            })?;

        debug!(total, "computed checkout total");

        Ok(Money::from_minor(total, self.currency()))
    }

    /// Calculate the total and format it for display, e.g. `$539.98`.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the total can't be calculated.
    pub fn formatted_total(&self) -> Result<String, CheckoutError> {
        Ok(Price::from(self.compute_total()?).to_string())
    }

    /// Total of the cart at full unit prices.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Overflow`] if the subtotal overflows.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, CheckoutError> {
        let subtotal = self
            .catalog
            .products()
            .try_fold(0_i64, |subtotal, product| -> Result<i64, CheckoutError> {
                let line = full_price(product, self.quantity_of(product.id)?)?;

                subtotal
                    .checked_add(line)
                    .ok_or(CheckoutError::Overflow)
            })?;

        Ok(Money::from_minor(subtotal, self.currency()))
    }

    /// Amount saved by the assigned strategies.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if either total can't be calculated.
    pub fn savings(&self) -> Result<Money<'static, Currency>, CheckoutError> {
        let subtotal = self.subtotal()?.to_minor_units();
        let total = self.compute_total()?.to_minor_units();

        let savings = subtotal
            .checked_sub(total)
            .ok_or(CheckoutError::Overflow)?;

        Ok(Money::from_minor(savings, self.currency()))
    }

    /// Build a per-product receipt for the current cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if any line can't be priced.
    pub fn receipt(&self) -> Result<Receipt, CheckoutError> {
        let lines = self
            .catalog
            .products()
            .filter(|product| self.cart.quantity(product.id) > 0)
            .map(|product| -> Result<ReceiptLine, CheckoutError> {
                let quantity = self.quantity_of(product.id)?;
                let strategy = self.strategies.get(product.id);

                Ok(ReceiptLine {
                    product: product.id,
                    name: product.name.clone(),
                    quantity: self.cart.quantity(product.id),
                    subtotal: Price::new(full_price(product, quantity)?, self.currency()),
                    total: Price::new(self.line_total(product, quantity)?, self.currency()),
                    strategy: strategy.map(ToString::to_string),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Receipt::new(lines, self.currency())
    }

    fn quantity_of(&self, id: ProductId) -> Result<i64, CheckoutError> {
        i64::try_from(self.cart.quantity(id)).map_err(|_err| CheckoutError::Overflow)
    }

    fn line_total(&self, product: &Product, quantity: i64) -> Result<i64, CheckoutError> {
        match self.strategies.get(product.id) {
            Some(strategy) => Ok(strategy.calculate_price(quantity)?),
            None => full_price(product, quantity),
        }
    }
}

fn full_price(product: &Product, quantity: i64) -> Result<i64, CheckoutError> {
    quantity
        .checked_mul(product.unit_price_minor())
        .ok_or(CheckoutError::Overflow)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{AUD, GBP};
    use testresult::TestResult;

    use crate::strategies::{FixedDiscount, GroupBuy, GroupBuyLimits};

    use super::*;

    const PARTIAL_CATALOG: &str = r#"
currency: AUD
products:
  CLASSIC:
    name: Classic ad
    price: "100.00 AUD"
"#;

    #[test]
    fn empty_checkout_totals_zero() -> TestResult {
        let checkout = Checkout::default();

        assert_eq!(checkout.compute_total()?, Money::from_minor(0, AUD));
        assert_eq!(checkout.formatted_total()?, "$0.00");

        Ok(())
    }

    #[test]
    fn add_item_chains() -> TestResult {
        let mut checkout = Checkout::default();

        checkout
            .add_item(ProductId::Classic)?
            .add_item(ProductId::Classic)?
            .add_item(ProductId::Premium)?;

        assert_eq!(checkout.quantity(ProductId::Classic), 2);
        assert_eq!(checkout.quantity(ProductId::Premium), 1);
        assert_eq!(checkout.quantity(ProductId::StandOut), 0);

        Ok(())
    }

    #[test]
    fn unassigned_products_use_unit_price() -> TestResult {
        let mut checkout = Checkout::default();

        checkout.add_item(ProductId::Premium)?;

        assert_eq!(checkout.compute_total()?, Money::from_minor(39_499, AUD));
        assert_eq!(checkout.formatted_total()?, "$394.99");

        Ok(())
    }

    #[test]
    fn last_strategy_for_a_product_wins() -> TestResult {
        let checkout = Checkout::new([
            Strategy::from(FixedDiscount::for_product(ProductId::Classic, 1_000)?),
            Strategy::from(GroupBuy::for_product(
                ProductId::Classic,
                GroupBuyLimits::new(2, 3),
            )?),
        ]);

        assert!(matches!(
            checkout.strategy(ProductId::Classic),
            Some(Strategy::GroupBuy(_))
        ));
        assert!(checkout.strategy(ProductId::Premium).is_none());

        Ok(())
    }

    #[test]
    fn totals_reflect_items_added_after_a_previous_total() -> TestResult {
        let mut checkout = Checkout::new([GroupBuy::for_product(
            ProductId::Classic,
            GroupBuyLimits::new(2, 3),
        )?]);

        checkout.add_item(ProductId::Classic)?;
        checkout.add_item(ProductId::Classic)?;
        assert_eq!(checkout.formatted_total()?, "$539.98");

        checkout.add_item(ProductId::Classic)?;
        assert_eq!(checkout.formatted_total()?, "$539.98");

        checkout.add_item(ProductId::Classic)?;
        assert_eq!(checkout.formatted_total()?, "$809.97");

        Ok(())
    }

    #[test]
    fn repeated_totals_are_identical() -> TestResult {
        let mut checkout = Checkout::new([FixedDiscount::for_product(ProductId::Premium, 500)?]);

        checkout.add_item(ProductId::Premium)?.add_item(ProductId::Classic)?;

        let first = checkout.compute_total()?;

        assert_eq!(checkout.compute_total()?, first);
        assert_eq!(checkout.formatted_total()?, checkout.formatted_total()?);

        Ok(())
    }

    #[test]
    fn invalid_strategy_fails_total_without_touching_the_cart() -> TestResult {
        let mut checkout = Checkout::new([FixedDiscount::for_product(ProductId::Premium, 0)?]);

        checkout.add_item(ProductId::Premium)?;

        assert!(matches!(
            checkout.compute_total(),
            Err(CheckoutError::Pricing(PricingError::DiscountNotPositive(0)))
        ));
        assert!(matches!(
            checkout.formatted_total(),
            Err(CheckoutError::Pricing(PricingError::DiscountNotPositive(0)))
        ));
        assert_eq!(checkout.quantity(ProductId::Premium), 1);

        Ok(())
    }

    #[test]
    fn invalid_strategy_is_ignored_while_its_product_is_absent() -> TestResult {
        let mut checkout = Checkout::new([FixedDiscount::for_product(ProductId::Premium, 0)?]);

        checkout.add_item(ProductId::Classic)?;

        assert_eq!(checkout.formatted_total()?, "$269.99");

        Ok(())
    }

    #[test]
    fn subtotal_and_savings() -> TestResult {
        let mut checkout = Checkout::new([GroupBuy::for_product(
            ProductId::StandOut,
            GroupBuyLimits::new(4, 5),
        )?]);

        for _ in 0..5 {
            checkout.add_item(ProductId::StandOut)?;
        }

        assert_eq!(checkout.subtotal()?, Money::from_minor(5 * 32_299, AUD));
        assert_eq!(checkout.compute_total()?, Money::from_minor(4 * 32_299, AUD));
        assert_eq!(checkout.savings()?, Money::from_minor(32_299, AUD));

        Ok(())
    }

    #[test]
    fn custom_catalog_prices_and_rejects_unlisted_products() -> TestResult {
        let catalog = Catalog::from_yaml_str(PARTIAL_CATALOG)?;
        let classic = catalog.product(ProductId::Classic)?;

        let mut checkout = Checkout::with_catalog(
            &catalog,
            [
                Strategy::from(FixedDiscount::new(classic, 2_500)),
                Strategy::from(FixedDiscount::for_product(ProductId::Premium, 500)?),
            ],
        );

        checkout.add_item(ProductId::Classic)?;

        assert!(matches!(
            checkout.add_item(ProductId::Premium),
            Err(CheckoutError::Catalog(CatalogError::UnknownProduct(_)))
        ));
        assert!(checkout.strategy(ProductId::Premium).is_none());
        assert_eq!(checkout.formatted_total()?, "$75.00");

        Ok(())
    }

    #[test]
    fn strategies_bound_to_another_catalog_are_ignored() -> TestResult {
        let catalog = Catalog::from_yaml_str(
            r#"
currency: GBP
products:
  CLASSIC:
    name: Classic ad
    price: "100.00 GBP"
"#,
        )?;

        let mut checkout = Checkout::with_catalog(
            &catalog,
            [GroupBuy::for_product(
                ProductId::Classic,
                GroupBuyLimits::new(2, 3),
            )?],
        );

        checkout
            .add_item(ProductId::Classic)?
            .add_item(ProductId::Classic)?
            .add_item(ProductId::Classic)?;

        assert!(checkout.strategy(ProductId::Classic).is_none());
        assert_eq!(checkout.formatted_total()?, "£300.00");
        assert_eq!(checkout.savings()?, Money::from_minor(0, GBP));
        assert_eq!(checkout.receipt()?.savings().to_money(), checkout.savings()?);

        Ok(())
    }

    #[test]
    fn strategies_bound_to_the_catalog_still_apply() -> TestResult {
        let catalog = Catalog::from_yaml_str(
            r#"
currency: GBP
products:
  CLASSIC:
    name: Classic ad
    price: "100.00 GBP"
"#,
        )?;
        let classic = catalog.product(ProductId::Classic)?;

        let mut checkout = Checkout::with_catalog(
            &catalog,
            [GroupBuy::new(classic, GroupBuyLimits::new(2, 3))],
        );

        for _ in 0..3 {
            checkout.add_item(ProductId::Classic)?;
        }

        assert_eq!(checkout.formatted_total()?, "£200.00");
        assert_eq!(checkout.savings()?, Money::from_minor(10_000, GBP));

        Ok(())
    }

    #[test]
    fn receipt_lists_purchased_products() -> TestResult {
        let mut checkout = Checkout::new([FixedDiscount::for_product(ProductId::Premium, 500)?]);

        checkout
            .add_item(ProductId::Premium)?
            .add_item(ProductId::Premium)?
            .add_item(ProductId::Classic)?;

        let receipt = checkout.receipt()?;
        let lines = receipt.lines();

        assert_eq!(lines.len(), 2);
        assert_eq!(*receipt.total(), 2 * 38_999 + 26_999);
        assert_eq!(*receipt.subtotal(), 2 * 39_499 + 26_999);
        assert_eq!(
            receipt.total().to_money(),
            checkout.compute_total()?
        );

        Ok(())
    }
}
