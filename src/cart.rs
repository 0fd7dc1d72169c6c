//! Cart

use rustc_hash::FxHashMap;

use crate::{
    catalog::{Catalog, CatalogError},
    products::ProductId,
};

/// Quantities of each catalog product in a checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    quantities: FxHashMap<ProductId, u64>,
}

impl Cart {
    /// Create an empty cart with a zero quantity for every catalog product.
    pub fn new(catalog: &Catalog) -> Self {
        Cart {
            quantities: catalog.products().map(|product| (product.id, 0)).collect(),
        }
    }

    /// Add one unit of a product, returning the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if the cart wasn't created
    /// with a catalog listing the product.
    pub fn add(&mut self, id: ProductId) -> Result<u64, CatalogError> {
        let quantity = self
            .quantities
            .get_mut(&id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.to_string()))?;

        *quantity = quantity.saturating_add(1);

        Ok(*quantity)
    }

    /// Quantity of a product; zero for products outside the cart.
    pub fn quantity(&self, id: ProductId) -> u64 {
        self.quantities.get(&id).copied().unwrap_or_default()
    }

    /// Total number of units across every product.
    pub fn len(&self) -> u64 {
        self.quantities
            .values()
            .fold(0, |total, quantity| total.saturating_add(*quantity))
    }

    /// Check if no units have been added.
    pub fn is_empty(&self) -> bool {
        self.quantities.values().all(|quantity| *quantity == 0)
    }
}
