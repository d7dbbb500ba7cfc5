//! # Stock Ledger
//!
//! The authoritative in-memory record of products, their prices and stock.
//!
//! ## Single Gate Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Stock Mutation Paths                            │
//! │                                                                     │
//! │  Sale commit ───────(negative delta)──────┐                         │
//! │                                           ▼                         │
//! │  Purchase ──────────(positive delta)──► apply_stock_delta()         │
//! │                                           │                         │
//! │                                           ▼                         │
//! │                                     Product.stock                   │
//! │                                                                     │
//! │  upsert() merges name/category/prices and NEVER touches stock.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identity and name are each unique across the live set, compared
//! case-insensitively (`a101` and `A101` are the same product).

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_price, validate_product_id, validate_product_name};

// =============================================================================
// Stock Ledger
// =============================================================================

/// Owns the live product set.
///
/// Backed by a plain vector: a single-location shop carries hundreds of
/// products, not millions, and the vector preserves insertion order for
/// stable listings.
#[derive(Debug, Default)]
pub struct StockLedger {
    products: Vec<Product>,
}

impl StockLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        StockLedger::default()
    }

    /// Hydrates a ledger from a previously persisted product collection.
    pub fn from_products(products: Vec<Product>) -> Self {
        StockLedger { products }
    }

    /// Looks a product up by business id, case-insensitively.
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    /// Looks a product up by name, case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Inserts a new product or merges an update into an existing one.
    ///
    /// ## Contract
    /// - `is_new`: fails with `DuplicateId` when the id is already taken,
    ///   and with `DuplicateName` when any product holds the name.
    /// - update: the id must resolve to the update target
    ///   (`ProductNotFound` otherwise); `DuplicateName` when a *different*
    ///   product holds the name. On success name, category and both prices
    ///   are merged; stock is left untouched — stock changes go through
    ///   [`StockLedger::apply_stock_delta`] only.
    pub fn upsert(&mut self, product: Product, is_new: bool) -> CoreResult<()> {
        validate_product_id(&product.id)?;
        validate_product_name(&product.name)?;
        validate_price("cost price", product.cost_price)?;
        validate_price("selling price", product.selling_price)?;

        if is_new {
            if self.find_by_id(&product.id).is_some() {
                return Err(CoreError::DuplicateId(product.id));
            }
            if self.find_by_name(&product.name).is_some() {
                return Err(CoreError::DuplicateName(product.name));
            }

            debug!(id = %product.id, name = %product.name, "inserting product");
            self.products.push(product);
            return Ok(());
        }

        // Name collision against any *other* product; the target itself may
        // of course keep its name.
        if let Some(holder) = self.find_by_name(&product.name) {
            if !holder.id.eq_ignore_ascii_case(&product.id) {
                return Err(CoreError::DuplicateName(product.name));
            }
        }

        let target = self
            .products
            .iter_mut()
            .find(|p| p.id.eq_ignore_ascii_case(&product.id))
            .ok_or_else(|| CoreError::ProductNotFound(product.id.clone()))?;

        debug!(id = %target.id, "updating product details");
        target.name = product.name;
        target.category = product.category;
        target.cost_price = product.cost_price;
        target.selling_price = product.selling_price;
        Ok(())
    }

    /// Applies a stock delta and returns the new quantity.
    ///
    /// The single gate for every stock mutation. Negative deltas that would
    /// drive stock below zero fail with `InsufficientStock` carrying the
    /// available and requested quantities.
    pub fn apply_stock_delta(&mut self, id: &str, delta: i64) -> CoreResult<i64> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        if delta < 0 && product.stock + delta < 0 {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: product.stock,
                requested: -delta,
            });
        }

        product.stock += delta;
        debug!(id = %product.id, delta, stock = product.stock, "stock delta applied");
        Ok(product.stock)
    }

    /// Sets a product's cost price (each supplier purchase re-prices it).
    pub fn set_cost_price(&mut self, id: &str, cost_price: Money) -> CoreResult<()> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        product.cost_price = cost_price;
        Ok(())
    }

    /// Removes a product. Fails with `StockRemaining` while units are left;
    /// sell or write the stock off first.
    pub fn remove(&mut self, id: &str) -> CoreResult<Product> {
        let idx = self
            .products
            .iter()
            .position(|p| p.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        if self.products[idx].stock > 0 {
            return Err(CoreError::StockRemaining {
                product_id: self.products[idx].id.clone(),
                remaining: self.products[idx].stock,
            });
        }

        Ok(self.products.remove(idx))
    }

    /// Snapshot copy of all products.
    pub fn products(&self) -> Vec<Product> {
        self.products.clone()
    }

    /// Borrowed view for report lookups.
    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, stock: i64) -> Product {
        Product::new(
            id,
            name,
            "General",
            Money::from_cents(500),
            Money::from_cents(1250),
            stock,
        )
    }

    fn ledger_with(products: &[(&str, &str, i64)]) -> StockLedger {
        let mut ledger = StockLedger::new();
        for (id, name, stock) in products {
            ledger.upsert(product(id, name, *stock), true).unwrap();
        }
        ledger
    }

    #[test]
    fn test_find_by_id_is_case_insensitive() {
        let ledger = ledger_with(&[("A101", "Green Tea 500g", 10)]);
        assert!(ledger.find_by_id("a101").is_some());
        assert!(ledger.find_by_id("A101").is_some());
        assert!(ledger.find_by_id("A102").is_none());
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        let ledger = ledger_with(&[("A101", "Green Tea 500g", 10)]);
        assert!(ledger.find_by_name("green tea 500g").is_some());
        assert!(ledger.find_by_name("Black Tea").is_none());
    }

    #[test]
    fn test_insert_duplicate_id_rejected() {
        let mut ledger = ledger_with(&[("A101", "Green Tea 500g", 10)]);
        let err = ledger
            .upsert(product("a101", "Different Name", 0), true)
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(_)));
    }

    #[test]
    fn test_insert_duplicate_name_rejected() {
        let mut ledger = ledger_with(&[("A101", "Green Tea 500g", 10)]);
        let err = ledger
            .upsert(product("A102", "GREEN TEA 500G", 0), true)
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateName(_)));
    }

    #[test]
    fn test_update_merges_details_but_not_stock() {
        let mut ledger = ledger_with(&[("A101", "Green Tea 500g", 10)]);

        let mut update = product("A101", "Green Tea 1kg", 0);
        update.selling_price = Money::from_cents(1999);
        ledger.upsert(update, false).unwrap();

        let p = ledger.find_by_id("A101").unwrap();
        assert_eq!(p.name, "Green Tea 1kg");
        assert_eq!(p.selling_price.cents(), 1999);
        // Stock untouched by the upsert even though the update carried 0.
        assert_eq!(p.stock, 10);
    }

    #[test]
    fn test_update_may_keep_own_name() {
        let mut ledger = ledger_with(&[("A101", "Green Tea 500g", 10)]);
        // Same name, same product: not a duplicate.
        assert!(ledger.upsert(product("A101", "Green Tea 500g", 0), false).is_ok());
    }

    #[test]
    fn test_update_rejects_name_held_by_other_product() {
        let mut ledger = ledger_with(&[
            ("A101", "Green Tea 500g", 10),
            ("A102", "Black Tea 500g", 5),
        ]);
        let err = ledger
            .upsert(product("A102", "Green Tea 500g", 0), false)
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateName(_)));
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut ledger = StockLedger::new();
        let err = ledger.upsert(product("A101", "Green Tea", 0), false).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }

    #[test]
    fn test_stock_delta_happy_paths() {
        let mut ledger = ledger_with(&[("A101", "Green Tea 500g", 10)]);

        assert_eq!(ledger.apply_stock_delta("A101", 5).unwrap(), 15);
        assert_eq!(ledger.apply_stock_delta("a101", -15).unwrap(), 0);
    }

    #[test]
    fn test_stock_delta_insufficient() {
        let mut ledger = ledger_with(&[("A101", "Green Tea 500g", 10)]);

        let err = ledger.apply_stock_delta("A101", -11).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            } => {
                assert_eq!(product_id, "A101");
                assert_eq!(available, 10);
                assert_eq!(requested, 11);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Failed delta leaves stock untouched.
        assert_eq!(ledger.find_by_id("A101").unwrap().stock, 10);
    }

    #[test]
    fn test_stock_delta_unknown_product() {
        let mut ledger = StockLedger::new();
        let err = ledger.apply_stock_delta("A101", 1).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }

    #[test]
    fn test_remove_requires_zero_stock() {
        let mut ledger = ledger_with(&[("A101", "Green Tea 500g", 3)]);

        let err = ledger.remove("A101").unwrap_err();
        assert!(matches!(err, CoreError::StockRemaining { remaining: 3, .. }));

        ledger.apply_stock_delta("A101", -3).unwrap();
        let removed = ledger.remove("a101").unwrap();
        assert_eq!(removed.id, "A101");
        assert!(ledger.is_empty());
    }
}
