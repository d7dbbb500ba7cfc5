//! # Domain Types
//!
//! Core domain types used throughout ShopTrack.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌──────────────────┐   ┌───────────────┐       │
//! │  │   Product     │   │ SalesTransaction │   │   Purchase    │       │
//! │  │ ───────────── │   │ ──────────────── │   │ ───────────── │       │
//! │  │ id (business) │   │ id (UUID)        │   │ id (UUID)     │       │
//! │  │ name          │   │ recorded_at      │   │ product_id    │       │
//! │  │ cost_price    │   │ payment_method   │   │ quantity      │       │
//! │  │ selling_price │   │ recorded_by      │   │ cost_price    │       │
//! │  │ stock         │   │ lines: 1..*      │   │ supplier_name │       │
//! │  └───────────────┘   └──────────────────┘   └───────────────┘       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `SaleLine` freezes the product's prices at commit time. Later edits to
//! the product never change what a historical transaction reports.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product held in the stock ledger.
///
/// Identity is the business `id` (e.g. `A101`), unique case-insensitively
/// across the live product set, as is `name`. Stock is mutated only through
/// `StockLedger::apply_stock_delta`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Business identifier, unique (case-insensitive).
    pub id: String,

    /// Display name, unique (case-insensitive).
    pub name: String,

    /// Free-form category label.
    pub category: String,

    /// Current cost price per unit; updated by each supplier purchase.
    pub cost_price: Money,

    /// Current selling price per unit.
    pub selling_price: Money,

    /// Units on hand. Never driven below zero through the sale coordinator.
    pub stock: i64,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        cost_price: Money,
        selling_price: Money,
        stock: i64,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            cost_price,
            selling_price,
            stock,
        }
    }

    /// Checks whether `quantity` units could be sold from current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
}

// =============================================================================
// Sale Line
// =============================================================================

/// One product line within a sales transaction.
///
/// Uses the snapshot pattern: `unit_selling_price` and `unit_cost_price`
/// are the product's prices at commit time and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    /// Line identifier (UUID v4).
    pub id: String,

    /// Product sold (canonical ledger id).
    pub product_id: String,

    /// Units sold on this line. Always > 0.
    pub quantity: i64,

    /// Selling price per unit at commit time (frozen).
    pub unit_selling_price: Money,

    /// Cost price per unit at commit time (frozen, for P&L).
    pub unit_cost_price: Money,
}

impl SaleLine {
    /// Revenue contributed by this line (quantity × unit selling price).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_selling_price.multiply_quantity(self.quantity)
    }

    /// Cost of goods for this line (quantity × unit cost price).
    #[inline]
    pub fn line_cost(&self) -> Money {
        self.unit_cost_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sales Transaction
// =============================================================================

/// A committed multi-line sale.
///
/// Created atomically by the sale coordinator and immutable once persisted.
/// Totals are derived from the lines on demand — there is no stored total
/// field to fall out of sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTransaction {
    /// Transaction identifier (UUID v4).
    pub id: String,

    /// When the sale was committed. `None` only for records hydrated from
    /// data files that predate the field; such records are excluded from
    /// date-windowed reports.
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,

    /// How the customer paid.
    pub payment_method: PaymentMethod,

    /// Username of the actor who recorded the sale.
    pub recorded_by: String,

    /// Ordered line items. Never empty for a committed transaction.
    pub lines: Vec<SaleLine>,
}

impl SalesTransaction {
    /// Total revenue: Σ quantity × unit selling price over all lines.
    pub fn total_revenue(&self) -> Money {
        self.lines.iter().map(SaleLine::line_total).sum()
    }

    /// Total cost of goods sold: Σ quantity × unit cost price over all lines.
    pub fn total_cost(&self) -> Money {
        self.lines.iter().map(SaleLine::line_cost).sum()
    }

    /// The calendar date the sale was committed, if it carries a timestamp.
    pub fn date(&self) -> Option<NaiveDate> {
        self.recorded_at.map(|ts| ts.date_naive())
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A supplier purchase that added stock. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    /// Purchase identifier (UUID v4).
    pub id: String,

    /// Product restocked.
    pub product_id: String,

    /// Units bought. Always > 0.
    pub quantity: i64,

    /// Cost per unit paid to the supplier; becomes the product's new cost price.
    pub cost_price: Money,

    /// Purchase date.
    pub date: NaiveDate,

    /// Supplier name, stored directly for simplified data entry.
    pub supplier_name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn line(qty: i64, sell_cents: i64, cost_cents: i64) -> SaleLine {
        SaleLine {
            id: "line-1".to_string(),
            product_id: "A101".to_string(),
            quantity: qty,
            unit_selling_price: Money::from_cents(sell_cents),
            unit_cost_price: Money::from_cents(cost_cents),
        }
    }

    #[test]
    fn test_line_totals() {
        let l = line(3, 1250, 500);
        assert_eq!(l.line_total().cents(), 3750);
        assert_eq!(l.line_cost().cents(), 1500);
    }

    #[test]
    fn test_transaction_totals_derive_from_lines() {
        let tx = SalesTransaction {
            id: "tx-1".to_string(),
            recorded_at: Some(Utc::now()),
            payment_method: PaymentMethod::Cash,
            recorded_by: "amira".to_string(),
            lines: vec![line(2, 1000, 400), line(1, 500, 250)],
        };
        assert_eq!(tx.total_revenue().cents(), 2500);
        assert_eq!(tx.total_cost().cents(), 1050);
    }

    #[test]
    fn test_missing_timestamp_deserializes_to_none() {
        // Legacy records persisted before the timestamp field existed.
        let json = r#"{
            "id": "tx-legacy",
            "payment_method": "cash",
            "recorded_by": "amira",
            "lines": []
        }"#;
        let tx: SalesTransaction = serde_json::from_str(json).unwrap();
        assert!(tx.recorded_at.is_none());
        assert!(tx.date().is_none());
    }

    #[test]
    fn test_can_sell() {
        let p = Product::new(
            "A101",
            "Green Tea 500g",
            "Beverages",
            Money::from_cents(500),
            Money::from_cents(1250),
            10,
        );
        assert!(p.can_sell(10));
        assert!(!p.can_sell(11));
    }
}
