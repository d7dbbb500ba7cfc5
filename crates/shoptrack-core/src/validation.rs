//! # Validation Module
//!
//! Input validation utilities for ShopTrack.
//!
//! Validation runs before business logic so every ledger mutation starts
//! from arguments that are already well-formed. The functions here check
//! shape only (empty, length, sign, range order); domain rules such as
//! uniqueness and stock sufficiency live in the ledger and coordinator.
//!
//! ## Usage
//! ```rust
//! use shoptrack_core::validation::{validate_product_id, validate_quantity};
//!
//! validate_product_id("A101").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product business id.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 40 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required { field: "product id" });
    }

    if id.len() > 40 {
        return Err(ValidationError::TooLong {
            field: "product id",
            max: 40,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name",
            max: 200,
        });
    }

    Ok(())
}

/// Validates a supplier name. Empty is rejected; anything printable goes.
pub fn validate_supplier_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "supplier name",
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale or purchase quantity: strictly positive.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }
    Ok(())
}

/// Validates a purchase cost price: strictly positive.
pub fn validate_cost_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive { field: "cost price" });
    }
    Ok(())
}

/// Validates product prices on an upsert: non-negative (free items allowed).
pub fn validate_price(field: &'static str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBePositive { field });
    }
    Ok(())
}

/// Validates a report span width in days: at least 1.
///
/// A zero-day span is a caller bug, not a request for 1-day windows, so
/// it is rejected rather than clamped.
pub fn validate_span_days(span_days: u32) -> ValidationResult<()> {
    if span_days < 1 {
        return Err(ValidationError::TooSmall {
            field: "span days",
            min: 1,
        });
    }
    Ok(())
}

/// Validates a best-seller ranking size: at least 1.
pub fn validate_top_n(top_n: usize) -> ValidationResult<()> {
    if top_n < 1 {
        return Err(ValidationError::TooSmall {
            field: "top n",
            min: 1,
        });
    }
    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates that a report date range is ordered (start <= end).
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> ValidationResult<()> {
    if start > end {
        return Err(ValidationError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
