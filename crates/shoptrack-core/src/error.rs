//! # Error Types
//!
//! Domain-specific error types for shoptrack-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  shoptrack-core errors (this file)                                  │
//! │  ├── CoreError        - Domain rule violations                      │
//! │  ├── ValidationError  - Input validation failures                   │
//! │  └── StorageError     - Persistence collaborator failures           │
//! │      (declared in storage.rs, wrapped here)                         │
//! │                                                                     │
//! │  shoptrack-store errors (separate crate)                            │
//! │  └── StoreError       - File I/O and JSON failures                  │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → caller displays a message      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, available stock, ...)
//! 3. Errors are enum variants, never String
//! 4. Every variant is recoverable by the caller; nothing here panics

use thiserror::Error;

use crate::storage::StorageError;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The acting user's role does not permit the operation.
    #[error("Access denied: {operation} requires the {required} role")]
    AccessDenied {
        operation: &'static str,
        required: &'static str,
    },

    /// Product cannot be found in the ledger.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with this id already exists.
    #[error("Duplicate product id: '{0}' already exists")]
    DuplicateId(String),

    /// Another product already holds this name.
    #[error("Duplicate product name: '{0}' already exists")]
    DuplicateName(String),

    /// Insufficient stock to commit a sale.
    ///
    /// ## When This Occurs
    /// - A sale's combined demand for one product exceeds its current stock
    /// - The demand is aggregated across duplicate lines first, so two lines
    ///   of 6 against a stock of 10 fail here rather than half-committing
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// A product with remaining stock cannot be removed.
    #[error("Cannot remove {product_id}: {remaining} units still in stock")]
    StockRemaining { product_id: String, remaining: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The persistence collaborator failed outright (e.g. during hydration).
    ///
    /// A save failure *after* a successful in-memory mutation is NOT
    /// reported through this variant — see `shop::Durability`.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Numeric value is out of range.
    #[error("{field} must be at least {min}")]
    TooSmall { field: &'static str, min: i64 },

    /// A date range whose end precedes its start.
    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: "A101".to_string(),
            available: 10,
            requested: 12,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for A101: available 10, requested 12"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "name" };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive { field: "quantity" };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required { field: "product id" };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
