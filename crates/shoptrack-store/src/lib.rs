//! # shoptrack-store: Persistence Layer for ShopTrack
//!
//! Implements the core's [`shoptrack_core::storage::Storage`] contract
//! over local JSON files — one file per collection, whole-file overwrites,
//! atomic replacement.
//!
//! ## Module Organization
//!
//! - [`json`] - The `JsonStore` implementation and on-disk layout
//! - [`error`] - File persistence error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shoptrack_core::Shop;
//! use shoptrack_store::JsonStore;
//!
//! let store = JsonStore::open("./data")?;
//! let shop = Shop::open(store)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod json;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use json::JsonStore;
