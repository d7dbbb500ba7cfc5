//! # Storage Seam
//!
//! The persistence collaborator contract consumed by the core, plus an
//! in-memory implementation for tests.
//!
//! The contract is deliberately narrow: load a whole collection (empty if
//! no prior data exists) and overwrite a whole collection. Nothing here is
//! incremental, transactional or queried — the shop hydrates once at
//! startup and pushes full snapshots after each mutation.
//!
//! The filesystem implementation lives in the `shoptrack-store` crate;
//! this module keeps shoptrack-core free of I/O.

use thiserror::Error;

use crate::auth::UserAccount;
use crate::types::{Product, Purchase, SalesTransaction};

// =============================================================================
// Storage Error
// =============================================================================

/// Failure reported by a persistence collaborator.
///
/// Load failures surface as [`crate::CoreError::Persistence`] (the shop
/// cannot open without its data). Save failures after a successful
/// in-memory mutation are downgraded to a warning-class
/// [`crate::shop::Durability`] tag instead — the mutation stands.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to load {collection}: {message}")]
    Load {
        collection: &'static str,
        message: String,
    },

    #[error("failed to save {collection}: {message}")]
    Save {
        collection: &'static str,
        message: String,
    },
}

impl StorageError {
    pub fn load(collection: &'static str, message: impl Into<String>) -> Self {
        StorageError::Load {
            collection,
            message: message.into(),
        }
    }

    pub fn save(collection: &'static str, message: impl Into<String>) -> Self {
        StorageError::Save {
            collection,
            message: message.into(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Storage Trait
// =============================================================================

/// Durable full-collection storage.
///
/// One typed load/save pair per collection keeps the trait object-safe and
/// lets implementations pick their own on-disk layout per collection.
/// `load_*` must return an empty collection when no prior data exists;
/// `save_*` is a full overwrite, not an append.
pub trait Storage {
    fn load_products(&self) -> StorageResult<Vec<Product>>;
    fn save_products(&mut self, products: &[Product]) -> StorageResult<()>;

    fn load_sales(&self) -> StorageResult<Vec<SalesTransaction>>;
    fn save_sales(&mut self, sales: &[SalesTransaction]) -> StorageResult<()>;

    fn load_purchases(&self) -> StorageResult<Vec<Purchase>>;
    fn save_purchases(&mut self, purchases: &[Purchase]) -> StorageResult<()>;

    fn load_users(&self) -> StorageResult<Vec<UserAccount>>;
    fn save_users(&mut self, users: &[UserAccount]) -> StorageResult<()>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// In-memory [`Storage`] implementation.
///
/// Used by unit tests and by callers that want a scratch shop without a
/// data directory. `fail_saves` simulates a dead disk so the durability
/// downgrade path can be exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub products: Vec<Product>,
    pub sales: Vec<SalesTransaction>,
    pub purchases: Vec<Purchase>,
    pub users: Vec<UserAccount>,
    /// When set, every save fails with a synthetic I/O message.
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn check_writable(&self, collection: &'static str) -> StorageResult<()> {
        if self.fail_saves {
            Err(StorageError::save(collection, "simulated write failure"))
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStore {
    fn load_products(&self) -> StorageResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn save_products(&mut self, products: &[Product]) -> StorageResult<()> {
        self.check_writable("products")?;
        self.products = products.to_vec();
        Ok(())
    }

    fn load_sales(&self) -> StorageResult<Vec<SalesTransaction>> {
        Ok(self.sales.clone())
    }

    fn save_sales(&mut self, sales: &[SalesTransaction]) -> StorageResult<()> {
        self.check_writable("sales")?;
        self.sales = sales.to_vec();
        Ok(())
    }

    fn load_purchases(&self) -> StorageResult<Vec<Purchase>> {
        Ok(self.purchases.clone())
    }

    fn save_purchases(&mut self, purchases: &[Purchase]) -> StorageResult<()> {
        self.check_writable("purchases")?;
        self.purchases = purchases.to_vec();
        Ok(())
    }

    fn load_users(&self) -> StorageResult<Vec<UserAccount>> {
        Ok(self.users.clone())
    }

    fn save_users(&mut self, users: &[UserAccount]) -> StorageResult<()> {
        self.check_writable("users")?;
        self.users = users.to_vec();
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
