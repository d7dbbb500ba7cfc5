//! # JSON File Store
//!
//! Filesystem-backed JSON persistence for the shop's collections.
//!
//! ## On-Disk Layout
//! ```text
//! <data_dir>/
//!   products.json     full product collection
//!   sales.json        full sales history
//!   purchases.json    full purchase log
//!   users.json        login accounts
//! ```
//!
//! Every save is a whole-file overwrite, written to a temp file first and
//! renamed into place so a crash mid-write leaves the previous file
//! intact. A missing file reads as an empty collection (first run).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use shoptrack_core::storage::{Storage, StorageError, StorageResult};
use shoptrack_core::{Product, Purchase, SalesTransaction, UserAccount};

use crate::error::{StoreError, StoreResult};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

// =============================================================================
// JsonStore
// =============================================================================

/// JSON-file implementation of the core's [`Storage`] contract.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Opens (and creates, if needed) a data directory.
    pub fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| StoreError::io(&data_dir, e))?;
        Ok(JsonStore { data_dir })
    }

    /// The file backing a collection.
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir
            .join(format!("{collection}.{FILE_EXTENSION}"))
    }

    /// Loads a whole collection; a missing file is an empty collection.
    fn load_collection<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            debug!(collection, "no data file yet, starting empty");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        let items: Vec<T> =
            serde_json::from_str(&contents).map_err(|e| StoreError::corrupt(&path, e))?;
        debug!(collection, count = items.len(), "collection loaded");
        Ok(items)
    }

    /// Overwrites a whole collection atomically.
    fn save_collection<T: Serialize>(&self, collection: &str, items: &[T]) -> StoreResult<()> {
        let path = self.collection_path(collection);
        let body =
            serde_json::to_string_pretty(items).map_err(|e| StoreError::encode(&path, e))?;
        write_atomic(&path, &body)?;
        debug!(collection, count = items.len(), "collection saved");
        Ok(())
    }
}

/// Writes `contents` to a sibling temp file, then renames it over `path`.
/// The rename is atomic on the same filesystem, so readers only ever see
/// the old file or the new one.
fn write_atomic(path: &Path, contents: &str) -> StoreResult<()> {
    let tmp_path = path.with_extension(TMP_SUFFIX);

    let mut file = fs::File::create(&tmp_path).map_err(|e| StoreError::io(&tmp_path, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| StoreError::io(&tmp_path, e))?;
    file.sync_all().map_err(|e| StoreError::io(&tmp_path, e))?;
    drop(file);

    fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))
}

// =============================================================================
// Storage Trait Implementation
// =============================================================================

fn load_failed(collection: &'static str, err: StoreError) -> StorageError {
    StorageError::load(collection, err.to_string())
}

fn save_failed(collection: &'static str, err: StoreError) -> StorageError {
    StorageError::save(collection, err.to_string())
}

impl Storage for JsonStore {
    fn load_products(&self) -> StorageResult<Vec<Product>> {
        self.load_collection("products")
            .map_err(|e| load_failed("products", e))
    }

    fn save_products(&mut self, products: &[Product]) -> StorageResult<()> {
        self.save_collection("products", products)
            .map_err(|e| save_failed("products", e))
    }

    fn load_sales(&self) -> StorageResult<Vec<SalesTransaction>> {
        self.load_collection("sales")
            .map_err(|e| load_failed("sales", e))
    }

    fn save_sales(&mut self, sales: &[SalesTransaction]) -> StorageResult<()> {
        self.save_collection("sales", sales)
            .map_err(|e| save_failed("sales", e))
    }

    fn load_purchases(&self) -> StorageResult<Vec<Purchase>> {
        self.load_collection("purchases")
            .map_err(|e| load_failed("purchases", e))
    }

    fn save_purchases(&mut self, purchases: &[Purchase]) -> StorageResult<()> {
        self.save_collection("purchases", purchases)
            .map_err(|e| save_failed("purchases", e))
    }

    fn load_users(&self) -> StorageResult<Vec<UserAccount>> {
        self.load_collection("users")
            .map_err(|e| load_failed("users", e))
    }

    fn save_users(&mut self, users: &[UserAccount]) -> StorageResult<()> {
        self.save_collection("users", users)
            .map_err(|e| save_failed("users", e))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
