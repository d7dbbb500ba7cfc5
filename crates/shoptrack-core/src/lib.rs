//! # shoptrack-core: Pure Business Logic for ShopTrack
//!
//! This crate is the **heart** of ShopTrack: inventory, sales and reports
//! for a single-location shop, as pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      ShopTrack Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 Caller (CLI / UI, out of scope)             │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              ★ shoptrack-core (THIS CRATE) ★                │   │
//! │  │                                                             │   │
//! │  │   ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ ┌─────────┐  │   │
//! │  │   │ ledger │ │  shop  │ │ report │ │ render │ │ export  │  │   │
//! │  │   │ stock  │ │ sales  │ │ spans  │ │  text  │ │  CSV    │  │   │
//! │  │   │ deltas │ │ +buys  │ │ P&L    │ │        │ │         │  │   │
//! │  │   └────────┘ └────────┘ └────────┘ └────────┘ └─────────┘  │   │
//! │  │                                                             │   │
//! │  │   NO FILE I/O • NO NETWORK • storage behind a trait seam    │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │ storage::Storage                    │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              shoptrack-store (JSON files)                   │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, SalesTransaction, Purchase, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`auth`] - Roles, capabilities, actors
//! - [`ledger`] - The stock ledger (single gate for stock mutation)
//! - [`shop`] - The shop service: sale coordinator, purchase recorder
//! - [`report`] - Period-windowed report aggregation
//! - [`render`] / [`export`] - Text and CSV formatting of report values
//! - [`storage`] - The persistence collaborator seam
//!
//! ## Design Principles
//!
//! 1. **Two-phase check-then-commit**: every constraint is validated
//!    before any mutation is applied, so failures are side-effect free
//! 2. **No I/O**: file system and network access are FORBIDDEN here;
//!    durability goes through the [`storage::Storage`] trait
//! 3. **Integer money**: all monetary values are cents (i64)
//! 4. **Explicit errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod export;
pub mod ledger;
pub mod money;
pub mod render;
pub mod report;
pub mod shop;
pub mod storage;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shoptrack_core::Money` instead of
// `use shoptrack_core::money::Money`.

pub use auth::{Actor, Capability, Role, UserAccount};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::StockLedger;
pub use money::Money;
pub use report::{BestSellerRecord, BestSellingReport, Breakdown, PnlRecord, PnlReport, Span};
pub use shop::{Durability, Persisted, SaleLineRequest, Shop};
pub use storage::{MemoryStore, Storage, StorageError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of spans a report breakdown will materialize.
///
/// ## Why a ceiling?
/// A wide date range with a narrow span (say a year at 1-day spans) would
/// balloon the per-span section of a report. Above this ceiling the
/// breakdown is replaced with a diagnostic notice while the overall
/// summary is still computed.
pub const MAX_REPORT_SPANS: i64 = 60;
