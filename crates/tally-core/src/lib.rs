//! # tally-core: Pure Sales-Processing Logic for Tally
//!
//! This crate is the **heart** of Tally. It decides which sales go through,
//! updates stock, and aggregates revenue, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌───────────────────────────┐      ┌───────────────────────────┐      │
//! │  │   tally (CLI binary)      │      │   tally-api (HTTP)        │      │
//! │  │   console summary         │      │   /api/productos          │      │
//! │  └─────────────┬─────────────┘      │   /api/procesar           │      │
//! │                │                    └─────────────┬─────────────┘      │
//! │  ┌─────────────▼──────────────────────────────────▼────────────────┐   │
//! │  │                 tally-batch (I/O layer)                         │   │
//! │  │     CSV loaders, inventory/report writers, config, pipeline     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ processor │  │  summary  │  │   │
//! │  │   │  Catalog  │  │   Money   │  │  accept/  │  │  totals,  │  │   │
//! │  │   │  Outcome  │  │           │  │  reject   │  │  winners  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Catalog, SaleRequest, SaleOutcome)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`processor`] - Ordered sale validation and stock updates
//! - [`summary`] - Per-product totals, best-seller, top-earner
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation for loaded rows
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same catalog and requests always give the same outcomes
//! 2. **No I/O**: File system, network and console access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Order Matters**: Each request sees the stock left by the ones before it
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{process_sales, Catalog, Money, Product, SaleRequest};
//!
//! let catalog: Catalog = vec![
//!     Product::new("A", "Laptop", Money::from_cents(1000), 2),
//! ]
//! .into_iter()
//! .collect();
//!
//! let batch = process_sales(catalog, &[SaleRequest::new(1, "A", 2)]);
//! let summary = batch.summary();
//!
//! assert_eq!(summary.total_revenue.cents(), 2000);
//! assert_eq!(summary.best_seller.unwrap().product_id, "A");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod processor;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use processor::{process_sales, SalesBatch, SalesProcessor};
pub use summary::{summarize, ProductTotals, SalesSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product id, in characters.
pub const MAX_PRODUCT_ID_LEN: usize = 64;

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
