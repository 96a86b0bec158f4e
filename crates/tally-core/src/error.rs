//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Sale rule violations (become Rejected outcomes)│
//! │  └── ValidationError  - Input field failures (raised by loaders)       │
//! │                                                                         │
//! │  tally-batch errors (separate crate)                                   │
//! │  └── BatchError       - Missing files, malformed rows, write failures  │
//! │                                                                         │
//! │  HTTP API errors (in app)                                              │
//! │  └── ApiError         - What the JSON client sees                      │
//! │                                                                         │
//! │  Flow: ValidationError → BatchError → ApiError → Client                │
//! │        CoreError ──────► RejectedSale.detail (never aborts a batch)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Sale rule violations.
///
/// The processor never returns these: it records them on a rejected
/// outcome, and their `Display` text becomes the outcome's detail message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The requested product id is not in the catalog.
    #[error("Product '{product_id}' does not exist in the catalog (requested {requested})")]
    ProductNotFound { product_id: String, requested: u32 },

    /// Trying to sell more than the stock left after earlier sales.
    ///
    /// ## Example
    /// ```text
    /// Stock: 2 ──► sell 1 (ok, stock 1) ──► sell 5
    ///                                          │
    ///                                          ▼
    ///     InsufficientStock { available: 1, requested: 5 }
    /// ```
    #[error("Insufficient stock for '{name}' ({product_id}): requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        name: String,
        available: u32,
        requested: u32,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur while reading source rows, before any sale is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a price that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
