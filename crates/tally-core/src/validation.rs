//! # Validation Module
//!
//! Field validation for rows read from the catalog and sales sources.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CSV decoding (tally-batch)                                   │
//! │  ├── Column presence, integer/decimal syntax                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Non-empty ids and names, non-negative prices and stock            │
//! │  ├── Positive quantities                                               │
//! │  └── Catalog stock value (Σ price × stock) fits in i64 cents           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Sales Processor                                              │
//! │  └── Product exists, enough stock (Rejected outcomes, not errors)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failure in layers 1-2 aborts the batch before processing starts.

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_PRODUCT_ID_LEN, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 64 characters
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_product_id;
///
/// assert_eq!(validate_product_id(" P001 ").unwrap(), "P001");
/// assert!(validate_product_id("").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<String> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    if id.chars().count() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "product_id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    Ok(id.to_string())
}

/// Validates a product name and returns it trimmed.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must fit in `u32`
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_quantity;
///
/// assert_eq!(validate_quantity(3).unwrap(), 3);
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-2).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: i64::from(u32::MAX),
    })
}

/// Validates an initial stock level. Zero is allowed (sold out).
pub fn validate_stock(stock: i64) -> ValidationResult<u32> {
    u32::try_from(stock).map_err(|_| ValidationError::OutOfRange {
        field: "initial_stock".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<Money> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(price)
}

/// Adds `price × stock` to the running value of a catalog.
///
/// Every accepted sale is bounded by the stock it draws from, so a catalog
/// whose total stock value fits in `i64` cents cannot overflow any revenue
/// or total computed from it.
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::validation::validate_stock_value;
///
/// let value = validate_stock_value(Money::from_cents(1000), 3, Money::zero()).unwrap();
/// assert_eq!(value.cents(), 3000);
///
/// let yacht = Money::parse_decimal("50000000000000000").unwrap();
/// assert!(validate_stock_value(yacht, 3, Money::zero()).is_err());
/// ```
pub fn validate_stock_value(price: Money, stock: u32, catalog_value: Money) -> ValidationResult<Money> {
    price
        .checked_multiply_quantity(stock)
        .and_then(|value| value.checked_add(catalog_value))
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "stock_value".to_string(),
            min: 0,
            max: i64::MAX,
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_id() {
        assert_eq!(validate_product_id("P001").unwrap(), "P001");
        assert_eq!(validate_product_id("  LAPTOP-15 ").unwrap(), "LAPTOP-15");

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name(" Mouse ").unwrap(), "Mouse");
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(1).unwrap(), 1);
        assert_eq!(validate_quantity(1_000_000).unwrap(), 1_000_000);

        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_quantity(-1).is_err());
        assert!(matches!(
            validate_quantity(i64::from(u32::MAX) + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_stock() {
        assert_eq!(validate_stock(0).unwrap(), 0);
        assert_eq!(validate_stock(25).unwrap(), 25);
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_stock_value() {
        let value = validate_stock_value(Money::from_cents(250), 4, Money::from_cents(100)).unwrap();
        assert_eq!(value.cents(), 1100);

        let yacht = Money::parse_decimal("50000000000000000").unwrap();
        assert!(validate_stock_value(yacht, 1, Money::zero()).is_ok());
        assert!(matches!(
            validate_stock_value(yacht, 3, Money::zero()),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_stock_value(yacht, 1, yacht).is_ok());
        assert!(validate_stock_value(yacht, 1, Money::from_cents(i64::MAX - 10)).is_err());
    }
}
