//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Catalog      │   │  SaleRequest    │   │  SaleOutcome    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Vec<Product>   │   │  position       │   │  Accepted(..)   │       │
//! │  │  id → index     │   │  product_id     │   │  Rejected(..)   │       │
//! │  └────────┬────────┘   │  quantity       │   └─────────────────┘       │
//! │           │            └─────────────────┘                              │
//! │  ┌────────▼────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  InventoryRow   │   │  CatalogEntry   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name       │   │  units_sold     │   │  read-only      │       │
//! │  │  price          │   │  final_stock    │   │  listing DTO    │       │
//! │  │  initial/current│   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Accepted sales freeze the product name and unit price at the time of
//! sale, so outcomes stay meaningful after the catalog is discarded.

use std::collections::HashMap;

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// `current_stock` starts equal to `initial_stock` and only the sales
/// processor can lower it, so it never goes negative and never rises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Business identifier (e.g. "P001").
    pub id: String,

    /// Display name used in reports.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Stock at load time.
    pub initial_stock: u32,

    current_stock: u32,
}

impl Product {
    /// Creates a product with `current_stock == initial_stock`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        initial_stock: u32,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            initial_stock,
            current_stock: initial_stock,
        }
    }

    /// Stock left after the sales applied so far.
    #[inline]
    pub fn current_stock(&self) -> u32 {
        self.current_stock
    }

    /// Units removed by accepted sales.
    #[inline]
    pub fn units_sold(&self) -> u32 {
        self.initial_stock - self.current_stock
    }

    /// Checks if `quantity` units are available right now.
    #[inline]
    pub fn can_sell(&self, quantity: u32) -> bool {
        quantity <= self.current_stock
    }

    /// Removes `quantity` units and returns the remaining stock.
    ///
    /// Callers must check [`Product::can_sell`] first.
    pub(crate) fn take_stock(&mut self, quantity: u32) -> u32 {
        debug_assert!(self.can_sell(quantity));
        self.current_stock -= quantity;
        self.current_stock
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The set of known products, in source order, indexed by id.
///
/// ## Duplicate ids
/// Inserting an id that already exists replaces the earlier product but
/// keeps its position, the same way a re-assigned map key keeps its slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product. Returns the replaced product if the id was already present.
    pub fn insert(&mut self, product: Product) -> Option<Product> {
        match self.index.get(&product.id) {
            Some(&slot) => Some(std::mem::replace(&mut self.products[slot], product)),
            None => {
                self.index.insert(product.id.clone(), self.products.len());
                self.products.push(product);
                None
            }
        }
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&slot| &self.products[slot])
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Product> {
        match self.index.get(id) {
            Some(&slot) => Some(&mut self.products[slot]),
            None => None,
        }
    }

    /// Checks if a product id is known.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterates products in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Inventory snapshot in source order.
    pub fn inventory(&self) -> Vec<InventoryRow> {
        self.products.iter().map(InventoryRow::from).collect()
    }

    /// Read-only listing in source order.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.products.iter().map(CatalogEntry::from).collect()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Sale Request
// =============================================================================

/// An instruction to sell `quantity` units of `product_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRequest {
    /// 1-based index in the input sequence (reporting only).
    pub position: usize,
    pub product_id: String,
    pub quantity: u32,
}

impl SaleRequest {
    pub fn new(position: usize, product_id: impl Into<String>, quantity: u32) -> Self {
        SaleRequest {
            position,
            product_id: product_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Sale Outcomes
// =============================================================================

/// Why a request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Product id is not in the catalog.
    NotFound,
    /// Quantity exceeds the stock left at evaluation time.
    InsufficientStock,
}

impl RejectionReason {
    /// Short human label used in console and report output.
    pub fn label(&self) -> &'static str {
        match self {
            RejectionReason::NotFound => "Product not found",
            RejectionReason::InsufficientStock => "Insufficient stock",
        }
    }
}

/// A request that passed both rules and changed the stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct AcceptedSale {
    pub position: usize,
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name: String,
    pub quantity: u32,
    /// Unit price at time of sale (frozen).
    #[serde(rename = "unit_price_cents")]
    pub unit_price: Money,
    /// unit_price × quantity.
    #[serde(rename = "revenue_cents")]
    pub revenue: Money,
    /// Stock left right after this sale.
    pub remaining_stock: u32,
}

/// A request that failed a rule and left the stock untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RejectedSale {
    pub position: usize,
    pub product_id: String,
    pub quantity: u32,
    pub reason: RejectionReason,
    /// Human-readable explanation.
    pub detail: String,
}

/// The result of evaluating one sale request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaleOutcome {
    Accepted(AcceptedSale),
    Rejected(RejectedSale),
}

impl SaleOutcome {
    pub fn position(&self) -> usize {
        match self {
            SaleOutcome::Accepted(sale) => sale.position,
            SaleOutcome::Rejected(sale) => sale.position,
        }
    }

    pub fn product_id(&self) -> &str {
        match self {
            SaleOutcome::Accepted(sale) => &sale.product_id,
            SaleOutcome::Rejected(sale) => &sale.product_id,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SaleOutcome::Accepted(_))
    }

    pub fn as_accepted(&self) -> Option<&AcceptedSale> {
        match self {
            SaleOutcome::Accepted(sale) => Some(sale),
            SaleOutcome::Rejected(_) => None,
        }
    }

    pub fn as_rejected(&self) -> Option<&RejectedSale> {
        match self {
            SaleOutcome::Accepted(_) => None,
            SaleOutcome::Rejected(sale) => Some(sale),
        }
    }
}

// =============================================================================
// Output DTOs
// =============================================================================

/// One line of the updated inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct InventoryRow {
    pub product_id: String,
    pub name: String,
    #[serde(rename = "price_cents")]
    pub price: Money,
    pub initial_stock: u32,
    pub units_sold: u32,
    pub final_stock: u32,
}

impl From<&Product> for InventoryRow {
    fn from(p: &Product) -> Self {
        InventoryRow {
            product_id: p.id.clone(),
            name: p.name.clone(),
            price: p.price,
            initial_stock: p.initial_stock,
            units_sold: p.units_sold(),
            final_stock: p.current_stock(),
        }
    }
}

/// Read-only catalog listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "price_cents")]
    pub price: Money,
    pub stock: u32,
}

impl From<&Product> for CatalogEntry {
    fn from(p: &Product) -> Self {
        CatalogEntry {
            id: p.id.clone(),
            name: p.name.clone(),
            price: p.price,
            stock: p.current_stock(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
