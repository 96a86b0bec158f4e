//! # Sales Processor
//!
//! Applies sale requests to a catalog, strictly in input order.
//!
//! ## Per-Request Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SaleRequest { position, product_id, quantity }                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  product_id in catalog? ── NO ──► Rejected(NotFound)       (no change) │
//! │       │ YES                                                             │
//! │       ▼                                                                 │
//! │  quantity <= current stock? ── NO ──► Rejected(InsufficientStock)      │
//! │       │ YES                                         (no change)         │
//! │       ▼                                                                 │
//! │  stock -= quantity                                                     │
//! │  total_revenue += price × quantity                                     │
//! │  Accepted { unit_price, revenue, remaining_stock }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The catalog is moved into the processor and handed back inside the
//! finished [`SalesBatch`]. Nothing else can observe or alias the stock
//! levels while a batch is running, and a caller that needs the original
//! catalog for read-only use keeps its own clone.
//!
//! ## Example
//! ```rust
//! use tally_core::{process_sales, Catalog, Money, Product, SaleRequest};
//!
//! let catalog: Catalog = vec![Product::new("A", "Laptop", Money::from_cents(1000), 2)]
//!     .into_iter()
//!     .collect();
//! let requests = vec![
//!     SaleRequest::new(1, "A", 1),
//!     SaleRequest::new(2, "A", 5),
//!     SaleRequest::new(3, "B", 1),
//! ];
//!
//! let batch = process_sales(catalog, &requests);
//! assert_eq!(batch.accepted_count(), 1);
//! assert_eq!(batch.rejected_count(), 2);
//! assert_eq!(batch.total_revenue().cents(), 1000);
//! assert_eq!(batch.catalog().get("A").unwrap().current_stock(), 1);
//! ```

use crate::error::CoreError;
use crate::money::Money;
use crate::summary::SalesSummary;
use crate::types::{
    AcceptedSale, Catalog, InventoryRow, RejectedSale, RejectionReason, SaleOutcome, SaleRequest,
};

// =============================================================================
// Processor
// =============================================================================

/// Stateful processor for one batch.
///
/// Use [`process_sales`] for the common case; this type exists for callers
/// that want to react to each outcome as it is produced.
#[derive(Debug)]
pub struct SalesProcessor {
    catalog: Catalog,
    outcomes: Vec<SaleOutcome>,
    total_revenue: Money,
}

impl SalesProcessor {
    /// Takes ownership of the catalog for the duration of the batch.
    pub fn new(catalog: Catalog) -> Self {
        SalesProcessor {
            catalog,
            outcomes: Vec::new(),
            total_revenue: Money::zero(),
        }
    }

    /// Evaluates one request against the current stock and records the outcome.
    pub fn apply(&mut self, request: &SaleRequest) -> &SaleOutcome {
        let outcome = match self.catalog.get_mut(&request.product_id) {
            None => reject(
                request,
                RejectionReason::NotFound,
                CoreError::ProductNotFound {
                    product_id: request.product_id.clone(),
                    requested: request.quantity,
                },
            ),
            Some(product) if !product.can_sell(request.quantity) => reject(
                request,
                RejectionReason::InsufficientStock,
                CoreError::InsufficientStock {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    available: product.current_stock(),
                    requested: request.quantity,
                },
            ),
            Some(product) => {
                let revenue = product.price.multiply_quantity(request.quantity);
                let remaining_stock = product.take_stock(request.quantity);
                self.total_revenue += revenue;

                SaleOutcome::Accepted(AcceptedSale {
                    position: request.position,
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    quantity: request.quantity,
                    unit_price: product.price,
                    revenue,
                    remaining_stock,
                })
            }
        };

        self.outcomes.push(outcome);
        &self.outcomes[self.outcomes.len() - 1]
    }

    /// Stock levels as of the requests applied so far.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Ends the batch and hands the catalog back.
    pub fn finish(self) -> SalesBatch {
        SalesBatch {
            outcomes: self.outcomes,
            catalog: self.catalog,
            total_revenue: self.total_revenue,
        }
    }
}

fn reject(request: &SaleRequest, reason: RejectionReason, cause: CoreError) -> SaleOutcome {
    SaleOutcome::Rejected(RejectedSale {
        position: request.position,
        product_id: request.product_id.clone(),
        quantity: request.quantity,
        reason,
        detail: cause.to_string(),
    })
}

/// Applies every request in order and returns the finished batch.
///
/// Never fails: every request yields exactly one outcome.
pub fn process_sales(catalog: Catalog, requests: &[SaleRequest]) -> SalesBatch {
    let mut processor = SalesProcessor::new(catalog);
    for request in requests {
        processor.apply(request);
    }
    processor.finish()
}

// =============================================================================
// Batch Result
// =============================================================================

/// Outcomes, final stock levels and running revenue of one processed batch.
#[derive(Debug, Clone)]
pub struct SalesBatch {
    outcomes: Vec<SaleOutcome>,
    catalog: Catalog,
    total_revenue: Money,
}

impl SalesBatch {
    /// All outcomes, in request order.
    pub fn outcomes(&self) -> &[SaleOutcome] {
        &self.outcomes
    }

    /// The catalog with final stock levels.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Sum of accepted revenues.
    pub fn total_revenue(&self) -> Money {
        self.total_revenue
    }

    pub fn accepted(&self) -> impl Iterator<Item = &AcceptedSale> {
        self.outcomes.iter().filter_map(SaleOutcome::as_accepted)
    }

    pub fn rejected(&self) -> impl Iterator<Item = &RejectedSale> {
        self.outcomes.iter().filter_map(SaleOutcome::as_rejected)
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted().count()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected().count()
    }

    /// Updated inventory in catalog order.
    pub fn inventory(&self) -> Vec<InventoryRow> {
        self.catalog.inventory()
    }

    /// Per-product totals, best-seller and top-earner.
    pub fn summary(&self) -> SalesSummary {
        SalesSummary::from_sales(self.accepted())
    }

    pub fn into_parts(self) -> (Vec<SaleOutcome>, Catalog, Money) {
        (self.outcomes, self.catalog, self.total_revenue)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
