//! # Sales Summary
//!
//! Per-product aggregation of accepted sales, plus the two headline picks.
//!
//! ## Tie Rule
//! ```text
//! by_product (first-accepted order):   A: 5 units   B: 5 units   C: 2 units
//!                                      ▲
//!                                      └── best_seller = A
//!
//! A later group only wins with a STRICTLY greater value, so the group
//! whose first accepted sale came earliest takes every tie.
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{AcceptedSale, SaleOutcome};

/// Units and revenue of one product across all accepted sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ProductTotals {
    pub product_id: String,
    pub name: String,
    pub units: u64,
    #[serde(rename = "revenue_cents")]
    pub revenue: Money,
}

/// Aggregates over the accepted sales of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    #[serde(rename = "total_revenue_cents")]
    pub total_revenue: Money,

    /// One entry per product with at least one accepted sale, in order of
    /// that product's first accepted sale.
    pub by_product: Vec<ProductTotals>,

    /// Highest unit count. `None` when nothing was sold.
    pub best_seller: Option<ProductTotals>,

    /// Highest revenue. `None` when nothing was sold.
    pub top_earner: Option<ProductTotals>,
}

impl SalesSummary {
    /// Builds the summary from accepted sales in processing order.
    pub fn from_sales<'a, I>(sales: I) -> Self
    where
        I: IntoIterator<Item = &'a AcceptedSale>,
    {
        let mut by_product: Vec<ProductTotals> = Vec::new();
        let mut total_revenue = Money::zero();

        for sale in sales {
            total_revenue += sale.revenue;

            match by_product.iter_mut().find(|t| t.product_id == sale.product_id) {
                Some(totals) => {
                    totals.units += u64::from(sale.quantity);
                    totals.revenue += sale.revenue;
                }
                None => by_product.push(ProductTotals {
                    product_id: sale.product_id.clone(),
                    name: sale.name.clone(),
                    units: u64::from(sale.quantity),
                    revenue: sale.revenue,
                }),
            }
        }

        let best_seller = first_max_by(&by_product, |t| t.units).cloned();
        let top_earner = first_max_by(&by_product, |t| t.revenue).cloned();

        SalesSummary {
            total_revenue,
            by_product,
            best_seller,
            top_earner,
        }
    }

    /// Totals for one product, if it sold anything.
    pub fn totals_for(&self, product_id: &str) -> Option<&ProductTotals> {
        self.by_product.iter().find(|t| t.product_id == product_id)
    }
}

/// Summarizes the accepted outcomes of a batch. Rejected outcomes are ignored.
pub fn summarize(outcomes: &[SaleOutcome]) -> SalesSummary {
    SalesSummary::from_sales(outcomes.iter().filter_map(SaleOutcome::as_accepted))
}

// `Iterator::max_by_key` returns the LAST maximum; ties must go to the first.
fn first_max_by<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    let mut best: Option<(&T, K)> = None;
    for item in items {
        let k = key(item);
        let better = match &best {
            Some((_, best_k)) => k > *best_k,
            None => true,
        };
        if better {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}

// =============================================================================
// Unit Tests
// =============================================================================
