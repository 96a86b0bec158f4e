//! Property tests for ordered sale processing.
//!
//! Catalogs and request streams are generated over a small id alphabet so
//! that unknown ids, repeated ids and stock exhaustion all occur often.

use proptest::prelude::*;
use std::collections::HashMap;
use tally_core::{process_sales, summarize, Catalog, Money, Product, RejectionReason, SaleRequest};

// =============================================================================
// Strategies
// =============================================================================

fn product_strategy() -> impl Strategy<Value = Product> {
    ("[A-D]", 0i64..50_000, 0u32..20)
        .prop_map(|(id, cents, stock)| Product::new(id.clone(), format!("Item {id}"), Money::from_cents(cents), stock))
}

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(product_strategy(), 0..5).prop_map(|products| products.into_iter().collect())
}

fn requests_strategy() -> impl Strategy<Value = Vec<SaleRequest>> {
    prop::collection::vec(("[A-F]", 1u32..10), 0..40).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (id, qty))| SaleRequest::new(i + 1, id, qty))
            .collect()
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        ..ProptestConfig::default()
    })]

    /// Every request gets exactly one outcome, in request order.
    #[test]
    fn one_outcome_per_request(catalog in catalog_strategy(), requests in requests_strategy()) {
        let batch = process_sales(catalog, &requests);

        prop_assert_eq!(batch.outcomes().len(), requests.len());
        prop_assert_eq!(batch.accepted_count() + batch.rejected_count(), requests.len());
        for (outcome, request) in batch.outcomes().iter().zip(&requests) {
            prop_assert_eq!(outcome.position(), request.position);
            prop_assert_eq!(outcome.product_id(), request.product_id.as_str());
        }
    }

    /// Total revenue is exactly the sum of accepted revenues.
    #[test]
    fn revenue_is_sum_of_accepted(catalog in catalog_strategy(), requests in requests_strategy()) {
        let batch = process_sales(catalog, &requests);

        let summed: Money = batch.accepted().map(|s| s.revenue).sum();
        prop_assert_eq!(batch.total_revenue(), summed);
        prop_assert_eq!(batch.summary().total_revenue, summed);

        for sale in batch.accepted() {
            prop_assert_eq!(sale.revenue, sale.unit_price.multiply_quantity(sale.quantity));
        }
    }

    /// Final stock = initial stock - accepted units, for every product.
    #[test]
    fn stock_accounts_for_accepted_units(catalog in catalog_strategy(), requests in requests_strategy()) {
        let batch = process_sales(catalog.clone(), &requests);

        let mut sold: HashMap<&str, u32> = HashMap::new();
        for sale in batch.accepted() {
            *sold.entry(sale.product_id.as_str()).or_default() += sale.quantity;
        }

        for original in &catalog {
            let after = batch.catalog().get(&original.id).expect("catalog keeps every product");
            let units = sold.get(original.id.as_str()).copied().unwrap_or(0);
            prop_assert_eq!(after.current_stock() + units, original.initial_stock);
            prop_assert_eq!(after.units_sold(), units);
        }
    }

    /// Rejection reasons match what the catalog looked like at that moment.
    #[test]
    fn rejections_are_justified(catalog in catalog_strategy(), requests in requests_strategy()) {
        let batch = process_sales(catalog.clone(), &requests);
        let mut stock: HashMap<String, u32> =
            catalog.iter().map(|p| (p.id.clone(), p.initial_stock)).collect();

        for outcome in batch.outcomes() {
            match (outcome.as_accepted(), outcome.as_rejected()) {
                (Some(sale), _) => {
                    let left = stock.get_mut(&sale.product_id).expect("accepted id is known");
                    prop_assert!(sale.quantity <= *left);
                    *left -= sale.quantity;
                    prop_assert_eq!(sale.remaining_stock, *left);
                }
                (_, Some(rejected)) => match rejected.reason {
                    RejectionReason::NotFound => {
                        prop_assert!(!stock.contains_key(&rejected.product_id));
                    }
                    RejectionReason::InsufficientStock => {
                        prop_assert!(rejected.quantity > stock[&rejected.product_id]);
                    }
                },
                (None, None) => unreachable!(),
            }
        }
    }

    /// The headline picks are maximal, and no earlier group ties them.
    #[test]
    fn winners_are_first_maximum(catalog in catalog_strategy(), requests in requests_strategy()) {
        let batch = process_sales(catalog, &requests);
        let summary = summarize(batch.outcomes());

        match &summary.best_seller {
            None => prop_assert_eq!(batch.accepted_count(), 0),
            Some(best) => {
                let idx = summary.by_product.iter().position(|t| t.product_id == best.product_id).unwrap();
                prop_assert!(summary.by_product.iter().all(|t| t.units <= best.units));
                prop_assert!(summary.by_product[..idx].iter().all(|t| t.units < best.units));
            }
        }

        match &summary.top_earner {
            None => prop_assert!(summary.by_product.is_empty()),
            Some(top) => {
                let idx = summary.by_product.iter().position(|t| t.product_id == top.product_id).unwrap();
                prop_assert!(summary.by_product.iter().all(|t| t.revenue <= top.revenue));
                prop_assert!(summary.by_product[..idx].iter().all(|t| t.revenue < top.revenue));
            }
        }
    }

    /// Processing is deterministic.
    #[test]
    fn processing_is_deterministic(catalog in catalog_strategy(), requests in requests_strategy()) {
        let first = process_sales(catalog.clone(), &requests);
        let second = process_sales(catalog, &requests);

        prop_assert_eq!(first.outcomes(), second.outcomes());
        prop_assert_eq!(first.catalog(), second.catalog());
    }
}
