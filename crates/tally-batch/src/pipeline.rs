//! # Batch Pipeline
//!
//! One complete run, from source files to output files.
//!
//! ## Run Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  run_batch(&RunConfig)                                                  │
//! │                                                                         │
//! │  1. load_catalog(files.products)        ──► FileNotFound / Parse ──┐   │
//! │  2. load_sale_requests(files.sales)     ──► FileNotFound / Parse ──┤   │
//! │  3. process_sales (tally-core, never fails)                        │   │
//! │  4. summary                                                        │   │
//! │  5. save_inventory(files.inventory_out) ──► Write ─────────────────┤   │
//! │  6. save_report(files.report_out)       ──► Write ─────────────────┤   │
//! │  7. BatchReport                                                    ▼   │
//! │                                                            BatchError   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call loads a fresh catalog. Two runs never share stock levels, so
//! running the same sources twice gives the same outcomes.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tally_core::{
    process_sales, AcceptedSale, CatalogEntry, InventoryRow, Money, ProductTotals, RejectedSale,
    SaleOutcome,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::RunConfig;
use crate::error::BatchResult;
use crate::loader::{load_catalog, load_sale_requests};
use crate::report::render_report;
use crate::writer::{save_inventory, save_report};

// =============================================================================
// Batch Report
// =============================================================================

/// Where a run wrote its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFiles {
    pub inventory: PathBuf,
    pub report: PathBuf,
}

/// Everything one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Correlates this run's log lines.
    pub run_id: Uuid,
    pub processed_at: DateTime<Utc>,
    pub store_name: String,

    pub total_requests: usize,
    pub accepted_count: usize,
    pub rejected_count: usize,

    #[serde(rename = "total_revenue_cents")]
    pub total_revenue: Money,

    pub accepted: Vec<AcceptedSale>,
    pub rejected: Vec<RejectedSale>,

    pub best_seller: Option<ProductTotals>,
    pub top_earner: Option<ProductTotals>,
    pub by_product: Vec<ProductTotals>,

    /// Final stock levels, in catalog order.
    pub inventory: Vec<InventoryRow>,

    pub outputs: OutputFiles,

    /// All outcomes in request order (the JSON already carries them split).
    #[serde(skip)]
    pub outcomes: Vec<SaleOutcome>,
}

// =============================================================================
// Operations
// =============================================================================

/// Runs the full batch described by `config`.
pub fn run_batch(config: &RunConfig) -> BatchResult<BatchReport> {
    let run_id = Uuid::new_v4();
    let files = &config.files;
    info!(%run_id, products = %files.products.display(), sales = %files.sales.display(), "Batch run started");

    let catalog = load_catalog(&files.products)?;
    let requests = load_sale_requests(&files.sales)?;
    info!(%run_id, products = catalog.len(), requests = requests.len(), "Sources loaded");

    let batch = process_sales(catalog, &requests);
    for outcome in batch.outcomes() {
        match outcome {
            SaleOutcome::Accepted(sale) => debug!(
                %run_id,
                position = sale.position,
                product_id = %sale.product_id,
                quantity = sale.quantity,
                revenue = sale.revenue.cents(),
                remaining_stock = sale.remaining_stock,
                "Sale accepted"
            ),
            SaleOutcome::Rejected(sale) => debug!(
                %run_id,
                position = sale.position,
                product_id = %sale.product_id,
                reason = sale.reason.label(),
                "Sale rejected"
            ),
        }
    }

    let summary = batch.summary();
    let inventory = batch.inventory();

    save_inventory(&files.inventory_out, &inventory)?;
    let report_text = render_report(&config.store.name, &summary, batch.rejected());
    save_report(&files.report_out, &report_text)?;

    let (outcomes, _, total_revenue) = batch.into_parts();
    let accepted: Vec<AcceptedSale> = outcomes.iter().filter_map(SaleOutcome::as_accepted).cloned().collect();
    let rejected: Vec<RejectedSale> = outcomes.iter().filter_map(SaleOutcome::as_rejected).cloned().collect();

    info!(
        %run_id,
        accepted = accepted.len(),
        rejected = rejected.len(),
        total_revenue = %total_revenue,
        "Batch run finished"
    );

    Ok(BatchReport {
        run_id,
        processed_at: Utc::now(),
        store_name: config.store.name.clone(),
        total_requests: outcomes.len(),
        accepted_count: accepted.len(),
        rejected_count: rejected.len(),
        total_revenue,
        accepted,
        rejected,
        best_seller: summary.best_seller,
        top_earner: summary.top_earner,
        by_product: summary.by_product,
        inventory,
        outputs: OutputFiles {
            inventory: files.inventory_out.clone(),
            report: files.report_out.clone(),
        },
        outcomes,
    })
}

/// Read-only listing of the catalog as loaded, with no sales applied.
pub fn load_catalog_snapshot(config: &RunConfig) -> BatchResult<Vec<CatalogEntry>> {
    let catalog = load_catalog(&config.files.products)?;
    Ok(catalog.entries())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BatchError;
    use std::fs;

    fn setup(products: &str, sales: &str) -> (tempfile::TempDir, RunConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::in_dir(dir.path());
        fs::write(&config.files.products, products).unwrap();
        fs::write(&config.files.sales, sales).unwrap();
        (dir, config)
    }

    #[test]
    fn test_run_batch_end_to_end() {
        let (_dir, config) = setup(
            "product_id,name,price,initial_stock\nA,Laptop,10,2\n",
            "product_id,quantity\nA,1\nA,5\nB,1\n",
        );

        let report = run_batch(&config).unwrap();

        assert_eq!(report.total_requests, 3);
        assert_eq!(report.accepted_count, 1);
        assert_eq!(report.rejected_count, 2);
        assert_eq!(report.total_revenue, Money::from_cents(1000));
        assert_eq!(report.inventory[0].final_stock, 1);
        assert_eq!(report.best_seller.as_ref().map(|b| b.units), Some(1));
        assert_eq!(report.outcomes.len(), 3);

        let inventory = fs::read_to_string(&config.files.inventory_out).unwrap();
        assert!(inventory.contains("A,Laptop,10.00,2,1,1"));

        let text = fs::read_to_string(&config.files.report_out).unwrap();
        assert!(text.contains("Total revenue: $10.00"));
        assert!(text.contains("Product 'B' does not exist in the catalog (requested 1)"));
    }

    #[test]
    fn test_missing_sales_file_writes_nothing() {
        let (_dir, config) = setup("product_id,name,price,initial_stock\nA,Laptop,10,2\n", "");
        fs::remove_file(&config.files.sales).unwrap();

        let err = run_batch(&config).unwrap_err();
        assert!(matches!(err, BatchError::FileNotFound { .. }));
        assert!(!config.files.inventory_out.exists());
        assert!(!config.files.report_out.exists());
    }

    #[test]
    fn test_snapshot_ignores_previous_runs() {
        let (_dir, config) = setup(
            "product_id,name,price,initial_stock\nA,Laptop,10,2\n",
            "product_id,quantity\nA,2\n",
        );

        run_batch(&config).unwrap();
        let snapshot = load_catalog_snapshot(&config).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].stock, 2);
        assert_eq!(snapshot[0].price, Money::from_cents(1000));
    }

    #[test]
    fn test_report_json_shape() {
        let (_dir, config) = setup(
            "product_id,name,price,initial_stock\nA,Laptop,10,2\n",
            "product_id,quantity\nA,1\n",
        );

        let report = run_batch(&config).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["total_revenue_cents"], 1000);
        assert_eq!(json["accepted"][0]["revenue_cents"], 1000);
        assert!(json.get("outcomes").is_none());
        assert!(json["run_id"].is_string());
    }
}
