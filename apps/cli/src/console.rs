//! Console rendering of a finished batch.

use std::fmt::Write;

use tally_batch::BatchReport;
use tally_core::{RejectionReason, SaleOutcome};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn banner(store_name: &str) -> String {
    format!("{}\n  BATCH SALES PROCESSING\n  {}\n{}\n", rule(), store_name, rule())
}

/// One line per request, in request order.
pub fn outcome_line(outcome: &SaleOutcome) -> String {
    match outcome {
        SaleOutcome::Accepted(sale) => format!(
            "Sale #{}: {} x{}  APPROVED: {} (stock left: {})",
            sale.position, sale.product_id, sale.quantity, sale.revenue, sale.remaining_stock
        ),
        SaleOutcome::Rejected(sale) => {
            let reason = match sale.reason {
                RejectionReason::NotFound => sale.reason.label().to_string(),
                RejectionReason::InsufficientStock => sale.detail.clone(),
            };
            format!(
                "Sale #{}: {} x{}  REJECTED: {}",
                sale.position, sale.product_id, sale.quantity, reason
            )
        }
    }
}

/// Totals and generated files.
pub fn summary(report: &BatchReport) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(
        out,
        "SUMMARY: {} approved, {} rejected",
        report.accepted_count, report.rejected_count
    );
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "  Total revenue: {}", report.total_revenue);
    if let Some(best) = &report.best_seller {
        let _ = writeln!(out, "  Best seller:   {} ({} units)", best.name, best.units);
    }
    if let Some(top) = &report.top_earner {
        let _ = writeln!(out, "  Top earner:    {} ({})", top.name, top.revenue);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated files:");
    let _ = writeln!(out, "  - {}", report.outputs.inventory.display());
    let _ = writeln!(out, "  - {}", report.outputs.report.display());

    out
}
