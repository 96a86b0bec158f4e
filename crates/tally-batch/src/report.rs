//! # Report Formatter
//!
//! Renders the plain-text sales report.
//!
//! ```text
//! === Sales Report: PyTech Store ===
//!
//! Total revenue: $1,234.56
//!
//! Best seller (units): 'Laptop' (A), with 3 units.
//! Top earner (revenue): 'Laptop' (A), generating $3,600.00.
//!
//! --- Rejected Sales ---
//! - Insufficient stock for 'Laptop' (A): requested 5, available 1
//! ```

use std::fmt::Write;

use tally_core::{RejectedSale, SalesSummary};

/// Renders the report text. Always ends with a newline.
pub fn render_report<'a>(
    store_name: &str,
    summary: &SalesSummary,
    rejected: impl IntoIterator<Item = &'a RejectedSale>,
) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "=== Sales Report: {store_name} ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Total revenue: {}", summary.total_revenue);
    let _ = writeln!(out);

    match &summary.best_seller {
        Some(best) => {
            let _ = writeln!(
                out,
                "Best seller (units): '{}' ({}), with {} units.",
                best.name, best.product_id, best.units
            );
        }
        None => {
            let _ = writeln!(out, "Best seller (units): no sales recorded.");
        }
    }

    match &summary.top_earner {
        Some(top) => {
            let _ = writeln!(
                out,
                "Top earner (revenue): '{}' ({}), generating {}.",
                top.name, top.product_id, top.revenue
            );
        }
        None => {
            let _ = writeln!(out, "Top earner (revenue): no sales recorded.");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "--- Rejected Sales ---");

    let mut any_rejected = false;
    for sale in rejected {
        any_rejected = true;
        let _ = writeln!(out, "- {}", sale.detail);
    }
    if !any_rejected {
        let _ = writeln!(out, "- No rejected sales.");
    }

    out
}
