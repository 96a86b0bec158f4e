//! # Output Writers
//!
//! Inventory CSV encoding and atomic file replacement.
//!
//! ## Atomic Write
//! ```text
//! target: out/inventario_actualizado.csv
//!
//!   1. create out/ if missing
//!   2. write to   out/.tmpXXXXXX     (same directory, same filesystem)
//!   3. flush + fsync
//!   4. rename ──► out/inventario_actualizado.csv
//!
//! A crash before step 4 leaves the previous file untouched.
//! ```

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tally_core::InventoryRow;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{BatchError, BatchResult};

/// Header of the inventory CSV, in column order.
pub const INVENTORY_HEADER: [&str; 6] = [
    "product_id",
    "name",
    "price",
    "initial_stock",
    "units_sold",
    "final_stock",
];

#[derive(Serialize)]
struct InventoryRecord<'a> {
    product_id: &'a str,
    name: &'a str,
    price: String,
    initial_stock: u32,
    units_sold: u32,
    final_stock: u32,
}

impl<'a> From<&'a InventoryRow> for InventoryRecord<'a> {
    fn from(row: &'a InventoryRow) -> Self {
        InventoryRecord {
            product_id: &row.product_id,
            name: &row.name,
            price: row.price.to_decimal_string(),
            initial_stock: row.initial_stock,
            units_sold: row.units_sold,
            final_stock: row.final_stock,
        }
    }
}

/// Encodes inventory rows as CSV into any writer.
///
/// The header is written even when `rows` is empty.
pub fn write_inventory<W: Write>(writer: W, rows: &[InventoryRow]) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(INVENTORY_HEADER)?;
    for row in rows {
        csv_writer.serialize(InventoryRecord::from(row))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Encodes inventory rows into an in-memory CSV buffer.
pub fn inventory_csv(rows: &[InventoryRow]) -> csv::Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_inventory(&mut buf, rows)?;
    Ok(buf)
}

/// Replaces `path` with `contents` via a temp file and rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> BatchResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir).map_err(|e| BatchError::write(path, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| BatchError::write(path, e))?;
    tmp.write_all(contents).map_err(|e| BatchError::write(path, e))?;
    tmp.as_file().sync_all().map_err(|e| BatchError::write(path, e))?;
    tmp.persist(path).map_err(|e| BatchError::write(path, e.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "Output written");
    Ok(())
}

/// Writes the inventory CSV to `path` atomically.
pub fn save_inventory(path: &Path, rows: &[InventoryRow]) -> BatchResult<()> {
    let bytes = inventory_csv(rows).map_err(|e| BatchError::write(path, e))?;
    write_atomic(path, &bytes)
}

/// Writes the text report to `path` atomically.
pub fn save_report(path: &Path, report: &str) -> BatchResult<()> {
    write_atomic(path, report.as_bytes())
}
