//! # Source Loaders
//!
//! Decodes the product catalog and the sale requests from CSV.
//!
//! ## Accepted Headers
//! ```text
//! ┌──────────────────┬────────────────────┬──────────────────────────────┐
//! │ Field            │ Headers            │ Cell format                  │
//! ├──────────────────┼────────────────────┼──────────────────────────────┤
//! │ product id       │ product_id         │ non-empty text               │
//! │                  │ id_producto        │                              │
//! │ name             │ name               │ non-empty text               │
//! │                  │ nombre_producto    │                              │
//! │ price            │ price, precio      │ decimal ("1200.50")          │
//! │ initial stock    │ initial_stock      │ integer >= 0                 │
//! │                  │ stock_inicial      │                              │
//! │ quantity         │ quantity, cantidad │ integer > 0                  │
//! └──────────────────┴────────────────────┴──────────────────────────────┘
//! ```
//!
//! Cells are trimmed. The first bad row aborts the load with a
//! [`BatchError::Parse`] naming the file and line; no partial catalog or
//! request list is ever returned.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tally_core::validation::{
    validate_price, validate_product_id, validate_product_name, validate_quantity, validate_stock,
    validate_stock_value,
};
use tally_core::{Catalog, Money, Product, SaleRequest};
use tracing::{debug, warn};

use crate::error::{BatchError, BatchResult};

// =============================================================================
// Raw Rows
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProductRow {
    #[serde(alias = "id_producto")]
    product_id: String,
    #[serde(alias = "nombre_producto")]
    name: String,
    #[serde(alias = "precio")]
    price: String,
    #[serde(alias = "stock_inicial")]
    initial_stock: i64,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, tally_core::ValidationError> {
        let id = validate_product_id(&self.product_id)?;
        let name = validate_product_name(&self.name)?;
        let price = Money::parse_decimal(&self.price).map_err(|e| rename_field(e, "price"))?;
        let price = validate_price(price)?;
        let stock = validate_stock(self.initial_stock)?;
        Ok(Product::new(id, name, price, stock))
    }
}

#[derive(Debug, Deserialize)]
struct SaleRow {
    #[serde(alias = "id_producto")]
    product_id: String,
    #[serde(alias = "cantidad")]
    quantity: i64,
}

impl SaleRow {
    fn into_request(self, position: usize) -> Result<SaleRequest, tally_core::ValidationError> {
        let id = validate_product_id(&self.product_id)?;
        let quantity = validate_quantity(self.quantity)?;
        Ok(SaleRequest::new(position, id, quantity))
    }
}

// `Money::parse_decimal` reports on a generic "amount" field.
fn rename_field(err: tally_core::ValidationError, field: &str) -> tally_core::ValidationError {
    use tally_core::ValidationError as V;
    match err {
        V::Required { .. } => V::Required { field: field.to_string() },
        V::InvalidFormat { reason, .. } => V::InvalidFormat { field: field.to_string(), reason },
        V::OutOfRange { min, max, .. } => V::OutOfRange { field: field.to_string(), min, max },
        other => other,
    }
}

// =============================================================================
// Generic Readers
// =============================================================================

/// Reads every data row of `reader`, decoding each with `decode`.
///
/// `decode` receives the 1-based data row index. `source` is only used in
/// error messages.
fn read_rows<R, T, U, F>(reader: R, source: &Path, mut decode: F) -> BatchResult<Vec<U>>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
    F: FnMut(T, usize) -> Result<U, tally_core::ValidationError>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| csv_error(source, e))?
        .clone();

    let mut rows = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(source, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let raw: T = record
            .deserialize(Some(&headers))
            .map_err(|e| BatchError::parse(source, line, e.to_string()))?;

        let value = decode(raw, index + 1).map_err(|e| {
            warn!(path = %source.display(), line, error = %e, "Rejected source row");
            BatchError::parse(source, line, e.to_string())
        })?;
        rows.push(value);
    }

    Ok(rows)
}

fn csv_error(source: &Path, err: csv::Error) -> BatchError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => BatchError::from_io(source, io),
        _ => BatchError::parse(source, line, message),
    }
}

/// Decodes a catalog from any CSV reader.
///
/// Duplicate ids are not an error: the later row wins, keeping the
/// earlier row's position.
///
/// The running `price × stock` over all rows must fit in `i64` cents, so no
/// revenue computed from the catalog can overflow.
pub fn read_catalog<R: Read>(reader: R, source: &Path) -> BatchResult<Catalog> {
    let mut stock_value = Money::zero();
    let products = read_rows(reader, source, |row: ProductRow, _| {
        let product = row.into_product()?;
        stock_value = validate_stock_value(product.price, product.initial_stock, stock_value)?;
        Ok(product)
    })?;

    let mut catalog = Catalog::new();
    for product in products {
        let id = product.id.clone();
        if catalog.insert(product).is_some() {
            warn!(path = %source.display(), product_id = %id, "Duplicate product id, later row replaces earlier");
        }
    }

    debug!(path = %source.display(), products = catalog.len(), "Catalog decoded");
    Ok(catalog)
}

/// Decodes sale requests, in row order, from any CSV reader.
pub fn read_sale_requests<R: Read>(reader: R, source: &Path) -> BatchResult<Vec<SaleRequest>> {
    let requests = read_rows(reader, source, |row: SaleRow, position| row.into_request(position))?;
    debug!(path = %source.display(), requests = requests.len(), "Sale requests decoded");
    Ok(requests)
}

// =============================================================================
// File Loaders
// =============================================================================

fn open(path: &Path) -> BatchResult<File> {
    File::open(path).map_err(|e| BatchError::from_io(path, e))
}

/// Loads the product catalog from a CSV file.
pub fn load_catalog(path: &Path) -> BatchResult<Catalog> {
    read_catalog(open(path)?, path)
}

/// Loads the sale requests from a CSV file.
pub fn load_sale_requests(path: &Path) -> BatchResult<Vec<SaleRequest>> {
    read_sale_requests(open(path)?, path)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> &'static Path {
        Path::new("test.csv")
    }

    #[test]
    fn test_read_catalog_spanish_headers() {
        let data = "id_producto,nombre_producto,precio,stock_inicial\n\
                    P001, Laptop ,1200.50,10\n\
                    P002,Mouse,25,0\n";
        let catalog = read_catalog(data.as_bytes(), source()).unwrap();

        assert_eq!(catalog.len(), 2);
        let laptop = catalog.get("P001").unwrap();
        assert_eq!(laptop.name, "Laptop");
        assert_eq!(laptop.price, Money::from_cents(120_050));
        assert_eq!(laptop.initial_stock, 10);
        assert_eq!(laptop.current_stock(), 10);
        assert_eq!(catalog.get("P002").unwrap().initial_stock, 0);
    }

    #[test]
    fn test_read_catalog_english_headers() {
        let data = "product_id,name,price,initial_stock\nA,Laptop,10,2\n";
        let catalog = read_catalog(data.as_bytes(), source()).unwrap();
        assert_eq!(catalog.get("A").unwrap().price.cents(), 1000);
    }

    #[test]
    fn test_read_catalog_duplicate_id_last_wins() {
        let data = "product_id,name,price,initial_stock\n\
                    A,Old,1,1\n\
                    B,Mouse,2,2\n\
                    A,New,3,3\n";
        let catalog = read_catalog(data.as_bytes(), source()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("A").unwrap().name, "New");
        assert_eq!(catalog.iter().next().unwrap().id, "A");
    }

    #[test]
    fn test_read_catalog_bad_price_reports_line() {
        let data = "product_id,name,price,initial_stock\n\
                    A,Laptop,10,2\n\
                    B,Mouse,cheap,2\n";
        let err = read_catalog(data.as_bytes(), source()).unwrap_err();

        match err {
            BatchError::Parse { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.starts_with("price"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_catalog_rejects_negative_values() {
        let negative_price = "product_id,name,price,initial_stock\nA,Laptop,-1,2\n";
        assert!(matches!(
            read_catalog(negative_price.as_bytes(), source()),
            Err(BatchError::Parse { .. })
        ));

        let negative_stock = "product_id,name,price,initial_stock\nA,Laptop,1,-2\n";
        assert!(matches!(
            read_catalog(negative_stock.as_bytes(), source()),
            Err(BatchError::Parse { .. })
        ));
    }

    #[test]
    fn test_read_catalog_rejects_overflowing_stock_value() {
        let data = "product_id,name,price,initial_stock\n\
                    A,Yacht,50000000000000000,3\n";
        match read_catalog(data.as_bytes(), source()).unwrap_err() {
            BatchError::Parse { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("stock_value"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }

        // Each row fits on its own; the second pushes the catalog total over.
        let data = "product_id,name,price,initial_stock\n\
                    A,Yacht,50000000000000000,1\n\
                    B,Jet,50000000000000000,1\n";
        assert!(matches!(
            read_catalog(data.as_bytes(), source()),
            Err(BatchError::Parse { line: 3, .. })
        ));

        let data = "product_id,name,price,initial_stock\nA,Yacht,50000000000000000,1\n";
        assert_eq!(read_catalog(data.as_bytes(), source()).unwrap().len(), 1);
    }

    #[test]
    fn test_read_catalog_missing_column() {
        let data = "product_id,name,initial_stock\nA,Laptop,2\n";
        assert!(matches!(
            read_catalog(data.as_bytes(), source()),
            Err(BatchError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_read_sale_requests_positions() {
        let data = "id_producto,cantidad\nA,1\nA,5\nB,1\n";
        let requests = read_sale_requests(data.as_bytes(), source()).unwrap();

        assert_eq!(
            requests,
            vec![
                SaleRequest::new(1, "A", 1),
                SaleRequest::new(2, "A", 5),
                SaleRequest::new(3, "B", 1),
            ]
        );
    }

    #[test]
    fn test_read_sale_requests_rejects_non_positive_quantity() {
        for qty in ["0", "-3", "two", "1.5"] {
            let data = format!("product_id,quantity\nA,{qty}\n");
            assert!(
                matches!(read_sale_requests(data.as_bytes(), source()), Err(BatchError::Parse { .. })),
                "quantity {qty} should fail"
            );
        }
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let data = "product_id,quantity\nA,1,extra\n";
        assert!(matches!(
            read_sale_requests(data.as_bytes(), source()),
            Err(BatchError::Parse { .. })
        ));
    }

    #[test]
    fn test_header_only_source_is_empty() {
        let requests = read_sale_requests("product_id,quantity\n".as_bytes(), source()).unwrap();
        assert!(requests.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_catalog(Path::new("/definitely/not/here/productos.csv")).unwrap_err();
        assert!(matches!(err, BatchError::FileNotFound { .. }));
    }
}
