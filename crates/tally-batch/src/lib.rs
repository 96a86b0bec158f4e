//! # tally-batch: File I/O and Batch Pipeline for Tally
//!
//! Loads the CSV sources, runs them through [`tally_core`], and writes the
//! updated inventory and the text report.
//!
//! ## Modules
//!
//! - [`config`] - `RunConfig`: file locations, store name, server binding
//! - [`loader`] - CSV decoding of the catalog and sale requests
//! - [`writer`] - Inventory CSV and atomic file writes
//! - [`report`] - Plain-text sales report
//! - [`pipeline`] - `run_batch` and `load_catalog_snapshot`
//! - [`error`] - `BatchError`
//!
//! ## Example
//!
//! ```rust,no_run
//! use tally_batch::{run_batch, RunConfig};
//!
//! let config = RunConfig::load(None)?;
//! let report = run_batch(&config)?;
//! println!("{} accepted, {} rejected", report.accepted_count, report.rejected_count);
//! # Ok::<(), tally_batch::BatchError>(())
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod writer;

pub use config::RunConfig;
pub use error::{BatchError, BatchResult};
pub use pipeline::{load_catalog_snapshot, run_batch, BatchReport, OutputFiles};
