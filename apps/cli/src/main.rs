//! # tally
//!
//! Runs one sales batch from the command line.
//!
//! ```text
//! tally [--config FILE] [--products FILE] [--sales FILE]
//!       [--inventory-out FILE] [--report-out FILE] [--quiet]
//! ```
//!
//! Exits non-zero when a source is missing or malformed, or an output
//! cannot be written. Rejected sales are not failures.

mod args;
mod console;

use anyhow::Context;
use clap::Parser;
use tally_batch::run_batch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = args
        .resolve_config(|key| std::env::var(key).ok())
        .context("failed to load configuration")?;

    if !args.quiet {
        println!("{}", console::banner(&config.store.name));
    }

    let report = run_batch(&config).with_context(|| {
        format!(
            "batch run failed (products: {}, sales: {})",
            config.files.products.display(),
            config.files.sales.display()
        )
    })?;

    if !args.quiet {
        for outcome in &report.outcomes {
            println!("{}", console::outcome_line(outcome));
        }
        println!();
    }
    print!("{}", console::summary(&report));

    info!(run_id = %report.run_id, "Done");
    Ok(())
}

/// Logs go to stderr so stdout carries only the console report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tally=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
