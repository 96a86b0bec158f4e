//! # tally-api: HTTP Surface for Tally
//!
//! ## Request Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/productos                                                     │
//! │     └─► spawn_blocking(load_catalog_snapshot)  (no lock, read-only)    │
//! │                                                                         │
//! │  GET /api/procesar                                                      │
//! │     └─► run_lock.lock_owned().await                                     │
//! │           └─► spawn_blocking(run_batch, guard moved in)                 │
//! │                 fresh catalog, writes inventory + report                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Processing runs overwrite the same output files, so they are serialized.
//! The lock guard lives inside the blocking task and is released when the run
//! ends, even if the client has already disconnected. No catalog is kept
//! between requests.

pub mod error;

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tally_batch::{load_catalog_snapshot, run_batch, BatchReport, RunConfig};
use tally_core::CatalogEntry;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

use crate::error::ApiError;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    pub config: RunConfig,
    run_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: RunConfig) -> Self {
        AppState {
            config,
            run_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Builds the router used by the binary and by tests.
pub fn build_app(config: RunConfig) -> Router {
    let state = Arc::new(AppState::new(config));

    Router::new()
        .route("/api/productos", get(list_products))
        .route("/api/procesar", get(process_batch))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Health check endpoint.
async fn health_handler() -> impl IntoResponse {
    "OK"
}

/// Catalog as loaded from the products file.
async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    let config = state.config.clone();
    let entries = tokio::task::spawn_blocking(move || load_catalog_snapshot(&config)).await??;
    Ok(Json(entries))
}

/// Runs a full batch and returns its report.
async fn process_batch(State(state): State<Arc<AppState>>) -> Result<Json<BatchReport>, ApiError> {
    let config = state.config.clone();
    let report = spawn_exclusive(&state.run_lock, move || run_batch(&config)).await.await??;

    info!(
        run_id = %report.run_id,
        accepted = report.accepted_count,
        rejected = report.rejected_count,
        "Batch served over HTTP"
    );
    Ok(Json(report))
}

/// Waits for `lock`, then runs `f` on the blocking pool while holding it.
///
/// The guard is owned by the blocking task, so dropping the returned handle
/// does not release the lock before `f` returns.
async fn spawn_exclusive<F, T>(lock: &Arc<Mutex<()>>, f: F) -> JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let guard = Arc::clone(lock).lock_owned().await;
    tokio::task::spawn_blocking(move || {
        let _guard = guard;
        f()
    })
}
