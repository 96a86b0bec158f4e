//! # API Error Type
//!
//! What an HTTP client receives when a request cannot be served.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/procesar                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  spawn_blocking(run_batch) ──► BatchError ──┐                           │
//! │         │                                   │                           │
//! │         ▼                                   ▼                           │
//! │  task panicked / cancelled ──► JoinError ─► ApiError                    │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                          500 {"code": "...", "message": "..."}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected sales are part of a successful response, never an `ApiError`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tally_batch::BatchError;

/// API error body.
///
/// ```json
/// {
///   "code": "FILE_NOT_FOUND",
///   "message": "File not found: ventas.csv"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// An input file is missing
    FileNotFound,

    /// An input row or field is malformed
    ParseError,

    /// Reading or writing a file failed
    IoError,

    /// The run configuration is invalid
    ConfigError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<BatchError> for ApiError {
    fn from(err: BatchError) -> Self {
        let code = match err {
            BatchError::FileNotFound { .. } => ErrorCode::FileNotFound,
            BatchError::Parse { .. } => ErrorCode::ParseError,
            BatchError::Io { .. } | BatchError::Write { .. } => ErrorCode::IoError,
            BatchError::Config(_) => ErrorCode::ConfigError,
        };
        tracing::error!(code = ?code, error = %err, "Batch request failed");
        ApiError::new(code, err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!(error = %err, "Blocking task failed");
        ApiError::internal("Batch task did not complete")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_error_codes() {
        let err = ApiError::from(BatchError::not_found("ventas.csv"));
        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert_eq!(err.message, "File not found: ventas.csv");

        let err = ApiError::from(BatchError::parse("productos.csv", 2, "bad price"));
        assert_eq!(err.code, ErrorCode::ParseError);

        let err = ApiError::from(BatchError::write("out.csv", "disk full"));
        assert_eq!(err.code, ErrorCode::IoError);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::new(ErrorCode::ParseError, "bad row")).unwrap();
        assert_eq!(json, serde_json::json!({"code": "PARSE_ERROR", "message": "bad row"}));
    }

    #[test]
    fn test_status_is_500() {
        let response = ApiError::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
