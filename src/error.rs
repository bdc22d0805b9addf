//! Ingestion error types with HTTP status code mapping.
//!
//! [`IngestError`] is the central error type for the write path. Each variant
//! maps to a specific HTTP status code and a structured JSON error response,
//! so the endpoint can surface persistence failures to the client instead of
//! unconditionally acknowledging them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "message": "unknown destination table: weather"
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with a human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub message: String,
}

/// Write-path error enum with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Database credentials missing or empty; checked before any I/O.
    #[error("USERNAME and PASSWORD must be set to non-empty values")]
    Configuration,

    /// Payload named a table outside the configured allow-list.
    #[error("unknown destination table: {0}")]
    TableNotAllowed(String),

    /// The active schema stores calibration offsets but the payload has none.
    #[error("payload missing calibration offsets required by the active schema")]
    MissingOffsets,

    /// Connect, prepare, execute, or commit failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IngestError {
    /// Returns the HTTP status code for this variant.
    pub fn status_code(&self) -> StatusCode {
        // ---
        match self {
            Self::TableNotAllowed(_) | Self::MissingOffsets => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Configuration | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
