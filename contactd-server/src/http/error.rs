//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Server-side causes are logged and never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{DbError, StoreError};
use crate::models::ValidationError;

/// Generic message returned in place of server-side causes
pub const INTERNAL_ERROR: &str = "an internal error occurred";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Payload failed validation (400)
    Validation(ValidationError),

    /// Insert failed on a live store (500, logged)
    SubmitFailed(StoreError),

    /// Listing failed on a live store (500, logged)
    ListFailed(DbError),

    /// Datastore not configured or unreachable (500, logged)
    Unavailable(DbError),

    /// No such route (404)
    NotFound { method: String, path: String },

    /// Route exists but not for this method (405)
    MethodNotAllowed { method: String, path: String },

    /// Handler panicked (500, logged)
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Validation error",
                    "errors": e.violations()
                }),
            ),
            Self::SubmitFailed(e) => {
                tracing::error!(error = %e, "contact form error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "message": "Failed to send message. Please try again.",
                        "error": INTERNAL_ERROR
                    }),
                )
            }
            Self::ListFailed(e) => {
                tracing::error!(error = %e, "error fetching messages");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "message": "Error fetching messages",
                        "error": INTERNAL_ERROR
                    }),
                )
            }
            Self::Unavailable(e) => {
                tracing::error!(error = %e, "datastore unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal Server Error",
                        "status": 500
                    }),
                )
            }
            Self::NotFound { method, path } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": format!("Cannot {} {}", method, path),
                    "status": 404
                }),
            ),
            Self::MethodNotAllowed { method, path } => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({
                    "error": format!("Cannot {} {}", method, path),
                    "status": 405
                }),
            ),
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal Server Error",
                        "status": 500
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
