use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;

use cromos_sync::SyncError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`SyncError`] for engine failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce the service's
/// `{error, message, timestamp}` JSON error shape.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The webhook signature was missing or did not match the payload.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Every update in a webhook batch failed to process.
    #[error("Webhook processing failed: {0}")]
    WebhookProcessing(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A run-level failure from the sync engine.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::InvalidSignature => (
                StatusCode::BAD_REQUEST,
                "Invalid webhook signature",
                "X-Denea-Signature header is missing or does not match the payload".to_string(),
            ),
            AppError::WebhookProcessing(msg) => (
                StatusCode::BAD_REQUEST,
                "Webhook processing failed",
                msg.clone(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", msg.clone()),

            // A parse failure is the caller's document; everything else
            // escaping the engine is a server-side failure.
            AppError::Sync(SyncError::Parse(e)) => {
                (StatusCode::BAD_REQUEST, "Import failed", e.to_string())
            }
            AppError::Sync(e) => {
                tracing::error!(error = %e, "Sync run failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Sync failed",
                    e.to_string(),
                )
            }

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    msg.clone(),
                )
            }
        };

        let body = json!({
            "error": error,
            "message": message,
            "timestamp": Utc::now().to_rfc3339(),
        });

        (status, axum::Json(body)).into_response()
    }
}
