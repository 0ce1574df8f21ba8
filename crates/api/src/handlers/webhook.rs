//! Inbound Denea webhook handling.
//!
//! The signature is verified over the exact raw request bytes before any
//! parsing happens; an invalid or missing signature rejects the request
//! with no processing. A valid payload is either `{"updates": [...]}` or
//! a bare record, and each update runs through the engine's single-item
//! path.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use cromos_core::parsers::record_from_value;
use cromos_core::signature::verify_signature;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Header carrying the hex HMAC-SHA256 of the request body.
pub const SIGNATURE_HEADER: &str = "x-denea-signature";

/// POST /webhook/denea -- apply pushed inventory/price updates.
pub async fn denea_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let secret = state.webhook_secret.as_deref().unwrap_or("");

    tracing::info!(
        signature_present = !signature.is_empty(),
        payload_bytes = body.len(),
        "Received Denea webhook"
    );

    if !verify_signature(&body, signature, secret) {
        tracing::warn!("Rejected Denea webhook: invalid signature");
        return Err(AppError::InvalidSignature);
    }

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON payload: {e}")))?;

    // Either a batch envelope or a single bare record.
    let updates: Vec<Value> = match payload.get("updates").and_then(Value::as_array) {
        Some(batch) => batch.clone(),
        None => vec![payload],
    };

    let mut applied = 0usize;
    let mut failed = 0usize;
    for update in &updates {
        let Some(record) = record_from_value(update) else {
            tracing::warn!("Skipping webhook update without a usable SKU");
            failed += 1;
            continue;
        };

        match state.engine.apply_update(&record).await {
            Ok(report) => {
                if !report.success {
                    tracing::warn!(
                        sku = %record.code,
                        summary = %report.summary,
                        "Webhook update completed with errors"
                    );
                }
                applied += 1;
            }
            Err(e) => {
                tracing::error!(sku = %record.code, error = %e, "Failed to process webhook update");
                failed += 1;
            }
        }
    }

    if applied == 0 && failed > 0 {
        return Err(AppError::WebhookProcessing(format!(
            "all {failed} updates failed to process"
        )));
    }

    tracing::info!(applied, failed, "Webhook processed");
    Ok(Json(json!({
        "message": "Webhook processed successfully",
        "updates_applied": applied,
        "updates_failed": failed,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// POST /webhook/test -- echo endpoint for connectivity checks.
pub async fn test_webhook(Json(payload): Json<Value>) -> Json<Value> {
    tracing::info!("Test webhook received");
    Json(json!({
        "message": "Test webhook received",
        "received": payload,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
