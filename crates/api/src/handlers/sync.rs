use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /sync/manual -- trigger an API-mode sync synchronously.
///
/// Returns the completed run's report; a run-level failure maps to the
/// standard error shape (parse -> 400, everything else -> 500).
pub async fn manual_sync(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    tracing::info!("Manual sync triggered");

    let report = state.engine.sync_from_api().await?;

    Ok(Json(json!({
        "message": "Manual sync completed",
        "result": report,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
