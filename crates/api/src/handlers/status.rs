use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::state::AppState;

/// GET /status -- service metadata and endpoint directory.
pub async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": "Cromos Denea Integration",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "timestamp": Utc::now().to_rfc3339(),
        "endpoints": {
            "health": "GET /health",
            "webhook": "POST /webhook/denea",
            "test": "POST /webhook/test",
            "manual_sync": "POST /sync/manual",
            "upload_csv": "POST /upload/csv",
            "upload_xml": "POST /upload/xml",
        },
    }))
}
