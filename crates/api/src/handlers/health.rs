use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Service identifier.
    pub service: &'static str,
    /// Current server time (RFC 3339).
    pub timestamp: String,
}

/// GET /health -- service liveness.
///
/// The service holds no local state; reachable means healthy. Upstream
/// connectivity problems surface per call, not here.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "cromos-denea-webhook",
        timestamp: Utc::now().to_rfc3339(),
    })
}
