//! Shared helpers for API integration tests.
//!
//! Builds the real application router (full middleware stack) around an
//! engine whose upstream clients are deliberately unconfigured: every
//! store/ERP call short-circuits with an `Unconfigured` error before any
//! network I/O, which makes the failure paths deterministic and
//! network-free.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cromos_api::config::ServerConfig;
use cromos_api::router::build_app_router;
use cromos_api::state::AppState;
use cromos_denea::{DeneaClient, DeneaConfig};
use cromos_store::{StoreClient, StoreConfig};
use cromos_sync::SyncEngine;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8000".to_string()],
        request_timeout_secs: 30,
        body_limit_bytes: 10 * 1024 * 1024,
    }
}

/// Build the full application router with all middleware layers.
///
/// `webhook_secret` controls whether inbound webhooks can ever verify.
pub fn build_test_app(webhook_secret: Option<&str>) -> Router {
    let config = test_config();

    let engine = Arc::new(SyncEngine::new(
        StoreClient::new(StoreConfig::unconfigured()),
        DeneaClient::new(DeneaConfig::unconfigured()),
    ));

    let state = AppState {
        engine,
        webhook_secret: webhook_secret.map(Arc::from),
        config: Arc::new(config.clone()),
        started_at: Instant::now(),
    };

    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, path: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a JSON value against the app.
pub async fn post_json(app: Router, path: &str, body: &serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST raw bytes with an optional webhook signature header.
pub async fn post_signed(
    app: Router,
    path: &str,
    body: impl Into<Vec<u8>>,
    signature: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("x-denea-signature", signature);
    }

    app.oneshot(builder.body(Body::from(body.into())).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("response body was not JSON: {e}"))
}
