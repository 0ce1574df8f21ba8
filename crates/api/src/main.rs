use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cromos_api::config::ServerConfig;
use cromos_api::router::build_app_router;
use cromos_api::state::AppState;
use cromos_denea::{DeneaClient, DeneaConfig};
use cromos_store::{StoreClient, StoreConfig};
use cromos_sync::SyncEngine;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cromos_api=debug,cromos_sync=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    // Missing credentials warn here and fail at call time; the server
    // itself always starts.
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let denea_config = DeneaConfig::from_env();
    let store_config = StoreConfig::from_env();

    // --- Sync engine ---
    let webhook_secret: Option<Arc<str>> = denea_config.webhook_secret.clone().map(Arc::from);
    let engine = Arc::new(SyncEngine::new(
        StoreClient::new(store_config),
        DeneaClient::new(denea_config),
    ));
    tracing::info!("Sync engine ready");

    // --- App state ---
    let state = AppState {
        engine,
        webhook_secret,
        config: Arc::new(config.clone()),
        started_at: Instant::now(),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting Denea webhook server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
