use std::sync::Arc;
use std::time::Instant;

use cromos_store::StoreClient;
use cromos_sync::SyncEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; the engine and config live behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The reconciliation engine every endpoint drives.
    pub engine: Arc<SyncEngine<StoreClient>>,
    /// Denea webhook signing secret; `None` rejects all webhooks.
    pub webhook_secret: Option<Arc<str>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Process start time, for the `/status` uptime field.
    pub started_at: Instant,
}
