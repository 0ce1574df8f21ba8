//! Fixed-interval scheduled sync.
//!
//! Runs the API-mode sync on a fixed period until cancelled. Runs are
//! awaited to completion before the next tick fires, so scheduled syncs
//! never overlap -- the engine assumes a single mutator per SKU.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use cromos_store::StoreBackend;

use crate::engine::SyncEngine;

/// Default period between scheduled syncs (5 minutes).
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(300);

/// Run the scheduled sync loop until `cancel` is triggered.
///
/// The first sync fires immediately; afterwards one sync per `period`.
/// A failed sync is logged and the loop continues with the next tick.
pub async fn run_scheduled<S: StoreBackend>(
    engine: &SyncEngine<S>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    tracing::info!(period_secs = period.as_secs(), "Scheduled sync started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Scheduled sync stopping");
                break;
            }
            _ = ticker.tick() => {
                match engine.sync_from_api().await {
                    Ok(report) => {
                        tracing::info!(summary = %report.summary, "Scheduled sync completed");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Scheduled sync failed");
                    }
                }
            }
        }
    }
}
