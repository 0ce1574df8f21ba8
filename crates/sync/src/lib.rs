//! The Denea -> Cromos reconciliation engine.
//!
//! [`SyncEngine`] drives one sync run end to end: parse or fetch a vendor
//! feed, resolve each SKU mapping, push inventory/price/attribute updates
//! through a [`StoreBackend`](cromos_store::StoreBackend), and record a
//! sync-run log row plus an in-memory [`SyncReport`](cromos_core::SyncReport).
//! [`scheduler`] wraps the API-mode sync in a fixed-interval loop.

pub mod engine;
pub mod error;
pub mod scheduler;

pub use engine::{SyncEngine, SYNC_TYPE_API, SYNC_TYPE_CSV, SYNC_TYPE_WEBHOOK, SYNC_TYPE_XML};
pub use error::SyncError;
pub use scheduler::{run_scheduled, DEFAULT_SYNC_INTERVAL};
