//! HTTP client for the Cromos commerce backend's admin API.
//!
//! This is the write side of the sync: SKU-mapping lookups, absolute
//! inventory sets, price updates, extended product attributes, and the
//! sync-run log. The [`StoreBackend`] trait is the seam the
//! reconciliation engine is generic over, so engine tests can run against
//! an in-memory store.

pub mod backend;
pub mod client;
pub mod config;

pub use backend::{RunCompletion, StoreBackend};
pub use client::{StoreClient, StoreError};
pub use config::StoreConfig;
