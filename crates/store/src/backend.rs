//! The store seam the reconciliation engine drives.
//!
//! [`StoreBackend`] abstracts every write the engine performs against the
//! commerce backend. [`StoreClient`](crate::StoreClient) is the
//! production implementation; engine tests substitute an in-memory store.

use std::future::Future;

use cromos_core::{ItemError, ProductRecord, RunStatus, SkuMapping};

use crate::client::StoreError;

/// Final counters written to a sync-run log row at completion.
#[derive(Debug, Clone, Copy)]
pub struct RunCompletion<'a> {
    /// `success` when the run had zero item errors, else `partial`.
    pub status: RunStatus,
    /// Records consumed.
    pub processed: usize,
    /// Records whose inventory update committed.
    pub updated: usize,
    /// Ordered per-item failures.
    pub errors: &'a [ItemError],
}

/// Operations the reconciliation engine needs from the commerce backend.
pub trait StoreBackend: Send + Sync {
    /// Look up the mapping for an external SKU.
    ///
    /// `Ok(None)` is the expected not-found outcome (unmapped SKU) and is
    /// distinct from a transport failure. Every call is a fresh request;
    /// mappings are never cached.
    fn find_mapping(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<SkuMapping>, StoreError>> + Send;

    /// Touch a mapping's freshness marker (`last_sync_at`, status
    /// `active`). Callers treat failures as best-effort.
    fn mark_synced(&self, mapping_id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Set a variant's on-hand quantity (absolute set, not a delta).
    fn set_inventory(
        &self,
        variant_id: &str,
        quantity: i64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Replace a variant's price, amount in minor currency units.
    fn set_price(
        &self,
        variant_id: &str,
        amount_cents: i64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Overwrite a product's extended Denea attributes.
    fn set_extended_attributes(
        &self,
        product_id: &str,
        record: &ProductRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Create a sync-run log row with status `running`; returns its id.
    fn open_run(
        &self,
        sync_type: &str,
        items_total: usize,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Write final status, counters, and the ordered error list.
    fn close_run(
        &self,
        run_id: &str,
        completion: &RunCompletion<'_>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Mark a run as aborted (`error`) with the captured message.
    fn abort_run(
        &self,
        run_id: &str,
        message: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
