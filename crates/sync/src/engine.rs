//! The reconciliation engine.
//!
//! One engine instance serves every entry point: file imports, API
//! polling, and single-record webhook pushes. Records are processed
//! strictly sequentially in input order -- each record may mutate shared
//! remote state keyed by SKU, and a single mutator per SKU keeps runs
//! deterministic. Per-record side effects happen in the fixed order
//! mapping -> inventory -> price -> attributes -> mark-synced.

use std::path::Path;

use cromos_core::parsers::{parse_csv, parse_xml};
use cromos_core::{ProductRecord, RunTally, SyncReport};
use cromos_denea::DeneaClient;
use cromos_store::{RunCompletion, StoreBackend};

use crate::error::SyncError;

// Sync-run type labels recorded in the run log.
pub const SYNC_TYPE_CSV: &str = "denea_csv";
pub const SYNC_TYPE_XML: &str = "denea_xml";
pub const SYNC_TYPE_API: &str = "denea_api";
pub const SYNC_TYPE_WEBHOOK: &str = "denea_webhook";

/// Run id used when the log store is unreachable at run start. Logging
/// is auxiliary; it must never block a sync.
const FALLBACK_RUN_ID: &str = "unknown";

/// Per-item error message for an unmapped SKU.
const MAPPING_NOT_FOUND: &str = "SKU mapping not found";

/// Emit a progress line every this many processed records.
const PROGRESS_EVERY: usize = 50;

/// Drives one sync run end to end against a [`StoreBackend`].
pub struct SyncEngine<S> {
    store: S,
    source: DeneaClient,
}

impl<S: StoreBackend> SyncEngine<S> {
    pub fn new(store: S, source: DeneaClient) -> Self {
        Self { store, source }
    }

    /// Import a Denea CSV export from disk and reconcile it.
    pub async fn import_csv_file(&self, path: &Path) -> Result<SyncReport, SyncError> {
        tracing::info!(path = %path.display(), "Importing Denea CSV file");
        let content = read_file(path).await?;
        let records = parse_csv(&content)?;
        tracing::info!(count = records.len(), "Parsed CSV feed");
        self.run(SYNC_TYPE_CSV, &records).await
    }

    /// Import a Denea XML export from disk and reconcile it.
    pub async fn import_xml_file(&self, path: &Path) -> Result<SyncReport, SyncError> {
        tracing::info!(path = %path.display(), "Importing Denea XML file");
        let content = read_file(path).await?;
        let records = parse_xml(&content)?;
        tracing::info!(count = records.len(), "Parsed XML feed");
        self.run(SYNC_TYPE_XML, &records).await
    }

    /// Poll the Denea API and reconcile the returned feed.
    pub async fn sync_from_api(&self) -> Result<SyncReport, SyncError> {
        tracing::info!("Syncing from Denea API");
        let records = self.source.fetch_products().await?;
        self.run(SYNC_TYPE_API, &records).await
    }

    /// Reconcile a single record pushed by a webhook.
    pub async fn apply_update(&self, record: &ProductRecord) -> Result<SyncReport, SyncError> {
        self.run(SYNC_TYPE_WEBHOOK, std::slice::from_ref(record))
            .await
    }

    /// Execute one run over an already-parsed record list.
    ///
    /// Creates the run-log row (best effort), processes records
    /// sequentially, and writes final counters. An aborted run -- today
    /// only a mapping-store transport failure -- records status `error`
    /// and propagates to the caller.
    pub async fn run(
        &self,
        sync_type: &str,
        records: &[ProductRecord],
    ) -> Result<SyncReport, SyncError> {
        tracing::info!(sync_type, total = records.len(), "Starting sync run");

        let run_id = match self.store.open_run(sync_type, records.len()).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create sync-run log, using sentinel run id");
                FALLBACK_RUN_ID.to_string()
            }
        };

        let mut tally = RunTally::new();
        match self.reconcile_all(records, &mut tally).await {
            Ok(()) => {
                let completion = RunCompletion {
                    status: tally.status(),
                    processed: tally.processed(),
                    updated: tally.updated(),
                    errors: tally.errors(),
                };
                if let Err(e) = self.store.close_run(&run_id, &completion).await {
                    tracing::warn!(run_id = %run_id, error = %e, "Failed to record sync-run completion");
                }

                let report = tally.into_report();
                tracing::info!(run_id = %run_id, summary = %report.summary, "Sync run completed");
                Ok(report)
            }
            Err(fatal) => {
                tracing::error!(run_id = %run_id, error = %fatal, "Sync run aborted");
                if let Err(e) = self.store.abort_run(&run_id, &fatal.to_string()).await {
                    tracing::warn!(run_id = %run_id, error = %e, "Failed to record sync-run abort");
                }
                Err(fatal)
            }
        }
    }

    async fn reconcile_all(
        &self,
        records: &[ProductRecord],
        tally: &mut RunTally,
    ) -> Result<(), SyncError> {
        for record in records {
            self.reconcile_record(record, tally).await?;

            if tally.processed() % PROGRESS_EVERY == 0 {
                tracing::info!(
                    processed = tally.processed(),
                    total = records.len(),
                    "Sync progress"
                );
            }
        }
        Ok(())
    }

    /// Process one record. Per-item failures land in the tally; only a
    /// mapping-store transport failure escapes and aborts the run.
    async fn reconcile_record(
        &self,
        record: &ProductRecord,
        tally: &mut RunTally,
    ) -> Result<(), SyncError> {
        let mapping = match self.store.find_mapping(&record.code).await {
            Ok(Some(mapping)) => mapping,
            Ok(None) => {
                tally.record_failure(&record.code, MAPPING_NOT_FOUND);
                return Ok(());
            }
            Err(source) => {
                return Err(SyncError::MappingLookup {
                    sku: record.code.clone(),
                    source,
                })
            }
        };

        // Inventory accuracy is the run's primary guarantee: this is the
        // only call whose failure fails the record.
        if let Err(e) = self
            .store
            .set_inventory(&mapping.variant_id, record.stock)
            .await
        {
            tracing::warn!(
                sku = %record.code,
                variant_id = %mapping.variant_id,
                error = %e,
                "Inventory update failed"
            );
            tally.record_failure(&record.code, e.to_string());
            return Ok(());
        }

        // Price sync is best effort and never blocks inventory correctness.
        if record.has_price() {
            if let Err(e) = self
                .store
                .set_price(&mapping.variant_id, record.price_cents())
                .await
            {
                tracing::warn!(sku = %record.code, error = %e, "Price update failed, continuing");
            }
        }

        // Extended attributes are cosmetic metadata.
        if let Err(e) = self
            .store
            .set_extended_attributes(&mapping.product_id, record)
            .await
        {
            tracing::warn!(sku = %record.code, error = %e, "Extended attribute update failed, continuing");
        }

        // Freshness marker; the inventory update has already committed.
        if let Err(e) = self.store.mark_synced(&mapping.id).await {
            tracing::warn!(
                sku = %record.code,
                mapping_id = %mapping.id,
                error = %e,
                "Failed to touch mapping freshness, continuing"
            );
        }

        tally.record_success();
        Ok(())
    }
}

async fn read_file(path: &Path) -> Result<String, SyncError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SyncError::Io {
            path: path.to_path_buf(),
            source,
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
