//! Run-level error type for the reconciliation engine.
//!
//! Per-item failures never surface here; they are folded into the run's
//! [`RunTally`](cromos_core::RunTally). A [`SyncError`] means the run (or
//! the import leading up to it) could not proceed at all.

use std::path::PathBuf;

use cromos_core::ParseError;
use cromos_denea::DeneaError;
use cromos_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The source document could not be decoded; no run was started.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The source file could not be read; no run was started.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The Denea feed could not be fetched; no run was started.
    #[error(transparent)]
    Source(#[from] DeneaError),

    /// The mapping store became unreachable mid-run. Unlike an unmapped
    /// SKU (a per-item skip), this aborts the run so an outage is never
    /// recorded as thousands of "mapping not found" item errors.
    #[error("SKU mapping lookup failed for {sku}: {source}")]
    MappingLookup {
        sku: String,
        #[source]
        source: StoreError,
    },
}
