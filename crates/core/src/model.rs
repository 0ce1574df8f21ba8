//! Wire model types shared between the sync engine and the store client.
//!
//! SKU mappings and sync-run logs are owned by the Cromos commerce backend;
//! this service only reads mappings, touches their freshness marker, and
//! writes one run-log row per sync invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SKU mapping
// ---------------------------------------------------------------------------

/// Lifecycle state of a Denea-SKU-to-variant mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStatus {
    /// The mapping has synced recently.
    Active,
    /// The mapping exists but has not synced in a while.
    Stale,
    /// The mapping has never been observed by a sync run.
    Unknown,
}

impl MappingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Stale => "stale",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_mapping_status() -> MappingStatus {
    MappingStatus::Unknown
}

/// A Denea SKU mapped to a Cromos product variant.
///
/// Owned by the store; the engine never creates or deletes mappings. A
/// missing mapping for a code is an expected state (unmapped SKU), not an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuMapping {
    /// Mapping row id in the store.
    pub id: String,
    /// The external Denea SKU.
    pub denea_sku: String,
    /// Target variant whose inventory and price this SKU drives.
    pub variant_id: String,
    /// Target product carrying the extended attributes.
    pub product_id: String,
    /// When a sync run last touched this mapping.
    #[serde(default)]
    pub last_sync_at: Option<DateTime<Utc>>,
    /// Mapping lifecycle state.
    #[serde(rename = "mapping_status", default = "default_mapping_status")]
    pub status: MappingStatus,
}

// ---------------------------------------------------------------------------
// Sync run status
// ---------------------------------------------------------------------------

/// Status of a sync-run log row in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The run is in flight (set at creation).
    Running,
    /// Completed with zero item errors.
    Success,
    /// Completed, but some items failed.
    Partial,
    /// The run aborted before consuming all records.
    Error,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Per-item and per-run results
// ---------------------------------------------------------------------------

/// One failed item within a run, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    /// The Denea SKU that failed.
    pub sku: String,
    /// Human-readable failure reason.
    pub error: String,
}

/// Summary returned to the caller after a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    /// True when every record synced cleanly.
    pub success: bool,
    /// Records consumed (equals `updated + errors.len()`).
    pub processed: usize,
    /// Records whose inventory update committed.
    pub updated: usize,
    /// Ordered per-item failures.
    pub errors: Vec<ItemError>,
    /// One-line human summary.
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
