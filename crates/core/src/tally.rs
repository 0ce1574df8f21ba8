//! Typed accumulator for per-run sync outcomes.
//!
//! [`RunTally`] replaces free-form result-array bookkeeping with two
//! operations, so `processed == updated + errors.len()` holds by
//! construction rather than by caller discipline.

use crate::model::{ItemError, RunStatus, SyncReport};

/// Accumulates per-item outcomes for one sync run.
///
/// `processed` is only ever advanced by [`record_success`](Self::record_success)
/// and [`record_failure`](Self::record_failure), each of which also advances
/// exactly one of the success/error sides.
#[derive(Debug, Default)]
pub struct RunTally {
    processed: usize,
    updated: usize,
    errors: Vec<ItemError>,
}

impl RunTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record whose inventory update committed.
    pub fn record_success(&mut self) {
        self.processed += 1;
        self.updated += 1;
    }

    /// Count one failed record, preserving processing order in the error
    /// list.
    pub fn record_failure(&mut self, sku: impl Into<String>, error: impl Into<String>) {
        self.processed += 1;
        self.errors.push(ItemError {
            sku: sku.into(),
            error: error.into(),
        });
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn updated(&self) -> usize {
        self.updated
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ItemError] {
        &self.errors
    }

    /// Final run status: `success` with zero item errors, else `partial`.
    pub fn status(&self) -> RunStatus {
        if self.errors.is_empty() {
            RunStatus::Success
        } else {
            RunStatus::Partial
        }
    }

    /// Consume the tally into the caller-facing report.
    pub fn into_report(self) -> SyncReport {
        let summary = format!(
            "Processed: {}, Updated: {}, Errors: {}",
            self.processed,
            self.updated,
            self.errors.len()
        );
        SyncReport {
            success: self.errors.is_empty(),
            processed: self.processed,
            updated: self.updated,
            errors: self.errors,
            summary,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_balance_after_mixed_outcomes() {
        let mut tally = RunTally::new();
        tally.record_success();
        tally.record_failure("A100", "SKU mapping not found");
        tally.record_success();
        tally.record_failure("B200", "inventory update failed");

        assert_eq!(tally.processed(), 4);
        assert_eq!(tally.updated(), 2);
        assert_eq!(tally.error_count(), 2);
        assert_eq!(tally.processed(), tally.updated() + tally.error_count());
    }

    #[test]
    fn errors_preserve_processing_order() {
        let mut tally = RunTally::new();
        tally.record_failure("A100", "first");
        tally.record_failure("B200", "second");

        let skus: Vec<&str> = tally.errors().iter().map(|e| e.sku.as_str()).collect();
        assert_eq!(skus, ["A100", "B200"]);
    }

    #[test]
    fn status_is_success_only_without_errors() {
        let mut tally = RunTally::new();
        tally.record_success();
        assert_eq!(tally.status(), RunStatus::Success);

        tally.record_failure("A100", "boom");
        assert_eq!(tally.status(), RunStatus::Partial);
    }

    #[test]
    fn report_summary_matches_counters() {
        let mut tally = RunTally::new();
        tally.record_success();
        tally.record_failure("A100", "SKU mapping not found");

        let report = tally.into_report();
        assert!(!report.success);
        assert_eq!(report.processed, 2);
        assert_eq!(report.updated, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.summary, "Processed: 2, Updated: 1, Errors: 1");
    }

    #[test]
    fn empty_run_reports_success() {
        let report = RunTally::new().into_report();
        assert!(report.success);
        assert_eq!(report.processed, 0);
        assert_eq!(report.summary, "Processed: 0, Updated: 0, Errors: 0");
    }
}
