//! The normalized vendor product record.
//!
//! All three feed parsers (CSV, XML, API JSON) produce [`ProductRecord`]
//! values. A record is constructed once per parse and never mutated or
//! persisted by this service; it only drives one reconciliation pass.

use serde::{Deserialize, Serialize};

/// A single product row as reported by the Denea ERP, normalized across
/// the vendor's CSV, XML, and API naming schemes.
///
/// Numeric fields are best-effort: unparseable stock defaults to 0 and
/// unparseable or non-positive prices default to 0 / `None`, so a damaged
/// field never fails a whole import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Vendor SKU (`codice`). Never empty; rows without one are dropped
    /// by the parsers.
    pub code: String,
    /// Product description (`descrizione`).
    pub description: String,
    /// Vendor category (`categoria`).
    pub category: String,
    /// On-hand quantity (`giacenza`), clamped to be non-negative.
    pub stock: i64,
    /// Retail price in major currency units (`prezzo`). Always finite
    /// and non-negative; 0 means "no price in this feed".
    pub price: f64,
    /// Purchase price (`prezzo_acquisto`), when the feed carries one.
    pub cost_price: Option<f64>,
    /// Supplier name (`fornitore`).
    pub supplier: Option<String>,
    /// Phone brand the accessory targets (`marca`).
    pub brand: Option<String>,
    /// Phone model the accessory targets (`modello`).
    pub model: Option<String>,
    /// Color (`colore`).
    pub color: Option<String>,
    /// Material (`materiale`).
    pub material: Option<String>,
    /// Compatibility note (`compatibilita`).
    pub compatibility: Option<String>,
}

impl ProductRecord {
    /// Whether this feed row carries a usable retail price.
    ///
    /// Price updates are only attempted for priced rows; a zero price
    /// means the feed did not include one.
    pub fn has_price(&self) -> bool {
        self.price > 0.0
    }

    /// Retail price converted to minor currency units (cents), rounded.
    ///
    /// The store API prices variants in minor units: 9.99 becomes 999.
    pub fn price_cents(&self) -> i64 {
        (self.price * 100.0).round() as i64
    }
}

// ---------------------------------------------------------------------------
// Field normalization helpers (shared by the parsers)
// ---------------------------------------------------------------------------

/// Parse a stock quantity, defaulting to 0 and clamping negatives.
pub(crate) fn normalize_stock(raw: &str) -> i64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| (v.trunc() as i64).max(0))
        .unwrap_or(0)
}

/// Parse a retail price, defaulting to 0 for missing, unparseable,
/// negative, or non-finite values.
pub(crate) fn normalize_price(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Parse an optional cost price; absent, unparseable, and non-positive
/// values all collapse to `None`.
pub(crate) fn normalize_cost(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Trim an optional text field; empty becomes `None`.
pub(crate) fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
