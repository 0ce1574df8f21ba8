//! Denea API response parser.
//!
//! The polling API wraps its product list in one of several envelopes
//! (`{"products": [...]}`, `{"data": [...]}`, or a bare array) and uses the
//! same inconsistent field naming as the file feeds, English-first.
//! Numeric fields arrive as JSON numbers or numeric strings depending on
//! the ERP version. [`record_from_value`] is also used by the webhook
//! receiver for partial single-record updates.

use serde_json::Value;

use crate::error::ParseError;
use crate::record::ProductRecord;

type JsonMap = serde_json::Map<String, Value>;

/// Extract the product list from a Denea API response body.
///
/// Fails with [`ParseError::Api`] when no known envelope shape matches;
/// individual items without a code are dropped.
pub fn parse_api_items(payload: &Value) -> Result<Vec<ProductRecord>, ParseError> {
    let items = payload
        .get("products")
        .and_then(Value::as_array)
        .or_else(|| payload.get("data").and_then(Value::as_array))
        .or_else(|| payload.as_array())
        .ok_or_else(|| {
            ParseError::Api(
                "response is not a product list (expected `products`, `data`, or a bare array)"
                    .to_string(),
            )
        })?;

    Ok(items.iter().filter_map(record_from_value).collect())
}

/// Build a record from a single JSON object, applying the English-first
/// field fallback chains. Returns `None` when no usable code is present.
pub fn record_from_value(value: &Value) -> Option<ProductRecord> {
    let obj = value.as_object()?;
    let code = text_field(obj, &["sku", "codice", "code"])?;

    Some(ProductRecord {
        code,
        description: text_field(obj, &["name", "descrizione", "title"]).unwrap_or_default(),
        category: text_field(obj, &["category", "categoria"]).unwrap_or_default(),
        stock: int_field(obj, &["stock", "giacenza", "quantity"]),
        price: price_field(obj, &["price", "prezzo"]),
        cost_price: cost_field(obj, &["cost_price", "prezzo_acquisto"]),
        supplier: text_field(obj, &["supplier", "fornitore"]),
        brand: text_field(obj, &["brand", "marca"]),
        model: text_field(obj, &["model", "modello"]),
        color: text_field(obj, &["color", "colore"]),
        material: text_field(obj, &["material", "materiale"]),
        compatibility: text_field(obj, &["compatibility", "compatibilita"]),
    })
}

// ---------------------------------------------------------------------------
// Field lookup helpers
// ---------------------------------------------------------------------------

/// First non-empty text value along a key fallback chain. Bare numbers
/// (some exports send numeric SKUs) are stringified.
fn text_field(obj: &JsonMap, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key) {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// First numeric value along a key fallback chain, accepting numbers and
/// numeric strings.
fn number_field(obj: &JsonMap, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| match obj.get(*key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn int_field(obj: &JsonMap, keys: &[&str]) -> i64 {
    number_field(obj, keys)
        .filter(|v| v.is_finite())
        .map(|v| (v.trunc() as i64).max(0))
        .unwrap_or(0)
}

fn price_field(obj: &JsonMap, keys: &[&str]) -> f64 {
    number_field(obj, keys)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

fn cost_field(obj: &JsonMap, keys: &[&str]) -> Option<f64> {
    number_field(obj, keys).filter(|v| v.is_finite() && *v > 0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
