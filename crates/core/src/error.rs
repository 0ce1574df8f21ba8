//! Parse-layer error type.
//!
//! Per-row and per-item damage inside a feed is handled best-effort by the
//! parsers themselves; [`ParseError`] is reserved for documents that cannot
//! be decoded at all, which fails the whole import.

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The CSV document could not be read.
    #[error("CSV parse failed: {0}")]
    Csv(String),

    /// The XML document is not well formed.
    #[error("XML parse failed: {0}")]
    Xml(String),

    /// The API response body does not match any known envelope shape.
    #[error("API payload parse failed: {0}")]
    Api(String),
}
