//! Feed parsers for the three Denea source formats.
//!
//! Each parser converts a raw payload into an ordered `Vec<ProductRecord>`.
//! All three are total over well-formed input: damaged rows/items are
//! dropped, and only an undecodable document fails with
//! [`ParseError`](crate::ParseError).

mod api;
mod csv;
mod xml;

pub use api::{parse_api_items, record_from_value};
pub use csv::{parse_csv, parse_csv_with_delimiter, DEFAULT_DELIMITER};
pub use xml::parse_xml;
