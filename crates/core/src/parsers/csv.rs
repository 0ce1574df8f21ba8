//! Denea CSV feed parser.
//!
//! The vendor exports semicolon-separated rows with a fixed column order:
//!
//! ```text
//! codice;descrizione;categoria;giacenza;prezzo;prezzo_acquisto;
//! fornitore;marca;modello;colore;materiale;compatibilita
//! ```
//!
//! The header row is positional only (its labels are not consulted). Rows
//! with an empty first column are skipped, unreadable rows are dropped,
//! and numeric fields fall back to 0 / `None` rather than failing the
//! import.

use crate::error::ParseError;
use crate::record::{
    normalize_cost, normalize_price, normalize_stock, normalize_text, ProductRecord,
};

/// Denea exports use semicolons, not commas.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Parse a Denea CSV document with the vendor's default `;` delimiter.
pub fn parse_csv(content: &str) -> Result<Vec<ProductRecord>, ParseError> {
    parse_csv_with_delimiter(content, DEFAULT_DELIMITER)
}

/// Parse a Denea CSV document with an explicit delimiter.
pub fn parse_csv_with_delimiter(
    content: &str,
    delimiter: u8,
) -> Result<Vec<ProductRecord>, ParseError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    // Force the header read up front so an undecodable document fails the
    // whole parse instead of silently yielding zero rows.
    reader
        .headers()
        .map_err(|e| ParseError::Csv(e.to_string()))?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            // Damaged row: best-effort contract, drop it.
            Err(_) => continue,
        };

        let code = row.get(0).map(str::trim).unwrap_or("");
        if code.is_empty() {
            continue;
        }

        records.push(ProductRecord {
            code: code.to_string(),
            description: field(&row, 1),
            category: field(&row, 2),
            stock: normalize_stock(raw(&row, 3)),
            price: normalize_price(raw(&row, 4)),
            cost_price: normalize_cost(raw(&row, 5)),
            supplier: normalize_text(raw(&row, 6)),
            brand: normalize_text(raw(&row, 7)),
            model: normalize_text(raw(&row, 8)),
            color: normalize_text(raw(&row, 9)),
            material: normalize_text(raw(&row, 10)),
            compatibility: normalize_text(raw(&row, 11)),
        });
    }

    Ok(records)
}

fn raw<'a>(row: &'a ::csv::StringRecord, index: usize) -> &'a str {
    row.get(index).unwrap_or("")
}

fn field(row: &::csv::StringRecord, index: usize) -> String {
    raw(row, index).trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "codice;descrizione;categoria;giacenza;prezzo;prezzo_acquisto;fornitore;marca;modello;colore;materiale;compatibilita";

    #[test]
    fn parses_every_well_formed_row_in_order() {
        let content = format!(
            "{HEADER}\n\
             A100;Case;Covers;15;9.99;4.50;SupplierX;Apple;iPhone15;Black;Silicone;\n\
             B200;Glass;Protection;3;5.50;2.00;SupplierY;Samsung;S24;Clear;Glass;Universal\n\
             C300;Cable;Charging;40;12.00;;;;;;;"
        );

        let records = parse_csv(&content).unwrap();
        assert_eq!(records.len(), 3);
        let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["A100", "B200", "C300"]);
    }

    #[test]
    fn parses_the_reference_row() {
        let content = format!(
            "{HEADER}\nA100;Case;Covers;15;9.99;4.50;SupplierX;Apple;iPhone15;Black;Silicone;"
        );

        let records = parse_csv(&content).unwrap();
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.code, "A100");
        assert_eq!(r.description, "Case");
        assert_eq!(r.category, "Covers");
        assert_eq!(r.stock, 15);
        assert_eq!(r.price, 9.99);
        assert_eq!(r.price_cents(), 999);
        assert_eq!(r.cost_price, Some(4.50));
        assert_eq!(r.supplier.as_deref(), Some("SupplierX"));
        assert_eq!(r.brand.as_deref(), Some("Apple"));
        assert_eq!(r.model.as_deref(), Some("iPhone15"));
        assert_eq!(r.color.as_deref(), Some("Black"));
        assert_eq!(r.material.as_deref(), Some("Silicone"));
        assert_eq!(r.compatibility, None);
    }

    #[test]
    fn skips_rows_with_empty_code() {
        let content = format!(
            "{HEADER}\n\
             ;orphan;Covers;1;1.00;;;;;;;\n\
             A100;Case;Covers;15;9.99;;;;;;;\n\
             \u{20};padded-empty;Covers;1;1.00;;;;;;;"
        );

        let records = parse_csv(&content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "A100");
    }

    #[test]
    fn numeric_damage_defaults_instead_of_failing() {
        let content = format!("{HEADER}\nA100;Case;Covers;many;n/a;free;;;;;;");

        let records = parse_csv(&content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stock, 0);
        assert_eq!(records[0].price, 0.0);
        assert_eq!(records[0].cost_price, None);
    }

    #[test]
    fn short_rows_fill_missing_columns() {
        let content = format!("{HEADER}\nA100;Case;Covers;15;9.99");

        let records = parse_csv(&content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 9.99);
        assert_eq!(records[0].cost_price, None);
        assert_eq!(records[0].brand, None);
    }

    #[test]
    fn empty_document_parses_to_no_records() {
        assert!(parse_csv("").unwrap().is_empty());
        assert!(parse_csv("  \n  ").unwrap().is_empty());
    }

    #[test]
    fn custom_delimiter_is_honored() {
        let content = "codice,descrizione,categoria,giacenza,prezzo\nA100,Case,Covers,15,9.99";
        let records = parse_csv_with_delimiter(content, b',').unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stock, 15);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let content = format!("{HEADER}\r\nA100;Case;Covers;15;9.99;;;;;;;\r\n");
        let records = parse_csv(&content).unwrap();
        assert_eq!(records.len(), 1);
    }
}
