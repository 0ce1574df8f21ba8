//! Denea XML feed parser.
//!
//! The vendor ships two schemas depending on the export tool:
//! `<products><product>...` with English tags and `<articoli><articolo>...`
//! with Italian tags -- and real exports mix tag languages within one
//! document, so every field is looked up through an alternate-name chain.
//! Items without a code are dropped silently; a document that is not well
//! formed (bad nesting, truncation with open elements) fails with
//! [`ParseError::Xml`].

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ParseError;
use crate::record::{
    normalize_cost, normalize_price, normalize_stock, normalize_text, ProductRecord,
};

/// Parse a Denea XML product feed into ordered records.
pub fn parse_xml(content: &str) -> Result<Vec<ProductRecord>, ParseError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    // Open-element stack; non-empty at EOF means a truncated document.
    let mut stack: Vec<String> = Vec::new();
    // Item tag implied by the recognized root (`product` / `articolo`).
    let mut item_tag: Option<&'static str> = None;
    // Field map of the item currently being read.
    let mut fields: Option<HashMap<String, String>> = None;
    // Field element currently open inside an item: (tag, text buffer).
    let mut current_field: Option<(String, String)> = None;

    loop {
        match reader.read_event() {
            Err(e) => return Err(ParseError::Xml(e.to_string())),

            Ok(Event::Eof) => {
                if let Some(open) = stack.last() {
                    return Err(ParseError::Xml(format!(
                        "unexpected end of document, <{open}> is still open"
                    )));
                }
                break;
            }

            Ok(Event::Start(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                match stack.len() {
                    0 => {
                        item_tag = match name.as_str() {
                            "products" => Some("product"),
                            "articoli" => Some("articolo"),
                            _ => None,
                        };
                    }
                    1 => {
                        if item_tag == Some(name.as_str()) {
                            fields = Some(HashMap::new());
                        }
                    }
                    2 => {
                        if fields.is_some() {
                            current_field = Some((name.clone(), String::new()));
                        }
                    }
                    // Nested structure inside a field is not part of either
                    // vendor schema; its text is ignored.
                    _ => {}
                }
                stack.push(name);
            }

            Ok(Event::Empty(empty)) => {
                // Self-closing field, e.g. <colore/>: present but empty.
                if stack.len() == 2 {
                    if let Some(fields) = fields.as_mut() {
                        let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                        fields.entry(name).or_default();
                    }
                }
            }

            Ok(Event::Text(text)) => {
                if stack.len() == 3 {
                    if let Some((_, buffer)) = current_field.as_mut() {
                        let decoded = text
                            .unescape()
                            .map_err(|e| ParseError::Xml(e.to_string()))?;
                        buffer.push_str(&decoded);
                    }
                }
            }

            Ok(Event::CData(cdata)) => {
                if stack.len() == 3 {
                    if let Some((_, buffer)) = current_field.as_mut() {
                        buffer.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                    }
                }
            }

            Ok(Event::End(_)) => {
                match stack.len() {
                    3 => {
                        // Closing a field element: first occurrence wins on
                        // duplicated tags.
                        if let (Some(fields), Some((name, buffer))) =
                            (fields.as_mut(), current_field.take())
                        {
                            fields.entry(name).or_insert(buffer);
                        }
                    }
                    2 => {
                        if let Some(fields) = fields.take() {
                            if let Some(record) = build_record(&fields) {
                                records.push(record);
                            }
                        }
                    }
                    _ => {}
                }
                stack.pop();
            }

            // Declarations, comments, processing instructions.
            Ok(_) => {}
        }
    }

    Ok(records)
}

/// Assemble a record from an item's field map, applying the
/// Italian-first tag fallback chains. Returns `None` when no code field
/// is present (the item is dropped).
fn build_record(fields: &HashMap<String, String>) -> Option<ProductRecord> {
    let code = first(fields, &["codice", "sku", "code"])?;

    Some(ProductRecord {
        code: code.to_string(),
        description: first(fields, &["descrizione", "nome", "name"])
            .unwrap_or("")
            .to_string(),
        category: first(fields, &["categoria", "category"])
            .unwrap_or("")
            .to_string(),
        stock: normalize_stock(first(fields, &["giacenza", "stock", "quantity"]).unwrap_or("")),
        price: normalize_price(first(fields, &["prezzo", "price"]).unwrap_or("")),
        cost_price: normalize_cost(first(fields, &["prezzo_acquisto", "cost_price"]).unwrap_or("")),
        supplier: first(fields, &["fornitore", "supplier"]).and_then(normalize_text),
        brand: first(fields, &["marca", "brand"]).and_then(normalize_text),
        model: first(fields, &["modello", "model"]).and_then(normalize_text),
        color: first(fields, &["colore", "color"]).and_then(normalize_text),
        material: first(fields, &["materiale", "material"]).and_then(normalize_text),
        compatibility: first(fields, &["compatibilita", "compatibility"]).and_then(normalize_text),
    })
}

/// First non-empty value along a tag-name fallback chain.
fn first<'a>(fields: &'a HashMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| {
        fields
            .get(*key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
