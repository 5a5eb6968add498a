//! Column mapping and bulk loading
//!
//! The export format puts the four bid fields at fixed column
//! positions. `ColumnMapping` carries those positions plus the currency
//! character stripped from amount strings; it arrives through
//! configuration and is never hardcoded in the document or store.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::CsvDocument;
use crate::error::DocumentResult;
use crate::models::Bid;
use crate::store::BidStore;

/// Column positions for the four bid fields
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnMapping {
    pub title: usize,
    pub id: usize,
    pub amount: usize,
    pub fund: usize,
    /// Character stripped from the amount field before conversion
    pub strip: char,
}

impl Default for ColumnMapping {
    /// Positions used by the monthly sales export
    fn default() -> Self {
        Self {
            title: 0,
            id: 1,
            amount: 4,
            fund: 8,
            strip: '$',
        }
    }
}

/// Build one bid from a document row.
///
/// Fails with an `IndexError` when the row is narrower than the mapping
/// expects.
pub fn bid_from_row(
    doc: &CsvDocument,
    row: usize,
    mapping: &ColumnMapping,
) -> DocumentResult<Bid> {
    Ok(Bid {
        id: doc.cell(row, mapping.id)?.to_string(),
        title: doc.cell(row, mapping.title)?.to_string(),
        fund: doc.cell(row, mapping.fund)?.to_string(),
        amount: parse_amount(doc.cell(row, mapping.amount)?, mapping.strip),
    })
}

/// Append every document row to the store as a bid.
///
/// All rows are converted before any is appended, so a mapping failure
/// on a later row leaves the store untouched. Returns how many bids
/// were loaded.
pub fn load_into(
    doc: &CsvDocument,
    mapping: &ColumnMapping,
    store: &mut BidStore,
) -> DocumentResult<usize> {
    let mut bids = Vec::with_capacity(doc.row_count());
    for row in 0..doc.row_count() {
        bids.push(bid_from_row(doc, row, mapping)?);
    }

    let loaded = bids.len();
    for bid in bids {
        store.append(bid);
    }

    debug!(loaded, total = store.len(), "loaded bids into store");
    Ok(loaded)
}

/// Convert an amount string to a number after stripping the currency
/// character.
///
/// Parses the longest leading numeric run of what remains, so trailing
/// text ("1200.50 USD") is tolerated; a string with no leading number
/// converts to 0.0.
pub fn parse_amount(raw: &str, strip: char) -> f64 {
    let cleaned: String = raw.chars().filter(|&c| c != strip).collect();
    numeric_prefix(cleaned.trim()).parse().unwrap_or(0.0)
}

fn numeric_prefix(s: &str) -> &str {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, ch) in s.char_indices() {
        match ch {
            '+' | '-' if i == 0 => end = i + 1,
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_from(header: &str, rows: &[&str]) -> CsvDocument {
        let mut doc = CsvDocument::new(
            crate::tokenizer::tokenize(header, 1, ',').unwrap(),
            ',',
        );
        for row in rows {
            doc.append_row(crate::tokenizer::tokenize(row, 1, ',').unwrap());
        }
        doc
    }

    #[test]
    fn test_scenario_four_column_file() {
        let doc = doc_from("title,id,fund,amount", &["Roadwork,98109,GEN,$1200.50"]);
        let mapping = ColumnMapping {
            title: 0,
            id: 1,
            fund: 2,
            amount: 3,
            strip: '$',
        };

        let mut store = BidStore::new();
        let loaded = load_into(&doc, &mapping, &mut store).unwrap();

        assert_eq!(loaded, 1);
        let bid = store.search("98109").unwrap();
        assert_eq!(bid.title, "Roadwork");
        assert_eq!(bid.fund, "GEN");
        assert_eq!(bid.amount, 1200.50);
    }

    #[test]
    fn test_default_mapping_matches_export_layout() {
        let doc = doc_from(
            "title,id,c2,c3,amount,c5,c6,c7,fund",
            &["\"Office chairs, used\",12345,x,x,$87.00,x,x,x,ENTERPRISE"],
        );

        let mut store = BidStore::new();
        load_into(&doc, &ColumnMapping::default(), &mut store).unwrap();

        let bid = store.search("12345").unwrap();
        assert_eq!(bid.title, "Office chairs, used");
        assert_eq!(bid.fund, "ENTERPRISE");
        assert_eq!(bid.amount, 87.00);
    }

    #[test]
    fn test_narrow_row_fails_without_touching_store() {
        let doc = doc_from("title,id,fund,amount", &[
            "Ok,1,GEN,$5.00",
            "Short,2",
        ]);
        let mapping = ColumnMapping {
            title: 0,
            id: 1,
            fund: 2,
            amount: 3,
            strip: '$',
        };

        let mut store = BidStore::new();
        let err = load_into(&doc, &mapping, &mut store);

        assert!(err.is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_appends_in_row_order() {
        let doc = doc_from("title,id,fund,amount", &[
            "First,1,GEN,$1.00",
            "Second,2,GEN,$2.00",
            "Third,3,GEN,$3.00",
        ]);
        let mapping = ColumnMapping {
            title: 0,
            id: 1,
            fund: 2,
            amount: 3,
            strip: '$',
        };

        let mut store = BidStore::new();
        load_into(&doc, &mapping, &mut store).unwrap();

        let order: Vec<_> = store.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_load_from_file_end_to_end() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(
            &path,
            "title,id,fund,amount\n\
             Roadwork,98109,GEN,$1200.50\n\
             \"Chairs, used\",12345,ENT,$87.00\n\
             Plows,55555,CAP,$950.00\n",
        )
        .unwrap();

        let doc = CsvDocument::load(&path, ',').unwrap();
        let mapping = ColumnMapping {
            title: 0,
            id: 1,
            fund: 2,
            amount: 3,
            strip: '$',
        };
        let mut store = BidStore::new();
        let loaded = load_into(&doc, &mapping, &mut store).unwrap();

        assert_eq!(loaded, 3);
        assert_eq!(store.len(), 3);
        let bid = store.search("98109").unwrap();
        assert_eq!(bid.title, "Roadwork");
        assert_eq!(bid.fund, "GEN");
        assert_eq!(bid.amount, 1200.50);
        assert_eq!(store.search("12345").unwrap().title, "Chairs, used");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1200.50", '$'), 1200.50);
        assert_eq!(parse_amount("1200.50", '$'), 1200.50);
        assert_eq!(parse_amount("  $87.00 ", '$'), 87.00);
        assert_eq!(parse_amount("-42.5", '$'), -42.5);
        assert_eq!(parse_amount("1200.50 USD", '$'), 1200.50);
    }

    #[test]
    fn test_parse_amount_garbage_is_zero() {
        assert_eq!(parse_amount("", '$'), 0.0);
        assert_eq!(parse_amount("$", '$'), 0.0);
        assert_eq!(parse_amount("n/a", '$'), 0.0);
        assert_eq!(parse_amount("-", '$'), 0.0);
    }

    #[test]
    fn test_mapping_toml_round_trip() {
        let mapping = ColumnMapping::default();
        let text = toml::to_string(&mapping).unwrap();
        let parsed: ColumnMapping = toml::from_str(&text).unwrap();
        assert_eq!(parsed, mapping);

        // Missing keys fall back to the defaults
        let partial: ColumnMapping = toml::from_str("id = 3").unwrap();
        assert_eq!(partial.id, 3);
        assert_eq!(partial.title, 0);
        assert_eq!(partial.strip, '$');
    }
}
