//! Projection of rich extraction records onto the output schema

use crate::types::{ExtractionRecord, OutputRow};

/// Default key for records the model returned without one
pub const DEFAULT_KEY: &str = "unknown_key";

/// Reduce extraction records to the three-column output schema and attach
/// the originating file.
///
/// `raw_value`, `provenance`, and `confidence` are intermediate fields and
/// are dropped here. Every record yields exactly one row; order is
/// preserved.
pub fn project(records: Vec<ExtractionRecord>, source_file: &str) -> Vec<OutputRow> {
    records
        .into_iter()
        .map(|record| OutputRow {
            key: record.key.unwrap_or_else(|| DEFAULT_KEY.to_string()),
            value: record.value.unwrap_or_default(),
            comments: record.comments.unwrap_or_default(),
            source_file: source_file.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: Option<&str>, value: Option<&str>) -> ExtractionRecord {
        ExtractionRecord {
            key: key.map(String::from),
            value: value.map(String::from),
            raw_value: Some("raw".to_string()),
            comments: Some("context".to_string()),
            provenance: Some("D1:0:0-10".to_string()),
            confidence: Some(0.9),
        }
    }

    #[test]
    fn test_every_record_yields_one_row() {
        let records = vec![record(Some("a"), Some("1")), record(Some("b"), Some("2"))];
        let rows = project(records, "input.txt");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "a");
        assert_eq!(rows[1].key, "b");
        assert!(rows.iter().all(|r| r.source_file == "input.txt"));
    }

    #[test]
    fn test_defaults_applied() {
        let rows = project(vec![record(None, None)], "input.txt");
        assert_eq!(rows[0].key, DEFAULT_KEY);
        assert_eq!(rows[0].value, "");
        assert_eq!(rows[0].comments, "context");
    }

    #[test]
    fn test_order_preserved_not_sorted_by_key() {
        let records = vec![
            record(Some("zebra"), Some("1")),
            record(Some("apple"), Some("2")),
        ];
        let rows = project(records, "f");
        assert_eq!(rows[0].key, "zebra");
        assert_eq!(rows[1].key, "apple");
    }
}
