//! Tabular data carried by assistant replies.
//!
//! A dataset is an ordered list of records, each a JSON object. Column
//! layout is derived from the first record: its keys, in the order the
//! backend serialized them, become the table columns. Later records are
//! read through that layout, so extra keys are ignored and missing keys
//! render as blanks.

use serde::Deserialize;
use serde_json::Value;

/// A single row: field name to value, in serialization order.
pub type Record = serde_json::Map<String, Value>;

/// An ordered collection of records sharing one column layout.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TabularDataset(Vec<Record>);

impl TabularDataset {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.0
    }

    /// Column names, taken from the first record's keys in order.
    /// Empty for an empty dataset.
    pub fn columns(&self) -> Vec<&str> {
        match self.0.first() {
            Some(record) => record.keys().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Turn a column name into its display header: underscores become spaces
/// and the result is uppercased, so `account_name` reads `ACCOUNT NAME`.
pub fn header_label(column: &str) -> String {
    column.replace('_', " ").to_uppercase()
}

/// Render a single cell value as text.
///
/// Missing fields and JSON nulls are blank. Strings pass through without
/// quotes. Nested objects and arrays fall back to their compact JSON form,
/// and everything else uses its natural notation.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(nested @ (Value::Object(_) | Value::Array(_))) => {
            serde_json::to_string(nested).unwrap_or_default()
        }
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset(value: serde_json::Value) -> TabularDataset {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_columns_come_from_first_record_in_order() {
        let rows = dataset(json!([
            {"account_name": "Acme", "revenue": 100, "stage": "won"},
            {"revenue": 200, "extra": true}
        ]));
        assert_eq!(rows.columns(), vec!["account_name", "revenue", "stage"]);
    }

    #[test]
    fn test_empty_dataset_has_no_columns() {
        assert!(dataset(json!([])).columns().is_empty());
        assert!(dataset(json!([])).is_empty());
    }

    #[test]
    fn test_header_label_formatting() {
        assert_eq!(header_label("account_name"), "ACCOUNT NAME");
        assert_eq!(header_label("revenue"), "REVENUE");
        assert_eq!(header_label("q1_total_usd"), "Q1 TOTAL USD");
    }

    #[test]
    fn test_cell_text_blank_for_missing_and_null() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&Value::Null)), "");
    }

    #[test]
    fn test_cell_text_strings_are_unquoted() {
        assert_eq!(cell_text(Some(&json!("Acme"))), "Acme");
    }

    #[test]
    fn test_cell_text_numbers_and_bools() {
        assert_eq!(cell_text(Some(&json!(100))), "100");
        assert_eq!(cell_text(Some(&json!(12.5))), "12.5");
        assert_eq!(cell_text(Some(&json!(true))), "true");
    }

    #[test]
    fn test_cell_text_nested_values_serialize_to_json() {
        assert_eq!(
            cell_text(Some(&json!({"city": "Berlin"}))),
            r#"{"city":"Berlin"}"#
        );
        assert_eq!(cell_text(Some(&json!([1, 2]))), "[1,2]");
    }

    #[test]
    fn test_ragged_records_read_through_first_layout() {
        let rows = dataset(json!([
            {"name": "Acme", "revenue": 100},
            {"name": "Globex"}
        ]));
        let columns = rows.columns();
        let second = &rows.records()[1];
        assert_eq!(cell_text(second.get(columns[0])), "Globex");
        assert_eq!(cell_text(second.get(columns[1])), "");
    }
}
