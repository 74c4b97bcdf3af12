//! Section Model
//!
//! Sections group presentational content of a SKU or operating mode:
//! technical-parameter tables, wiring texts and images.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CONTENT_ATTRIBUTES: &str = "attributes";
pub const CONTENT_TABLE: &str = "table";
pub const CONTENT_TEXT: &str = "text";
pub const CONTENT_IMAGE: &str = "image";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section family key (e.g. "Data-Technical-parameter")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub name: String,
    pub contents: Vec<SectionContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionContent {
    /// One of `attributes`, `table`, `text`, `image`
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Value,
}

/// A labelled technical value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub label: String,
    pub value: Value,
    pub unit: Option<String>,
}

/// Rows sharing a sub-header; the unnamed group collects rows before any header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterGroup {
    pub name: String,
    pub rows: Vec<ParameterRow>,
}

/// One tab of technical parameters (shop projection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterTab {
    pub name: String,
    pub groups: Vec<ParameterGroup>,
}

/// Table cell of an operating-mode technical table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableCell {
    Th(Value),
    Td(Value),
}

/// Table row; a row made only of `th` cells is a header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub tr: Vec<TableCell>,
}

impl TableRow {
    pub fn header(label: &str, columns: usize) -> Self {
        let mut tr = vec![TableCell::Th(Value::String(label.to_string()))];
        tr.extend((1..columns).map(|_| TableCell::Th(Value::String(String::new()))));
        Self { tr }
    }

    pub fn data(label: &str, value: Value, unit: Option<&str>) -> Self {
        Self {
            tr: vec![
                TableCell::Td(Value::String(label.to_string())),
                TableCell::Td(value),
                TableCell::Td(Value::String(unit.unwrap_or_default().to_string())),
            ],
        }
    }

    pub fn is_header(&self) -> bool {
        self.tr.iter().all(|c| matches!(c, TableCell::Th(_)))
    }

    /// Whether any `td` cell carries a non-empty value
    pub fn has_data(&self) -> bool {
        self.tr.iter().any(|c| match c {
            TableCell::Td(Value::Null) => false,
            TableCell::Td(Value::String(s)) => !s.is_empty(),
            TableCell::Td(_) => true,
            TableCell::Th(_) => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn table_rows_serialize_as_tr_cells() {
        let row = TableRow::data("Airflow", json!(120), Some("m³/h"));
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({"tr": [{"td": "Airflow"}, {"td": 120}, {"td": "m³/h"}]})
        );
        let header = TableRow::header("Electrical", 3);
        assert!(header.is_header());
        assert!(!header.has_data());
        assert_eq!(
            serde_json::to_value(&header).unwrap(),
            json!({"tr": [{"th": "Electrical"}, {"th": ""}, {"th": ""}]})
        );
    }

    #[test]
    fn empty_td_is_not_data() {
        let row = TableRow {
            tr: vec![TableCell::Td(json!("")), TableCell::Td(Value::Null)],
        };
        assert!(!row.is_header());
        assert!(!row.has_data());
    }
}
