//! Product Model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Product entity (a hierarchy node at planning level "Product")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Requested identifier, never the reference id
    pub id: String,
    pub parent_id: String,
    pub old_external_ids: Vec<String>,
    /// Parents of alias hierarchy nodes pointing at this product
    pub secondary_parents: Vec<String>,
    pub name: String,
    pub short_name: String,
    pub description: Option<String>,
    pub tagline: Option<String>,
    pub sort: i64,
    pub active: bool,
    pub hidden: bool,
    pub approved: bool,
    pub release_date: Option<String>,
    pub importance: Option<String>,
    pub deleted: bool,
    pub images: Vec<String>,
    pub sku_options: Vec<SkuOption>,
    /// Uppercased attribute name -> first value
    pub attributes: BTreeMap<String, Value>,
}

impl Product {
    /// Shape returned for records flagged as deleted
    pub fn deleted(id: &str, parent_id: String, name: String) -> Self {
        Self {
            id: id.to_string(),
            parent_id,
            old_external_ids: Vec::new(),
            secondary_parents: Vec::new(),
            short_name: name.clone(),
            name,
            description: None,
            tagline: None,
            sort: 0,
            active: false,
            hidden: false,
            approved: false,
            release_date: None,
            importance: None,
            deleted: true,
            images: Vec::new(),
            sku_options: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }
}

/// Selectable option of a product (one attribute varying across its SKUs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuOption {
    pub name: String,
    pub unit: Option<String>,
    pub attribute: String,
    /// Lowercased attribute datatype
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub values: Vec<SkuValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuValue {
    /// "value unit"
    pub label: String,
    pub value: Value,
    /// Dictionary id for DICTIONARY attributes, attribute id otherwise
    pub id: Option<Value>,
    /// Product numbers of the SKUs carrying this value
    pub skus: Vec<String>,
}
