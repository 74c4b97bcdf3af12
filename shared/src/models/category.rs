//! Category Model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const TYPE_PRODUCT_RANGE: &str = "product-range";
pub const TYPE_CATEGORY: &str = "category";

/// Category or product range (hierarchy node)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub parent_id: String,
    pub old_external_ids: Vec<String>,
    pub name: String,
    pub description: Option<String>,
    pub tagline: Option<String>,
    pub sort: i64,
    pub active: bool,
    pub hidden: bool,
    pub approved: bool,
    pub release_date: Option<String>,
    /// `product-range` or `category`
    #[serde(rename = "type")]
    pub kind: String,
    pub importance: Option<String>,
    pub icon: Option<String>,
    /// Uppercased name -> first value (FLAG attributes as booleans)
    pub attributes: BTreeMap<String, Value>,
    pub secondary_parents: Vec<String>,
}
