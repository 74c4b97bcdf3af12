//! Linked sub-resource models (price, certifications, buttons, relations, documents)

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ON_DEMAND: &str = "On demand";

/// Market price of a SKU or operating mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub ondemand: bool,
    /// Formatted price ("1.500,00 EUR") or "On demand"
    pub string: String,
    #[serde(rename = "float")]
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

impl Price {
    pub fn on_demand() -> Self {
        Self {
            ondemand: true,
            string: ON_DEMAND.to_string(),
            amount: None,
            currency: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub label: String,
    pub image: Option<String>,
    pub text: Option<String>,
}

/// Call-to-action button (configurator links etc.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: Option<String>,
    pub url: Option<String>,
}

/// Related SKU or operating mode (accessories, replacements)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub id: String,
    pub vendor_id: Option<String>,
    pub operating_mode: Option<String>,
    pub parent_id: Option<String>,
    /// Assignment type (e.g. "Accessory", "Replacement")
    #[serde(rename = "type")]
    pub kind: String,
    pub group: Option<Value>,
    pub name: Option<String>,
    pub image: Vec<String>,
    pub priority: Option<Value>,
}

/// Relation as shown in the shop view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopRelation {
    pub id: String,
    pub vendor_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub group: Option<String>,
    pub name: Option<String>,
}

/// Downloadable document attached to a SKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
    pub url: Option<String>,
    pub mime: String,
    pub viewable: bool,
}

/// Markets with live shop assortments of a brand and the public locales
/// serving them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopOverview {
    pub locales: Vec<String>,
    pub markets: Vec<String>,
    /// Unix seconds
    pub published: i64,
    /// `YYYY.MM.DD`
    pub version: String,
}
