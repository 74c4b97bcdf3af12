//! Attribute Model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Labelled attribute value exposed on SKUs and operating modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Display label from the product-table definition
    pub name: String,
    /// Attribute key in the catalog
    pub attribute: String,
    /// Scalar or ordered list of values
    pub value: Value,
    pub unit: Option<String>,
}
