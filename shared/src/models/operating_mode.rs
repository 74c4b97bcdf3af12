//! Operating Mode Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Attribute, Button, Certification, Paragraph, Price, Section};

/// Variant of a SKU (variants collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingMode {
    pub id: String,
    pub parent_id: String,
    pub vendor_id: Option<String>,
    pub name: String,
    pub short_name: Option<String>,
    pub description: Option<Vec<Paragraph>>,
    pub specification_text: Option<String>,
    pub tagline: Option<String>,
    pub active: bool,
    pub expired: bool,
    pub approved: bool,
    pub release_date: Option<String>,
    pub selection_tool: bool,
    pub design_tool: bool,
    pub magicad_bim: bool,
    pub sort: i64,
    pub price: Option<Price>,
    pub default: bool,
    pub certifications: Vec<Certification>,
    pub images: Vec<String>,
    pub attributes: BTreeMap<String, Attribute>,
    pub buttons: Vec<Button>,
    pub sections: Vec<Section>,
    /// Owning SKU
    pub sku_id: String,
}
