//! SKU Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Attribute, Button, Certification, ParameterTab, Price, Section, ShopRelation};

/// Sellable item (products collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub id: String,
    pub parent_id: String,
    pub vendor_id: String,
    /// Reference record id
    pub maintenance_id: Option<String>,
    pub default_operating_mode_id: Option<String>,
    pub successors_ids: Vec<String>,
    pub name: String,
    pub short_name: Option<String>,
    pub description: Option<String>,
    pub specification_text: Option<String>,
    pub tagline: Option<String>,
    pub active: bool,
    pub expired: bool,
    pub approved: bool,
    pub deleted: bool,
    pub release_date: Option<String>,
    pub selection_tool: bool,
    pub design_tool: bool,
    pub magicad_bim: bool,
    pub sort: i64,
    pub price: Option<Price>,
    pub default: bool,
    pub certifications: Vec<Certification>,
    pub images: Vec<String>,
    /// Uppercased attribute name -> labelled value
    pub attributes: BTreeMap<String, Attribute>,
    pub buttons: Vec<Button>,
    pub sections: Vec<Section>,
}

impl Sku {
    pub fn deleted(id: &str, parent_id: String, name: String) -> Self {
        Self {
            id: id.to_string(),
            parent_id,
            vendor_id: String::new(),
            maintenance_id: None,
            default_operating_mode_id: None,
            successors_ids: Vec::new(),
            name,
            short_name: None,
            description: None,
            specification_text: None,
            tagline: None,
            active: false,
            expired: true,
            approved: false,
            deleted: true,
            release_date: None,
            selection_tool: false,
            design_tool: false,
            magicad_bim: false,
            sort: 0,
            price: None,
            default: false,
            certifications: Vec::new(),
            images: Vec::new(),
            attributes: BTreeMap::new(),
            buttons: Vec::new(),
            sections: Vec::new(),
        }
    }
}

/// Reduced SKU projection for the shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopSku {
    pub id: String,
    pub parent_id: String,
    pub vendor_id: String,
    pub default_operating_mode_id: Option<String>,
    pub name: String,
    pub tagline: Option<String>,
    pub active: bool,
    pub expired: bool,
    pub approved: bool,
    pub release_date: Option<String>,
    pub description: Option<String>,
    pub specification_text: Option<String>,
    pub price: Option<Price>,
    pub images: Vec<String>,
    pub attributes: BTreeMap<String, Attribute>,
    pub deleted: bool,
    pub technical_parameters: Vec<ParameterTab>,
    pub relations: Vec<ShopRelation>,
}

impl ShopSku {
    pub fn deleted(id: &str, parent_id: String, name: String) -> Self {
        Self {
            id: id.to_string(),
            parent_id,
            vendor_id: String::new(),
            default_operating_mode_id: None,
            name,
            tagline: None,
            active: false,
            expired: true,
            approved: false,
            release_date: None,
            description: None,
            specification_text: None,
            price: None,
            images: Vec::new(),
            attributes: BTreeMap::new(),
            deleted: true,
            technical_parameters: Vec::new(),
            relations: Vec::new(),
        }
    }
}
