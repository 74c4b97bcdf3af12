//! Entity envelope and list types

use serde::{Deserialize, Serialize};

use super::{Category, OperatingMode, Product, ShopSku, Sku};

/// Kinds of entity the engine can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Product,
    Sku,
    ShopSku,
    Category,
    OperatingMode,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Sku => "sku",
            EntityKind::ShopSku => "shop_sku",
            EntityKind::Category => "category",
            EntityKind::OperatingMode => "operating_mode",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "product" | "products" => Ok(EntityKind::Product),
            "sku" | "skus" => Ok(EntityKind::Sku),
            "shop_sku" | "shop" => Ok(EntityKind::ShopSku),
            "category" | "categories" => Ok(EntityKind::Category),
            "operating_mode" | "operating_modes" | "variant" => Ok(EntityKind::OperatingMode),
            other => Err(format!("unknown entity kind: {other}")),
        }
    }
}

/// A built entity of any kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entity {
    Product(Box<Product>),
    Sku(Box<Sku>),
    ShopSku(Box<ShopSku>),
    Category(Box<Category>),
    OperatingMode(Box<OperatingMode>),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Product(_) => EntityKind::Product,
            Entity::Sku(_) => EntityKind::Sku,
            Entity::ShopSku(_) => EntityKind::ShopSku,
            Entity::Category(_) => EntityKind::Category,
            Entity::OperatingMode(_) => EntityKind::OperatingMode,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Product(p) => &p.id,
            Entity::Sku(s) => &s.id,
            Entity::ShopSku(s) => &s.id,
            Entity::Category(c) => &c.id,
            Entity::OperatingMode(o) => &o.id,
        }
    }
}

/// One page of a list query.
///
/// `total` is the index-level count; it may exceed `items.len()` when
/// individual builds fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total: u64, items: Vec<T>) -> Self {
        Self { total, items }
    }

    pub fn empty() -> Self {
        Self {
            total: 0,
            items: Vec::new(),
        }
    }
}

/// Optional narrowing of list queries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilters {
    /// Categories: parent hierarchy; operating modes: owning product
    pub parent_id: Option<String>,
    /// Operating modes: owning SKU
    pub sku_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_common_spellings() {
        assert_eq!("products".parse::<EntityKind>(), Ok(EntityKind::Product));
        assert_eq!("shop-sku".parse::<EntityKind>(), Ok(EntityKind::ShopSku));
        assert_eq!(
            "Operating_Modes".parse::<EntityKind>(),
            Ok(EntityKind::OperatingMode)
        );
        assert!("widget".parse::<EntityKind>().is_err());
    }

    #[test]
    fn kind_display_round_trips() {
        for kind in [
            EntityKind::Product,
            EntityKind::Sku,
            EntityKind::ShopSku,
            EntityKind::Category,
            EntityKind::OperatingMode,
        ] {
            assert_eq!(kind.to_string().parse::<EntityKind>(), Ok(kind));
        }
    }
}
