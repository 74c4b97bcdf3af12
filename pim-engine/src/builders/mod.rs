//! Entity builders
//!
//! One builder per entity kind. Every build follows the same path:
//!
//! ```text
//! base record ──(missing)──> None
//!      │
//!      ├──(deleted)──> minimal entity
//!      │
//!      └─> reference record (optional) ─> concurrent aggregators ─> entity
//! ```
//!
//! Aggregator failures degrade to empty defaults through
//! [`crate::context::degrade`]; only fatal errors abort a build.

pub mod category;
pub mod operating_mode;
pub mod product;
pub mod shop_sku;
pub mod sku;

use regex::Regex;
use shared::{Entity, EntityKind};

use crate::context::{BuildScope, EngineContext, degrade};
use crate::core::error::EngineResult;
use crate::records::{EntityRecord, decode};
use crate::store::{CollectionKind, Filter, Query};

pub use category::build_category;
pub use operating_mode::build_operating_mode;
pub use product::build_product;
pub use shop_sku::build_shop_sku;
pub use sku::build_sku;

pub const ALIAS_LEVEL: &str = "Alias";

/// Build one entity of any kind
pub async fn build(
    ctx: &EngineContext,
    kind: EntityKind,
    scope: &BuildScope,
    id: &str,
) -> EngineResult<Option<Entity>> {
    Ok(match kind {
        EntityKind::Product => build_product(ctx, scope, id)
            .await?
            .map(|e| Entity::Product(Box::new(e))),
        EntityKind::Sku => build_sku(ctx, scope, id)
            .await?
            .map(|e| Entity::Sku(Box::new(e))),
        EntityKind::ShopSku => build_shop_sku(ctx, scope, id)
            .await?
            .map(|e| Entity::ShopSku(Box::new(e))),
        EntityKind::Category => build_category(ctx, scope, id)
            .await?
            .map(|e| Entity::Category(Box::new(e))),
        EntityKind::OperatingMode => build_operating_mode(ctx, scope, id)
            .await?
            .map(|e| Entity::OperatingMode(Box::new(e))),
    })
}

/// Records of `brand` live under hierarchies named after it
pub fn brand_filter(brand: &str) -> Filter {
    Filter::nested(
        "hierarchies",
        Filter::prefix_ignore_case("hierarchies.hierarchy", brand),
    )
}

/// Record `id` of one collection, optionally restricted to a brand
pub async fn find_record(
    ctx: &EngineContext,
    kind: CollectionKind,
    lang: &str,
    id: &str,
    brand: Option<&str>,
) -> EngineResult<Option<EntityRecord>> {
    find_record_where(ctx, kind, lang, id, brand.map(brand_filter).into_iter().collect()).await
}

/// Record `id` of one collection matching every filter
pub async fn find_record_where(
    ctx: &EngineContext,
    kind: CollectionKind,
    lang: &str,
    id: &str,
    filters: Vec<Filter>,
) -> EngineResult<Option<EntityRecord>> {
    let mut query = Query::new().filter(Filter::term("epimId", id)).size(1);
    query.filters.extend(filters);
    let response = ctx.search(kind, lang, &query).await?;
    response.hits.first().map(decode::<EntityRecord>).transpose()
}

/// A localized record and its reference record
#[derive(Debug, Clone)]
pub struct Pair {
    pub local: EntityRecord,
    pub reference: Option<EntityRecord>,
}

impl Pair {
    pub fn reference(&self) -> Option<&EntityRecord> {
        self.reference.as_ref()
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.local.reference_id.as_deref()
    }

    /// `id` followed by the reference id: attribute precedence order
    pub fn identifiers(&self, id: &str) -> Vec<String> {
        std::iter::once(id.to_string())
            .chain(self.local.reference_id.clone())
            .collect()
    }

    /// Record epimIds (local first) plus extra parents
    pub fn parents(&self, extra: Option<String>) -> Vec<String> {
        let mut ids: Vec<String> = self.local.epim_id.iter().cloned().collect();
        if let Some(id) = self.reference.as_ref().and_then(|r| r.epim_id.clone())
            && !ids.contains(&id)
        {
            ids.push(id);
        }
        ids.extend(extra);
        ids
    }
}

/// Outcome of the base-record stage
#[derive(Debug, Clone)]
pub enum Base {
    Missing,
    Deleted(EntityRecord),
    Found(Pair),
}

/// Resolve the base record and, for live records, its reference.
///
/// A reference id without a record leaves the pair without one; store
/// failures on either lookup propagate.
pub async fn load_base(
    ctx: &EngineContext,
    kind: CollectionKind,
    lang: &str,
    id: &str,
    brand: Option<&str>,
) -> EngineResult<Base> {
    let Some(local) = find_record(ctx, kind, lang, id, brand).await? else {
        tracing::debug!(id, collection = kind.as_str(), "Base record not found");
        return Ok(Base::Missing);
    };
    if local.deleted {
        return Ok(Base::Deleted(local));
    }
    Ok(Base::Found(with_reference(ctx, kind, lang, id, local).await?))
}

/// Base record and reference regardless of the deleted flag
pub async fn load_pair(
    ctx: &EngineContext,
    kind: CollectionKind,
    lang: &str,
    id: &str,
) -> EngineResult<Option<Pair>> {
    match find_record(ctx, kind, lang, id, None).await? {
        Some(local) => Ok(Some(with_reference(ctx, kind, lang, id, local).await?)),
        None => Ok(None),
    }
}

async fn with_reference(
    ctx: &EngineContext,
    kind: CollectionKind,
    lang: &str,
    id: &str,
    local: EntityRecord,
) -> EngineResult<Pair> {
    let reference = match local.reference_id.as_deref() {
        Some(reference_id) => find_record(ctx, kind, lang, reference_id, None).await?,
        None => None,
    };
    if reference.is_none() && local.reference_id.is_some() {
        tracing::debug!(id, "Building without reference record");
    }
    Ok(Pair { local, reference })
}

/// Parent hierarchies of alias nodes that point at `id`
pub async fn secondary_parents(
    ctx: &EngineContext,
    lang: &str,
    id: &str,
) -> EngineResult<Vec<String>> {
    let query = Query::new()
        .filter(Filter::term("referenceId", id))
        .filter(Filter::term("planningLevel", ALIAS_LEVEL))
        .source(["parentHierarchy"]);
    let response = ctx.search(CollectionKind::Hierarchies, lang, &query).await?;
    Ok(crate::records::decode_all::<EntityRecord>(&response.hits)
        .into_iter()
        .filter_map(|r| r.parent_hierarchy)
        .collect())
}

/// Selector-tool flag attribute of a brand: `export-promaster-{brand}*-selector`
pub fn selector_pattern(brand: &str) -> Option<Regex> {
    Regex::new(&format!(
        "^export-promaster-{}.*-selector$",
        regex::escape(&brand.to_lowercase())
    ))
    .ok()
}

pub fn sort_order(record: &EntityRecord) -> i64 {
    record.seqorder_nr.unwrap_or(0)
}

/// [`degrade`] for aggregators without an empty value of their own
pub fn degrade_optional<T>(what: &str, id: &str, result: EngineResult<T>) -> EngineResult<Option<T>> {
    degrade(what, id, result.map(Some))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryRelationalStore};
    use serde_json::json;
    use std::sync::Arc;

    fn ctx(docs: MemoryDocumentStore) -> EngineContext {
        EngineContext::new(Arc::new(docs), Arc::new(MemoryRelationalStore::new()))
    }

    #[tokio::test]
    async fn base_stages() {
        let ctx = ctx(MemoryDocumentStore::new().with_documents(
            "systemair_ds_products_eng_glo",
            vec![
                json!({"epimId": 1, "referenceId": 2, "hierarchies": [{"hierarchy": "Systemair-SKUs"}]}),
                json!({"epimId": 2, "productNr": "100"}),
                json!({"epimId": 3, "deleted": true, "hierarchies": [{"hierarchy": "systemair"}]}),
                json!({"epimId": 4, "referenceId": 99, "hierarchies": [{"hierarchy": "frico"}]}),
            ],
        ));
        let load = |id: &'static str| {
            load_base(&ctx, CollectionKind::Products, "eng_glo", id, Some("systemair"))
        };

        let Base::Found(pair) = load("1").await.unwrap() else {
            panic!("expected a live record");
        };
        assert_eq!(pair.reference().and_then(|r| r.product_nr.as_deref()), Some("100"));
        assert_eq!(pair.identifiers("1"), vec!["1", "2"]);
        assert_eq!(pair.parents(Some("9".into())), vec!["1", "2", "9"]);

        assert!(matches!(load("3").await.unwrap(), Base::Deleted(_)));
        assert!(matches!(load("4").await.unwrap(), Base::Missing));
        assert!(matches!(load("5").await.unwrap(), Base::Missing));
    }

    #[tokio::test]
    async fn secondary_parents_come_from_aliases() {
        let ctx = ctx(MemoryDocumentStore::new().with_documents(
            "systemair_ds_hierarchies_eng_glo",
            vec![
                json!({"epimId": 10, "referenceId": 7, "planningLevel": "Alias", "parentHierarchy": 40}),
                json!({"epimId": 11, "referenceId": 7, "planningLevel": "Product", "parentHierarchy": 41}),
                json!({"epimId": 12, "referenceId": 7, "planningLevel": "Alias", "parentHierarchy": 42}),
            ],
        ));
        let parents = secondary_parents(&ctx, "eng_glo", "7").await.unwrap();
        assert_eq!(parents, vec!["40", "42"]);
    }

    #[test]
    fn selector_attribute_names() {
        let pattern = selector_pattern("Systemair").unwrap();
        assert!(pattern.is_match("export-promaster-systemair-fan-selector"));
        assert!(!pattern.is_match("export-promaster-frico-fan-selector"));
    }
}
