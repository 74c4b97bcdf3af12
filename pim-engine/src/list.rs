//! Paged listing
//!
//! One bounded query resolves a page of ids; every id is then built on its
//! own, at most `ceiling` at a time. Builds that fail or find nothing are
//! left out of the page while `total` keeps the index count.

use futures::stream::{self, StreamExt};
use shared::models::Sku;
use shared::{Entity, EntityKind, ListFilters, Page};

use crate::builders::category::category_filter;
use crate::builders::{brand_filter, build, build_sku};
use crate::context::{BuildScope, EngineContext};
use crate::core::error::EngineResult;
use crate::records::{EntityRecord, decode_all};
use crate::store::{CollectionKind, Filter, Query, SortOrder};

pub const PRODUCT_LEVEL: &str = "Product";

/// Collection and id query of one list page
pub fn list_query(
    ctx: &EngineContext,
    kind: EntityKind,
    scope: &BuildScope,
    filters: &ListFilters,
) -> (CollectionKind, Query) {
    let base = Query::new().source(["epimId"]);
    match kind {
        EntityKind::Product => (
            CollectionKind::Hierarchies,
            base.filter(Filter::term("planningLevel", PRODUCT_LEVEL))
                .filter(brand_filter(&scope.brand))
                .sort("seqorderNr", SortOrder::Asc),
        ),
        EntityKind::Sku | EntityKind::ShopSku => {
            let mut query = base.filter(brand_filter(&scope.brand));
            // unmapped markets fall back to the brand name and filter nothing
            if ctx.locale.markets().iter().any(|m| m.market_id == scope.market) {
                query = query.filter(Filter::term("markets", scope.market.as_str()));
            }
            (CollectionKind::Products, query.sort("epimId", SortOrder::Asc))
        }
        EntityKind::Category => {
            let mut query = base
                .filter(category_filter())
                .filter(brand_filter(&scope.brand));
            if let Some(parent) = &filters.parent_id {
                query = query.filter(Filter::term("parentHierarchy", parent.as_str()));
            }
            (CollectionKind::Hierarchies, query.sort("seqorderNr", SortOrder::Asc))
        }
        EntityKind::OperatingMode => {
            let mut query = base;
            if let Some(product) = &filters.parent_id {
                query = query.filter(Filter::term("parentHierarchy", product.as_str()));
            }
            if let Some(sku) = &filters.sku_id {
                query = query.filter(Filter::term("parentId", sku.as_str()));
            }
            (CollectionKind::Variants, query.sort("seqorderNr", SortOrder::Asc))
        }
    }
}

fn epim_ids(hits: &[crate::store::Hit]) -> Vec<String> {
    decode_all::<EntityRecord>(hits)
        .into_iter()
        .filter_map(|r| r.epim_id)
        .collect()
}

/// Build `ids` in order, at most `ceiling` concurrently; failures are dropped
pub async fn fan_out(
    ctx: &EngineContext,
    kind: EntityKind,
    scope: &BuildScope,
    ids: Vec<String>,
    ceiling: usize,
) -> Vec<Entity> {
    let results: Vec<_> = stream::iter(ids)
        .map(|id| async move {
            let result = build(ctx, kind, scope, &id).await;
            (id, result)
        })
        .buffered(ceiling.max(1))
        .collect()
        .await;

    results
        .into_iter()
        .filter_map(|(id, result)| match result {
            Ok(Some(entity)) => Some(entity),
            Ok(None) => {
                tracing::debug!(%id, %kind, "Listed id built nothing");
                None
            }
            Err(e) => {
                tracing::warn!(%id, %kind, error = %e, "Dropping failed build from list");
                None
            }
        })
        .collect()
}

/// One page of entities of `kind`
pub async fn list_entities(
    ctx: &EngineContext,
    kind: EntityKind,
    offset: usize,
    limit: usize,
    scope: &BuildScope,
    filters: &ListFilters,
    ceiling: usize,
) -> EngineResult<Page<Entity>> {
    let (collection, query) = list_query(ctx, kind, scope, filters);
    let query = query.from(offset).size(limit);
    let response = ctx.search(collection, &scope.lang, &query).await?;
    let ids = epim_ids(&response.hits);
    tracing::debug!(%kind, offset, limit, total = response.total, page = ids.len(), "Listing");

    let items = fan_out(ctx, kind, scope, ids, ceiling).await;
    Ok(Page::new(response.total, items))
}

/// Every SKU filed under a product; `total` counts the SKUs built
pub async fn product_skus(
    ctx: &EngineContext,
    scope: &BuildScope,
    product_id: &str,
    ceiling: usize,
) -> EngineResult<Page<Sku>> {
    let query = Query::new()
        .filter(Filter::nested(
            "hierarchies",
            Filter::term("hierarchies.id", product_id),
        ))
        .filter(brand_filter(&scope.brand))
        .source(["epimId"])
        .sort("epimId", SortOrder::Asc);
    let hits = ctx.scroll(CollectionKind::Products, &scope.lang, &query).await?;

    let skus: Vec<Sku> = stream::iter(epim_ids(&hits))
        .map(|id| async move {
            match build_sku(ctx, scope, &id).await {
                Ok(sku) => sku,
                Err(e) => {
                    tracing::warn!(%id, product_id, error = %e, "Dropping failed SKU build");
                    None
                }
            }
        })
        .buffered(ceiling.max(1))
        .filter_map(|sku| async move { sku })
        .collect()
        .await;
    Ok(Page::new(skus.len() as u64, skus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryRelationalStore};
    use serde_json::json;
    use std::sync::Arc;

    fn scope() -> BuildScope {
        BuildScope::new("eng_glo", "systemair", "MARKET-005")
    }

    #[test]
    fn sku_lists_filter_by_known_markets_only() {
        let ctx = EngineContext::new(
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(MemoryRelationalStore::new()),
        );
        let filters = ListFilters::default();
        let (collection, query) = list_query(&ctx, EntityKind::Sku, &scope(), &filters);
        assert_eq!(collection, CollectionKind::Products);
        assert!(query.filters.contains(&Filter::term("markets", "MARKET-005")));

        let unmapped = BuildScope::new("eng_glo", "systemair", "systemair");
        let (_, query) = list_query(&ctx, EntityKind::Sku, &unmapped, &filters);
        assert!(!query.filters.iter().any(|f| *f == Filter::term("markets", "systemair")));
    }

    #[tokio::test]
    async fn categories_under_a_parent() {
        let docs = MemoryDocumentStore::new().with_documents(
            "systemair_ds_hierarchies_eng_glo",
            (1..=4).map(|i| {
                json!({"epimId": i, "name": format!("C{i}"), "seqorderNr": 10 - i,
                       "parentHierarchy": if i < 4 { 100 } else { 200 },
                       "hierarchies": [{"hierarchy": "systemair"}]})
            }),
        );
        let ctx = EngineContext::new(Arc::new(docs), Arc::new(MemoryRelationalStore::new()));
        let filters = ListFilters {
            parent_id: Some("100".into()),
            sku_id: None,
        };
        let page = list_entities(&ctx, EntityKind::Category, 0, 2, &scope(), &filters, 4)
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        let ids: Vec<_> = page.items.iter().map(Entity::id).collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[tokio::test]
    async fn unavailable_index_fails_the_page() {
        let docs = MemoryDocumentStore::new().fail_on("systemair_ds_variants_eng_glo");
        let ctx = EngineContext::new(Arc::new(docs), Arc::new(MemoryRelationalStore::new()));
        let result = list_entities(
            &ctx,
            EntityKind::OperatingMode,
            0,
            10,
            &scope(),
            &ListFilters::default(),
            4,
        )
        .await;
        assert!(result.is_err());
    }
}
