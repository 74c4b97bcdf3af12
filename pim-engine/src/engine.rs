//! Engine facade
//!
//! Entry point for the (external) HTTP layer. Holds the shared build context
//! and the list fan-out ceiling; cheap to clone.
//!
//! # Operations
//!
//! | Method | Result |
//! |--------|--------|
//! | build_entity | one entity of any kind, `None` when absent |
//! | list_entities | one page of entities, index-level total |
//! | product_skus | every SKU filed under a product |
//! | sku_relations / sku_documents | linked objects of one SKU |
//! | list_certifications | every certification in use |
//! | shop_overview | markets and locales with live shop assortments |
//!
//! Languages are internal codes (`eng_glo`); use [`Engine::scope`] to derive
//! one from a public locale.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Europe::Berlin;
use futures::stream::{self, StreamExt, TryStreamExt};
use shared::models::{Certification, Document, Relation, ShopOverview, Sku};
use shared::{Entity, EntityKind, GLOBAL_ENGLISH, ListFilters, Page};

use crate::aggregators::certifications::all_certifications;
use crate::aggregators::documents::documents;
use crate::aggregators::relations::relations;
use crate::aggregators::status::shop_statistics;
use crate::builders::{self, Base, brand_filter, load_base};
use crate::context::{BuildScope, EngineContext};
use crate::core::config::{Config, DEFAULT_LIST_CONCURRENCY};
use crate::core::error::{EngineError, EngineResult};
use crate::list;
use crate::records::{AttributeRecord, EntityRecord, decode_all};
use crate::store::{CollectionKind, DocumentStore, Filter, Query, RelationalStore};

/// Reference ids per attribute query in [`Engine::shop_overview`]
const STATISTICS_CHUNK: usize = 10_000;
const STATISTICS_PARALLELISM: usize = 10;

/// Publication version: the calendar day in Berlin
fn shop_version(now: DateTime<Utc>) -> String {
    now.with_timezone(&Berlin).format("%Y.%m.%d").to_string()
}

#[derive(Debug, Clone)]
pub struct Engine {
    ctx: EngineContext,
    list_concurrency: usize,
}

impl Engine {
    pub fn new(ctx: EngineContext) -> Self {
        Self {
            ctx,
            list_concurrency: DEFAULT_LIST_CONCURRENCY,
        }
    }

    pub fn from_config(
        config: &Config,
        docs: Arc<dyn DocumentStore>,
        sql: Arc<dyn RelationalStore>,
    ) -> Self {
        Self {
            ctx: EngineContext::from_config(config, docs, sql),
            list_concurrency: config.list_concurrency,
        }
    }

    pub fn with_list_concurrency(mut self, ceiling: usize) -> Self {
        self.list_concurrency = ceiling.max(1);
        self
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Build scope for a public locale (`en`, `de-DE`) and brand; the market
    /// defaults to the brand's market for that language
    pub fn scope(&self, locale: &str, brand: &str, market: Option<&str>) -> EngineResult<BuildScope> {
        let lang = self.ctx.locale.map_locale(locale)?;
        Ok(match market {
            Some(market) => BuildScope::new(lang, brand, market),
            None => BuildScope::for_brand(&self.ctx, &lang, brand),
        })
    }

    pub async fn build_entity(
        &self,
        kind: EntityKind,
        id: &str,
        lang: &str,
        brand: &str,
        market: &str,
    ) -> EngineResult<Option<Entity>> {
        let scope = BuildScope::new(lang, brand, market);
        builders::build(&self.ctx, kind, &scope, id).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn list_entities(
        &self,
        kind: EntityKind,
        offset: usize,
        limit: usize,
        lang: &str,
        brand: &str,
        market: &str,
        filters: &ListFilters,
    ) -> EngineResult<Page<Entity>> {
        let scope = BuildScope::new(lang, brand, market);
        list::list_entities(
            &self.ctx,
            kind,
            offset,
            limit,
            &scope,
            filters,
            self.list_concurrency,
        )
        .await
    }

    pub async fn product_skus(
        &self,
        product_id: &str,
        lang: &str,
        brand: &str,
        market: &str,
    ) -> EngineResult<Page<Sku>> {
        let scope = BuildScope::new(lang, brand, market);
        list::product_skus(&self.ctx, &scope, product_id, self.list_concurrency).await
    }

    /// Related objects of a SKU; `None` when the SKU does not exist
    pub async fn sku_relations(
        &self,
        id: &str,
        lang: &str,
        brand: &str,
    ) -> EngineResult<Option<Vec<Relation>>> {
        let lang = lang.to_lowercase();
        match load_base(&self.ctx, CollectionKind::Products, &lang, id, Some(brand)).await? {
            Base::Missing => Ok(None),
            Base::Deleted(_) => Ok(Some(Vec::new())),
            Base::Found(pair) => Ok(Some(
                relations(&self.ctx, &lang, &pair.local, pair.reference()).await?,
            )),
        }
    }

    /// Documents attached to a SKU; `None` when the SKU does not exist
    pub async fn sku_documents(
        &self,
        id: &str,
        lang: &str,
        brand: &str,
    ) -> EngineResult<Option<Vec<Document>>> {
        let lang = lang.to_lowercase();
        match load_base(&self.ctx, CollectionKind::Products, &lang, id, Some(brand)).await? {
            Base::Missing => Ok(None),
            Base::Deleted(_) => Ok(Some(Vec::new())),
            Base::Found(pair) => Ok(Some(
                documents(&self.ctx, &lang, &pair.local, pair.reference()).await?,
            )),
        }
    }

    pub async fn list_certifications(&self, lang: &str) -> EngineResult<Vec<Certification>> {
        all_certifications(&self.ctx, &lang.to_lowercase()).await
    }

    /// Markets where some SKU of `brand` is listed and not expired, with the
    /// public locales of those markets. Read from global English.
    pub async fn shop_overview(&self, brand: &str) -> EngineResult<ShopOverview> {
        let lang = GLOBAL_ENGLISH;
        let products = Query::new()
            .filter(brand_filter(brand))
            .source(["epimId", "referenceId"]);
        let hits = self
            .ctx
            .scroll(CollectionKind::Products, lang, &products)
            .await?;
        let references: Vec<String> = decode_all::<EntityRecord>(&hits)
            .into_iter()
            .filter_map(|r| r.reference_id)
            .collect();

        let collection = format!("market-{brand}-COL");
        let ctx = &self.ctx;
        let records: Vec<AttributeRecord> = stream::iter(references.chunks(STATISTICS_CHUNK))
            .map(|chunk| {
                let query = Query::new()
                    .filter(Filter::terms("parentId", chunk.iter().cloned()))
                    .filter(Filter::nested(
                        "collections",
                        Filter::term("collections.collection", collection.as_str()),
                    ))
                    .source(["parentId", "name", "values"]);
                async move {
                    let hits = ctx.scroll(CollectionKind::Attributes, lang, &query).await?;
                    Ok::<_, EngineError>(decode_all::<AttributeRecord>(&hits))
                }
            })
            .buffered(STATISTICS_PARALLELISM)
            .try_concat()
            .await?;

        let markets = shop_statistics(&records);
        let mut locales: Vec<String> = Vec::new();
        let mut seen = BTreeSet::new();
        for market in &markets {
            for lang in self.ctx.locale.languages_for_market(market) {
                if let Some(public) = self.ctx.locale.unmap_locale(lang)
                    && seen.insert(public)
                {
                    locales.push(public.to_string());
                }
            }
        }
        tracing::info!(brand, markets = markets.len(), "Shop overview");

        let now = Utc::now();
        Ok(ShopOverview {
            locales,
            markets,
            published: now.timestamp(),
            version: shop_version(now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryRelationalStore};
    use serde_json::json;

    fn engine(docs: MemoryDocumentStore) -> Engine {
        Engine::new(EngineContext::new(
            Arc::new(docs),
            Arc::new(MemoryRelationalStore::new()),
        ))
        .with_list_concurrency(4)
    }

    #[test]
    fn scopes_from_public_locales() {
        let engine = engine(MemoryDocumentStore::new());
        let scope = engine.scope("en", "systemair", None).unwrap();
        assert_eq!(scope.lang, "eng_glo");

        let scope = engine.scope("en", "systemair", Some("MARKET-009")).unwrap();
        assert_eq!(scope.market, "MARKET-009");

        assert!(engine.scope("xx-XX", "systemair", None).is_err());
    }

    #[tokio::test]
    async fn shop_overview_reads_reference_attributes() {
        let docs = MemoryDocumentStore::new()
            .with_documents(
                "systemair_ds_products_eng_glo",
                vec![
                    json!({"epimId": 1, "referenceId": 11, "hierarchies": [{"hierarchy": "Systemair-SKUs"}]}),
                    json!({"epimId": 2, "referenceId": 12, "hierarchies": [{"hierarchy": "Frico"}]}),
                ],
            )
            .with_documents(
                "systemair_ds_attributes_eng_glo",
                vec![
                    json!({"name": "market-005", "parentId": 11, "values": [{"value": 1}],
                           "collections": [{"collection": "market-systemair-COL"}]}),
                    json!({"name": "market-005-expired", "parentId": 11, "values": [{"value": 0}],
                           "collections": [{"collection": "market-systemair-COL"}]}),
                    json!({"name": "market-009", "parentId": 12, "values": [{"value": 1}],
                           "collections": [{"collection": "market-systemair-COL"}]}),
                ],
            );
        let overview = engine(docs).shop_overview("systemair").await.unwrap();
        assert_eq!(overview.markets, vec!["MARKET-005"]);
        // last public locale mapping to eng_GLO
        assert_eq!(overview.locales, vec!["hr-HR"]);
        assert_eq!(overview.version.len(), 10);
    }

    #[test]
    fn shop_version_follows_berlin_midnight() {
        let late = DateTime::parse_from_rfc3339("2024-05-31T23:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(shop_version(late), "2024.06.01");
        let winter = DateTime::parse_from_rfc3339("2024-01-15T22:59:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(shop_version(winter), "2024.01.15");
    }

    #[tokio::test]
    async fn missing_sku_has_no_documents() {
        let engine = engine(MemoryDocumentStore::new());
        assert!(engine.sku_documents("1", "eng_glo", "systemair").await.unwrap().is_none());
        assert!(engine.sku_relations("1", "eng_glo", "systemair").await.unwrap().is_none());
    }
}
