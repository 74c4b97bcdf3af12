//! Shared build context
//!
//! Everything an aggregator or builder needs: the store gateways, collection
//! naming and the locale catalog. Read-only and shared across concurrent
//! builds.

use std::sync::Arc;

use shared::LocaleCatalog;

use crate::core::config::{Config, DEFAULT_INDEX_PREFIX};
use crate::core::error::{EngineError, EngineResult, StoreResult};
use crate::store::{
    CollectionKind, Collections, DocumentStore, Hit, Query, RelationalStore, SearchResponse,
};

pub const DEFAULT_SCROLL_SIZE: usize = 10_000;
pub const DEFAULT_SCROLL_TTL: &str = "1m";

#[derive(Clone)]
pub struct EngineContext {
    pub docs: Arc<dyn DocumentStore>,
    pub sql: Arc<dyn RelationalStore>,
    pub collections: Collections,
    pub locale: Arc<LocaleCatalog>,
    pub scroll_size: usize,
    pub scroll_ttl: String,
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("collections", &self.collections)
            .field("scroll_size", &self.scroll_size)
            .field("scroll_ttl", &self.scroll_ttl)
            .finish_non_exhaustive()
    }
}

impl EngineContext {
    pub fn new(docs: Arc<dyn DocumentStore>, sql: Arc<dyn RelationalStore>) -> Self {
        Self {
            docs,
            sql,
            collections: Collections::new(DEFAULT_INDEX_PREFIX),
            locale: Arc::new(LocaleCatalog::standard()),
            scroll_size: DEFAULT_SCROLL_SIZE,
            scroll_ttl: DEFAULT_SCROLL_TTL.to_string(),
        }
    }

    pub fn from_config(
        config: &Config,
        docs: Arc<dyn DocumentStore>,
        sql: Arc<dyn RelationalStore>,
    ) -> Self {
        Self {
            collections: Collections::new(config.elastic.index_prefix.clone()),
            scroll_size: config.elastic.scroll_size,
            scroll_ttl: config.elastic.scroll_ttl.clone(),
            ..Self::new(docs, sql)
        }
    }

    pub fn collection(&self, kind: CollectionKind, lang: &str) -> String {
        self.collections.name(kind, lang)
    }

    pub fn chain(&self, lang: &str) -> Vec<String> {
        self.locale.fallback_chain(lang)
    }

    /// Bounded search of one collection
    pub async fn search(
        &self,
        kind: CollectionKind,
        lang: &str,
        query: &Query,
    ) -> StoreResult<SearchResponse> {
        self.docs
            .search(&[self.collection(kind, lang)], query)
            .await
    }

    /// Bounded search across the fallback chain of `lang`, ranked by
    /// chain position
    pub async fn search_chain(
        &self,
        kind: CollectionKind,
        lang: &str,
        query: Query,
    ) -> StoreResult<SearchResponse> {
        let chain = self.chain(lang);
        let collections = self.collections.for_chain(kind, &chain);
        self.docs
            .search(&collections, &query.rank_languages(chain))
            .await
    }

    /// Exhaustive search of one collection
    pub async fn scroll(
        &self,
        kind: CollectionKind,
        lang: &str,
        query: &Query,
    ) -> StoreResult<Vec<Hit>> {
        self.docs
            .scroll(
                &self.collection(kind, lang),
                query,
                self.scroll_size,
                &self.scroll_ttl,
            )
            .await
    }
}

/// Caller-supplied build coordinates; `lang` is an internal language code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildScope {
    pub lang: String,
    pub brand: String,
    pub market: String,
}

impl BuildScope {
    pub fn new(lang: impl Into<String>, brand: impl Into<String>, market: impl Into<String>) -> Self {
        Self {
            lang: lang.into().to_lowercase(),
            brand: brand.into(),
            market: market.into(),
        }
    }

    /// Scope whose market is derived from brand and language
    pub fn for_brand(ctx: &EngineContext, lang: &str, brand: &str) -> Self {
        let market = ctx.locale.map_market(brand, lang);
        Self::new(lang, brand, market)
    }

    pub fn brand_code(&self, ctx: &EngineContext) -> EngineResult<&'static str> {
        Ok(ctx.locale.map_brand(&self.brand)?)
    }
}

/// Isolate an optional aggregator: non-fatal failures are logged and
/// replaced by the aggregator's empty default
pub fn degrade<T: Default>(what: &str, id: &str, result: EngineResult<T>) -> EngineResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            tracing::warn!(aggregator = what, id, error = %e, "Aggregator degraded to default");
            Ok(T::default())
        }
    }
}

/// Convenience for aggregators returning store results
pub fn degrade_store<T: Default>(what: &str, id: &str, result: StoreResult<T>) -> EngineResult<T> {
    degrade(what, id, result.map_err(EngineError::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::StoreError;

    #[test]
    fn degrade_swallows_store_errors_only() {
        let soft: EngineResult<Vec<u8>> = Err(StoreError::Timeout("slow".into()).into());
        assert_eq!(degrade("images", "1", soft).unwrap(), Vec::<u8>::new());

        let fatal: EngineResult<Vec<u8>> = Err(EngineError::RichText("bad".into()));
        assert!(degrade("texts", "1", fatal).is_err());

        assert_eq!(degrade("price", "1", Ok(3)).unwrap(), 3);
    }
}
