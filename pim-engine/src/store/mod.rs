//! Store gateways
//!
//! The engine only talks to its backing stores through two narrow traits:
//!
//! - [`DocumentStore`]: search / scroll over named collections
//! - [`RelationalStore`]: parameterized SQL templates returning rows
//!
//! Adapters: [`ElasticStore`] and [`PgRelationalStore`] for production,
//! [`MemoryDocumentStore`] and [`MemoryRelationalStore`] for tests.

pub mod elastic;
pub mod memory;
pub mod query;
pub mod sql;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use crate::core::error::{StoreError, StoreResult};
pub use elastic::ElasticStore;
pub use memory::{MemoryDocumentStore, MemoryRelationalStore};
pub use query::{Filter, LanguageRank, Query, SortOrder};
pub use sql::{PRICE_TEMPLATE, PgRelationalStore, UOM_TEMPLATE};

/// One search hit
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Collection the hit came from
    pub index: String,
    pub id: String,
    pub source: Value,
}

impl Hit {
    pub fn source_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.source)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    pub hits: Vec<Hit>,
    /// Number of matching documents before pagination and collapse
    pub total: u64,
}

/// Document store gateway
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Bounded search across one or more collections.
    ///
    /// Collections that do not exist are ignored.
    async fn search(&self, collections: &[String], query: &Query) -> StoreResult<SearchResponse>;

    /// Exhaustive search of one collection, fetched `page_size` hits at a time
    async fn scroll(
        &self,
        collection: &str,
        query: &Query,
        page_size: usize,
        ttl: &str,
    ) -> StoreResult<Vec<Hit>>;
}

/// One relational row; column lookup is case-insensitive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(pub Map<String, Value>);

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column).or_else(|| {
            self.0
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(column))
                .map(|(_, v)| v)
        })
    }
}

impl From<Value> for Row {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Row(map),
            _ => Row::default(),
        }
    }
}

/// Relational store gateway
#[async_trait]
pub trait RelationalStore: Send + Sync {
    /// Execute a SQL template with `:name` placeholders
    async fn execute(&self, template: &str, params: &[(&str, Value)]) -> StoreResult<Vec<Row>>;
}

/// Collection families of the catalog export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Hierarchies,
    Products,
    Variants,
    Attributes,
    Elements,
    ProductTables,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Hierarchies => "hierarchies",
            CollectionKind::Products => "products",
            CollectionKind::Variants => "variants",
            CollectionKind::Attributes => "attributes",
            CollectionKind::Elements => "elements",
            CollectionKind::ProductTables => "producttables",
        }
    }
}

/// Collection naming: `{prefix}{kind}_{lang}`
#[derive(Debug, Clone)]
pub struct Collections {
    prefix: String,
}

impl Collections {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn name(&self, kind: CollectionKind, lang: &str) -> String {
        format!("{}{}_{}", self.prefix, kind.as_str(), lang.to_lowercase())
    }

    /// One collection per language of a fallback chain, in chain order
    pub fn for_chain(&self, kind: CollectionKind, chain: &[String]) -> Vec<String> {
        chain.iter().map(|lang| self.name(kind, lang)).collect()
    }
}
