use crate::context::EngineContext;
use crate::core::error::EngineResult;
use crate::records::{AttributeRecord, decode_all};
use crate::store::{CollectionKind, Filter, Query};

use super::AttributeSet;

/// Grouping key of the language-fallback collapse
pub const COLLAPSE_FIELD: &str = "attributeParentId";

/// Kind of object an attribute hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentType {
    Hierarchy,
    Product,
    Variant,
}

impl ParentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParentType::Hierarchy => "hierarchy",
            ParentType::Product => "product",
            ParentType::Variant => "variant",
        }
    }
}

/// Fetches attribute records across a language fallback chain
pub struct AttributeResolver<'a> {
    ctx: &'a EngineContext,
}

impl<'a> AttributeResolver<'a> {
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Attributes of `identifiers` (in precedence order) that carry a value
    pub async fn resolve(
        &self,
        identifiers: &[String],
        lang: &str,
        parent_type: Option<ParentType>,
    ) -> EngineResult<AttributeSet> {
        let mut filters = vec![Filter::nested("values", Filter::exists("values.value"))];
        if let Some(parent_type) = parent_type {
            filters.push(Filter::term("parentType", parent_type.as_str()));
        }
        self.resolve_with(identifiers, lang, filters).await
    }

    /// Attributes of `identifiers` matching additional filters.
    ///
    /// One search spans every collection of the fallback chain; for each
    /// attribute of each parent only the hit of the lowest chain position
    /// survives.
    pub async fn resolve_with(
        &self,
        identifiers: &[String],
        lang: &str,
        filters: Vec<Filter>,
    ) -> EngineResult<AttributeSet> {
        if identifiers.is_empty() {
            return Ok(AttributeSet::default());
        }
        let mut query = Query::new()
            .filter(Filter::terms("parentId", identifiers.iter().cloned()))
            .collapse(COLLAPSE_FIELD);
        query.filters.extend(filters);

        let response = self
            .ctx
            .search_chain(CollectionKind::Attributes, lang, query)
            .await?;
        let records: Vec<AttributeRecord> = decode_all(&response.hits);
        tracing::debug!(
            parents = identifiers.len(),
            records = records.len(),
            lang,
            "Resolved attributes"
        );
        Ok(AttributeSet::ranked(records, identifiers))
    }
}
