//! Query descriptors
//!
//! Store-neutral search descriptions. The memory store evaluates them
//! directly, the Elasticsearch adapter translates them to its search DSL.

use serde_json::Value;

/// Field holding a document's language code
pub const LANG_FIELD: &str = "langIso";

/// Rank given to languages outside the fallback chain
pub const UNRANKED: usize = 999;

/// Default bounded search size
pub const DEFAULT_SIZE: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals value
    Term { field: String, value: Value },
    /// Field equals any of the values
    Terms { field: String, values: Vec<Value> },
    /// Glob match with `*` and `?`
    Wildcard { field: String, pattern: String },
    /// Field present and not null
    Exists { field: String },
    /// Case-insensitive string prefix
    PrefixIgnoreCase { field: String, prefix: String },
    /// Filter evaluated against each element of an array of objects;
    /// field names inside are full paths (`path.field`)
    Nested { path: String, filter: Box<Filter> },
    /// `should` requires at least one match when non-empty
    Bool {
        must: Vec<Filter>,
        should: Vec<Filter>,
        must_not: Vec<Filter>,
    },
}

impl Filter {
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Filter::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn wildcard(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Filter::Wildcard {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Filter::Exists {
            field: field.into(),
        }
    }

    pub fn prefix_ignore_case(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Filter::PrefixIgnoreCase {
            field: field.into(),
            prefix: prefix.into(),
        }
    }

    pub fn nested(path: impl Into<String>, filter: Filter) -> Self {
        Filter::Nested {
            path: path.into(),
            filter: Box::new(filter),
        }
    }

    pub fn any_of(should: Vec<Filter>) -> Self {
        Filter::Bool {
            must: Vec::new(),
            should,
            must_not: Vec::new(),
        }
    }

    pub fn not(filter: Filter) -> Self {
        Filter::Bool {
            must: Vec::new(),
            should: Vec::new(),
            must_not: vec![filter],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Rank documents by the position of their language in a fallback chain
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRank {
    pub field: String,
    pub chain: Vec<String>,
}

impl LanguageRank {
    pub fn new(chain: Vec<String>) -> Self {
        Self {
            field: LANG_FIELD.to_string(),
            chain,
        }
    }

    pub fn rank(&self, lang: &str) -> usize {
        self.chain
            .iter()
            .position(|l| l.eq_ignore_ascii_case(lang))
            .unwrap_or(UNRANKED)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub must_not: Vec<Filter>,
    pub from: usize,
    /// `None` means "as many as the store allows"
    pub size: Option<usize>,
    pub sort: Vec<(String, SortOrder)>,
    pub source: Option<Vec<String>>,
    /// Keep only the first hit per value of this field
    pub collapse: Option<String>,
    /// Applied before `sort`
    pub language_rank: Option<LanguageRank>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn must_not(mut self, filter: Filter) -> Self {
        self.must_not.push(filter);
        self
    }

    pub fn from(mut self, from: usize) -> Self {
        self.from = from;
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push((field.into(), order));
        self
    }

    pub fn source<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.source = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn collapse(mut self, field: impl Into<String>) -> Self {
        self.collapse = Some(field.into());
        self
    }

    pub fn rank_languages(mut self, chain: Vec<String>) -> Self {
        self.language_rank = Some(LanguageRank::new(chain));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rank_is_chain_position_or_unranked() {
        let rank = LanguageRank::new(vec!["fra_che".into(), "fra_fra".into(), "eng_glo".into()]);
        assert_eq!(rank.rank("FRA_CHE"), 0);
        assert_eq!(rank.rank("eng_glo"), 2);
        assert_eq!(rank.rank("deu_deu"), UNRANKED);
    }

    #[test]
    fn builder_accumulates() {
        let q = Query::new()
            .filter(Filter::term("epimId", "42"))
            .filter(Filter::terms("parentId", ["1", "2"]))
            .sort("seqorderNr", SortOrder::Asc)
            .size(5)
            .collapse("attributeParentId");
        assert_eq!(q.filters.len(), 2);
        assert_eq!(q.filters[1], Filter::Terms {
            field: "parentId".into(),
            values: vec![json!("1"), json!("2")],
        });
        assert_eq!(q.size, Some(5));
        assert_eq!(q.collapse.as_deref(), Some("attributeParentId"));
    }
}
