//! In-memory stores
//!
//! Evaluate query descriptors over JSON documents held in memory. Used as
//! fakes in tests and for local fixture runs.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::{Map, Value};

use super::query::{Filter, Query, SortOrder};
use super::{DocumentStore, Hit, RelationalStore, Row, SearchResponse, StoreError, StoreResult};

/// Normalized comparison key of a scalar: integral floats compare equal to
/// integers, numbers compare equal to their string form
pub(crate) fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Some(i.to_string()),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 9.0e15 => {
                Some(format!("{}", f as i64))
            }
            _ => Some(n.to_string()),
        },
        other => Some(other.to_string()),
    }
}

fn push_flat<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => out.extend(items.iter()),
        other => out.push(other),
    }
}

/// Values at a dotted path; arrays along the way are flattened
fn lookup<'a>(doc: &'a Value, path: &str) -> Vec<&'a Value> {
    let mut current = vec![doc];
    for part in path.split('.') {
        let mut next = Vec::new();
        for value in current {
            match value {
                Value::Object(map) => {
                    if let Some(child) = map.get(part) {
                        push_flat(child, &mut next);
                    }
                }
                Value::Array(items) => {
                    for child in items.iter().filter_map(|i| i.get(part)) {
                        push_flat(child, &mut next);
                    }
                }
                _ => {}
            }
        }
        current = next;
    }
    current
}

fn glob_matches(pattern: &str, text: &str) -> bool {
    let expr = format!(
        "^{}$",
        regex::escape(pattern).replace(r"\*", ".*").replace(r"\?", ".")
    );
    Regex::new(&expr).map(|re| re.is_match(text)).unwrap_or(false)
}

fn relative<'f>(field: &'f str, scope: &str) -> &'f str {
    if scope.is_empty() {
        return field;
    }
    field
        .strip_prefix(scope)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(field)
}

fn matches(doc: &Value, filter: &Filter, scope: &str) -> bool {
    match filter {
        Filter::Term { field, value } => {
            let wanted = scalar_key(value);
            lookup(doc, relative(field, scope))
                .into_iter()
                .any(|v| wanted.is_some() && scalar_key(v) == wanted)
        }
        Filter::Terms { field, values } => {
            let wanted: HashSet<String> = values.iter().filter_map(scalar_key).collect();
            lookup(doc, relative(field, scope))
                .into_iter()
                .filter_map(scalar_key)
                .any(|k| wanted.contains(&k))
        }
        Filter::Wildcard { field, pattern } => lookup(doc, relative(field, scope))
            .into_iter()
            .filter_map(scalar_key)
            .any(|k| glob_matches(pattern, &k)),
        Filter::Exists { field } => lookup(doc, relative(field, scope))
            .into_iter()
            .any(|v| !v.is_null()),
        Filter::PrefixIgnoreCase { field, prefix } => {
            let prefix = prefix.to_lowercase();
            lookup(doc, relative(field, scope))
                .into_iter()
                .filter_map(Value::as_str)
                .any(|s| s.to_lowercase().starts_with(&prefix))
        }
        Filter::Nested { path, filter } => {
            let full_path = if scope.is_empty() {
                path.clone()
            } else {
                format!("{scope}.{path}")
            };
            lookup(doc, relative(path, scope))
                .into_iter()
                .any(|element| matches(element, filter, &full_path))
        }
        Filter::Bool {
            must,
            should,
            must_not,
        } => {
            must.iter().all(|f| matches(doc, f, scope))
                && (should.is_empty() || should.iter().any(|f| matches(doc, f, scope)))
                && !must_not.iter().any(|f| matches(doc, f, scope))
        }
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => match (a.as_str(), b.as_str()) {
                (Some(x), Some(y)) => match (x.parse::<f64>(), y.parse::<f64>()) {
                    (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                    _ => x.cmp(y),
                },
                _ => scalar_key(a).cmp(&scalar_key(b)),
            },
        },
    }
}

fn first_at<'a>(doc: &'a Value, field: &str) -> Option<&'a Value> {
    lookup(doc, field).into_iter().find(|v| !v.is_null())
}

fn project(source: &Value, fields: &[String]) -> Value {
    match source {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| {
                    fields.iter().any(|f| {
                        f == *key || f.strip_prefix(key.as_str()).is_some_and(|r| r.starts_with('.'))
                    })
                })
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// In-memory document store keyed by collection name
#[derive(Debug, Default, Clone)]
pub struct MemoryDocumentStore {
    collections: HashMap<String, Vec<Value>>,
    failing: HashSet<String>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collection: impl Into<String>, doc: Value) {
        self.collections.entry(collection.into()).or_default().push(doc);
    }

    pub fn with_documents(mut self, collection: &str, docs: impl IntoIterator<Item = Value>) -> Self {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .extend(docs);
        self
    }

    /// Every query touching `collection` fails with [`StoreError::Unavailable`]
    pub fn fail_on(mut self, collection: &str) -> Self {
        self.failing.insert(collection.to_string());
        self
    }

    fn evaluate(&self, collections: &[String], query: &Query, paginate: bool) -> StoreResult<SearchResponse> {
        if let Some(name) = collections.iter().find(|c| self.failing.contains(*c)) {
            return Err(StoreError::Unavailable(format!("collection {name} is offline")));
        }

        let mut hits: Vec<Hit> = Vec::new();
        for name in collections {
            let Some(docs) = self.collections.get(name) else {
                continue;
            };
            for (pos, doc) in docs.iter().enumerate() {
                let keep = query.filters.iter().all(|f| matches(doc, f, ""))
                    && !query.must_not.iter().any(|f| matches(doc, f, ""));
                if keep {
                    let id = doc
                        .get("_id")
                        .or_else(|| doc.get("epimId"))
                        .and_then(scalar_key)
                        .unwrap_or_else(|| pos.to_string());
                    hits.push(Hit {
                        index: name.clone(),
                        id,
                        source: doc.clone(),
                    });
                }
            }
        }
        let total = hits.len() as u64;

        hits.sort_by(|a, b| {
            let by_rank = match &query.language_rank {
                Some(rank) => {
                    let lang = |h: &Hit| {
                        first_at(&h.source, &rank.field)
                            .and_then(Value::as_str)
                            .map(|l| rank.rank(l))
                            .unwrap_or(super::query::UNRANKED)
                    };
                    lang(a).cmp(&lang(b))
                }
                None => Ordering::Equal,
            };
            query.sort.iter().fold(by_rank, |acc, (field, order)| {
                acc.then_with(|| {
                    let ord = compare_values(first_at(&a.source, field), first_at(&b.source, field));
                    match order {
                        SortOrder::Asc => ord,
                        SortOrder::Desc => ord.reverse(),
                    }
                })
            })
        });

        if let Some(field) = &query.collapse {
            let mut seen = HashSet::new();
            hits.retain(|h| match first_at(&h.source, field).and_then(scalar_key) {
                Some(key) => seen.insert(key),
                None => true,
            });
        }

        if paginate {
            let size = query.size.unwrap_or(usize::MAX);
            hits = hits.into_iter().skip(query.from).take(size).collect();
        }

        if let Some(fields) = &query.source {
            for hit in &mut hits {
                hit.source = project(&hit.source, fields);
            }
        }

        Ok(SearchResponse { hits, total })
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn search(&self, collections: &[String], query: &Query) -> StoreResult<SearchResponse> {
        self.evaluate(collections, query, true)
    }

    async fn scroll(
        &self,
        collection: &str,
        query: &Query,
        _page_size: usize,
        _ttl: &str,
    ) -> StoreResult<Vec<Hit>> {
        Ok(self.evaluate(&[collection.to_string()], query, false)?.hits)
    }
}

static TEMPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)FROM\s+(\w+)\s+WHERE\s+(\w+)\s*=\s*:(\w+)(?:\s+ORDER\s+BY\s+(\w+)\s+(ASC|DESC))?(?:\s+LIMIT\s+(\d+))?",
    )
    .expect("valid template pattern")
});

/// In-memory relational store.
///
/// Understands single-table templates of the form
/// `SELECT * FROM t WHERE col = :param [ORDER BY col ASC|DESC] [LIMIT n]`.
#[derive(Debug, Default, Clone)]
pub struct MemoryRelationalStore {
    tables: HashMap<String, Vec<Map<String, Value>>>,
    offline: bool,
}

impl MemoryRelationalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: &str, rows: impl IntoIterator<Item = Value>) -> Self {
        let rows = rows.into_iter().filter_map(|r| match r {
            Value::Object(map) => Some(map),
            _ => None,
        });
        self.tables
            .entry(table.to_lowercase())
            .or_default()
            .extend(rows);
        self
    }

    /// Every statement fails with [`StoreError::Unavailable`]
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }
}

#[async_trait]
impl RelationalStore for MemoryRelationalStore {
    async fn execute(&self, template: &str, params: &[(&str, Value)]) -> StoreResult<Vec<Row>> {
        if self.offline {
            return Err(StoreError::Unavailable("relational store offline".into()));
        }
        let caps = TEMPLATE
            .captures(template)
            .ok_or_else(|| StoreError::Sql(format!("unsupported template: {template}")))?;
        let table = caps[1].to_lowercase();
        let column = caps[2].to_string();
        let param = &caps[3];
        let wanted = params
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(param))
            .and_then(|(_, v)| scalar_key(v))
            .ok_or_else(|| StoreError::Sql(format!("missing parameter :{param}")))?;

        let mut rows: Vec<Row> = self
            .tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .map(|r| Row(r.clone()))
                    .filter(|r| r.get(&column).and_then(scalar_key).as_deref() == Some(wanted.as_str()))
                    .collect()
            })
            .unwrap_or_default();

        if let (Some(order_col), Some(dir)) = (caps.get(4), caps.get(5)) {
            let order_col = order_col.as_str();
            let desc = dir.as_str().eq_ignore_ascii_case("desc");
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(order_col), b.get(order_col));
                if desc { ord.reverse() } else { ord }
            });
        }
        if let Some(limit) = caps.get(6).and_then(|m| m.as_str().parse::<usize>().ok()) {
            rows.truncate(limit);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::query::Filter;
    use serde_json::json;

    fn store() -> MemoryDocumentStore {
        MemoryDocumentStore::new().with_documents(
            "attrs_eng_glo",
            vec![
                json!({"epimId": 1, "name": "SYS-CERT-CE", "parentId": "10", "langIso": "eng_glo",
                       "values": [{"value": 1, "seqorderNr": 2}]}),
                json!({"epimId": 2, "name": "market-se", "parentId": "10", "langIso": "eng_glo",
                       "values": [{"value": "0"}]}),
                json!({"epimId": 3, "name": "SYS-CERT-UL", "parentId": "11", "langIso": "eng_glo",
                       "values": [{"value": 0}]}),
            ],
        )
    }

    #[tokio::test]
    async fn filters_combine() {
        let store = store();
        let q = Query::new()
            .filter(Filter::wildcard("name", "*-CERT-*"))
            .filter(Filter::nested("values", Filter::term("values.value", 1)));
        let res = store.search(&["attrs_eng_glo".into()], &q).await.unwrap();
        assert_eq!(res.total, 1);
        assert_eq!(res.hits[0].id, "1");

        let q = Query::new().filter(Filter::terms("parentId", [10])).must_not(Filter::term("name", "market-se"));
        let res = store.search(&["attrs_eng_glo".into(), "absent".into()], &q).await.unwrap();
        assert_eq!(res.total, 1);
    }

    #[tokio::test]
    async fn total_counts_before_pagination() {
        let store = store();
        let q = Query::new().sort("epimId", SortOrder::Desc).from(1).size(1).source(["name"]);
        let res = store.search(&["attrs_eng_glo".into()], &q).await.unwrap();
        assert_eq!(res.total, 3);
        assert_eq!(res.hits.len(), 1);
        assert_eq!(res.hits[0].source, json!({"name": "market-se"}));
    }

    #[tokio::test]
    async fn failing_collection_reports_unavailable() {
        let store = store().fail_on("attrs_eng_glo");
        let err = store.search(&["attrs_eng_glo".into()], &Query::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn relational_template_filters_orders_and_limits() {
        let sql = MemoryRelationalStore::new().with_table(
            "vmps_erp_prices",
            vec![
                json!({"id": 1, "product_number": "123", "SE_PRICE": 10}),
                json!({"id": 7, "product_number": "123", "SE_PRICE": 12}),
                json!({"id": 9, "product_number": "999", "SE_PRICE": 99}),
            ],
        );
        let rows = sql
            .execute(super::super::PRICE_TEMPLATE, &[("productnr", json!("123"))])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("se_price"), Some(&json!(12)));
    }

    #[test]
    fn glob_supports_star_and_question_mark() {
        assert!(glob_matches("BTN*", "BTN-ahu-LNK"));
        assert!(glob_matches("*SY?", "Table_SYS"));
        assert!(!glob_matches("*-CERT-*", "CERT-x"));
    }
}
