//! Elasticsearch document store adapter

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Value, json};

use super::query::{DEFAULT_SIZE, Filter, LanguageRank, Query, UNRANKED};
use super::{DocumentStore, Hit, SearchResponse, StoreError, StoreResult};
use crate::core::config::ElasticConfig;

/// HTTP client for the document store search API
#[derive(Debug, Clone)]
pub struct ElasticStore {
    client: Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl ElasticStore {
    pub fn new(config: &ElasticConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let req = self.client.request(method, url);
        match &self.username {
            Some(user) => req.basic_auth(user, self.password.as_deref()),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> StoreResult<Value> {
        let response = req.send().await.inspect_err(|e| {
            tracing::error!(error = %e, "Document store request failed");
        })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Document store returned an error");
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

fn filter_clause(filter: &Filter) -> Value {
    match filter {
        Filter::Term { field, value } => json!({"term": {field: value}}),
        Filter::Terms { field, values } => json!({"terms": {field: values}}),
        Filter::Wildcard { field, pattern } => json!({"wildcard": {field: {"value": pattern}}}),
        Filter::Exists { field } => json!({"exists": {"field": field}}),
        Filter::PrefixIgnoreCase { field, prefix } => {
            json!({"prefix": {field: {"value": prefix, "case_insensitive": true}}})
        }
        Filter::Nested { path, filter } => {
            json!({"nested": {"path": path, "query": filter_clause(filter)}})
        }
        Filter::Bool {
            must,
            should,
            must_not,
        } => {
            let mut clause = serde_json::Map::new();
            if !must.is_empty() {
                clause.insert("filter".into(), must.iter().map(filter_clause).collect());
            }
            if !should.is_empty() {
                clause.insert("should".into(), should.iter().map(filter_clause).collect());
                clause.insert("minimum_should_match".into(), json!(1));
            }
            if !must_not.is_empty() {
                clause.insert("must_not".into(), must_not.iter().map(filter_clause).collect());
            }
            json!({"bool": clause})
        }
    }
}

fn rank_script(rank: &LanguageRank) -> Value {
    json!({
        "_script": {
            "type": "number",
            "order": "asc",
            "script": {
                "lang": "painless",
                "source": "if (doc[params.field].size() == 0) { return params.unranked; } \
                           String lang = doc[params.field].value.toLowerCase(); \
                           for (int i = 0; i < params.chain.size(); ++i) { \
                             if (params.chain[i] == lang) { return i; } \
                           } \
                           return params.unranked;",
                "params": {
                    "field": rank.field,
                    "chain": rank.chain.iter().map(|l| l.to_lowercase()).collect::<Vec<_>>(),
                    "unranked": UNRANKED,
                }
            }
        }
    })
}

/// Search request body for a query descriptor
pub fn query_body(query: &Query) -> Value {
    let mut body = json!({
        "query": {
            "bool": {
                "filter": query.filters.iter().map(filter_clause).collect::<Vec<_>>(),
                "must_not": query.must_not.iter().map(filter_clause).collect::<Vec<_>>(),
            }
        },
        "from": query.from,
        "size": query.size.unwrap_or(DEFAULT_SIZE),
        "track_total_hits": true,
    });

    let mut sort: Vec<Value> = Vec::new();
    if let Some(rank) = &query.language_rank {
        sort.push(rank_script(rank));
    }
    sort.extend(
        query
            .sort
            .iter()
            .map(|(field, order)| json!({field: {"order": order.as_str()}})),
    );
    if !sort.is_empty() {
        body["sort"] = Value::Array(sort);
    }
    if let Some(fields) = &query.source {
        body["_source"] = json!(fields);
    }
    if let Some(field) = &query.collapse {
        body["collapse"] = json!({"field": field});
    }
    body
}

fn parse_hits(response: &Value) -> Vec<Hit> {
    response["hits"]["hits"]
        .as_array()
        .map(|hits| {
            hits.iter()
                .map(|h| Hit {
                    index: h["_index"].as_str().unwrap_or_default().to_string(),
                    id: h["_id"].as_str().unwrap_or_default().to_string(),
                    source: h.get("_source").cloned().unwrap_or(Value::Null),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_total(response: &Value) -> u64 {
    let total = &response["hits"]["total"];
    total["value"].as_u64().or_else(|| total.as_u64()).unwrap_or(0)
}

#[async_trait]
impl DocumentStore for ElasticStore {
    async fn search(&self, collections: &[String], query: &Query) -> StoreResult<SearchResponse> {
        if collections.is_empty() {
            return Ok(SearchResponse::default());
        }
        let path = format!("{}/_search?ignore_unavailable=true", collections.join(","));
        let response = self
            .send(self.request(Method::POST, &path).json(&query_body(query)))
            .await?;
        Ok(SearchResponse {
            hits: parse_hits(&response),
            total: parse_total(&response),
        })
    }

    async fn scroll(
        &self,
        collection: &str,
        query: &Query,
        page_size: usize,
        ttl: &str,
    ) -> StoreResult<Vec<Hit>> {
        let mut body = query_body(query);
        body["size"] = json!(page_size);
        if let Some(map) = body.as_object_mut() {
            map.remove("from");
        }

        let path = format!("{collection}/_search?scroll={ttl}&ignore_unavailable=true");
        let mut response = self.send(self.request(Method::POST, &path).json(&body)).await?;
        let mut hits = Vec::new();
        let mut scroll_id = response["_scroll_id"].as_str().map(str::to_string);

        loop {
            let page = parse_hits(&response);
            if page.is_empty() {
                break;
            }
            hits.extend(page);
            let Some(id) = scroll_id.clone() else {
                break;
            };
            response = self
                .send(
                    self.request(Method::POST, "_search/scroll")
                        .json(&json!({"scroll": ttl, "scroll_id": id})),
                )
                .await?;
            scroll_id = response["_scroll_id"].as_str().map(str::to_string).or(scroll_id);
        }

        if let Some(id) = scroll_id {
            let cleared = self
                .send(
                    self.request(Method::DELETE, "_search/scroll")
                        .json(&json!({"scroll_id": id})),
                )
                .await;
            if let Err(e) = cleared {
                tracing::warn!(error = %e, collection, "Failed to clear scroll context");
            }
        }
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::query::SortOrder;

    #[test]
    fn body_translates_filters() {
        let query = Query::new()
            .filter(Filter::term("epimId", "42"))
            .filter(Filter::nested(
                "hierarchies",
                Filter::prefix_ignore_case("hierarchies.hierarchy", "SYS"),
            ))
            .filter(Filter::any_of(vec![
                Filter::term("planningLevel", "Product Range"),
                Filter::not(Filter::exists("planningLevel")),
            ]))
            .sort("seqorderNr", SortOrder::Asc)
            .size(20);
        let body = query_body(&query);

        assert_eq!(body["size"], json!(20));
        assert_eq!(body["query"]["bool"]["filter"][0], json!({"term": {"epimId": "42"}}));
        assert_eq!(
            body["query"]["bool"]["filter"][1]["nested"]["query"],
            json!({"prefix": {"hierarchies.hierarchy": {"value": "SYS", "case_insensitive": true}}})
        );
        assert_eq!(
            body["query"]["bool"]["filter"][2]["bool"]["minimum_should_match"],
            json!(1)
        );
        assert_eq!(body["sort"], json!([{"seqorderNr": {"order": "asc"}}]));
    }

    #[test]
    fn language_rank_sorts_first_and_collapses() {
        let query = Query::new()
            .sort("attributeId", SortOrder::Desc)
            .rank_languages(vec!["DEU_CHE".into(), "eng_glo".into()])
            .collapse("attributeParentId");
        let body = query_body(&query);

        let script = &body["sort"][0]["_script"];
        assert_eq!(script["order"], json!("asc"));
        assert_eq!(script["script"]["params"]["chain"], json!(["deu_che", "eng_glo"]));
        assert_eq!(body["sort"][1], json!({"attributeId": {"order": "desc"}}));
        assert_eq!(body["collapse"], json!({"field": "attributeParentId"}));
        assert_eq!(body["size"], json!(DEFAULT_SIZE));
    }

    #[test]
    fn hits_and_total_are_read_from_the_envelope() {
        let response = json!({
            "hits": {
                "total": {"value": 7, "relation": "eq"},
                "hits": [{"_index": "a", "_id": "1", "_source": {"epimId": 1}}]
            }
        });
        assert_eq!(parse_total(&response), 7);
        let hits = parse_hits(&response);
        assert_eq!(hits[0].index, "a");
        assert_eq!(hits[0].source, json!({"epimId": 1}));
    }
}
