//! PostgreSQL relational store adapter

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;

use super::{RelationalStore, Row, StoreResult};
use crate::core::config::DatabaseConfig;

/// Latest ERP price row of a product number
pub const PRICE_TEMPLATE: &str =
    "SELECT * FROM vmps_erp_prices WHERE product_number = :productnr ORDER BY id DESC LIMIT 1";

/// Unit-of-measure mapping of a market division
pub const UOM_TEMPLATE: &str =
    "SELECT * FROM vmps_mapping_units_of_measurements WHERE division = :division";

/// Rewrite `:name` placeholders to positional `$n` parameters.
///
/// Returns the rewritten SQL and the parameter names in position order.
/// `::type` casts and quoted literals are left untouched.
pub fn bind_named(template: &str) -> (String, Vec<String>) {
    let mut sql = String::with_capacity(template.len());
    let mut names: Vec<String> = Vec::new();
    let mut chars = template.chars().peekable();
    let mut in_literal = false;

    while let Some(c) = chars.next() {
        if c == '\'' {
            in_literal = !in_literal;
            sql.push(c);
            continue;
        }
        if c != ':' || in_literal {
            sql.push(c);
            continue;
        }
        match chars.peek() {
            Some(':') => {
                sql.push_str("::");
                chars.next();
            }
            Some(n) if n.is_ascii_alphabetic() || *n == '_' => {
                let mut name = String::new();
                while let Some(n) = chars.peek() {
                    if n.is_ascii_alphanumeric() || *n == '_' {
                        name.push(*n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let position = match names.iter().position(|existing| *existing == name) {
                    Some(i) => i + 1,
                    None => {
                        names.push(name);
                        names.len()
                    }
                };
                sql.push_str(&format!("${position}"));
            }
            _ => sql.push(c),
        }
    }
    (sql, names)
}

/// Relational store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgRelationalStore {
    pool: PgPool,
}

impl PgRelationalStore {
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_max_size)
            .connect(&config.url)
            .await?;
        tracing::info!(max_connections = config.pool_max_size, "Relational store pool ready");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationalStore for PgRelationalStore {
    async fn execute(&self, template: &str, params: &[(&str, Value)]) -> StoreResult<Vec<Row>> {
        let (sql, names) = bind_named(template);
        let wrapped = format!("SELECT row_to_json(t) FROM ({sql}) t");

        let mut query = sqlx::query_scalar::<_, Json<Value>>(&wrapped);
        for name in &names {
            let value = params
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.clone())
                .unwrap_or(Value::Null);
            query = match value {
                Value::String(s) => query.bind(s),
                Value::Bool(b) => query.bind(b),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => query.bind(i),
                    None => query.bind(n.as_f64()),
                },
                Value::Null => query.bind(None::<String>),
                other => query.bind(Json(other)),
            };
        }

        let rows = query.fetch_all(&self.pool).await.inspect_err(|e| {
            tracing::error!(error = %e, "Relational query failed");
        })?;
        Ok(rows.into_iter().map(|Json(v)| Row::from(v)).collect())
    }
}
