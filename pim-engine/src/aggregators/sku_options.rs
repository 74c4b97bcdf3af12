//! Selectable product options
//!
//! Option tables (category 251) name the attributes that vary across a
//! product's SKUs. Each distinct (attribute, value) pair becomes one option
//! value listing the product numbers of the SKUs that carry it.

use std::collections::HashMap;

use serde_json::Value;
use shared::models::{SkuOption, SkuValue};

use crate::attributes::{DICTIONARY, ParentType, value_text};
use crate::context::EngineContext;
use crate::core::error::EngineResult;
use crate::records::{AttributeRecord, EntityRecord, ProductTableRecord, decode_all};
use crate::store::{CollectionKind, Filter, Query};

use super::definitions::{
    Definition, UnitMapping, definition_attributes, parse_definitions, unique_attributes,
};

pub const OPTION_TABLE_CATEGORY: &str = "251";
const DEFAULT_DATATYPE: &str = "STRING";

async fn option_definitions(
    ctx: &EngineContext,
    lang: &str,
    table_ids: &[String],
) -> EngineResult<Vec<Definition>> {
    if table_ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = Query::new()
        .filter(Filter::terms("epimId", table_ids.iter().cloned()))
        .filter(Filter::nested(
            "categories",
            Filter::term("categories.id", OPTION_TABLE_CATEGORY),
        ));
    let response = ctx.search(CollectionKind::ProductTables, lang, &query).await?;
    let units = UnitMapping::default();
    Ok(decode_all::<ProductTableRecord>(&response.hits)
        .iter()
        .flat_map(|t| parse_definitions(&t.table, &units))
        .collect())
}

/// Reference ids of the SKUs filed under `product_id`, with their product
/// numbers
async fn child_skus(
    ctx: &EngineContext,
    lang: &str,
    product_id: &str,
) -> EngineResult<(Vec<String>, HashMap<String, String>)> {
    let children = Query::new()
        .filter(Filter::nested(
            "hierarchies",
            Filter::term("hierarchies.id", product_id),
        ))
        .source(["epimId", "referenceId", "productNr"]);
    let hits = ctx.scroll(CollectionKind::Products, lang, &children).await?;
    let references: Vec<String> = decode_all::<EntityRecord>(&hits)
        .into_iter()
        .filter_map(|r| r.reference_id)
        .collect();
    if references.is_empty() {
        return Ok((references, HashMap::new()));
    }

    let numbers = Query::new()
        .filter(Filter::terms("epimId", references.iter().cloned()))
        .source(["epimId", "productNr"]);
    let hits = ctx.scroll(CollectionKind::Products, lang, &numbers).await?;
    let product_nrs = decode_all::<EntityRecord>(&hits)
        .into_iter()
        .filter_map(|r| Some((r.epim_id?, r.product_nr?)))
        .collect();
    Ok((references, product_nrs))
}

fn usable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[derive(Debug)]
struct Group {
    attribute: String,
    datatype: String,
    unit: Option<String>,
    value: SkuValue,
}

fn group_values(records: &[AttributeRecord], product_nrs: &HashMap<String, String>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for record in records {
        let Some(last) = record.values.last().filter(|v| usable(&v.value)) else {
            continue;
        };
        let datatype = record
            .datatype
            .clone()
            .unwrap_or_else(|| DEFAULT_DATATYPE.to_string());
        let id = if datatype == DICTIONARY {
            last.dict_id.clone()
        } else {
            record.attribute_id.clone()
        };
        let unit = last.unit.clone().filter(|u| !u.is_empty());
        let product_nr = record
            .parent_id
            .as_ref()
            .and_then(|p| product_nrs.get(p))
            .cloned();

        let existing = groups
            .iter_mut()
            .find(|g| g.attribute == record.name && g.value.value == last.value);
        let group = match existing {
            Some(group) => group,
            None => {
                let text = value_text(&last.value).unwrap_or_default();
                groups.push(Group {
                    attribute: record.name.clone(),
                    datatype,
                    value: SkuValue {
                        label: match &unit {
                            Some(u) => format!("{text} {u}"),
                            None => text,
                        },
                        value: last.value.clone(),
                        id: None,
                        skus: Vec::new(),
                    },
                    unit,
                });
                let last_index = groups.len() - 1;
                &mut groups[last_index]
            }
        };
        group.value.id = id.map(Value::String);
        group.value.skus.extend(product_nr);
    }
    groups
}

/// Options in definition order, values in first-seen order
fn assemble_options(definitions: &[Definition], groups: Vec<Group>) -> Vec<SkuOption> {
    let position = |attribute: &str| {
        definitions
            .iter()
            .position(|d| d.names(attribute))
            .unwrap_or(usize::MAX)
    };
    let mut options: Vec<SkuOption> = Vec::new();
    for group in groups {
        match options.iter_mut().find(|o| o.attribute == group.attribute) {
            Some(option) => option.values.push(group.value),
            None => {
                let name = definitions
                    .iter()
                    .find(|d| d.names(&group.attribute))
                    .map(Definition::label)
                    .filter(|l| !l.is_empty())
                    .unwrap_or(&group.attribute)
                    .to_string();
                options.push(SkuOption {
                    name,
                    unit: group.unit,
                    kind: Some(group.datatype.to_lowercase()),
                    attribute: group.attribute,
                    values: vec![group.value],
                });
            }
        }
    }
    options.sort_by_key(|o| position(&o.attribute));
    options
}

/// Options of the product `product_id`, defined by its option tables
pub async fn sku_options(
    ctx: &EngineContext,
    lang: &str,
    product_id: &str,
    table_ids: &[String],
) -> EngineResult<Vec<SkuOption>> {
    let definitions = option_definitions(ctx, lang, table_ids).await?;
    if definitions.is_empty() {
        return Ok(Vec::new());
    }
    let (skus, product_nrs) = child_skus(ctx, lang, product_id).await?;
    let names = unique_attributes(&definitions);
    let set = definition_attributes(ctx, lang, &skus, names, Some(ParentType::Product)).await?;
    let groups = group_values(set.records(), &product_nrs);
    Ok(assemble_options(&definitions, groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryRelationalStore};
    use serde_json::json;
    use std::sync::Arc;

    fn attr(parent: u64, name: &str, datatype: &str, value: Value, extra: Value) -> Value {
        let mut doc = json!({
            "name": name, "parentId": parent, "parentType": "product", "datatype": datatype,
            "attributeId": 300, "attributeParentId": format!("{name}-{parent}"),
            "values": [{"value": value}]
        });
        if let (Some(obj), Value::Object(more)) = (doc["values"][0].as_object_mut(), extra) {
            obj.extend(more);
        }
        doc
    }

    #[tokio::test]
    async fn values_group_skus_by_attribute_value() {
        let docs = MemoryDocumentStore::new()
            .with_documents(
                "systemair_ds_producttables_eng_glo",
                vec![json!({"epimId": 70, "categories": [{"id": 251}], "table": [{"rows": [{"cells": [
                    {"seqorderNr": 1, "label": [{"content": "Voltage"}], "attribute": [{"name": "voltage"}]},
                    {"seqorderNr": 2, "label": [{"content": "Colour"}], "attribute": [{"name": "colour"}]}
                ]}]}]})],
            )
            .with_documents(
                "systemair_ds_products_eng_glo",
                vec![
                    json!({"epimId": 1, "referenceId": 11, "hierarchies": [{"id": 500}]}),
                    json!({"epimId": 2, "referenceId": 12, "hierarchies": [{"id": 500}]}),
                    json!({"epimId": 3, "referenceId": 13, "hierarchies": [{"id": 999}]}),
                    json!({"epimId": 11, "productNr": "P-11"}),
                    json!({"epimId": 12, "productNr": "P-12"}),
                ],
            )
            .with_documents(
                "systemair_ds_attributes_eng_glo",
                vec![
                    attr(11, "colour", "DICTIONARY", json!("White"), json!({"dictId": 41})),
                    attr(12, "colour", "DICTIONARY", json!("White"), json!({"dictId": 41})),
                    attr(11, "voltage", "NUMBER", json!(230), json!({"unit": "V"})),
                    attr(12, "voltage", "NUMBER", json!(400), json!({"unit": "V"})),
                    attr(13, "voltage", "NUMBER", json!(110), json!({"unit": "V"})),
                ],
            );
        let ctx = EngineContext::new(Arc::new(docs), Arc::new(MemoryRelationalStore::new()));

        let options = sku_options(&ctx, "eng_glo", "500", &["70".to_string()]).await.unwrap();
        assert_eq!(options.len(), 2);

        let voltage = &options[0];
        assert_eq!(voltage.name, "Voltage");
        assert_eq!(voltage.kind.as_deref(), Some("number"));
        let labels: Vec<_> = voltage.values.iter().map(|v| v.label.as_str()).collect();
        assert_eq!(labels, vec!["230 V", "400 V"]);
        assert_eq!(voltage.values[0].id, Some(json!("300")));

        let colour = &options[1];
        assert_eq!(colour.values.len(), 1);
        assert_eq!(colour.values[0].skus, vec!["P-11", "P-12"]);
        assert_eq!(colour.values[0].id, Some(json!("41")));
    }

    #[tokio::test]
    async fn no_option_tables_no_queries() {
        let docs = MemoryDocumentStore::new().fail_on("systemair_ds_products_eng_glo");
        let ctx = EngineContext::new(Arc::new(docs), Arc::new(MemoryRelationalStore::new()));
        assert!(sku_options(&ctx, "eng_glo", "500", &[]).await.unwrap().is_empty());
    }
}
