//! Related SKUs and operating modes
//!
//! Relation assignments are grouped by (assignment type, object type) and
//! each group is fetched from the collection of its object type.

use futures::future::try_join_all;
use shared::models::{Relation, ShopRelation};

use crate::attributes::{AttributeResolver, AttributeSet};
use crate::context::EngineContext;
use crate::core::error::EngineResult;
use crate::records::{AssignmentKind, EntityRecord};
use crate::store::Filter;

use super::images::sku_images;
use super::linked::{LinkedResolver, linked_ids, relation_groups};
use super::status::{MarketStatus, market_expired_flag, market_flag, market_status};

pub const REPLACEMENT: &str = "Replacement";
/// Relation type of every shop relation; the assignment type becomes its group
pub const SHOP_RELATION_TYPE: &str = "accessory";
pub const ITEM_NAME: &str = "M3-ITEM-NAME";

async fn related_records(
    ctx: &EngineContext,
    lang: &str,
    local: &EntityRecord,
    reference: Option<&EntityRecord>,
    only: Option<&str>,
) -> EngineResult<Vec<(String, Vec<EntityRecord>)>> {
    let resolver = LinkedResolver::new(ctx);
    let groups = relation_groups(local, reference, only);
    try_join_all(groups.into_iter().map(|group| {
        let resolver = &resolver;
        async move {
            let records = resolver
                .fetch(&group.object_type, &group.object_ids, lang)
                .await?;
            Ok::<_, crate::core::error::EngineError>((group.assignment_type, records))
        }
    }))
    .await
}

async fn to_relation(
    ctx: &EngineContext,
    lang: &str,
    kind: &str,
    record: &EntityRecord,
) -> EngineResult<Option<Relation>> {
    let Some(id) = record.epim_id.clone() else {
        return Ok(None);
    };
    let image_ids = linked_ids(record, None, &[AssignmentKind::Image]);
    let image = sku_images(ctx, lang, &image_ids).await?;
    Ok(Some(Relation {
        id,
        vendor_id: record.product_nr.clone(),
        operating_mode: None,
        parent_id: record.parent_hierarchy.clone(),
        kind: kind.to_string(),
        group: record.group.clone(),
        name: record.name.clone(),
        image,
        priority: record.priority.clone(),
    }))
}

/// Every related object of a SKU, grouped in assignment order
pub async fn relations(
    ctx: &EngineContext,
    lang: &str,
    local: &EntityRecord,
    reference: Option<&EntityRecord>,
) -> EngineResult<Vec<Relation>> {
    let groups = related_records(ctx, lang, local, reference, None).await?;
    let pending = groups
        .iter()
        .flat_map(|(kind, records)| records.iter().map(move |r| (kind.as_str(), r)))
        .map(|(kind, record)| to_relation(ctx, lang, kind, record));
    Ok(try_join_all(pending).await?.into_iter().flatten().collect())
}

/// Market status of related objects, read from their own attributes
pub async fn related_market_status(
    ctx: &EngineContext,
    lang: &str,
    ids: &[String],
    market: &str,
) -> EngineResult<std::collections::HashMap<String, MarketStatus>> {
    if ids.is_empty() {
        return Ok(Default::default());
    }
    let names = vec![market_flag(market), market_expired_flag(market), ITEM_NAME.to_string()];
    let set: AttributeSet = AttributeResolver::new(ctx)
        .resolve_with(ids, lang, vec![Filter::terms("name", names)])
        .await?;
    Ok(market_status(set.records(), market, ITEM_NAME))
}

/// Related objects listed on the market, named by their ERP item name
pub async fn shop_relations(
    ctx: &EngineContext,
    lang: &str,
    market: &str,
    local: &EntityRecord,
    reference: Option<&EntityRecord>,
) -> EngineResult<Vec<ShopRelation>> {
    let groups = related_records(ctx, lang, local, reference, None).await?;
    let ids: Vec<String> = groups
        .iter()
        .flat_map(|(_, records)| records.iter().filter_map(|r| r.epim_id.clone()))
        .collect();
    let status = related_market_status(ctx, lang, &ids, market).await?;

    let mut out = Vec::new();
    for (assignment_type, records) in &groups {
        for record in records {
            let Some(id) = record.epim_id.as_ref() else {
                continue;
            };
            let Some(state) = status.get(id).filter(|s| s.listed()) else {
                continue;
            };
            out.push(ShopRelation {
                id: id.clone(),
                vendor_id: record.product_nr.clone(),
                kind: SHOP_RELATION_TYPE.to_string(),
                group: Some(assignment_type.clone()),
                name: state.item_name.clone(),
            });
        }
    }
    Ok(out)
}

/// Ids of replacement SKUs
pub async fn successor_ids(
    ctx: &EngineContext,
    lang: &str,
    local: &EntityRecord,
    reference: Option<&EntityRecord>,
) -> EngineResult<Vec<String>> {
    let mut ids: Vec<String> = relation_groups(local, reference, Some(REPLACEMENT))
        .into_iter()
        .flat_map(|g| g.object_ids)
        .collect();
    ids.dedup();
    let records = LinkedResolver::new(ctx).fetch("product", &ids, lang).await?;
    Ok(records.into_iter().filter_map(|r| r.epim_id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryRelationalStore};
    use serde_json::json;
    use std::sync::Arc;

    fn sku() -> EntityRecord {
        serde_json::from_value(json!({
            "epimId": 1,
            "relationAssignments": [
                {"assignmentType": "Accessory", "objects": [
                    {"objectType": "product", "objectId": 500},
                    {"objectType": "product", "objectId": 501},
                    {"objectType": "widget", "objectId": 502}
                ]},
                {"assignmentType": "Replacement", "objects": [
                    {"objectType": "product", "objectId": 501}
                ]}
            ]
        }))
        .unwrap()
    }

    fn ctx() -> EngineContext {
        let docs = MemoryDocumentStore::new()
            .with_documents(
                "systemair_ds_products_eng_glo",
                vec![
                    json!({"epimId": 10, "objectId": 500, "productNr": "200100", "name": "Grille",
                           "parentHierarchy": 77, "imageAssignments": [{"objects": [{"epimId": 900}]}]}),
                    json!({"epimId": 11, "objectId": 501, "productNr": "200101", "name": "Damper"}),
                ],
            )
            .with_documents(
                "systemair_ds_elements_eng_glo",
                vec![json!({"epimId": 1, "parentElement": 900, "categories": [{"id": 119}],
                            "dsElementPreviewFile": "grille.jpg"})],
            )
            .with_documents(
                "systemair_ds_attributes_eng_glo",
                vec![
                    json!({"name": "market-005", "parentId": 10, "attributeParentId": "m-10", "values": [{"value": 1}]}),
                    json!({"name": "M3-ITEM-NAME", "parentId": 10, "attributeParentId": "n-10", "values": [{"value": "Grille GR"}]}),
                    json!({"name": "market-005", "parentId": 11, "attributeParentId": "m-11", "values": [{"value": 1}]}),
                    json!({"name": "market-005-expired", "parentId": 11, "attributeParentId": "e-11", "values": [{"value": 1}]}),
                ],
            );
        EngineContext::new(Arc::new(docs), Arc::new(MemoryRelationalStore::new()))
    }

    #[tokio::test]
    async fn relations_carry_their_assignment_type() {
        let relations = relations(&ctx(), "eng_glo", &sku(), None).await.unwrap();
        let kinds: Vec<_> = relations.iter().map(|r| (r.id.as_str(), r.kind.as_str())).collect();
        assert_eq!(kinds, vec![("10", "Accessory"), ("11", "Accessory"), ("11", "Replacement")]);
        assert_eq!(relations[0].image, vec!["grille.jpg"]);
        assert_eq!(relations[0].parent_id.as_deref(), Some("77"));
    }

    #[tokio::test]
    async fn shop_relations_skip_expired_objects() {
        let relations = shop_relations(&ctx(), "eng_glo", "MARKET-005", &sku(), None)
            .await
            .unwrap();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].name.as_deref(), Some("Grille GR"));
        assert_eq!(relations[0].group.as_deref(), Some("Accessory"));
        assert_eq!(relations[0].kind, SHOP_RELATION_TYPE);
    }

    #[tokio::test]
    async fn successors_are_replacements() {
        let ids = successor_ids(&ctx(), "eng_glo", &sku(), None).await.unwrap();
        assert_eq!(ids, vec!["11"]);
    }
}
