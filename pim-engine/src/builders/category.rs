//! Category and product-range builder

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use shared::models::{Category, TYPE_CATEGORY, TYPE_PRODUCT_RANGE};

use crate::aggregators::images::category_icon;
use crate::aggregators::linked::{linked_ids, linked_ids_where};
use crate::aggregators::status::{PRODUCT_APPROVED_STATES, PRODUCTS_WORKFLOW, approved};
use crate::aggregators::texts::{DESCRIPTION_CATEGORY, TextField, text_elements, text_in_category};
use crate::attributes::{AttributeResolver, AttributeSet, ParentType, truthy, value_text};
use crate::context::{BuildScope, EngineContext, degrade};
use crate::core::error::EngineResult;
use crate::records::{AssignmentKind, EntityRecord};
use crate::store::{CollectionKind, Filter};

use super::product::{TAGLINE, text_values};
use super::{find_record_where, secondary_parents, sort_order};

pub const PRODUCT_RANGE: &str = "Product Range";
pub const RANGE_OLD_IDS: &str = "ecom-old-matching-ids-level-range";

static RELEASE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Release-date").expect("valid release date pattern"));

/// Hierarchy nodes that are categories: product ranges and unplanned nodes
pub fn category_filter() -> Filter {
    Filter::any_of(vec![
        Filter::term("planningLevel", PRODUCT_RANGE),
        Filter::not(Filter::exists("planningLevel")),
    ])
}

fn is_range(record: &EntityRecord) -> bool {
    record.planning_level.as_deref() == Some(PRODUCT_RANGE)
}

fn old_ids_attribute(record: &EntityRecord) -> String {
    if is_range(record) {
        RANGE_OLD_IDS.to_string()
    } else {
        format!(
            "ecom-old-matching-ids-level{}",
            record.level_text().unwrap_or_default()
        )
    }
}

fn hidden(record: &EntityRecord, set: &AttributeSet) -> bool {
    let name = format!("is-hidden-level-{}", record.level_text().unwrap_or_default());
    set.get(&name)
        .and_then(|r| r.first_value())
        .is_some_and(truthy)
}

pub async fn build_category(
    ctx: &EngineContext,
    scope: &BuildScope,
    id: &str,
) -> EngineResult<Option<Category>> {
    let lang = scope.lang.as_str();
    let Some(record) =
        find_record_where(ctx, CollectionKind::Hierarchies, lang, id, vec![category_filter()])
            .await?
    else {
        return Ok(None);
    };

    let mut parents = vec![id.to_string()];
    parents.extend(record.hierarchy_ids());
    let text_ids = linked_ids(&record, None, &[AssignmentKind::Text]);
    // icons are attached to the node itself, never inherited
    let icon_ids = linked_ids_where(&record, None, &[AssignmentKind::Image], |o| {
        !o.is_resolved && !o.is_inherited
    });

    let resolver = AttributeResolver::new(ctx);
    let (attributes, texts, icon, secondary) = tokio::join!(
        resolver.resolve(&parents, lang, Some(ParentType::Hierarchy)),
        text_elements(ctx, lang, &text_ids, &[DESCRIPTION_CATEGORY]),
        category_icon(ctx, lang, &icon_ids, is_range(&record)),
        secondary_parents(ctx, lang, id),
    );
    let attributes = degrade("attributes", id, attributes)?;
    let texts = degrade("texts", id, texts)?;

    let hidden = hidden(&record, &attributes);
    let category = Category {
        id: id.to_string(),
        parent_id: record.parent_hierarchy.clone().unwrap_or_default(),
        old_external_ids: text_values(&attributes, &old_ids_attribute(&record)),
        name: record.name.clone().unwrap_or_default(),
        description: text_in_category(&texts, DESCRIPTION_CATEGORY, TextField::Markup),
        tagline: attributes.scalar_string(TAGLINE),
        sort: sort_order(&record),
        active: !hidden,
        hidden,
        approved: approved(&record, PRODUCTS_WORKFLOW, PRODUCT_APPROVED_STATES, None, Utc::now()),
        release_date: attributes
            .first_matching(&RELEASE_DATE)
            .and_then(|r| r.first_value())
            .and_then(value_text),
        kind: if record.planning_level.is_some() {
            TYPE_PRODUCT_RANGE
        } else {
            TYPE_CATEGORY
        }
        .to_string(),
        importance: record.importance.clone(),
        icon: degrade("icon", id, icon)?,
        attributes: attributes.upper_map(),
        secondary_parents: degrade("secondary_parents", id, secondary)?,
    };
    tracing::debug!(id, lang, kind = %category.kind, "Built category");
    Ok(Some(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryRelationalStore};
    use serde_json::json;
    use std::sync::Arc;

    fn ctx() -> EngineContext {
        let docs = MemoryDocumentStore::new()
            .with_documents(
                "systemair_ds_hierarchies_eng_glo",
                vec![
                    json!({"epimId": 40, "name": "Fans", "level": 2, "parentHierarchy": 4,
                           "importance": "high", "seqorderNr": 7, "hierarchies": [{"id": 4}],
                           "workflows": [{"workflow": "PRODUCTS_state", "stateName": "WfState_14"}],
                           "textAssignments": [{"objects": [{"epimId": 81}]}],
                           "imageAssignments": [{"objects": [
                               {"epimId": 91, "isResolved": true},
                               {"epimId": 92, "isResolved": false, "isInherited": false}
                           ]}]}),
                    json!({"epimId": 41, "name": "Duct fans", "planningLevel": "Product Range",
                           "level": "Range", "parentHierarchy": 40}),
                    json!({"epimId": 42, "name": "K fan", "planningLevel": "Product"}),
                ],
            )
            .with_documents(
                "systemair_ds_attributes_eng_glo",
                vec![
                    json!({"name": "is-hidden-level-2", "parentId": 40, "parentType": "hierarchy",
                           "attributeParentId": "h40", "values": [{"value": "0"}]}),
                    json!({"name": "ecom-old-matching-ids-level2", "parentId": 40, "parentType": "hierarchy",
                           "attributeParentId": "o40", "values": [{"value": 300}]}),
                    json!({"name": "Release-date-eu", "parentId": 4, "parentType": "hierarchy",
                           "attributeParentId": "r4", "values": [{"value": "2020-01-01"}]}),
                    json!({"name": "show-in-menu", "parentId": 40, "parentType": "hierarchy",
                           "datatype": "FLAG", "attributeParentId": "f40", "values": [{"value": "1"}]}),
                    json!({"name": "ecom-old-matching-ids-level-range", "parentId": 41, "parentType": "hierarchy",
                           "attributeParentId": "o41", "values": [{"value": "R-1"}]}),
                    json!({"name": "inactive", "parentId": 7, "values": [{"value": 0}]}),
                    json!({"name": "internal", "parentId": 7, "values": [{"value": 0}]}),
                ],
            )
            .with_documents(
                "systemair_ds_elements_eng_glo",
                vec![
                    json!({"epimId": 6, "parentElement": 81, "categories": [{"id": 6}], "xmlText": "<p>All fans</p>"}),
                    json!({"epimId": 7, "parentElement": 92, "categories": [{"id": 39}],
                           "dsElementPreviewFile": "fans-icon.svg"}),
                    json!({"epimId": 8, "parentElement": 91, "categories": [{"id": 39}],
                           "dsElementPreviewFile": "inherited.svg"}),
                ],
            );
        EngineContext::new(Arc::new(docs), Arc::new(MemoryRelationalStore::new()))
    }

    fn scope() -> BuildScope {
        BuildScope::new("eng_glo", "systemair", "MARKET-005")
    }

    #[tokio::test]
    async fn category_fields() {
        let category = build_category(&ctx(), &scope(), "40").await.unwrap().unwrap();
        assert_eq!(category.kind, TYPE_CATEGORY);
        assert_eq!(category.parent_id, "4");
        assert_eq!(category.old_external_ids, vec!["300"]);
        assert_eq!(category.description.as_deref(), Some("<p>All fans</p>"));
        assert_eq!(category.release_date.as_deref(), Some("2020-01-01"));
        assert_eq!(category.icon.as_deref(), Some("fans-icon.svg"));
        assert_eq!(category.importance.as_deref(), Some("high"));
        assert_eq!(category.sort, 7);
        assert!(!category.hidden && category.active && category.approved);
        assert_eq!(category.attributes.get("SHOW-IN-MENU"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn product_ranges_and_products() {
        let range = build_category(&ctx(), &scope(), "41").await.unwrap().unwrap();
        assert_eq!(range.kind, TYPE_PRODUCT_RANGE);
        assert_eq!(range.old_external_ids, vec!["R-1"]);
        assert!(!range.approved);

        // product nodes are not categories
        assert!(build_category(&ctx(), &scope(), "42").await.unwrap().is_none());
    }
}
