//! Shop projection of a SKU

use chrono::Utc;
use shared::models::ShopSku;

use crate::aggregators::definitions::{TableSelector, ValueStyle, additional_attributes};
use crate::aggregators::images::shop_images;
use crate::aggregators::linked::linked_ids;
use crate::aggregators::price::market_price;
use crate::aggregators::relations::shop_relations;
use crate::aggregators::technical::shop_parameters;
use crate::aggregators::texts::{
    DESCRIPTION_CATEGORY, SPECIFICATION_CATEGORY, TextField, text_elements, text_in_category,
};
use crate::attributes::{AttributeResolver, ParentType};
use crate::context::{BuildScope, EngineContext, degrade};
use crate::core::error::EngineResult;
use crate::records::AssignmentKind;
use crate::store::CollectionKind;

use super::sku::{SkuFacts, default_operating_mode, vendor_number};
use super::{Base, degrade_optional, load_base};

pub async fn build_shop_sku(
    ctx: &EngineContext,
    scope: &BuildScope,
    id: &str,
) -> EngineResult<Option<ShopSku>> {
    let lang = scope.lang.as_str();
    let pair = match load_base(ctx, CollectionKind::Products, lang, id, Some(&scope.brand)).await? {
        Base::Missing => return Ok(None),
        Base::Deleted(record) => {
            return Ok(Some(ShopSku::deleted(
                id,
                record.parent_hierarchy.unwrap_or_default(),
                record.name.unwrap_or_default(),
            )));
        }
        Base::Found(pair) => pair,
    };
    let local = &pair.local;
    let reference = pair.reference();
    let identifiers = pair.identifiers(id);
    let text_ids = linked_ids(local, reference, &[AssignmentKind::Text]);
    let image_ids = linked_ids(local, reference, &[AssignmentKind::Image]);
    let table_ids = linked_ids(local, reference, &[AssignmentKind::ProductTable]);

    let resolver = AttributeResolver::new(ctx);
    let (attributes, texts, default_mode) = tokio::join!(
        resolver.resolve(&identifiers, lang, Some(ParentType::Product)),
        text_elements(ctx, lang, &text_ids, &[DESCRIPTION_CATEGORY, SPECIFICATION_CATEGORY]),
        default_operating_mode(ctx, lang, &pair),
    );
    let attributes = degrade("attributes", id, attributes)?;
    let texts = degrade("texts", id, texts)?;
    let default_mode = degrade("default_operating_mode", id, default_mode)?;

    let parameter_parents = pair.parents(default_mode.clone());
    let (price, shop_attributes, images, parameters, relations) = tokio::join!(
        market_price(ctx, vendor_number(&pair), &scope.market),
        additional_attributes(
            ctx,
            lang,
            &scope.market,
            TableSelector::Shop,
            &identifiers,
            None,
            ValueStyle::Localized,
        ),
        shop_images(ctx, lang, &image_ids),
        shop_parameters(ctx, scope, &table_ids, &parameter_parents),
        shop_relations(ctx, lang, &scope.market, local, reference),
    );

    let facts = SkuFacts::derive(&pair, &attributes, &scope.market, Utc::now());
    Ok(Some(ShopSku {
        id: id.to_string(),
        parent_id: local.parent_hierarchy.clone().unwrap_or_default(),
        vendor_id: facts.vendor_id,
        default_operating_mode_id: default_mode,
        name: facts.name,
        tagline: facts.tagline,
        active: facts.active,
        expired: facts.expired,
        approved: facts.approved,
        release_date: facts.release_date,
        description: text_in_category(&texts, DESCRIPTION_CATEGORY, TextField::Plain),
        specification_text: text_in_category(&texts, SPECIFICATION_CATEGORY, TextField::Plain),
        price: degrade_optional("price", id, price)?,
        images: degrade("shop_images", id, images)?,
        attributes: degrade("shop_attributes", id, shop_attributes)?,
        deleted: false,
        technical_parameters: degrade("technical_parameters", id, parameters)?,
        relations: degrade("shop_relations", id, relations)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::sku::tests::{docs, sql};
    use serde_json::json;
    use std::sync::Arc;

    fn ctx() -> EngineContext {
        let mut docs = docs();
        let elements = "systemair_ds_elements_eng_glo";
        let attributes = "systemair_ds_attributes_eng_glo";
        docs.insert(
            elements,
            json!({"epimId": 3, "parentElement": 90, "categories": [{"id": 125}],
                   "dsElementPreviewFile": "k125-shop.png"}),
        );
        for (name, parent, value) in [
            ("inactive", 3, json!(0)),
            ("internal", 3, json!(false)),
            ("market-005", 12, json!(1)),
            ("M3-ITEM-NAME", 12, json!("K 160 EC")),
        ] {
            docs.insert(
                attributes,
                json!({"name": name, "parentId": parent, "parentType": "product",
                       "attributeParentId": format!("{name}-{parent}"), "values": [{"value": value}]}),
            );
        }
        EngineContext::new(Arc::new(docs), Arc::new(sql()))
    }

    #[tokio::test]
    async fn shop_projection() {
        let scope = BuildScope::new("eng_glo", "systemair", "MARKET-005");
        let sku = build_shop_sku(&ctx(), &scope, "10").await.unwrap().unwrap();

        assert_eq!(sku.vendor_id, "P-11");
        assert_eq!(sku.name, "K 125 EC");
        assert_eq!(sku.default_operating_mode_id.as_deref(), Some("71"));
        assert_eq!(sku.description.as_deref(), Some("Compact duct fan"));
        assert_eq!(sku.images, vec!["k125-shop.png"]);
        assert!(sku.active && sku.approved && !sku.expired);
        assert!(sku.price.is_some_and(|p| !p.ondemand));

        assert_eq!(sku.relations.len(), 1);
        let relation = &sku.relations[0];
        assert_eq!(relation.id, "12");
        assert_eq!(relation.group.as_deref(), Some("Replacement"));
        assert_eq!(relation.name.as_deref(), Some("K 160 EC"));
    }

    #[tokio::test]
    async fn deleted_shop_sku() {
        let scope = BuildScope::new("eng_glo", "systemair", "MARKET-005");
        let sku = build_shop_sku(&ctx(), &scope, "20").await.unwrap().unwrap();
        assert!(sku.deleted);
        assert!(sku.relations.is_empty());
    }
}
