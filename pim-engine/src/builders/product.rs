//! Product builder (hierarchy nodes at planning level "Product")

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use shared::models::Product;

use crate::aggregators::images::product_images;
use crate::aggregators::linked::{linked_ids, linked_ids_where};
use crate::aggregators::sku_options::sku_options;
use crate::aggregators::status::{
    PRODUCT_APPROVED_STATES, PRODUCTS_WORKFLOW, approved, release_date,
};
use crate::aggregators::texts::{PRODUCT_DESCRIPTION_CATEGORY, TextField, text_elements, text_in_category};
use crate::attributes::{AttributeResolver, AttributeSet, ParentType, truthy, value_text};
use crate::context::{BuildScope, EngineContext, degrade};
use crate::core::error::EngineResult;
use crate::records::AssignmentKind;
use crate::store::CollectionKind;

use super::{Base, Pair, load_base, secondary_parents, sort_order};

pub const OLD_EXTERNAL_IDS: &str = "ecom-old-matching-ids-products";
pub const TAGLINE: &str = "M3-ITEM-DESCRIPTION";

static SHORT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^menu-title-level-").expect("valid short name pattern"));
static HIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^is-hidden-level-").expect("valid hidden pattern"));

/// Values of a multi-value attribute as text
pub(crate) fn text_values(set: &AttributeSet, name: &str) -> Vec<String> {
    set.multi(name).iter().filter_map(value_text).collect()
}

fn product_fields(
    id: &str,
    pair: &Pair,
    set: &AttributeSet,
    now: DateTime<Utc>,
) -> Product {
    let local = &pair.local;
    let name = local.name.clone().unwrap_or_default();
    let release = release_date(set);
    Product {
        id: id.to_string(),
        parent_id: local.parent_hierarchy.clone().unwrap_or_default(),
        old_external_ids: text_values(set, OLD_EXTERNAL_IDS),
        secondary_parents: Vec::new(),
        short_name: set
            .first_matching(&SHORT_NAME)
            .and_then(|r| r.first_value())
            .and_then(value_text)
            .unwrap_or_else(|| name.clone()),
        name,
        description: None,
        tagline: set.scalar_string(TAGLINE),
        sort: sort_order(local),
        active: pair.reference_id().is_some(),
        hidden: set
            .first_matching(&HIDDEN)
            .and_then(|r| r.first_value())
            .is_some_and(truthy),
        approved: approved(
            local,
            PRODUCTS_WORKFLOW,
            PRODUCT_APPROVED_STATES,
            release.as_deref(),
            now,
        ),
        release_date: release,
        importance: local.importance.clone(),
        deleted: false,
        images: Vec::new(),
        sku_options: Vec::new(),
        attributes: set.upper_map(),
    }
}

pub async fn build_product(
    ctx: &EngineContext,
    scope: &BuildScope,
    id: &str,
) -> EngineResult<Option<Product>> {
    let lang = scope.lang.as_str();
    let pair = match load_base(ctx, CollectionKind::Hierarchies, lang, id, None).await? {
        Base::Missing => return Ok(None),
        Base::Deleted(record) => {
            return Ok(Some(Product::deleted(
                id,
                record.parent_hierarchy.unwrap_or_default(),
                record.name.unwrap_or_default(),
            )));
        }
        Base::Found(pair) => pair,
    };
    let local = &pair.local;
    let reference = pair.reference();

    // the product first, then its reference, then the levels above it
    let mut parents = pair.identifiers(id);
    parents.extend(local.hierarchy_ids());
    let text_ids = linked_ids_where(local, reference, &[AssignmentKind::Text], |o| o.is_resolved);
    let image_ids = linked_ids(local, reference, &[AssignmentKind::Image]);
    let table_ids = linked_ids(local, reference, &[AssignmentKind::ProductTable]);
    let product_id = local.epim_id.clone().unwrap_or_else(|| id.to_string());

    let resolver = AttributeResolver::new(ctx);
    let (attributes, texts, images, options, secondary) = tokio::join!(
        resolver.resolve(&parents, lang, Some(ParentType::Hierarchy)),
        text_elements(ctx, lang, &text_ids, &[PRODUCT_DESCRIPTION_CATEGORY]),
        product_images(ctx, lang, &image_ids),
        sku_options(ctx, lang, &product_id, &table_ids),
        secondary_parents(ctx, lang, id),
    );
    let attributes = degrade("attributes", id, attributes)?;
    let texts = degrade("texts", id, texts)?;

    let mut product = product_fields(id, &pair, &attributes, Utc::now());
    product.description = text_in_category(&texts, PRODUCT_DESCRIPTION_CATEGORY, TextField::Plain);
    product.images = degrade("images", id, images)?;
    product.sku_options = degrade("sku_options", id, options)?;
    product.secondary_parents = degrade("secondary_parents", id, secondary)?;
    tracing::debug!(id, lang, "Built product");
    Ok(Some(product))
}
