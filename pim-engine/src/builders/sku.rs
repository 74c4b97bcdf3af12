//! SKU builder
//!
//! SKUs live in the products collection under a brand hierarchy. The
//! derivations shared with the shop projection sit in [`SkuFacts`].

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use shared::models::Sku;

use crate::aggregators::buttons::buttons;
use crate::aggregators::certifications::object_certifications;
use crate::aggregators::definitions::{TableSelector, ValueStyle, additional_attributes};
use crate::aggregators::images::sku_images;
use crate::aggregators::linked::linked_ids;
use crate::aggregators::price::market_price;
use crate::aggregators::relations::{ITEM_NAME, successor_ids};
use crate::aggregators::status::{
    SKU_APPROVED_STATES, SKU_WORKFLOW, approved, release_date, sku_active, sku_expired,
};
use crate::aggregators::technical::sku_sections;
use crate::aggregators::texts::{
    DESCRIPTION_CATEGORY, SPECIFICATION_CATEGORY, TextField, text_elements, text_in_category,
};
use crate::attributes::{AttributeResolver, AttributeSet, ParentType, truthy, value_text};
use crate::context::{BuildScope, EngineContext, degrade};
use crate::core::error::EngineResult;
use crate::records::AssignmentKind;
use crate::store::{CollectionKind, Filter};

use super::product::TAGLINE;
use super::{Base, Pair, degrade_optional, load_base, selector_pattern, sort_order};

pub const BIM_ENABLED: &str = "BIM-enabled";
pub const DEFAULT_VARIANT: &str = "default-variant";

static SHORT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^M3-ITEM-NAME").expect("valid short name pattern"));

/// Product number used for pricing and as vendor id: the reference's first
pub(crate) fn vendor_number(pair: &Pair) -> Option<&str> {
    pair.reference()
        .and_then(|r| r.product_nr.as_deref())
        .or(pair.local.product_nr.as_deref())
}

/// Operating mode flagged `default-variant` among the SKU's variants
pub(crate) async fn default_operating_mode(
    ctx: &EngineContext,
    lang: &str,
    pair: &Pair,
) -> EngineResult<Option<String>> {
    let variant_ids = linked_ids(&pair.local, pair.reference(), &[AssignmentKind::Variant]);
    if variant_ids.is_empty() {
        return Ok(None);
    }
    let filters = vec![
        Filter::term("parentType", ParentType::Variant.as_str()),
        Filter::term("name", DEFAULT_VARIANT),
        Filter::nested("values", Filter::term("values.value", 1)),
    ];
    let set = AttributeResolver::new(ctx)
        .resolve_with(&variant_ids, lang, filters)
        .await?;
    Ok(set.records().first().and_then(|r| r.parent_id.clone()))
}

/// Selector-tool flag of `brand`
pub(crate) fn selection_tool(set: &AttributeSet, brand: &str) -> bool {
    selector_pattern(brand)
        .and_then(|pattern| set.first_matching(&pattern).and_then(|r| r.first_value()).cloned())
        .is_some_and(|v| truthy(&v))
}

/// Derivations common to the SKU and its shop projection
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SkuFacts {
    pub vendor_id: String,
    pub name: String,
    pub tagline: Option<String>,
    pub active: bool,
    pub expired: bool,
    pub approved: bool,
    pub release_date: Option<String>,
}

impl SkuFacts {
    pub fn derive(pair: &Pair, set: &AttributeSet, market: &str, now: DateTime<Utc>) -> Self {
        let release = release_date(set);
        Self {
            vendor_id: vendor_number(pair).unwrap_or_default().to_string(),
            name: set
                .scalar_string(ITEM_NAME)
                .or_else(|| pair.local.name.clone())
                .unwrap_or_default(),
            tagline: set.scalar_string(TAGLINE),
            active: sku_active(set, market, pair.reference_id().is_some()),
            expired: sku_expired(set, market),
            approved: approved(
                &pair.local,
                SKU_WORKFLOW,
                SKU_APPROVED_STATES,
                release.as_deref(),
                now,
            ),
            release_date: release,
        }
    }
}

pub async fn build_sku(
    ctx: &EngineContext,
    scope: &BuildScope,
    id: &str,
) -> EngineResult<Option<Sku>> {
    let lang = scope.lang.as_str();
    let pair = match load_base(ctx, CollectionKind::Products, lang, id, Some(&scope.brand)).await? {
        Base::Missing => return Ok(None),
        Base::Deleted(record) => {
            return Ok(Some(Sku::deleted(
                id,
                record.parent_hierarchy.unwrap_or_default(),
                record.name.unwrap_or_default(),
            )));
        }
        Base::Found(pair) => pair,
    };
    let brand_code = scope.brand_code(ctx)?;
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

    // technical values may sit on the default operating mode too
    let section_parents = pair.parents(default_mode.clone());
    let (price, certifications, extra, sections, images, buttons, successors) = tokio::join!(
        market_price(ctx, vendor_number(&pair), &scope.market),
        object_certifications(ctx, lang, &identifiers),
        additional_attributes(
            ctx,
            lang,
            &scope.market,
            TableSelector::Attributes { ids: &table_ids, brand_code },
            &identifiers,
            None,
            ValueStyle::Localized,
        ),
        sku_sections(ctx, scope, &table_ids, &section_parents),
        sku_images(ctx, lang, &image_ids),
        buttons(ctx, lang, &identifiers),
        successor_ids(ctx, lang, local, reference),
    );

    let facts = SkuFacts::derive(&pair, &attributes, &scope.market, Utc::now());
    let sku = Sku {
        id: id.to_string(),
        parent_id: local.parent_hierarchy.clone().unwrap_or_default(),
        vendor_id: facts.vendor_id,
        maintenance_id: pair.reference_id().map(str::to_string),
        default_operating_mode_id: default_mode,
        successors_ids: degrade("successors", id, successors)?,
        short_name: attributes
            .first_matching(&SHORT_NAME)
            .and_then(|r| r.first_value())
            .and_then(value_text)
            .or_else(|| local.name.clone()),
        name: facts.name,
        description: text_in_category(&texts, DESCRIPTION_CATEGORY, TextField::Markup),
        specification_text: text_in_category(&texts, SPECIFICATION_CATEGORY, TextField::Markup),
        tagline: facts.tagline,
        active: facts.active,
        expired: facts.expired,
        approved: facts.approved,
        deleted: false,
        release_date: facts.release_date,
        selection_tool: selection_tool(&attributes, &scope.brand),
        design_tool: local.design_tool,
        magicad_bim: attributes.flag(BIM_ENABLED),
        sort: sort_order(local),
        price: degrade_optional("price", id, price)?,
        default: local.default,
        certifications: degrade("certifications", id, certifications)?,
        images: degrade("images", id, images)?,
        attributes: degrade("additional_attributes", id, extra)?,
        buttons: degrade("buttons", id, buttons)?,
        sections: degrade("sections", id, sections)?,
    };
    tracing::debug!(id, lang, market = %scope.market, "Built SKU");
    Ok(Some(sku))
}
