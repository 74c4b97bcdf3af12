//! Operating-mode builder (variants collection)
//!
//! Unlike SKUs, a deleted operating mode is still built in full. Its
//! description is rich text and malformed markup fails the build.

use chrono::Utc;
use shared::models::OperatingMode;

use crate::aggregators::buttons::buttons;
use crate::aggregators::certifications::object_certifications;
use crate::aggregators::definitions::{TableSelector, ValueStyle, additional_attributes};
use crate::aggregators::images::operating_mode_images;
use crate::aggregators::linked::linked_ids;
use crate::aggregators::price::market_price;
use crate::aggregators::relations::ITEM_NAME;
use crate::aggregators::rich_text::parse_optional;
use crate::aggregators::status::{
    OPERATING_MODE_APPROVED_STATES, SKU_WORKFLOW, approved, operating_mode_expired_flag,
    release_date,
};
use crate::aggregators::technical::{operating_mode_tables, wiring_section};
use crate::aggregators::texts::{
    DESCRIPTION_CATEGORY, SPECIFICATION_CATEGORY, TextField, text_elements, text_in_category,
};
use crate::attributes::{AttributeResolver, ParentType};
use crate::context::{BuildScope, EngineContext, degrade};
use crate::core::error::EngineResult;
use crate::records::AssignmentKind;
use crate::store::CollectionKind;

use super::product::TAGLINE;
use super::sku::{BIM_ENABLED, DEFAULT_VARIANT, selection_tool};
use super::{degrade_optional, load_pair, sort_order};

/// ERP item number of an operating mode
pub const VENDOR_ATTRIBUTE: &str = "M3-item-name";

pub async fn build_operating_mode(
    ctx: &EngineContext,
    scope: &BuildScope,
    id: &str,
) -> EngineResult<Option<OperatingMode>> {
    let lang = scope.lang.as_str();
    let Some(pair) = load_pair(ctx, CollectionKind::Variants, lang, id).await? else {
        return Ok(None);
    };
    let brand_code = scope.brand_code(ctx)?;
    let local = &pair.local;
    let reference = pair.reference();
    let identifiers = pair.identifiers(id);
    let text_ids = linked_ids(local, reference, &[AssignmentKind::Text]);
    let image_ids = linked_ids(local, reference, &[AssignmentKind::Image]);
    let table_ids = linked_ids(local, reference, &[AssignmentKind::ProductTable]);

    let resolver = AttributeResolver::new(ctx);
    let (attributes, texts, price, certifications, extra, wiring, tables, images, buttons) = tokio::join!(
        resolver.resolve(&identifiers, lang, Some(ParentType::Variant)),
        text_elements(ctx, lang, &text_ids, &[DESCRIPTION_CATEGORY, SPECIFICATION_CATEGORY]),
        market_price(ctx, local.product_nr.as_deref(), &scope.market),
        object_certifications(ctx, lang, &identifiers),
        additional_attributes(
            ctx,
            lang,
            &scope.market,
            TableSelector::Attributes { ids: &table_ids, brand_code },
            &identifiers,
            Some(ParentType::Variant),
            ValueStyle::Raw,
        ),
        wiring_section(ctx, lang, &text_ids, &image_ids),
        operating_mode_tables(ctx, scope, &table_ids, &identifiers),
        operating_mode_images(ctx, lang, &image_ids),
        buttons(ctx, lang, &identifiers),
    );
    let attributes = degrade("attributes", id, attributes)?;
    let texts = degrade("texts", id, texts)?;
    let description = parse_optional(
        text_in_category(&texts, DESCRIPTION_CATEGORY, TextField::Markup).as_deref(),
    )?;

    let mut sections: Vec<_> = degrade_optional("wiring_section", id, wiring)?
        .into_iter()
        .collect();
    sections.extend(degrade("technical_tables", id, tables)?);

    let release = release_date(&attributes);
    let mode = OperatingMode {
        id: id.to_string(),
        parent_id: local.parent_hierarchy.clone().unwrap_or_default(),
        vendor_id: attributes.scalar_string(VENDOR_ATTRIBUTE),
        name: attributes
            .scalar_string(ITEM_NAME)
            .or_else(|| local.name.clone())
            .unwrap_or_default(),
        short_name: local.name.clone(),
        description,
        specification_text: text_in_category(&texts, SPECIFICATION_CATEGORY, TextField::Plain),
        tagline: attributes.scalar_string(TAGLINE),
        active: pair.reference_id().is_some(),
        expired: attributes.flag(&operating_mode_expired_flag(&scope.market)),
        approved: approved(
            local,
            SKU_WORKFLOW,
            OPERATING_MODE_APPROVED_STATES,
            None,
            Utc::now(),
        ),
        release_date: release,
        selection_tool: selection_tool(&attributes, &scope.brand),
        design_tool: local.design_tool,
        magicad_bim: attributes.flag(BIM_ENABLED),
        sort: sort_order(local),
        price: degrade_optional("price", id, price)?,
        default: attributes.flag(DEFAULT_VARIANT),
        certifications: degrade("certifications", id, certifications)?,
        images: degrade("images", id, images)?,
        attributes: degrade("additional_attributes", id, extra)?,
        buttons: degrade("buttons", id, buttons)?,
        sections,
        sku_id: local.parent_id.clone().unwrap_or_default(),
    };
    tracing::debug!(id, lang, "Built operating mode");
    Ok(Some(mode))
}
