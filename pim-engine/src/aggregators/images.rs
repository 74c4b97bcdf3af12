//! Image aggregation
//!
//! Images are media elements whose `parentElement` is one of the entity's
//! image assignment ids, narrowed by element category.

use std::collections::{HashMap, HashSet};

use crate::attributes::truthy;
use crate::context::EngineContext;
use crate::core::error::EngineResult;
use crate::records::{AttributeRecord, ElementRecord, decode_all};
use crate::store::{CollectionKind, Filter, Query};

/// Product photo categories in preference order
pub const SKU_IMAGE_CATEGORIES: [&str; 4] = ["125", "126", "120", "119"];
pub const PRODUCT_IMAGE_CATEGORY: &str = "119";
pub const SHOP_PREFERRED_CATEGORY: &str = "125";
pub const SHOP_FALLBACK_CATEGORY: &str = "119";
pub const RANGE_ICON_CATEGORY: &str = "121";
pub const CATEGORY_ICON_CATEGORY: &str = "39";

/// Which preview file of an element to surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    /// Data-store rendition
    Store,
    /// Physical preview file
    Physical,
}

impl Preview {
    fn of(self, element: &ElementRecord) -> Option<String> {
        match self {
            Preview::Store => element.ds_element_preview_file.clone(),
            Preview::Physical => element.phy_preview_file.clone(),
        }
        .filter(|f| !f.is_empty())
    }
}

fn category_filter(categories: &[&str]) -> Filter {
    Filter::nested(
        "categories",
        Filter::terms("categories.id", categories.iter().copied()),
    )
}

async fn elements_under(
    ctx: &EngineContext,
    lang: &str,
    parent_ids: &[String],
    categories: &[&str],
) -> EngineResult<Vec<ElementRecord>> {
    if parent_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut query = Query::new().filter(Filter::terms("parentElement", parent_ids.iter().cloned()));
    if !categories.is_empty() {
        query = query.filter(category_filter(categories));
    }
    let response = ctx.search(CollectionKind::Elements, lang, &query).await?;
    Ok(decode_all(&response.hits))
}

fn preference(element: &ElementRecord, categories: &[&str]) -> usize {
    categories
        .iter()
        .position(|c| element.in_category(c))
        .unwrap_or(categories.len())
}

/// Preview files of elements in `categories`, ordered by category preference
/// (stable within one category)
pub async fn images_in_categories(
    ctx: &EngineContext,
    lang: &str,
    parent_ids: &[String],
    categories: &[&str],
    preview: Preview,
) -> EngineResult<Vec<String>> {
    let mut elements = elements_under(ctx, lang, parent_ids, categories).await?;
    elements.sort_by_key(|e| preference(e, categories));
    Ok(elements.iter().filter_map(|e| preview.of(e)).collect())
}

pub async fn sku_images(ctx: &EngineContext, lang: &str, ids: &[String]) -> EngineResult<Vec<String>> {
    images_in_categories(ctx, lang, ids, &SKU_IMAGE_CATEGORIES, Preview::Store).await
}

pub async fn product_images(
    ctx: &EngineContext,
    lang: &str,
    ids: &[String],
) -> EngineResult<Vec<String>> {
    images_in_categories(ctx, lang, ids, &[PRODUCT_IMAGE_CATEGORY], Preview::Store).await
}

pub async fn operating_mode_images(
    ctx: &EngineContext,
    lang: &str,
    ids: &[String],
) -> EngineResult<Vec<String>> {
    images_in_categories(ctx, lang, ids, &SKU_IMAGE_CATEGORIES, Preview::Physical).await
}

/// Elements that are neither inactive nor internal.
///
/// An element counts as visible only when both flags are recorded and
/// both are false.
pub async fn visible_elements(
    ctx: &EngineContext,
    lang: &str,
    element_ids: &[String],
) -> EngineResult<HashSet<String>> {
    if element_ids.is_empty() {
        return Ok(HashSet::new());
    }
    let query = Query::new()
        .filter(Filter::terms("name", ["inactive", "internal"]))
        .filter(Filter::terms("parentId", element_ids.iter().cloned()));
    let hits = ctx.scroll(CollectionKind::Attributes, lang, &query).await?;

    // (inactive, internal); unseen flags default to hidden
    let mut flags: HashMap<String, (bool, bool)> = HashMap::new();
    for record in decode_all::<AttributeRecord>(&hits) {
        let Some(parent) = record.parent_id.clone() else {
            continue;
        };
        let set = record.first_value().is_some_and(truthy);
        let entry = flags.entry(parent).or_insert((true, true));
        match record.name.as_str() {
            "inactive" => entry.0 = set,
            "internal" => entry.1 = set,
            _ => {}
        }
    }
    Ok(flags
        .into_iter()
        .filter(|(_, (inactive, internal))| !inactive && !internal)
        .map(|(id, _)| id)
        .collect())
}

/// Shop image: the first visible preferred-category image alone, otherwise
/// every visible fallback-category image
pub async fn shop_images(ctx: &EngineContext, lang: &str, ids: &[String]) -> EngineResult<Vec<String>> {
    let elements = elements_under(
        ctx,
        lang,
        ids,
        &[SHOP_PREFERRED_CATEGORY, SHOP_FALLBACK_CATEGORY],
    )
    .await?;
    let element_ids: Vec<String> = elements.iter().filter_map(|e| e.epim_id.clone()).collect();
    let visible = visible_elements(ctx, lang, &element_ids).await?;

    let mut fallback = Vec::new();
    for element in &elements {
        let Some(file) = Preview::Store.of(element) else {
            continue;
        };
        if !element.epim_id.as_ref().is_some_and(|id| visible.contains(id)) {
            continue;
        }
        if element.in_category(SHOP_PREFERRED_CATEGORY) {
            return Ok(vec![file]);
        }
        if element.in_category(SHOP_FALLBACK_CATEGORY) {
            fallback.push(file);
        }
    }
    Ok(fallback)
}

/// First visible icon among `ids`; product ranges and categories use
/// different icon categories
pub async fn category_icon(
    ctx: &EngineContext,
    lang: &str,
    ids: &[String],
    is_range: bool,
) -> EngineResult<Option<String>> {
    let category = if is_range {
        RANGE_ICON_CATEGORY
    } else {
        CATEGORY_ICON_CATEGORY
    };
    let elements = elements_under(ctx, lang, ids, &[category]).await?;
    let element_ids: Vec<String> = elements.iter().filter_map(|e| e.epim_id.clone()).collect();
    let visible = visible_elements(ctx, lang, &element_ids).await?;
    Ok(elements
        .iter()
        .filter(|e| e.epim_id.as_ref().is_some_and(|id| visible.contains(id)))
        .find_map(|e| Preview::Store.of(e)))
}

/// Preview file of the first element under `id`
pub async fn image_by_id(ctx: &EngineContext, lang: &str, id: &str) -> EngineResult<Option<String>> {
    if id.is_empty() {
        return Ok(None);
    }
    let query = Query::new().filter(Filter::term("parentElement", id)).size(1);
    let response = ctx.search(CollectionKind::Elements, lang, &query).await?;
    Ok(decode_all::<ElementRecord>(&response.hits)
        .first()
        .and_then(|e| Preview::Store.of(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryRelationalStore};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn element(id: u64, parent: u64, category: u64, file: &str) -> Value {
        json!({"epimId": id, "parentElement": parent, "categories": [{"id": category}],
               "dsElementPreviewFile": file})
    }

    fn flag(parent: u64, name: &str, value: u64) -> Value {
        json!({"name": name, "parentId": parent, "values": [{"value": value}]})
    }

    fn ctx(docs: MemoryDocumentStore) -> EngineContext {
        EngineContext::new(Arc::new(docs), Arc::new(MemoryRelationalStore::new()))
    }

    #[tokio::test]
    async fn sku_images_follow_category_preference() {
        let docs = MemoryDocumentStore::new().with_documents(
            "systemair_ds_elements_eng_glo",
            vec![
                element(1, 100, 119, "a.jpg"),
                element(2, 100, 125, "b.jpg"),
                element(3, 100, 39, "icon.png"),
            ],
        );
        let images = sku_images(&ctx(docs), "eng_glo", &["100".into()]).await.unwrap();
        assert_eq!(images, vec!["b.jpg", "a.jpg"]);
    }

    #[tokio::test]
    async fn shop_prefers_a_visible_primary_image() {
        let docs = MemoryDocumentStore::new()
            .with_documents(
                "systemair_ds_elements_eng_glo",
                vec![
                    element(1, 100, 119, "fallback.jpg"),
                    element(2, 100, 125, "hidden.jpg"),
                    element(3, 100, 125, "primary.jpg"),
                ],
            )
            .with_documents(
                "systemair_ds_attributes_eng_glo",
                vec![
                    flag(1, "inactive", 0),
                    flag(1, "internal", 0),
                    flag(2, "inactive", 1),
                    flag(2, "internal", 0),
                    flag(3, "inactive", 0),
                    flag(3, "internal", 0),
                ],
            );
        let ctx = ctx(docs);
        assert_eq!(
            shop_images(&ctx, "eng_glo", &["100".into()]).await.unwrap(),
            vec!["primary.jpg"]
        );
    }

    #[tokio::test]
    async fn missing_flags_hide_an_element() {
        let docs = MemoryDocumentStore::new()
            .with_documents(
                "systemair_ds_elements_eng_glo",
                vec![element(1, 100, 119, "a.jpg"), element(2, 100, 119, "b.jpg")],
            )
            .with_documents(
                "systemair_ds_attributes_eng_glo",
                vec![flag(1, "inactive", 0), flag(2, "inactive", 0), flag(2, "internal", 0)],
            );
        let ctx = ctx(docs);
        assert_eq!(
            shop_images(&ctx, "eng_glo", &["100".into()]).await.unwrap(),
            vec!["b.jpg"]
        );
    }

    #[tokio::test]
    async fn icon_uses_level_specific_category() {
        let docs = MemoryDocumentStore::new()
            .with_documents(
                "systemair_ds_elements_eng_glo",
                vec![element(1, 100, 39, "cat.svg"), element(2, 100, 121, "range.svg")],
            )
            .with_documents(
                "systemair_ds_attributes_eng_glo",
                vec![
                    flag(1, "inactive", 0),
                    flag(1, "internal", 0),
                    flag(2, "inactive", 0),
                    flag(2, "internal", 0),
                ],
            );
        let ctx = ctx(docs);
        let ids = vec!["100".to_string()];
        assert_eq!(
            category_icon(&ctx, "eng_glo", &ids, true).await.unwrap().as_deref(),
            Some("range.svg")
        );
        assert_eq!(
            category_icon(&ctx, "eng_glo", &ids, false).await.unwrap().as_deref(),
            Some("cat.svg")
        );
    }
}
