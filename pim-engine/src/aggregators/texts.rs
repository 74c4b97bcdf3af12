//! Text elements linked through text assignments

use crate::context::EngineContext;
use crate::core::error::EngineResult;
use crate::records::{ElementRecord, decode_all};
use crate::store::{CollectionKind, Filter, Query};

pub const DESCRIPTION_CATEGORY: &str = "6";
pub const SPECIFICATION_CATEGORY: &str = "7";
pub const PRODUCT_DESCRIPTION_CATEGORY: &str = "138";

/// Which rendition of a text element to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Plain,
    Markup,
}

/// Text elements under `ids` tagged with any of `categories`
pub async fn text_elements(
    ctx: &EngineContext,
    lang: &str,
    ids: &[String],
    categories: &[&str],
) -> EngineResult<Vec<ElementRecord>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = Query::new()
        .filter(Filter::terms("parentElement", ids.iter().cloned()))
        .filter(Filter::nested(
            "categories",
            Filter::terms("categories.id", categories.iter().copied()),
        ));
    let response = ctx.search(CollectionKind::Elements, lang, &query).await?;
    Ok(decode_all(&response.hits))
}

/// First element of `category`, read as `field`
pub fn text_in_category(
    elements: &[ElementRecord],
    category: &str,
    field: TextField,
) -> Option<String> {
    let element = elements.iter().find(|e| e.in_category(category))?;
    match field {
        TextField::Plain => element.text.clone(),
        TextField::Markup => element.xml_text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_element_of_category_wins() {
        let elements: Vec<ElementRecord> = serde_json::from_value(json!([
            {"categories": [{"id": 7}], "text": "spec"},
            {"categories": [{"id": 6}], "text": "first", "xmlText": "<FT>first</FT>"},
            {"categories": [{"id": 6}], "text": "second"}
        ]))
        .unwrap();
        assert_eq!(
            text_in_category(&elements, DESCRIPTION_CATEGORY, TextField::Plain).as_deref(),
            Some("first")
        );
        assert_eq!(
            text_in_category(&elements, DESCRIPTION_CATEGORY, TextField::Markup).as_deref(),
            Some("<FT>first</FT>")
        );
        assert_eq!(
            text_in_category(&elements, PRODUCT_DESCRIPTION_CATEGORY, TextField::Plain),
            None
        );
    }
}
