//! Call-to-action buttons
//!
//! A button is a pair of attributes sharing a `BTN-*` base name: `-LNK`
//! holds the target url, `-IMG` points at the icon element.

use futures::future::try_join_all;
use shared::models::Button;

use crate::context::EngineContext;
use crate::core::error::EngineResult;
use crate::records::{AttributeRecord, decode_all};
use crate::store::{CollectionKind, Filter, Query};

use super::images::image_by_id;

pub const BUTTON_PATTERN: &str = "BTN*";

/// Known buttons: base name -> (type, display name)
const BUTTON_MAP: &[(&str, &str, &str)] = &[(
    "BTN-ahu-compact-configurator",
    "AHU-COMPACT-CONFIGURATOR",
    "Kompaktlüftungsgeräte Configurator",
)];

/// `BTN-duct-fan-selector` -> `Duct Fan Selector`
fn title_case(base: &str) -> String {
    base.replace("BTN-", "")
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Type and display name of a button base
pub fn describe(base: &str) -> (String, String) {
    match BUTTON_MAP.iter().find(|(b, _, _)| *b == base) {
        Some((_, kind, name)) => (kind.to_string(), name.to_string()),
        None => (base.to_string(), title_case(base)),
    }
}

#[derive(Debug, Default)]
struct Draft<'a> {
    base: &'a str,
    url: Option<String>,
    icon_id: Option<&'a str>,
}

fn drafts(records: &[AttributeRecord]) -> Vec<Draft<'_>> {
    let mut out: Vec<Draft<'_>> = Vec::new();
    for record in records {
        let Some((base, suffix)) = record.name.rsplit_once('-') else {
            continue;
        };
        let Some(value) = record.first_value() else {
            continue;
        };
        let index = match out.iter().position(|d| d.base == base) {
            Some(i) => i,
            None => {
                out.push(Draft {
                    base,
                    ..Draft::default()
                });
                out.len() - 1
            }
        };
        match suffix.to_uppercase().as_str() {
            "LNK" => out[index].url = crate::attributes::value_text(value),
            "IMG" => out[index].icon_id = record.flag0_obje_id.as_deref(),
            _ => {}
        }
    }
    out
}

/// Buttons of the given objects; only buttons with both url and icon are kept
pub async fn buttons(ctx: &EngineContext, lang: &str, ids: &[String]) -> EngineResult<Vec<Button>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = Query::new()
        .filter(Filter::wildcard("name", BUTTON_PATTERN))
        .filter(Filter::terms("parentId", ids.iter().cloned()));
    let response = ctx.search(CollectionKind::Attributes, lang, &query).await?;
    let records: Vec<AttributeRecord> = decode_all(&response.hits);

    let candidates = drafts(&records);
    let resolved = try_join_all(candidates.iter().map(|draft| async move {
        let icon = match draft.icon_id {
            Some(id) => image_by_id(ctx, lang, id).await?,
            None => None,
        };
        Ok::<_, crate::core::error::EngineError>((draft, icon))
    }))
    .await?;

    Ok(resolved
        .into_iter()
        .filter_map(|(draft, icon)| {
            let url = draft.url.clone().filter(|u| !u.is_empty())?;
            let icon = icon?;
            let (kind, name) = describe(draft.base);
            Some(Button {
                name,
                kind,
                icon: Some(icon),
                url: Some(url),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryRelationalStore};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn unknown_buttons_are_title_cased() {
        assert_eq!(
            describe("BTN-duct-fan-selector"),
            ("BTN-duct-fan-selector".to_string(), "Duct Fan Selector".to_string())
        );
        assert_eq!(describe("BTN-ahu-compact-configurator").0, "AHU-COMPACT-CONFIGURATOR");
    }

    #[tokio::test]
    async fn buttons_need_url_and_icon() {
        let docs = MemoryDocumentStore::new()
            .with_documents(
                "systemair_ds_attributes_eng_glo",
                vec![
                    json!({"name": "BTN-ahu-compact-configurator-LNK", "parentId": 1,
                           "values": [{"value": "https://configurator.example"}]}),
                    json!({"name": "BTN-ahu-compact-configurator-IMG", "parentId": 1,
                           "flag0ObjeId": 900, "values": [{"value": 1}]}),
                    json!({"name": "BTN-duct-selector-LNK", "parentId": 1,
                           "values": [{"value": "https://selector.example"}]}),
                    json!({"name": "BTN-other-LNK", "parentId": 2,
                           "values": [{"value": "https://elsewhere.example"}]}),
                ],
            )
            .with_documents(
                "systemair_ds_elements_eng_glo",
                vec![json!({"epimId": 1, "parentElement": 900, "dsElementPreviewFile": "cfg.svg"})],
            );
        let ctx = EngineContext::new(Arc::new(docs), Arc::new(MemoryRelationalStore::new()));

        let buttons = buttons(&ctx, "eng_glo", &["1".to_string()]).await.unwrap();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].name, "Kompaktlüftungsgeräte Configurator");
        assert_eq!(buttons[0].icon.as_deref(), Some("cfg.svg"));
        assert_eq!(buttons[0].url.as_deref(), Some("https://configurator.example"));
    }
}
