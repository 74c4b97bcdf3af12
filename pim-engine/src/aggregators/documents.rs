//! Downloadable documents
//!
//! Documents are media elements in the document categories, linked through
//! any of the media assignment lists.

use shared::models::Document;

use crate::context::EngineContext;
use crate::core::error::EngineResult;
use crate::records::{AssignmentKind, ElementRecord, EntityRecord, decode_all};
use crate::store::{CollectionKind, Filter, Query};

use super::linked::linked_ids;

pub const DOCUMENT_CATEGORIES: [&str; 14] = [
    "19", "20", "22", "23", "24", "25", "26", "27", "28", "29", "31", "32", "70", "71",
];

pub const MEDIA_ASSIGNMENTS: [AssignmentKind; 5] = [
    AssignmentKind::Image,
    AssignmentKind::Document,
    AssignmentKind::Audio,
    AssignmentKind::Graphic,
    AssignmentKind::Video,
];

const DEFAULT_TYPE: &str = "document";
const UNKNOWN_MIME: &str = "application/octet-stream";

pub fn to_document(element: &ElementRecord) -> Document {
    let extension = element
        .phy_file_extension
        .as_deref()
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty());
    let kind = element
        .categories
        .last()
        .and_then(|c| c.category.clone())
        .unwrap_or_else(|| DEFAULT_TYPE.to_string());
    Document {
        kind,
        name: element.phy_file_name.clone(),
        url: element.ds_element_preview_file.clone(),
        mime: match &extension {
            Some(ext) => format!("application/{ext}"),
            None => UNKNOWN_MIME.to_string(),
        },
        viewable: extension.as_deref() == Some("pdf"),
    }
}

pub async fn documents(
    ctx: &EngineContext,
    lang: &str,
    local: &EntityRecord,
    reference: Option<&EntityRecord>,
) -> EngineResult<Vec<Document>> {
    let ids = linked_ids(local, reference, &MEDIA_ASSIGNMENTS);
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = Query::new()
        .filter(Filter::terms("parentElement", ids))
        .filter(Filter::nested(
            "categories",
            Filter::terms("categories.id", DOCUMENT_CATEGORIES),
        ));
    let response = ctx.search(CollectionKind::Elements, lang, &query).await?;
    Ok(decode_all::<ElementRecord>(&response.hits)
        .iter()
        .map(to_document)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryRelationalStore};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn mime_and_viewability_follow_extension() {
        let element: ElementRecord = serde_json::from_value(json!({
            "phyFileExtension": "PDF", "phyFileName": "manual.pdf",
            "dsElementPreviewFile": "https://cdn.example/manual.pdf",
            "categories": [{"id": 19, "category": "Document"}, {"id": 22, "category": "Manual"}]
        }))
        .unwrap();
        let doc = to_document(&element);
        assert_eq!(doc.mime, "application/pdf");
        assert!(doc.viewable);
        assert_eq!(doc.kind, "Manual");

        let bare = to_document(&ElementRecord::default());
        assert_eq!(bare.mime, UNKNOWN_MIME);
        assert_eq!(bare.kind, DEFAULT_TYPE);
        assert!(!bare.viewable);
    }

    #[tokio::test]
    async fn documents_come_from_every_media_list() {
        let docs = MemoryDocumentStore::new().with_documents(
            "systemair_ds_elements_eng_glo",
            vec![
                json!({"epimId": 1, "parentElement": 31, "phyFileExtension": "dwg",
                       "categories": [{"id": 24, "category": "CAD"}]}),
                json!({"epimId": 2, "parentElement": 32, "phyFileExtension": "pdf",
                       "categories": [{"id": 20, "category": "Datasheet"}]}),
                json!({"epimId": 3, "parentElement": 33, "phyFileExtension": "jpg",
                       "categories": [{"id": 119, "category": "Photo"}]}),
            ],
        );
        let ctx = EngineContext::new(Arc::new(docs), Arc::new(MemoryRelationalStore::new()));
        let sku: EntityRecord = serde_json::from_value(json!({
            "graphicAssignments": [{"objects": [{"epimId": 31}]}],
            "documentAssignments": [{"objects": [{"epimId": 32}]}],
            "imageAssignments": [{"objects": [{"epimId": 33}]}]
        }))
        .unwrap();
        let found = documents(&ctx, "eng_glo", &sku, None).await.unwrap();
        let kinds: Vec<_> = found.iter().map(|d| d.kind.as_str()).collect();
        assert_eq!(kinds, vec!["CAD", "Datasheet"]);
        assert_eq!(found[0].mime, "application/dwg");
    }
}
