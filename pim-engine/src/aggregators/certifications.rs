//! Certifications
//!
//! A dictionary table names every certification: its first row maps column
//! positions to labels, its second row maps certification attribute names
//! to column positions and fallback texts. Objects are certified by a
//! `*-CERT-*` attribute whose value is 1.

use std::collections::{HashMap, HashSet};

use futures::future::try_join_all;
use shared::models::Certification;

use crate::context::EngineContext;
use crate::core::error::EngineResult;
use crate::records::{AttributeRecord, ProductTableRecord, decode_all};
use crate::store::{CollectionKind, Filter, Query, SortOrder};

use super::images::image_by_id;

pub const DICTIONARY_TABLE: &str = "Certification_and_Compliance_Dictionary";
pub const CERT_PATTERN: &str = "*-CERT-*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationEntry {
    pub label: String,
    pub fallback_text: Option<String>,
    /// Column position in the dictionary
    pub seq: i64,
}

/// Attribute name -> dictionary entry
#[derive(Debug, Clone, Default)]
pub struct CertificationDictionary {
    entries: HashMap<String, CertificationEntry>,
}

impl CertificationDictionary {
    /// Two passes over the first table: labels by position, then
    /// attribute names by position. Names without a labelled column are
    /// ignored.
    pub fn parse(table: &ProductTableRecord) -> Self {
        let mut rows = table.table.first().map(|t| t.rows.iter()).into_iter().flatten();
        let (Some(header), Some(keys)) = (rows.next(), rows.next()) else {
            return Self::default();
        };

        let labels: HashMap<i64, String> = header
            .cells
            .iter()
            .filter_map(|cell| {
                let seq = cell.seqorder_nr?;
                let label = cell.label.first()?.content.clone().unwrap_or_default();
                Some((seq, label))
            })
            .collect();

        let mut entries = HashMap::new();
        for cell in &keys.cells {
            let Some(seq) = cell.seqorder_nr else {
                continue;
            };
            let Some(label) = labels.get(&seq) else {
                continue;
            };
            let Some(name) = cell.attribute.first().and_then(|a| a.name.clone()) else {
                continue;
            };
            entries.insert(
                name,
                CertificationEntry {
                    label: label.clone(),
                    fallback_text: cell.null_fallback_text.clone(),
                    seq,
                },
            );
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&CertificationEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub async fn load_dictionary(ctx: &EngineContext, lang: &str) -> EngineResult<CertificationDictionary> {
    let query = Query::new()
        .filter(Filter::term("name", DICTIONARY_TABLE))
        .size(1);
    let response = ctx.search(CollectionKind::ProductTables, lang, &query).await?;
    Ok(decode_all::<ProductTableRecord>(&response.hits)
        .first()
        .map(CertificationDictionary::parse)
        .unwrap_or_default())
}

fn certified() -> Vec<Filter> {
    vec![
        Filter::wildcard("name", CERT_PATTERN),
        Filter::nested("values", Filter::term("values.value", 1)),
    ]
}

async fn to_certifications(
    ctx: &EngineContext,
    lang: &str,
    dictionary: &CertificationDictionary,
    records: Vec<AttributeRecord>,
) -> EngineResult<Vec<(i64, Certification)>> {
    let mut seen = HashSet::new();
    let known: Vec<(AttributeRecord, &CertificationEntry)> = records
        .into_iter()
        .filter(|r| seen.insert(r.name.clone()))
        .filter_map(|r| {
            let entry = dictionary.get(&r.name);
            if entry.is_none() {
                tracing::debug!(name = %r.name, "Certification missing from dictionary");
            }
            entry.map(|e| (r, e))
        })
        .collect();

    try_join_all(known.into_iter().map(|(record, entry)| async move {
        let image = match &record.flag1_obje_id {
            Some(id) => image_by_id(ctx, lang, id).await?,
            None => None,
        };
        let certification = Certification {
            id: record.attribute_id.clone().unwrap_or_default(),
            name: record.name,
            label: entry.label.clone(),
            image,
            text: entry.fallback_text.clone(),
        };
        Ok::<_, crate::core::error::EngineError>((entry.seq, certification))
    }))
    .await
}

/// Certifications of the given objects, in dictionary order
pub async fn object_certifications(
    ctx: &EngineContext,
    lang: &str,
    ids: &[String],
) -> EngineResult<Vec<Certification>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let dictionary = load_dictionary(ctx, lang).await?;
    if dictionary.is_empty() {
        return Ok(Vec::new());
    }
    let mut query = Query::new().filter(Filter::terms("parentId", ids.iter().cloned()));
    query.filters.extend(certified());
    let response = ctx.search(CollectionKind::Attributes, lang, &query).await?;

    let mut records: Vec<AttributeRecord> = decode_all(&response.hits);
    // the object's own flags before its reference's
    records.sort_by_key(|r| {
        r.parent_id
            .as_ref()
            .and_then(|p| ids.iter().position(|id| id == p))
            .unwrap_or(usize::MAX)
    });

    let mut certifications = to_certifications(ctx, lang, &dictionary, records).await?;
    certifications.sort_by_key(|(seq, _)| *seq);
    Ok(certifications.into_iter().map(|(_, c)| c).collect())
}

/// Every certification flagged on any object, one per attribute id, by
/// attribute id
pub async fn all_certifications(ctx: &EngineContext, lang: &str) -> EngineResult<Vec<Certification>> {
    let dictionary = load_dictionary(ctx, lang).await?;
    let mut query = Query::new()
        .filter(Filter::exists("flag1ObjeId"))
        .collapse("attributeId")
        .sort("attributeId", SortOrder::Asc);
    query.filters.extend(certified());
    let response = ctx.search(CollectionKind::Attributes, lang, &query).await?;

    let records: Vec<AttributeRecord> = decode_all(&response.hits);
    let certifications = to_certifications(ctx, lang, &dictionary, records).await?;
    Ok(certifications.into_iter().map(|(_, c)| c).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryRelationalStore};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn dictionary_doc() -> Value {
        json!({
            "epimId": 900,
            "name": DICTIONARY_TABLE,
            "table": [{"rows": [
                {"cells": [
                    {"seqorderNr": 1, "label": [{"content": "CE marking"}]},
                    {"seqorderNr": 2, "label": [{"content": "Eurovent"}]},
                    {"label": [{"content": "unnumbered"}]}
                ]},
                {"cells": [
                    {"seqorderNr": 2, "attribute": [{"name": "SYS-CERT-EUROVENT"}], "nullFallbackText": "Certified"},
                    {"seqorderNr": 1, "attribute": [{"name": "SYS-CERT-CE"}]},
                    {"seqorderNr": 5, "attribute": [{"name": "SYS-CERT-ORPHAN"}]}
                ]}
            ]}]
        })
    }

    fn flag(id: u64, name: &str, parent: &str, attribute_id: u64, image: u64, value: u64) -> Value {
        json!({"epimId": id, "name": name, "parentId": parent, "attributeId": attribute_id,
               "flag1ObjeId": image, "values": [{"value": value}]})
    }

    fn ctx() -> EngineContext {
        let docs = MemoryDocumentStore::new()
            .with_documents("systemair_ds_producttables_eng_glo", vec![dictionary_doc()])
            .with_documents(
                "systemair_ds_attributes_eng_glo",
                vec![
                    flag(1, "SYS-CERT-EUROVENT", "10", 402, 77, 1),
                    flag(2, "SYS-CERT-CE", "10", 401, 78, 1),
                    flag(3, "SYS-CERT-CE", "11", 401, 78, 1),
                    flag(4, "SYS-CERT-ORPHAN", "10", 403, 79, 1),
                    flag(5, "SYS-CERT-UL", "12", 404, 80, 0),
                ],
            )
            .with_documents(
                "systemair_ds_elements_eng_glo",
                vec![json!({"epimId": 5, "parentElement": 77, "dsElementPreviewFile": "eurovent.png"})],
            );
        EngineContext::new(Arc::new(docs), Arc::new(MemoryRelationalStore::new()))
    }

    #[test]
    fn dictionary_joins_labels_by_position() {
        let table: ProductTableRecord = serde_json::from_value(dictionary_doc()).unwrap();
        let dictionary = CertificationDictionary::parse(&table);
        assert_eq!(dictionary.len(), 2);
        let eurovent = dictionary.get("SYS-CERT-EUROVENT").unwrap();
        assert_eq!(eurovent.label, "Eurovent");
        assert_eq!(eurovent.fallback_text.as_deref(), Some("Certified"));
        assert!(dictionary.get("SYS-CERT-ORPHAN").is_none());
    }

    #[tokio::test]
    async fn object_certifications_follow_dictionary_order() {
        let certs = object_certifications(&ctx(), "eng_glo", &["10".into(), "11".into()])
            .await
            .unwrap();
        let names: Vec<_> = certs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["SYS-CERT-CE", "SYS-CERT-EUROVENT"]);
        assert_eq!(certs[1].image.as_deref(), Some("eurovent.png"));
        assert_eq!(certs[0].image, None);
        assert_eq!(certs[0].id, "401");
    }

    #[tokio::test]
    async fn all_certifications_collapse_by_attribute() {
        let certs = all_certifications(&ctx(), "eng_glo").await.unwrap();
        let ids: Vec<_> = certs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["401", "402"]);
    }
}
