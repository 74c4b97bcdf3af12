//! Raw catalog records
//!
//! Typed views of the documents stored in the catalog collections. Every
//! field is optional on the wire; identifiers arrive as numbers or strings
//! and are normalized to strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::core::error::EngineError;
use crate::store::Hit;

/// Identifier as a string; numbers are stringified, null and "" are `None`
pub fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| id_string(&v)))
}

pub(crate) fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.to_string(),
        }),
        _ => None,
    }
}

fn ids<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(id_string).collect(),
        Some(other) => id_string(&other).into_iter().collect(),
        None => Vec::new(),
    })
}

/// `null` decodes as an empty list
fn nullable<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer from a number or numeric string
fn opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.is_some_and(|v| crate::attributes::truthy(&v)))
}

/// Decode a hit into a record, naming the collection on failure
pub fn decode<T: for<'de> Deserialize<'de>>(hit: &Hit) -> Result<T, EngineError> {
    hit.source_as::<T>()
        .map_err(|e| EngineError::record(&hit.index, format!("{} ({})", e, hit.id)))
}

/// Decode every hit, skipping malformed ones with a warning
pub fn decode_all<T: for<'de> Deserialize<'de>>(hits: &[Hit]) -> Vec<T> {
    hits.iter()
        .filter_map(|hit| match decode::<T>(hit) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed record");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Workflow {
    pub workflow: Option<String>,
    pub state_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HierarchyLink {
    #[serde(deserialize_with = "opt_id")]
    pub id: Option<String>,
    pub hierarchy: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignedObject {
    #[serde(deserialize_with = "opt_id")]
    pub epim_id: Option<String>,
    pub object_type: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub object_id: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_resolved: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_inherited: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Assignment {
    pub assignment_type: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub objects: Vec<AssignedObject>,
}

/// Assignment list families of an entity record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentKind {
    Image,
    Text,
    Document,
    Relation,
    ProductTable,
    Variant,
    Audio,
    Graphic,
    Video,
}

/// Product, SKU, category or operating-mode record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityRecord {
    #[serde(deserialize_with = "opt_id")]
    pub epim_id: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub reference_id: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub parent_hierarchy: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub parent_id: Option<String>,
    pub planning_level: Option<String>,
    pub level: Option<Value>,
    pub name: Option<String>,
    #[serde(deserialize_with = "opt_i64")]
    pub seqorder_nr: Option<i64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub deleted: bool,
    #[serde(deserialize_with = "opt_id")]
    pub product_nr: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub design_tool: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub default: bool,
    #[serde(deserialize_with = "opt_id")]
    pub sku_id: Option<String>,
    /// Identifier used by relation assignments pointing at this record
    #[serde(deserialize_with = "opt_id")]
    pub object_id: Option<String>,
    pub group: Option<Value>,
    pub priority: Option<Value>,
    #[serde(deserialize_with = "opt_id")]
    pub importance: Option<String>,
    #[serde(deserialize_with = "ids")]
    pub markets: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub workflows: Vec<Workflow>,
    #[serde(deserialize_with = "nullable")]
    pub hierarchies: Vec<HierarchyLink>,
    #[serde(deserialize_with = "nullable")]
    pub image_assignments: Vec<Assignment>,
    #[serde(deserialize_with = "nullable")]
    pub text_assignments: Vec<Assignment>,
    #[serde(deserialize_with = "nullable")]
    pub document_assignments: Vec<Assignment>,
    #[serde(deserialize_with = "nullable")]
    pub relation_assignments: Vec<Assignment>,
    #[serde(deserialize_with = "nullable")]
    pub product_table_assignments: Vec<Assignment>,
    #[serde(deserialize_with = "nullable")]
    pub variant_assignments: Vec<Assignment>,
    #[serde(deserialize_with = "nullable")]
    pub audio_assignments: Vec<Assignment>,
    #[serde(deserialize_with = "nullable")]
    pub graphic_assignments: Vec<Assignment>,
    #[serde(deserialize_with = "nullable")]
    pub video_assignments: Vec<Assignment>,
}

impl EntityRecord {
    pub fn assignments(&self, kind: AssignmentKind) -> &[Assignment] {
        match kind {
            AssignmentKind::Image => &self.image_assignments,
            AssignmentKind::Text => &self.text_assignments,
            AssignmentKind::Document => &self.document_assignments,
            AssignmentKind::Relation => &self.relation_assignments,
            AssignmentKind::ProductTable => &self.product_table_assignments,
            AssignmentKind::Variant => &self.variant_assignments,
            AssignmentKind::Audio => &self.audio_assignments,
            AssignmentKind::Graphic => &self.graphic_assignments,
            AssignmentKind::Video => &self.video_assignments,
        }
    }

    /// State name of the named workflow
    pub fn workflow_state(&self, workflow: &str) -> Option<&str> {
        self.workflows
            .iter()
            .find(|w| w.workflow.as_deref() == Some(workflow))
            .and_then(|w| w.state_name.as_deref())
    }

    pub fn hierarchy_ids(&self) -> Vec<String> {
        self.hierarchies.iter().filter_map(|h| h.id.clone()).collect()
    }

    /// `level` as text ("3", "Range")
    pub fn level_text(&self) -> Option<String> {
        self.level.as_ref().and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnitName {
    pub lang_iso: Option<String>,
    pub unit_short_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttributeValue {
    pub value: Value,
    pub unit: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub dict_id: Option<String>,
    #[serde(deserialize_with = "opt_i64")]
    pub seqorder_nr: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub unit_list: Vec<UnitName>,
}

/// One attribute of one parent object in one language
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttributeRecord {
    pub name: String,
    #[serde(deserialize_with = "opt_id")]
    pub parent_id: Option<String>,
    pub parent_type: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub attribute_id: Option<String>,
    pub datatype: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub values: Vec<AttributeValue>,
    #[serde(rename = "flag0ObjeId", deserialize_with = "opt_id")]
    pub flag0_obje_id: Option<String>,
    #[serde(rename = "flag1ObjeId", deserialize_with = "opt_id")]
    pub flag1_obje_id: Option<String>,
    pub lang_iso: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ElementCategory {
    #[serde(deserialize_with = "opt_id")]
    pub id: Option<String>,
    pub category: Option<String>,
}

/// Media or text element
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementRecord {
    #[serde(deserialize_with = "opt_id")]
    pub epim_id: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub parent_element: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub categories: Vec<ElementCategory>,
    pub ds_element_preview_file: Option<String>,
    pub phy_preview_file: Option<String>,
    pub text: Option<String>,
    pub xml_text: Option<String>,
    pub phy_file_name: Option<String>,
    pub phy_file_extension: Option<String>,
}

impl ElementRecord {
    pub fn category_ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().filter_map(|c| c.id.as_deref())
    }

    pub fn in_category(&self, id: &str) -> bool {
        self.category_ids().any(|c| c == id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellLabel {
    pub content: Option<String>,
    pub dict_shortcut: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CellAttribute {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableCellRecord {
    #[serde(deserialize_with = "opt_i64")]
    pub seqorder_nr: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub label: Vec<CellLabel>,
    #[serde(deserialize_with = "nullable")]
    pub attribute: Vec<CellAttribute>,
    pub null_fallback_text: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub null_fallback_text_dict_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableRowRecord {
    #[serde(deserialize_with = "nullable")]
    pub cells: Vec<TableCellRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableBody {
    #[serde(deserialize_with = "nullable")]
    pub rows: Vec<TableRowRecord>,
}

/// Product table definition document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductTableRecord {
    #[serde(deserialize_with = "opt_id")]
    pub epim_id: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub categories: Vec<ElementCategory>,
    #[serde(deserialize_with = "nullable")]
    pub table: Vec<TableBody>,
}

impl ProductTableRecord {
    pub fn rows(&self) -> impl Iterator<Item = &TableRowRecord> {
        self.table.iter().flat_map(|t| t.rows.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entity_record_tolerates_sparse_documents() {
        let record: EntityRecord = serde_json::from_value(json!({
            "epimId": 1001,
            "referenceId": "",
            "parentHierarchy": "55",
            "workflows": [{"workflow": "SKU_STATE", "stateName": "WfState_42"}],
            "imageAssignments": null,
            "deleted": "false",
            "hierarchies": [{"id": 9, "hierarchy": "SYS Fans"}]
        }))
        .unwrap();
        assert_eq!(record.epim_id.as_deref(), Some("1001"));
        assert_eq!(record.reference_id, None);
        assert!(!record.deleted);
        assert!(record.image_assignments.is_empty());
        assert_eq!(record.workflow_state("SKU_STATE"), Some("WfState_42"));
        assert_eq!(record.hierarchy_ids(), vec!["9"]);
    }

    #[test]
    fn wrong_shapes_are_rejected() {
        let hit = Hit {
            index: "systemair_ds_products_eng_glo".into(),
            id: "7".into(),
            source: json!({"epimId": 7, "hierarchies": "oops"}),
        };
        let err = decode::<EntityRecord>(&hit).unwrap_err();
        assert!(matches!(err, EngineError::Record { ref collection, .. } if collection == "systemair_ds_products_eng_glo"));
    }

    #[test]
    fn attribute_record_reads_flag_object_ids() {
        let record: AttributeRecord = serde_json::from_value(json!({
            "name": "SYS-CERT-CE",
            "parentId": 12,
            "attributeId": 400,
            "flag1ObjeId": 77,
            "values": [{"value": 1, "seqorderNr": "3", "unitList": null}]
        }))
        .unwrap();
        assert_eq!(record.flag1_obje_id.as_deref(), Some("77"));
        assert_eq!(record.values[0].seqorder_nr, Some(3));
        assert_eq!(record.parent_id.as_deref(), Some("12"));
    }
}
