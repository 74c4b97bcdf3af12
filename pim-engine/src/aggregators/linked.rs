//! Linked-object resolution
//!
//! Entities reference images, texts, tables and related objects through
//! assignment lists. Identifiers are always flattened reference-first, then
//! local, without duplicates.

use std::collections::HashSet;

use crate::context::EngineContext;
use crate::core::error::EngineResult;
use crate::records::{AssignedObject, AssignmentKind, EntityRecord, decode_all};
use crate::store::{CollectionKind, Filter, Query};

fn push_unique(out: &mut Vec<String>, seen: &mut HashSet<String>, id: Option<&String>) {
    if let Some(id) = id
        && seen.insert(id.clone())
    {
        out.push(id.clone());
    }
}

fn records<'a>(
    local: &'a EntityRecord,
    reference: Option<&'a EntityRecord>,
) -> impl Iterator<Item = &'a EntityRecord> {
    reference.into_iter().chain(std::iter::once(local))
}

/// Object ids of the given assignment lists, optionally restricted
pub fn linked_ids_where(
    local: &EntityRecord,
    reference: Option<&EntityRecord>,
    kinds: &[AssignmentKind],
    keep: impl Fn(&AssignedObject) -> bool,
) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for record in records(local, reference) {
        for kind in kinds {
            for assignment in record.assignments(*kind) {
                for object in assignment.objects.iter().filter(|o| keep(o)) {
                    push_unique(&mut out, &mut seen, object.epim_id.as_ref());
                }
            }
        }
    }
    out
}

pub fn linked_ids(
    local: &EntityRecord,
    reference: Option<&EntityRecord>,
    kinds: &[AssignmentKind],
) -> Vec<String> {
    linked_ids_where(local, reference, kinds, |_| true)
}

/// Relation targets sharing an assignment type and object type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkGroup {
    pub assignment_type: String,
    pub object_type: String,
    pub object_ids: Vec<String>,
}

/// Group relation assignments by (assignment type, object type) in first-seen
/// order; `only` restricts to one assignment type
pub fn relation_groups(
    local: &EntityRecord,
    reference: Option<&EntityRecord>,
    only: Option<&str>,
) -> Vec<LinkGroup> {
    let mut groups: Vec<LinkGroup> = Vec::new();
    for record in records(local, reference) {
        for assignment in &record.relation_assignments {
            let Some(assignment_type) = assignment.assignment_type.as_deref() else {
                continue;
            };
            if only.is_some_and(|o| o != assignment_type) {
                continue;
            }
            for object in &assignment.objects {
                let (Some(object_type), Some(object_id)) =
                    (object.object_type.as_deref(), object.object_id.as_ref())
                else {
                    continue;
                };
                let position = groups.iter().position(|g| {
                    g.assignment_type == assignment_type && g.object_type == object_type
                });
                let group = match position {
                    Some(i) => &mut groups[i],
                    None => {
                        groups.push(LinkGroup {
                            assignment_type: assignment_type.to_string(),
                            object_type: object_type.to_string(),
                            object_ids: Vec::new(),
                        });
                        let last = groups.len() - 1;
                        &mut groups[last]
                    }
                };
                if !group.object_ids.contains(object_id) {
                    group.object_ids.push(object_id.clone());
                }
            }
        }
    }
    groups
}

/// Collection holding objects of a relation object type
pub type Routing = &'static [(&'static str, CollectionKind)];

pub const RELATION_ROUTES: Routing = &[
    ("product", CollectionKind::Products),
    ("variant", CollectionKind::Variants),
];

/// Fetches the records a [`LinkGroup`] points at
pub struct LinkedResolver<'a> {
    ctx: &'a EngineContext,
    routes: Routing,
}

impl<'a> LinkedResolver<'a> {
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self {
            ctx,
            routes: RELATION_ROUTES,
        }
    }

    pub fn with_routes(ctx: &'a EngineContext, routes: Routing) -> Self {
        Self { ctx, routes }
    }

    pub fn route(&self, object_type: &str) -> Option<CollectionKind> {
        self.routes
            .iter()
            .find(|(t, _)| *t == object_type)
            .map(|(_, kind)| *kind)
    }

    /// Records whose `objectId` is in `ids`; unknown object types yield nothing
    pub async fn fetch(
        &self,
        object_type: &str,
        ids: &[String],
        lang: &str,
    ) -> EngineResult<Vec<EntityRecord>> {
        let Some(kind) = self.route(object_type) else {
            tracing::debug!(object_type, "No collection for relation object type");
            return Ok(Vec::new());
        };
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = Query::new().filter(Filter::terms("objectId", ids.iter().cloned()));
        let hits = self.ctx.scroll(kind, lang, &query).await?;
        Ok(decode_all(&hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> EntityRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn ids_are_reference_first_and_unique() {
        let local = record(json!({"imageAssignments": [
            {"objects": [{"epimId": 3}, {"epimId": 1}]}
        ]}));
        let reference = record(json!({"imageAssignments": [
            {"objects": [{"epimId": 1}, {"epimId": 2}]}
        ]}));
        assert_eq!(
            linked_ids(&local, Some(&reference), &[AssignmentKind::Image]),
            vec!["1", "2", "3"]
        );
        assert_eq!(linked_ids(&local, None, &[AssignmentKind::Text]), Vec::<String>::new());
    }

    #[test]
    fn relations_group_by_type_pair() {
        let local = record(json!({"relationAssignments": [
            {"assignmentType": "Accessory", "objects": [
                {"objectType": "product", "objectId": 10},
                {"objectType": "variant", "objectId": 20},
                {"objectType": "product", "objectId": 11}
            ]},
            {"assignmentType": "Replacement", "objects": [
                {"objectType": "product", "objectId": 12}
            ]}
        ]}));
        let groups = relation_groups(&local, None, None);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].object_ids, vec!["10", "11"]);
        assert_eq!(groups[1].object_type, "variant");

        let replacements = relation_groups(&local, None, Some("Replacement"));
        assert_eq!(replacements.len(), 1);
        assert_eq!(replacements[0].object_ids, vec!["12"]);
    }
}
