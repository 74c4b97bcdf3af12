//! Attribute resolution
//!
//! [`AttributeResolver`] fetches the attribute records of a set of parent
//! objects across a language fallback chain; [`AttributeSet`] exposes typed
//! readers over the result.
//!
//! Records are ordered by parent precedence (the requested object first,
//! then its reference, then any further identifiers), so every reader
//! returns the localized value when present and falls back per attribute.

mod resolver;

pub use resolver::{AttributeResolver, ParentType};

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::records::{AttributeRecord, AttributeValue};

/// Name prefix of structural marker attributes
pub const DUMMY_PREFIX: &str = "dummy-";

/// Datatype of boolean attributes
pub const FLAG: &str = "FLAG";

/// Datatype of dictionary-coded attributes
pub const DICTIONARY: &str = "DICTIONARY";

/// Truthiness of catalog flags: `true`, non-zero numbers and the strings
/// "1", "true", "yes" (any case)
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"),
        _ => false,
    }
}

/// Plain text of a scalar value
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

static TRAILING_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\s*$").expect("valid unit pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Split a display value with a trailing `[unit]`.
///
/// `"1 | 200 [m³/h]"` becomes `("1 200", Some("m³/h"))`. Strings without a
/// trailing bracket and non-strings are returned unchanged.
pub fn parse_piped_value(value: &Value) -> (Value, Option<String>) {
    let Value::String(s) = value else {
        return (value.clone(), None);
    };
    let Some(caps) = TRAILING_UNIT.captures(s) else {
        return (value.clone(), None);
    };
    let unit = caps[1].to_string();
    let start = caps.get(0).map(|m| m.start()).unwrap_or(s.len());
    let base = s[..start].replace('|', "");
    let base = WHITESPACE.replace_all(&base, " ").trim().to_string();
    (Value::String(base), Some(unit))
}

fn sorted_values(values: &[AttributeValue]) -> Vec<&AttributeValue> {
    let mut sorted: Vec<&AttributeValue> = values.iter().collect();
    sorted.sort_by_key(|v| (v.seqorder_nr.is_none(), v.seqorder_nr));
    sorted
}

impl AttributeRecord {
    pub fn first_value(&self) -> Option<&Value> {
        self.values.first().map(|v| &v.value).filter(|v| !v.is_null())
    }

    /// Non-null values ordered by `seqorderNr` (unnumbered last)
    pub fn multi_values(&self) -> Vec<Value> {
        sorted_values(&self.values)
            .into_iter()
            .filter(|v| !v.value.is_null())
            .map(|v| v.value.clone())
            .collect()
    }

    /// Scalar for single-value attributes, ordered list otherwise
    pub fn display_value(&self) -> Value {
        if self.datatype.as_deref() == Some(FLAG) {
            return Value::Bool(self.first_value().is_some_and(truthy));
        }
        match self.values.len() {
            0 => Value::Null,
            1 => self.values[0].value.clone(),
            _ => Value::Array(self.multi_values()),
        }
    }

    /// Unit in `lang`: the localized short name, else the raw unit
    pub fn unit_for(&self, lang: &str) -> Option<String> {
        let first = self.values.first()?;
        first
            .unit_list
            .iter()
            .find(|u| {
                u.lang_iso
                    .as_deref()
                    .is_some_and(|l| l.eq_ignore_ascii_case(lang))
            })
            .and_then(|u| u.unit_short_name.clone())
            .or_else(|| first.unit.clone())
            .filter(|u| !u.is_empty())
    }

    pub fn is_dummy(&self) -> bool {
        self.name.starts_with(DUMMY_PREFIX)
    }
}

/// Attribute records of one or more parent objects, in precedence order
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    records: Vec<AttributeRecord>,
}

impl AttributeSet {
    pub fn new(records: Vec<AttributeRecord>) -> Self {
        Self { records }
    }

    /// Order `records` by the position of their parent in `precedence`;
    /// records of unknown parents go last, ties keep their order
    pub fn ranked(mut records: Vec<AttributeRecord>, precedence: &[String]) -> Self {
        records.sort_by_key(|r| {
            r.parent_id
                .as_ref()
                .and_then(|p| precedence.iter().position(|id| id == p))
                .unwrap_or(usize::MAX)
        });
        Self { records }
    }

    pub fn records(&self) -> &[AttributeRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Highest-precedence record named `name`
    pub fn get(&self, name: &str) -> Option<&AttributeRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn get_ignore_case(&self, name: &str) -> Option<&AttributeRecord> {
        self.records
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// First value of the highest-precedence record that has one
    pub fn scalar(&self, name: &str) -> Option<&Value> {
        self.records
            .iter()
            .filter(|r| r.name == name)
            .find_map(|r| r.first_value())
    }

    pub fn scalar_string(&self, name: &str) -> Option<String> {
        self.scalar(name)
            .and_then(value_text)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn multi(&self, name: &str) -> Vec<Value> {
        self.get(name).map(|r| r.multi_values()).unwrap_or_default()
    }

    pub fn flag(&self, name: &str) -> bool {
        self.scalar(name).is_some_and(truthy)
    }

    pub fn first_matching(&self, pattern: &Regex) -> Option<&AttributeRecord> {
        self.records.iter().find(|r| pattern.is_match(&r.name))
    }

    /// Records that carry data, structural markers excluded
    pub fn data_attributes(&self) -> impl Iterator<Item = &AttributeRecord> {
        self.records.iter().filter(|r| !r.is_dummy())
    }

    /// Records belonging to one parent object
    pub fn for_parent(&self, parent_id: &str) -> impl Iterator<Item = &AttributeRecord> {
        self.records
            .iter()
            .filter(move |r| r.parent_id.as_deref() == Some(parent_id))
    }

    /// Flat uppercased name -> value mapping; the first record per name wins
    pub fn upper_map(&self) -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        for record in self.data_attributes() {
            map.entry(record.name.to_uppercase())
                .or_insert_with(|| record.display_value());
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str, parent: &str, values: Value) -> AttributeRecord {
        serde_json::from_value(json!({"name": name, "parentId": parent, "values": values})).unwrap()
    }

    #[test]
    fn truthiness_rules() {
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("Yes")));
        assert!(truthy(&json!(true)));
        assert!(!truthy(&json!("0")));
        assert!(!truthy(&json!(0.0)));
        assert!(!truthy(&Value::Null));
        assert!(!truthy(&json!("no")));
    }

    #[test]
    fn local_value_wins_per_attribute() {
        let set = AttributeSet::ranked(
            vec![
                record("M3-ITEM-NAME", "ref", json!([{"value": "Reference name"}])),
                record("M3-ITEM-DESCRIPTION", "ref", json!([{"value": "Ref tagline"}])),
                record("M3-ITEM-NAME", "local", json!([{"value": "Local name"}])),
            ],
            &["local".to_string(), "ref".to_string()],
        );
        assert_eq!(set.scalar_string("M3-ITEM-NAME").as_deref(), Some("Local name"));
        assert_eq!(
            set.scalar_string("M3-ITEM-DESCRIPTION").as_deref(),
            Some("Ref tagline")
        );
        assert_eq!(set.scalar("missing"), None);
    }

    #[test]
    fn multi_values_follow_seqorder() {
        let set = AttributeSet::new(vec![record(
            "colors",
            "1",
            json!([
                {"value": "blue", "seqorderNr": 3},
                {"value": "red"},
                {"value": "green", "seqorderNr": 1},
                {"value": null, "seqorderNr": 0}
            ]),
        )]);
        assert_eq!(set.multi("colors"), vec![json!("green"), json!("blue"), json!("red")]);
        assert_eq!(
            set.upper_map().get("COLORS"),
            Some(&json!(["green", "blue", "red"]))
        );
    }

    #[test]
    fn markers_are_not_data() {
        let set = AttributeSet::new(vec![
            record("dummy-tab", "1", json!([{"value": "Tab"}])),
            record("airflow", "1", json!([{"value": 120}])),
        ]);
        let names: Vec<_> = set.data_attributes().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["airflow"]);
        assert!(!set.upper_map().contains_key("DUMMY-TAB"));
    }

    #[test]
    fn flags_become_booleans() {
        let mut rec = record("is-hidden", "1", json!([{"value": "1"}]));
        rec.datatype = Some(FLAG.into());
        assert_eq!(rec.display_value(), json!(true));
    }

    #[test]
    fn piped_values_split_their_unit() {
        assert_eq!(
            parse_piped_value(&json!("1 |  200 [m³/h]")),
            (json!("1 200"), Some("m³/h".to_string()))
        );
        assert_eq!(parse_piped_value(&json!("a|b")), (json!("a|b"), None));
        assert_eq!(parse_piped_value(&json!(5)), (json!(5), None));
    }

    #[test]
    fn unit_prefers_localized_short_name() {
        let rec = record(
            "airflow",
            "1",
            json!([{"value": 1, "unit": "m3/h",
                    "unitList": [{"langIso": "DEU_DEU", "unitShortName": "m³/h"}]}]),
        );
        assert_eq!(rec.unit_for("deu_deu").as_deref(), Some("m³/h"));
        assert_eq!(rec.unit_for("eng_glo").as_deref(), Some("m3/h"));
    }
}
