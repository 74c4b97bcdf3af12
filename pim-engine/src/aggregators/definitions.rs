//! Product-table definitions
//!
//! Definition tables describe which attributes an object shows and how they
//! are labelled. Cells sharing a `seqorderNr` form one entry; structural
//! marker attributes (`dummy-tab`, `dummy-table-header`) split entries into
//! tabs and sub-headers.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::Value;
use shared::models::Attribute;

use crate::attributes::{AttributeResolver, AttributeSet, ParentType, parse_piped_value, value_text};
use crate::context::EngineContext;
use crate::core::error::EngineResult;
use crate::records::{AttributeRecord, ProductTableRecord, TableBody, decode_all};
use crate::store::{CollectionKind, Filter, Query, UOM_TEMPLATE};

pub const TAB_MARKERS: [&str; 2] = ["dummy-tab", "dummy-tab-td"];
pub const HEADER_MARKERS: [&str; 2] = ["dummy-table-header", "dummy-table-header-td"];

/// Shared definition table of ERP attributes
pub const M3_ATTRIBUTES_TABLE: &str = "DataStore_M3_Attributes";
pub const SHOP_ATTRIBUTES_TABLE: &str = "DataStore_Shop_Attributes";

/// Cells of one `seqorderNr`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    pub seq: i64,
    pub labels: Vec<String>,
    pub attributes: Vec<String>,
    pub shortcuts: Vec<String>,
}

impl Definition {
    pub fn label(&self) -> &str {
        self.labels.first().map(String::as_str).unwrap_or_default()
    }

    pub fn shortcut(&self) -> Option<&str> {
        self.shortcuts.first().map(String::as_str).filter(|s| !s.is_empty())
    }

    pub fn is_tab(&self) -> bool {
        self.attributes
            .first()
            .is_some_and(|a| TAB_MARKERS.contains(&a.as_str()))
    }

    pub fn is_header(&self) -> bool {
        self.attributes
            .iter()
            .any(|a| HEADER_MARKERS.contains(&a.as_str()))
    }

    pub fn names(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }
}

/// Attribute renames for a market's units of measure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitMapping(HashMap<String, String>);

impl UnitMapping {
    pub fn new(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    pub fn apply<'a>(&'a self, attribute: &'a str) -> &'a str {
        self.0.get(attribute).map(String::as_str).unwrap_or(attribute)
    }
}

/// Division of a market: its last three characters (`MARKET-005` -> `005`)
pub fn division(market: &str) -> String {
    let chars: Vec<char> = market.chars().collect();
    chars[chars.len().saturating_sub(3)..].iter().collect()
}

/// Unit-of-measure attribute mapping of `market`
pub async fn unit_mapping(ctx: &EngineContext, market: &str) -> EngineResult<UnitMapping> {
    let rows = ctx
        .sql
        .execute(UOM_TEMPLATE, &[("division", Value::from(division(market)))])
        .await?;
    Ok(UnitMapping::new(rows.iter().filter_map(|row| {
        let base = row.get("BASE_ATTRIBUTE").and_then(value_text)?;
        let converted = row.get("CONVERTED_ATTRIBUTE").and_then(value_text)?;
        Some((base, converted))
    })))
}

/// Group cells by `seqorderNr` in ascending order, dropping empty groups
pub fn parse_definitions(tables: &[TableBody], units: &UnitMapping) -> Vec<Definition> {
    let mut by_seq: BTreeMap<i64, Definition> = BTreeMap::new();
    for cell in tables.iter().flat_map(|t| &t.rows).flat_map(|r| &r.cells) {
        let Some(seq) = cell.seqorder_nr else {
            continue;
        };
        let definition = by_seq.entry(seq).or_insert_with(|| Definition {
            seq,
            ..Definition::default()
        });
        if let Some(label) = cell.label.first() {
            definition
                .labels
                .push(label.content.clone().unwrap_or_default());
            definition
                .shortcuts
                .push(label.dict_shortcut.clone().unwrap_or_default());
        }
        if let Some(name) = cell.attribute.first().and_then(|a| a.name.as_deref()) {
            definition.attributes.push(units.apply(name).to_string());
        }
    }
    by_seq
        .into_values()
        .filter(|d| !d.labels.is_empty() || !d.attributes.is_empty())
        .collect()
}

/// Attribute names of `definitions`, first occurrence order
pub fn unique_attributes<'a>(definitions: impl IntoIterator<Item = &'a Definition>) -> Vec<String> {
    let mut seen = HashSet::new();
    definitions
        .into_iter()
        .flat_map(|d| d.attributes.iter())
        .filter(|a| seen.insert(a.as_str()))
        .cloned()
        .collect()
}

/// Which definition tables to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelector<'a> {
    /// Brand tables (`*{code}`) among the linked ids, plus the shared ERP table
    Attributes { ids: &'a [String], brand_code: &'a str },
    /// Brand tables among the linked ids only
    Technical { ids: &'a [String], brand_code: &'a str },
    Shop,
}

impl TableSelector<'_> {
    fn filter(&self) -> Option<Filter> {
        let brand_tables = |ids: &[String], brand_code: &str| Filter::Bool {
            must: vec![
                Filter::wildcard("name", format!("*{brand_code}")),
                Filter::terms("epimId", ids.iter().cloned()),
            ],
            should: Vec::new(),
            must_not: Vec::new(),
        };
        match self {
            TableSelector::Attributes { ids, brand_code } => Some(Filter::any_of(vec![
                brand_tables(ids, brand_code),
                Filter::term("name", M3_ATTRIBUTES_TABLE),
            ])),
            TableSelector::Technical { ids, .. } if ids.is_empty() => None,
            TableSelector::Technical { ids, brand_code } => Some(brand_tables(ids, brand_code)),
            TableSelector::Shop => Some(Filter::term("name", SHOP_ATTRIBUTES_TABLE)),
        }
    }
}

/// Definition tables chosen by `selector`, each parsed with the market's
/// unit mapping
pub async fn load_definitions(
    ctx: &EngineContext,
    lang: &str,
    market: &str,
    selector: TableSelector<'_>,
) -> EngineResult<Vec<Vec<Definition>>> {
    let Some(filter) = selector.filter() else {
        return Ok(Vec::new());
    };
    let query = Query::new().filter(filter);
    let response = ctx.search(CollectionKind::ProductTables, lang, &query).await?;
    let tables: Vec<ProductTableRecord> = decode_all(&response.hits);
    if tables.is_empty() {
        return Ok(Vec::new());
    }
    let units = unit_mapping(ctx, market).await?;
    Ok(tables
        .iter()
        .map(|t| parse_definitions(&t.table, &units))
        .collect())
}

/// Attributes named by `definitions` on `parent_ids`, across the fallback chain
pub async fn definition_attributes(
    ctx: &EngineContext,
    lang: &str,
    parent_ids: &[String],
    names: Vec<String>,
    parent_type: Option<ParentType>,
) -> EngineResult<AttributeSet> {
    if names.is_empty() {
        return Ok(AttributeSet::default());
    }
    let mut filters = vec![
        Filter::terms("name", names),
        Filter::nested("values", Filter::exists("values.value")),
    ];
    if let Some(parent_type) = parent_type {
        filters.push(Filter::term("parentType", parent_type.as_str()));
    }
    AttributeResolver::new(ctx)
        .resolve_with(parent_ids, lang, filters)
        .await
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// How values and units of a record are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStyle {
    /// Localized unit names, piped display values split
    Localized,
    /// Raw value and unit as stored
    Raw,
}

/// Display value and unit of a record; `None` when it carries no value
pub fn record_value(
    record: &AttributeRecord,
    lang: &str,
    style: ValueStyle,
) -> Option<(Value, Option<String>)> {
    let value = match record.values.len() {
        0 => return None,
        1 => record.values[0].value.clone(),
        _ => Value::Array(record.multi_values()),
    };
    if is_blank(&value) {
        return None;
    }
    match style {
        ValueStyle::Localized => {
            let (value, piped) = parse_piped_value(&value);
            Some((value, piped.or_else(|| record.unit_for(lang))))
        }
        ValueStyle::Raw => {
            let unit = record.values[0].unit.clone().filter(|u| !u.is_empty());
            Some((value, unit))
        }
    }
}

/// Labelled attributes keyed by uppercased name; the highest-precedence
/// record of each name wins
pub fn labelled_attributes(
    set: &AttributeSet,
    definitions: &[Definition],
    lang: &str,
    style: ValueStyle,
) -> BTreeMap<String, Attribute> {
    let mut out = BTreeMap::new();
    for record in set.data_attributes() {
        let key = record.name.to_uppercase();
        if out.contains_key(&key) {
            continue;
        }
        let Some((value, unit)) = record_value(record, lang, style) else {
            continue;
        };
        let label = definitions
            .iter()
            .find(|d| d.names(&record.name))
            .map(Definition::label)
            .filter(|l| !l.is_empty())
            .unwrap_or(&record.name)
            .to_string();
        out.insert(
            key,
            Attribute {
                name: label,
                attribute: record.name.clone(),
                value,
                unit,
            },
        );
    }
    out
}

/// Labelled attributes of a SKU or operating mode from its linked
/// definition tables
pub async fn additional_attributes(
    ctx: &EngineContext,
    lang: &str,
    market: &str,
    selector: TableSelector<'_>,
    parent_ids: &[String],
    parent_type: Option<ParentType>,
    style: ValueStyle,
) -> EngineResult<BTreeMap<String, Attribute>> {
    let tables = load_definitions(ctx, lang, market, selector).await?;
    let definitions: Vec<Definition> = tables.into_iter().flatten().collect();
    let names = unique_attributes(&definitions);
    let set = definition_attributes(ctx, lang, parent_ids, names, parent_type).await?;
    Ok(labelled_attributes(&set, &definitions, lang, style))
}
