//! Technical parameters
//!
//! Definition tables are cut into tabs at `dummy-tab` markers. Inside a tab,
//! `dummy-table-header` markers open a sub-group and every other entry
//! becomes a row when one of its attributes carries a value.
//!
//! Three renditions share this walk:
//! - SKU sections: one `attributes` content per sub-group
//! - shop parameters: only the `Technical-parameters` tab
//! - operating-mode tables: `th`/`td` rows with orphan headers pruned

use serde_json::{Value, json};
use shared::models::{
    CONTENT_ATTRIBUTES, CONTENT_IMAGE, CONTENT_TABLE, CONTENT_TEXT, ParameterGroup, ParameterRow,
    ParameterTab, Section, SectionContent, TableRow,
};

use crate::attributes::{AttributeSet, ParentType};
use crate::context::{BuildScope, EngineContext};
use crate::core::error::EngineResult;
use crate::records::{ElementRecord, decode_all};
use crate::store::{CollectionKind, Filter, Query};

use super::definitions::{
    Definition, TableSelector, ValueStyle, definition_attributes, load_definitions, record_value,
    unique_attributes,
};
use super::rich_text::parse_rich_text;

/// Tab closing the technical part of SKU tables
pub const ENERGY_LABEL_TAB: &str = "Energy class label";
pub const TECHNICAL_PARAMETERS: &str = "Technical-parameters";
pub const TECHNICAL_SECTION: &str = "Data-Technical-parameter";

pub const WIRING_SECTION: &str = "ecom- -data";
pub const WIRING_NAME: &str = "Anschlussplan";
pub const WIRING_CATEGORIES: [&str; 3] = ["49", "18", "55"];

const GLOBAL_LANG: &str = "eng_glo";
const TABLE_COLUMNS: usize = 3;

/// Entries between two tab markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub label: String,
    pub shortcut: Option<String>,
    pub entries: Vec<Definition>,
}

/// Which tabs a rendition reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabRule {
    /// Every tab up to the energy label tab
    UntilEnergyLabel,
    /// Leading tabs carrying this shortcut
    Shortcut(&'static str),
    All,
}

impl TabRule {
    fn accepts(&self, tab: &Definition) -> bool {
        match self {
            TabRule::UntilEnergyLabel => tab.label() != ENERGY_LABEL_TAB,
            TabRule::Shortcut(shortcut) => tab.shortcut() == Some(*shortcut),
            TabRule::All => true,
        }
    }
}

/// Cut each table into tabs. A rejected tab ends the current table; entries
/// before the first tab belong to no tab and are skipped. A repeated tab
/// label starts that tab over.
pub fn split_tabs(tables: &[Vec<Definition>], rule: TabRule) -> Vec<Tab> {
    let mut tabs: Vec<Tab> = Vec::new();
    for table in tables {
        let mut current: Option<usize> = None;
        for definition in table {
            if definition.is_tab() {
                if !rule.accepts(definition) {
                    break;
                }
                let tab = Tab {
                    label: definition.label().to_string(),
                    shortcut: definition.shortcut().map(str::to_string),
                    entries: Vec::new(),
                };
                current = Some(match tabs.iter().position(|t| t.label == tab.label) {
                    Some(i) => {
                        tabs[i] = tab;
                        i
                    }
                    None => {
                        tabs.push(tab);
                        tabs.len() - 1
                    }
                });
                continue;
            }
            if let Some(i) = current {
                tabs[i].entries.push(definition.clone());
            }
        }
    }
    tabs
}

/// First value among the entry's attributes, in attribute precedence order
fn entry_value(
    entry: &Definition,
    set: &AttributeSet,
    lang: &str,
    style: ValueStyle,
) -> Option<(Value, Option<String>)> {
    set.data_attributes()
        .filter(|r| entry.names(&r.name))
        .find_map(|r| record_value(r, lang, style))
}

/// Rows of a tab grouped under their sub-headers, groups in first-row order
pub fn group_rows(tab: &Tab, set: &AttributeSet, lang: &str, style: ValueStyle) -> Vec<ParameterGroup> {
    let mut groups: Vec<ParameterGroup> = Vec::new();
    let mut header = String::new();
    for entry in &tab.entries {
        if entry.is_header() {
            header = entry.label().to_string();
            continue;
        }
        let Some((value, unit)) = entry_value(entry, set, lang, style) else {
            continue;
        };
        let row = ParameterRow {
            label: entry.label().to_string(),
            value,
            unit,
        };
        match groups.iter_mut().find(|g| g.name == header) {
            Some(group) => group.rows.push(row),
            None => groups.push(ParameterGroup {
                name: header.clone(),
                rows: vec![row],
            }),
        }
    }
    groups
}

async fn tabs_with_values(
    ctx: &EngineContext,
    scope: &BuildScope,
    table_ids: &[String],
    parent_ids: &[String],
    rule: TabRule,
) -> EngineResult<(Vec<Tab>, AttributeSet)> {
    let brand_code = scope.brand_code(ctx)?;
    let tables = load_definitions(
        ctx,
        &scope.lang,
        &scope.market,
        TableSelector::Technical { ids: table_ids, brand_code },
    )
    .await?;
    let tabs = split_tabs(&tables, rule);
    let names = unique_attributes(tabs.iter().flat_map(|t| &t.entries));
    let set = definition_attributes(ctx, &scope.lang, parent_ids, names, None).await?;
    Ok((tabs, set))
}

/// Technical sections of a SKU; tabs without any value are left out
pub async fn sku_sections(
    ctx: &EngineContext,
    scope: &BuildScope,
    table_ids: &[String],
    parent_ids: &[String],
) -> EngineResult<Vec<Section>> {
    let (tabs, set) =
        tabs_with_values(ctx, scope, table_ids, parent_ids, TabRule::UntilEnergyLabel).await?;
    Ok(tabs
        .into_iter()
        .filter_map(|tab| {
            let groups = group_rows(&tab, &set, &scope.lang, ValueStyle::Localized);
            if groups.is_empty() {
                return None;
            }
            Some(Section {
                section: tab.shortcut,
                name: tab.label,
                contents: groups
                    .into_iter()
                    .map(|g| SectionContent {
                        kind: CONTENT_ATTRIBUTES.to_string(),
                        content: json!({"name": g.name, "rows": g.rows}),
                    })
                    .collect(),
            })
        })
        .collect())
}

/// Technical parameters of the shop projection
pub async fn shop_parameters(
    ctx: &EngineContext,
    scope: &BuildScope,
    table_ids: &[String],
    parent_ids: &[String],
) -> EngineResult<Vec<ParameterTab>> {
    let (tabs, set) = tabs_with_values(
        ctx,
        scope,
        table_ids,
        parent_ids,
        TabRule::Shortcut(TECHNICAL_PARAMETERS),
    )
    .await?;
    Ok(tabs
        .into_iter()
        .map(|tab| ParameterTab {
            groups: group_rows(&tab, &set, &scope.lang, ValueStyle::Localized),
            name: tab.label,
        })
        .filter(|tab| !tab.groups.is_empty())
        .collect())
}

/// Drop header rows not directly followed by a row carrying data
pub fn prune_headers(rows: Vec<TableRow>) -> Vec<TableRow> {
    let keep: Vec<bool> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| !row.is_header() || rows.get(i + 1).is_some_and(TableRow::has_data))
        .collect();
    rows.into_iter()
        .zip(keep)
        .filter_map(|(row, keep)| keep.then_some(row))
        .collect()
}

/// `th` header and `td` rows of one tab
pub fn table_rows(tab: &Tab, set: &AttributeSet, lang: &str) -> Vec<TableRow> {
    let mut rows = Vec::new();
    for entry in &tab.entries {
        if entry.is_header() {
            rows.push(TableRow::header(entry.label(), TABLE_COLUMNS));
            continue;
        }
        if let Some((value, unit)) = entry_value(entry, set, lang, ValueStyle::Raw) {
            rows.push(TableRow::data(entry.label(), value, unit.as_deref()));
        }
    }
    prune_headers(rows)
}

async fn wiring_elements(
    ctx: &EngineContext,
    lang: &str,
    ids: &[String],
    global: bool,
) -> EngineResult<Vec<ElementRecord>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut collections = vec![ctx.collection(CollectionKind::Elements, lang)];
    if global && lang != GLOBAL_LANG {
        collections.push(ctx.collection(CollectionKind::Elements, GLOBAL_LANG));
    }
    let query = Query::new()
        .filter(Filter::terms("parentElement", ids.iter().cloned()))
        .filter(Filter::nested(
            "categories",
            Filter::terms("categories.id", WIRING_CATEGORIES),
        ));
    let response = ctx.docs.search(&collections, &query).await?;
    Ok(decode_all(&response.hits))
}

/// Wiring texts (local and global English) followed by the wiring image
pub async fn wiring_section(
    ctx: &EngineContext,
    lang: &str,
    text_ids: &[String],
    image_ids: &[String],
) -> EngineResult<Section> {
    let (texts, images) = tokio::join!(
        wiring_elements(ctx, lang, text_ids, true),
        wiring_elements(ctx, lang, image_ids, false),
    );

    let mut contents = Vec::new();
    for element in texts? {
        let paragraphs = parse_rich_text(element.xml_text.as_deref().unwrap_or_default())?;
        contents.push(SectionContent {
            kind: CONTENT_TEXT.to_string(),
            content: json!(paragraphs),
        });
    }
    // the last wiring image wins
    let image = images?
        .into_iter()
        .rev()
        .find_map(|e| e.phy_preview_file)
        .unwrap_or_default();
    contents.push(SectionContent {
        kind: CONTENT_IMAGE.to_string(),
        content: Value::String(image),
    });

    Ok(Section {
        section: Some(WIRING_SECTION.to_string()),
        name: WIRING_NAME.to_string(),
        contents,
    })
}

/// One technical table per tab of the operating mode's definitions
pub async fn operating_mode_tables(
    ctx: &EngineContext,
    scope: &BuildScope,
    table_ids: &[String],
    parent_ids: &[String],
) -> EngineResult<Vec<Section>> {
    let brand_code = scope.brand_code(ctx)?;
    let tables = load_definitions(
        ctx,
        &scope.lang,
        &scope.market,
        TableSelector::Technical { ids: table_ids, brand_code },
    )
    .await?;
    let tabs = split_tabs(&tables, TabRule::All);
    let names = unique_attributes(tabs.iter().flat_map(|t| &t.entries));
    let set = definition_attributes(ctx, &scope.lang, parent_ids, names, Some(ParentType::Variant))
        .await?;

    Ok(tabs
        .iter()
        .map(|tab| Section {
            section: Some(TECHNICAL_SECTION.to_string()),
            name: tab.label.clone(),
            contents: vec![SectionContent {
                kind: CONTENT_TABLE.to_string(),
                content: json!(table_rows(tab, &set, &scope.lang)),
            }],
        })
        .collect())
}
