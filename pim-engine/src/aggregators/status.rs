//! Lifecycle status derivation
//!
//! Approval comes from workflow states gated by the release date; market
//! activity and expiry come from market-named flag attributes.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;

use crate::attributes::{AttributeSet, truthy, value_text};
use crate::records::{AttributeRecord, EntityRecord};

pub const RELEASE_DATE: &str = "Release-date";
pub const M3_ITEM_STATUS: &str = "M3-ITEM-STATUS";

/// Item status codes above this mark a discontinued SKU
const DISCONTINUED_ABOVE: f64 = 50.0;

pub const PRODUCTS_WORKFLOW: &str = "PRODUCTS_state";
pub const PRODUCT_APPROVED_STATES: &[&str] = &["WfState_14", "WfState_15"];
pub const SKU_WORKFLOW: &str = "SKU_STATE";
pub const SKU_APPROVED_STATES: &[&str] = &["WfState_42", "WfState_44"];
pub const OPERATING_MODE_APPROVED_STATES: &[&str] = &["WfState_42"];

/// Parse an ISO date or date-time; offsets are dropped and the wall time
/// read as UTC
pub fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local().and_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Whether a release date lies in the past; no date or an unreadable one
/// does not hold the object back
pub fn released(release_date: Option<&str>, now: DateTime<Utc>) -> bool {
    let Some(raw) = release_date else {
        return true;
    };
    match parse_release_date(raw) {
        Some(date) => date < now,
        None => {
            tracing::warn!(release_date = raw, "Invalid release date format");
            true
        }
    }
}

/// Workflow `workflow` is in one of `states` and the object is released
pub fn approved(
    record: &EntityRecord,
    workflow: &str,
    states: &[&str],
    release_date: Option<&str>,
    now: DateTime<Utc>,
) -> bool {
    record
        .workflow_state(workflow)
        .is_some_and(|state| states.contains(&state))
        && released(release_date, now)
}

/// Activity flag of a market: `MARKET_005` -> `market-005`
pub fn market_flag(market: &str) -> String {
    market.to_lowercase().replace('_', "-")
}

pub fn market_expired_flag(market: &str) -> String {
    format!("{}-expired", market_flag(market))
}

/// Expiry flag of operating modes, keyed by the raw market code
pub fn operating_mode_expired_flag(market: &str) -> String {
    format!("market-expired-{market}")
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Active on the market and backed by a reference record
pub fn sku_active(set: &AttributeSet, market: &str, has_reference: bool) -> bool {
    has_reference && set.flag(&market_flag(market))
}

/// Expired on the market or discontinued in the ERP
pub fn sku_expired(set: &AttributeSet, market: &str) -> bool {
    set.flag(&market_expired_flag(market))
        || set
            .scalar(M3_ITEM_STATUS)
            .and_then(numeric)
            .is_some_and(|status| status > DISCONTINUED_ABOVE)
}

pub fn release_date(set: &AttributeSet) -> Option<String> {
    set.scalar(RELEASE_DATE).and_then(value_text)
}

static MARKET_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^market-(\d+)(?:-expired)?$").expect("valid market attribute pattern")
});

/// Only an explicit 1 counts as set
fn strictly_set(record: &AttributeRecord) -> bool {
    match record.values.iter().map(|v| &v.value).next() {
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => s == "1",
        _ => false,
    }
}

/// Markets (`MARKET-NNN`, sorted) where at least one object is flagged
/// active and explicitly not expired
pub fn shop_statistics(records: &[AttributeRecord]) -> Vec<String> {
    // (market number, parent) -> (active, not expired)
    let mut seen: HashMap<(&str, &str), (bool, bool)> = HashMap::new();
    for record in records {
        let Some(caps) = MARKET_ATTRIBUTE.captures(&record.name) else {
            continue;
        };
        let Some(parent) = record.parent_id.as_deref() else {
            continue;
        };
        let Some(number) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        let entry = seen.entry((number, parent)).or_default();
        if record.name.ends_with("-expired") {
            entry.1 |= !strictly_set(record);
        } else {
            entry.0 |= strictly_set(record);
        }
    }
    seen.into_iter()
        .filter(|(_, (active, not_expired))| *active && *not_expired)
        .map(|((number, _), _)| format!("MARKET-{number}"))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Market status of a related object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketStatus {
    pub active: bool,
    pub expired: bool,
    pub item_name: Option<String>,
}

impl MarketStatus {
    pub fn listed(&self) -> bool {
        self.active && !self.expired
    }
}

/// Fold market and naming attributes into one status per parent
pub fn market_status(
    records: &[AttributeRecord],
    market: &str,
    name_attribute: &str,
) -> HashMap<String, MarketStatus> {
    let active = market_flag(market);
    let expired = market_expired_flag(market);
    let mut out: HashMap<String, MarketStatus> = HashMap::new();
    for record in records {
        let (Some(parent), Some(value)) = (record.parent_id.clone(), record.values.first()) else {
            continue;
        };
        let status = out.entry(parent).or_default();
        if record.name == active {
            status.active = truthy(&value.value);
        } else if record.name == expired {
            status.expired = truthy(&value.value);
        } else if record.name == name_attribute {
            status.item_name = value_text(&value.value);
        }
    }
    out
}
