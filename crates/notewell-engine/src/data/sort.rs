//! Multi-key record sorting.
//!
//! Rules apply in order; later rules break ties. The sort is stable, so
//! records equal under every rule keep their incoming order. Records
//! missing the sorted property sort after records that have it,
//! regardless of direction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{value_text, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// How the property's values compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    #[default]
    Text,
    Number,
    Date,
    Boolean,
    Select,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortRule {
    pub property: String,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(rename = "type", default)]
    pub kind: SortKind,
}

impl SortRule {
    pub fn ascending(property: impl Into<String>, kind: SortKind) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Ascending,
            kind,
        }
    }

    pub fn descending(property: impl Into<String>, kind: SortKind) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Descending,
            kind,
        }
    }
}

/// Sort records in place by the given rules.
pub fn sort_records(records: &mut [Record], rules: &[SortRule]) {
    if rules.is_empty() {
        return;
    }
    records.sort_by(|a, b| compare_records(a, b, rules));
}

fn compare_records(a: &Record, b: &Record, rules: &[SortRule]) -> Ordering {
    for rule in rules {
        let va = a.value(&rule.property).filter(|v| !v.is_null());
        let vb = b.value(&rule.property).filter(|v| !v.is_null());

        // Missing values sort last in either direction
        let ordering = match (va, vb) {
            (None, None) => continue,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(x), Some(y)) => compare_values(x, y, rule.kind),
        };

        let ordering = match rule.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn compare_values(a: &Value, b: &Value, kind: SortKind) -> Ordering {
    match kind {
        SortKind::Number => {
            let (x, y) = (as_number(a), as_number(b));
            match (x, y) {
                // Unparseable numbers compare equal
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            }
        }
        SortKind::Boolean => {
            let (x, y) = (a.as_bool().unwrap_or(false), b.as_bool().unwrap_or(false));
            x.cmp(&y)
        }
        // ISO-8601 dates order correctly as strings
        SortKind::Date => value_text(a).cmp(&value_text(b)),
        SortKind::Text | SortKind::Select => {
            value_text(a).to_lowercase().cmp(&value_text(b).to_lowercase())
        }
    }
}

/// Lenient numeric coercion: numbers as-is, numeric strings parsed.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
