/*!
 * # Database data model
 *
 * Schema, records, and the pure record-set operations the workspace
 * views are built on: filtering, multi-key sorting, and the board /
 * calendar groupings. The HTML of the four views is out of scope; this
 * module stops at the data each renderer would consume.
 */

pub mod filter;
pub mod sort;
pub mod views;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use filter::{apply_filters, Condition, FilterGroup, FilterNode, FilterOperator, GroupKind};
pub use sort::{sort_records, SortDirection, SortKind, SortRule};
pub use views::{board_groups, calendar_days, BoardGroup, ViewMode};

/// The backend's property-type vocabulary. Unknown spellings from a
/// newer backend deserialize to `Unknown` instead of failing the whole
/// schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Text,
    Number,
    Select,
    MultiSelect,
    Date,
    Person,
    File,
    Checkbox,
    Url,
    Email,
    Phone,
    Formula,
    Relation,
    Rollup,
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    #[serde(other)]
    Unknown,
}

/// One property (column) declaration in a database schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

/// Property id → spec, in declaration order. Column order is rendering
/// order, so the map must preserve insertion order.
pub type Schema = IndexMap<String, PropertySpec>;

/// Find the first property of the given kind, in declaration order.
pub fn first_of_kind(schema: &Schema, kind: PropertyKind) -> Option<(&str, &PropertySpec)> {
    schema
        .iter()
        .find(|(_, spec)| spec.kind == kind)
        .map(|(id, spec)| (id.as_str(), spec))
}

/// One row of a database, keyed by property id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    #[serde(default)]
    pub data: serde_json::Map<String, Value>,
}

impl Record {
    pub fn new(id: i64, data: serde_json::Map<String, Value>) -> Self {
        Self { id, data }
    }

    pub fn value(&self, property: &str) -> Option<&Value> {
        self.data.get(property)
    }
}

/// Display formatting for one cell value. Pure text; every view uses
/// the same formatting before adding its own chrome.
pub fn format_value(value: Option<&Value>, kind: PropertyKind) -> String {
    let value = match value {
        None | Some(Value::Null) => return "-".to_string(),
        Some(v) => v,
    };

    match kind {
        PropertyKind::Checkbox => {
            if value.as_bool().unwrap_or(false) {
                "\u{2713}".to_string()
            } else {
                "\u{2717}".to_string()
            }
        }
        PropertyKind::MultiSelect => match value.as_array() {
            Some(items) => items
                .iter()
                .map(value_text)
                .collect::<Vec<_>>()
                .join(", "),
            None => value_text(value),
        },
        _ => value_text(value),
    }
}

/// A value's bare text: strings without quotes, everything else its
/// JSON rendering.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
