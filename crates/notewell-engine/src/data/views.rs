//! View modes and the pure groupings behind the board and calendar
//! presentations. Rendering the views is out of scope; these functions
//! produce the data a renderer would consume.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{first_of_kind, PropertyKind, Record, Schema};

/// The four presentations of one record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Table,
    Board,
    Calendar,
    Gallery,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Table,
        ViewMode::Board,
        ViewMode::Calendar,
        ViewMode::Gallery,
    ];

    /// Display label: the capitalized mode name.
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Table => "Table",
            ViewMode::Board => "Board",
            ViewMode::Calendar => "Calendar",
            ViewMode::Gallery => "Gallery",
        }
    }
}

/// One board column: a select option and the records carrying it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardGroup {
    pub option: String,
    pub records: Vec<Record>,
}

/// Group records by the first `select` property, one group per declared
/// option in declared order. `None` when the schema has no select
/// property (the board view needs one).
pub fn board_groups(schema: &Schema, records: &[Record]) -> Option<Vec<BoardGroup>> {
    let (property_id, spec) = first_of_kind(schema, PropertyKind::Select)?;
    let options = spec.options.as_deref().unwrap_or(&[]);

    Some(
        options
            .iter()
            .map(|option| BoardGroup {
                option: option.clone(),
                records: records
                    .iter()
                    .filter(|record| {
                        record.value(property_id).and_then(Value::as_str) == Some(option)
                    })
                    .cloned()
                    .collect(),
            })
            .collect(),
    )
}

/// Group records by the first `date` property's day (the `YYYY-MM-DD`
/// prefix of the stored value). Records without a usable date are
/// omitted. `None` when the schema has no date property.
pub fn calendar_days(schema: &Schema, records: &[Record]) -> Option<BTreeMap<String, Vec<Record>>> {
    let (property_id, _) = first_of_kind(schema, PropertyKind::Date)?;

    let mut days: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    for record in records {
        let Some(raw) = record.value(property_id).and_then(Value::as_str) else {
            continue;
        };
        let day = raw.split('T').next().unwrap_or(raw);
        if day.is_empty() {
            continue;
        }
        days.entry(day.to_string()).or_default().push(record.clone());
    }
    Some(days)
}
