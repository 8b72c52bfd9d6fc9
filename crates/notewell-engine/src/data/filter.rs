//! Record filtering.
//!
//! A filter is a group of conditions combined with `and`/`or`; groups
//! nest arbitrarily. Evaluation never fails: a condition that cannot be
//! evaluated (type mismatch, missing operand, absent property) is simply
//! false. An empty group matches everything.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{value_text, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterThanEqual,
    LessThanEqual,
    Between,
    IsEmpty,
    IsNotEmpty,
    In,
    NotIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    #[default]
    And,
    Or,
}

/// Leaf condition: one property against one operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub property: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl Condition {
    pub fn new(property: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        Self {
            property: property.into(),
            operator,
            value,
        }
    }
}

/// Either a leaf condition or a nested group. A leaf is anything with
/// `property`/`operator`/`value`; everything else parses as a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    Condition(Condition),
    Group(FilterGroup),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterGroup {
    #[serde(rename = "type", default)]
    pub kind: GroupKind,
    #[serde(default)]
    pub conditions: Vec<FilterNode>,
}

impl FilterGroup {
    pub fn all_of(conditions: Vec<Condition>) -> Self {
        Self {
            kind: GroupKind::And,
            conditions: conditions.into_iter().map(FilterNode::Condition).collect(),
        }
    }

    pub fn any_of(conditions: Vec<Condition>) -> Self {
        Self {
            kind: GroupKind::Or,
            conditions: conditions.into_iter().map(FilterNode::Condition).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Does this record satisfy the group?
    pub fn matches(&self, record: &Record) -> bool {
        match self.kind {
            GroupKind::And => self.conditions.iter().all(|node| node.matches(record)),
            GroupKind::Or => {
                // An empty `or` group still matches everything
                self.conditions.is_empty()
                    || self.conditions.iter().any(|node| node.matches(record))
            }
        }
    }
}

impl FilterNode {
    fn matches(&self, record: &Record) -> bool {
        match self {
            FilterNode::Condition(condition) => evaluate(record, condition),
            FilterNode::Group(group) => group.matches(record),
        }
    }
}

/// Keep the records satisfying the group.
pub fn apply_filters(records: &[Record], group: &FilterGroup) -> Vec<Record> {
    records
        .iter()
        .filter(|record| group.matches(record))
        .cloned()
        .collect()
}

fn evaluate(record: &Record, condition: &Condition) -> bool {
    let actual = record.value(&condition.property).unwrap_or(&Value::Null);
    let expected = &condition.value;

    match condition.operator {
        FilterOperator::Equals => actual == expected,
        FilterOperator::NotEquals => actual != expected,
        FilterOperator::Contains => lower(actual).contains(&lower(expected)),
        FilterOperator::DoesNotContain => !lower(actual).contains(&lower(expected)),
        FilterOperator::StartsWith => lower(actual).starts_with(&lower(expected)),
        FilterOperator::EndsWith => lower(actual).ends_with(&lower(expected)),
        FilterOperator::GreaterThan => compare(actual, expected) == Some(Ordering::Greater),
        FilterOperator::LessThan => compare(actual, expected) == Some(Ordering::Less),
        FilterOperator::GreaterThanEqual => {
            matches!(compare(actual, expected), Some(Ordering::Greater | Ordering::Equal))
        }
        FilterOperator::LessThanEqual => {
            matches!(compare(actual, expected), Some(Ordering::Less | Ordering::Equal))
        }
        FilterOperator::Between => match expected.as_array() {
            Some(bounds) if bounds.len() == 2 => {
                matches!(compare(actual, &bounds[0]), Some(Ordering::Greater | Ordering::Equal))
                    && matches!(compare(actual, &bounds[1]), Some(Ordering::Less | Ordering::Equal))
            }
            _ => false,
        },
        FilterOperator::IsEmpty => is_empty(actual),
        FilterOperator::IsNotEmpty => !is_empty(actual),
        FilterOperator::In => expected
            .as_array()
            .is_some_and(|items| items.contains(actual)),
        FilterOperator::NotIn => expected
            .as_array()
            .is_some_and(|items| !items.contains(actual)),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn lower(value: &Value) -> String {
    value_text(value).to_lowercase()
}

/// Ordering between two values: numbers numerically, strings
/// lexicographically, anything else incomparable.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y);
    }
    if let (Value::String(x), Value::String(y)) = (a, b) {
        return Some(x.cmp(y));
    }
    None
}
