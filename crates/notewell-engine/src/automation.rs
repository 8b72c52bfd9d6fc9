//! Automation rules: trigger + conditions + actions.
//!
//! The wire layout is exactly what the backend persists:
//!
//! ```json
//! { "name": "...",
//!   "trigger": { "type": "scheduled", "schedule": { "interval": "1h" } },
//!   "conditions": { "type": "and", "conditions": [ ... ] },
//!   "actions": [ { "type": "update_record", "data": { ... } } ],
//!   "enabled": true }
//! ```
//!
//! [`RuleDraft`] mirrors the rule-builder form: conditions accumulate
//! into a flat `and` group, and drafting an `api_call` action parses the
//! free-text JSON body up front so malformed input surfaces as a typed
//! error instead of blowing up at save time.

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::data::{Condition, FilterGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    OnCreate,
    OnUpdate,
    OnDelete,
    Scheduled,
    ConditionMet,
}

/// Recurrence of a `scheduled` trigger. The interval is `<n><m|h|d>`,
/// e.g. `"30m"`, `"1h"`, `"7d"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub interval: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    Email,
    Webhook,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub channel: NotificationChannel,
    /// Email address or webhook URL.
    pub to: String,
    pub subject: String,
    /// May reference record fields as `{{field}}`.
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

/// One rule action, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    UpdateRecord {
        /// Property id → new value.
        data: serde_json::Map<String, Value>,
    },
    CreateRecord {
        data: serde_json::Map<String, Value>,
    },
    SendNotification {
        template: NotificationTemplate,
    },
    ApiCall {
        method: HttpMethod,
        url: String,
        headers: IndexMap<String, String>,
        data: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub trigger: Trigger,
    pub conditions: FilterGroup,
    pub actions: Vec<Action>,
    pub enabled: bool,
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid interval `{0}`: expected <number><m|h|d>")]
    InvalidInterval(String),
    #[error("invalid request body JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("scheduled trigger requires an interval")]
    MissingInterval,
}

/// Parse a schedule interval (`"30m"`, `"1h"`, `"7d"`) into a duration.
pub fn parse_interval(interval: &str) -> Result<Duration, RuleError> {
    let invalid = || RuleError::InvalidInterval(interval.to_string());

    let (number, unit) = interval.split_at(interval.len().saturating_sub(1));
    let value: u64 = number.parse().map_err(|_| invalid())?;
    let seconds = match unit.to_ascii_lowercase().as_str() {
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return Err(invalid()),
    };
    Ok(Duration::from_secs(value * seconds))
}

/// Substitute `{{field}}` references in a notification message with
/// values from the record data. Unknown fields are left verbatim.
pub fn expand_template(message: &str, data: &serde_json::Map<String, Value>) -> String {
    let mut out = message.to_string();
    for (field, value) in data {
        let needle = format!("{{{{{field}}}}}");
        if out.contains(&needle) {
            out = out.replace(&needle, &crate::data::value_text(value));
        }
    }
    out
}

/// Accumulates rule-builder form state into a [`Rule`].
#[derive(Debug, Clone, Default)]
pub struct RuleDraft {
    name: String,
    trigger_kind: Option<TriggerKind>,
    interval: Option<String>,
    conditions: Vec<Condition>,
    actions: Vec<Action>,
}

impl RuleDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn trigger(mut self, kind: TriggerKind) -> Self {
        self.trigger_kind = Some(kind);
        self
    }

    pub fn every(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Draft an `api_call` action from the form's free-text body field.
    /// Malformed JSON is a [`RuleError::InvalidBody`]; an empty body
    /// defaults to `{}`.
    pub fn api_call(
        self,
        method: HttpMethod,
        url: impl Into<String>,
        headers: IndexMap<String, String>,
        body_text: &str,
    ) -> Result<Self, RuleError> {
        let data = if body_text.trim().is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(body_text)?
        };
        Ok(self.action(Action::ApiCall {
            method,
            url: url.into(),
            headers,
            data,
        }))
    }

    /// Assemble the rule. Conditions become a flat `and` group; a
    /// `scheduled` trigger must carry a parseable interval.
    pub fn finish(self) -> Result<Rule, RuleError> {
        let kind = self.trigger_kind.unwrap_or(TriggerKind::OnCreate);

        let schedule = match (kind, self.interval) {
            (TriggerKind::Scheduled, Some(interval)) => {
                parse_interval(&interval)?;
                Some(Schedule { interval })
            }
            (TriggerKind::Scheduled, None) => return Err(RuleError::MissingInterval),
            (_, _) => None,
        };

        Ok(Rule {
            name: self.name,
            trigger: Trigger { kind, schedule },
            conditions: FilterGroup::all_of(self.conditions),
            actions: self.actions,
            enabled: true,
        })
    }
}
