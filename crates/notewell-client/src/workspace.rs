//! Stateful managers tying engine models to backend calls.
//!
//! [`DatabaseWorkspace`] owns everything one database screen shows: the
//! schema, the loaded records, the active filters/sorts, and the current
//! view mode. It is an explicitly constructed value; handlers get a
//! `&mut` reference, there is no process-wide manager.
//!
//! Failure policy, applied uniformly: the error is logged, converted
//! into a blocking user-facing alert message, and swallowed. Nothing is
//! retried, and no local state beyond the alert changes on failure.

use log::error;
use serde_json::Value;

use notewell_engine::automation::Rule;
use notewell_engine::data::{
    board_groups, calendar_days, BoardGroup, FilterGroup, Record, Schema, SortRule, ViewMode,
};

use crate::api::{Api, DatabasePatch};

pub struct DatabaseWorkspace<A: Api> {
    api: A,
    database_id: i64,
    name: String,
    description: Option<String>,
    schema: Schema,
    records: Vec<Record>,
    filters: FilterGroup,
    sorts: Vec<SortRule>,
    view: ViewMode,
    alert: Option<String>,
}

impl<A: Api> DatabaseWorkspace<A> {
    pub fn new(api: A, database_id: i64) -> Self {
        Self {
            api,
            database_id,
            name: String::new(),
            description: None,
            schema: Schema::new(),
            records: Vec::new(),
            filters: FilterGroup::default(),
            sorts: Vec::new(),
            view: ViewMode::default(),
            alert: None,
        }
    }

    // ---- read access ----

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// The pending blocking alert, if the last operation failed.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Consume the pending alert (the frontend shows it once).
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    // ---- loading ----

    /// Fetch the database metadata and schema, then its records.
    pub fn load(&mut self) {
        match self.api.get_database(self.database_id) {
            Ok(database) => {
                self.name = database.name;
                self.description = database.description;
                self.schema = database.schema;
            }
            Err(err) => {
                error!("error loading database {}: {err}", self.database_id);
                self.alert = Some("Failed to load database.".to_string());
                return;
            }
        }
        self.load_records();
    }

    /// Re-fetch records with the active filters and sorts. On failure
    /// the current record list stays as it was.
    pub fn load_records(&mut self) {
        match self
            .api
            .list_records(self.database_id, &self.filters, &self.sorts)
        {
            Ok(records) => self.records = records,
            Err(err) => {
                error!("error loading records: {err}");
                self.alert = Some("Failed to load records.".to_string());
            }
        }
    }

    // ---- record CRUD ----

    /// Submit the new-record form. On success the record list reloads;
    /// on failure it is left untouched.
    pub fn submit_new_record(&mut self, data: serde_json::Map<String, Value>) {
        match self.api.create_record(self.database_id, &data) {
            Ok(_) => self.load_records(),
            Err(err) => {
                error!("error creating record: {err}");
                self.alert = Some("Failed to create record.".to_string());
            }
        }
    }

    /// Submit the edit-record form as a `{data: {...}}` update. On
    /// success the record list reloads; on failure it is left untouched.
    pub fn submit_record_update(&mut self, record_id: i64, data: serde_json::Map<String, Value>) {
        match self.api.update_record(self.database_id, record_id, &data) {
            Ok(_) => self.load_records(),
            Err(err) => {
                error!("error updating record {record_id}: {err}");
                self.alert = Some("Failed to update record.".to_string());
            }
        }
    }

    pub fn delete_record(&mut self, record_id: i64) {
        match self.api.delete_record(self.database_id, record_id) {
            Ok(()) => self.load_records(),
            Err(err) => {
                error!("error deleting record {record_id}: {err}");
                self.alert = Some("Failed to delete record.".to_string());
            }
        }
    }

    // ---- database metadata ----

    /// Rename the database (title blur handler).
    pub fn rename(&mut self, name: impl Into<String>) {
        let name = name.into();
        let patch = DatabasePatch {
            name: Some(name.clone()),
            description: None,
        };
        match self.api.update_database(self.database_id, &patch) {
            Ok(_) => self.name = name,
            Err(err) => {
                error!("error updating database: {err}");
                self.alert = Some("Failed to update database.".to_string());
            }
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        let patch = DatabasePatch {
            name: None,
            description: Some(description.clone()),
        };
        match self.api.update_database(self.database_id, &patch) {
            Ok(_) => self.description = Some(description),
            Err(err) => {
                error!("error updating database: {err}");
                self.alert = Some("Failed to update database.".to_string());
            }
        }
    }

    // ---- views, filters, sorts ----

    /// Pure state change; the caller re-renders with the same records.
    pub fn switch_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    /// Replace the active filters. Takes effect on the next
    /// [`Self::load_records`].
    pub fn set_filters(&mut self, filters: FilterGroup) {
        self.filters = filters;
    }

    pub fn set_sorts(&mut self, sorts: Vec<SortRule>) {
        self.sorts = sorts;
    }

    /// Board grouping over the loaded records; `None` without a select
    /// property.
    pub fn board_groups(&self) -> Option<Vec<BoardGroup>> {
        board_groups(&self.schema, &self.records)
    }

    /// Calendar grouping over the loaded records; `None` without a date
    /// property.
    pub fn calendar_days(
        &self,
    ) -> Option<std::collections::BTreeMap<String, Vec<Record>>> {
        calendar_days(&self.schema, &self.records)
    }
}

/// Save flow for the automation-rule builder. Success also surfaces as
/// an alert, mirroring the failure path.
pub struct AutomationPanel<A: Api> {
    api: A,
    alert: Option<String>,
}

impl<A: Api> AutomationPanel<A> {
    pub fn new(api: A) -> Self {
        Self { api, alert: None }
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Persist a drafted rule. Returns whether the save succeeded.
    pub fn save(&mut self, rule: &Rule) -> bool {
        match self.api.save_rule(rule) {
            Ok(()) => {
                self.alert = Some("Automation rule saved.".to_string());
                true
            }
            Err(err) => {
                error!("error saving rule: {err}");
                self.alert = Some("Failed to save automation rule.".to_string());
                false
            }
        }
    }
}
