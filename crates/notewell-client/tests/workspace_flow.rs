//! Workspace flows against an in-memory backend: the update round trip,
//! the failure/alert policy, and the page save transitions.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use notewell_client::api::{
    Api, ApiError, Database, DatabaseInput, DatabasePatch, Page, PageContent, PageInput,
};
use notewell_client::workspace::{AutomationPanel, DatabaseWorkspace};
use notewell_client::PageSession;
use notewell_engine::automation::{Rule, RuleDraft, TriggerKind};
use notewell_engine::data::{FilterGroup, PropertyKind, PropertySpec, Record, Schema, SortRule, ViewMode};
use notewell_engine::editor::{BlockKind, BlockRecord};

/// Scripted backend. Shared via `Rc` so tests can inspect traffic after
/// handing a clone to the manager under test.
#[derive(Clone, Default)]
struct FakeApi {
    inner: Rc<RefCell<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    database: Option<Database>,
    records: Vec<Record>,
    /// `(description, body)` per mutating call, in order.
    calls: Vec<(String, Value)>,
    fail_next: bool,
    next_page_id: i64,
}

impl FakeApi {
    fn with_database(database: Database, records: Vec<Record>) -> Self {
        let api = FakeApi::default();
        {
            let mut state = api.inner.borrow_mut();
            state.database = Some(database);
            state.records = records;
            state.next_page_id = 1;
        }
        api
    }

    fn fail_next(&self) {
        self.inner.borrow_mut().fail_next = true;
    }

    fn calls(&self) -> Vec<(String, Value)> {
        self.inner.borrow().calls.clone()
    }

    fn take_failure(&self) -> Result<(), ApiError> {
        let mut state = self.inner.borrow_mut();
        if state.fail_next {
            state.fail_next = false;
            return Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }
}

impl Api for FakeApi {
    fn list_pages(&self) -> Result<Vec<Page>, ApiError> {
        Ok(Vec::new())
    }

    fn create_page(&self, input: &PageInput) -> Result<Page, ApiError> {
        self.take_failure()?;
        let mut state = self.inner.borrow_mut();
        let id = state.next_page_id;
        state.next_page_id += 1;
        state
            .calls
            .push(("POST pages".to_string(), serde_json::to_value(input).unwrap()));
        Ok(Page {
            id,
            title: input.title.clone(),
            content: input.content.clone(),
            parent_id: input.parent_id,
        })
    }

    fn update_page(&self, id: i64, input: &PageInput) -> Result<Page, ApiError> {
        self.take_failure()?;
        self.inner.borrow_mut().calls.push((
            format!("PUT pages/{id}"),
            serde_json::to_value(input).unwrap(),
        ));
        Ok(Page {
            id,
            title: input.title.clone(),
            content: input.content.clone(),
            parent_id: input.parent_id,
        })
    }

    fn list_databases(&self) -> Result<Vec<Database>, ApiError> {
        Ok(self.inner.borrow().database.clone().into_iter().collect())
    }

    fn create_database(&self, input: &DatabaseInput) -> Result<Database, ApiError> {
        Ok(Database {
            id: 1,
            name: input.name.clone(),
            description: input.description.clone(),
            schema: input.schema.clone(),
        })
    }

    fn get_database(&self, _id: i64) -> Result<Database, ApiError> {
        self.take_failure()?;
        self.inner
            .borrow()
            .database
            .clone()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: "no database".to_string(),
            })
    }

    fn update_database(&self, id: i64, patch: &DatabasePatch) -> Result<Database, ApiError> {
        self.take_failure()?;
        self.inner.borrow_mut().calls.push((
            format!("PUT databases/{id}"),
            serde_json::to_value(patch).unwrap(),
        ));
        self.get_database(id)
    }

    fn list_records(
        &self,
        _database_id: i64,
        _filters: &FilterGroup,
        _sorts: &[SortRule],
    ) -> Result<Vec<Record>, ApiError> {
        self.take_failure()?;
        Ok(self.inner.borrow().records.clone())
    }

    fn create_record(
        &self,
        database_id: i64,
        data: &serde_json::Map<String, Value>,
    ) -> Result<Record, ApiError> {
        self.take_failure()?;
        let mut state = self.inner.borrow_mut();
        state.calls.push((
            format!("POST databases/{database_id}/records"),
            json!({"data": data}),
        ));
        let record = Record::new(100 + state.records.len() as i64, data.clone());
        state.records.push(record.clone());
        Ok(record)
    }

    fn update_record(
        &self,
        database_id: i64,
        record_id: i64,
        data: &serde_json::Map<String, Value>,
    ) -> Result<Record, ApiError> {
        self.take_failure()?;
        let mut state = self.inner.borrow_mut();
        state.calls.push((
            format!("PUT databases/{database_id}/records/{record_id}"),
            json!({"data": data}),
        ));
        let record = Record::new(record_id, data.clone());
        if let Some(existing) = state.records.iter_mut().find(|r| r.id == record_id) {
            *existing = record.clone();
        }
        Ok(record)
    }

    fn delete_record(&self, database_id: i64, record_id: i64) -> Result<(), ApiError> {
        self.take_failure()?;
        let mut state = self.inner.borrow_mut();
        state.calls.push((
            format!("DELETE databases/{database_id}/records/{record_id}"),
            Value::Null,
        ));
        state.records.retain(|r| r.id != record_id);
        Ok(())
    }

    fn save_rule(&self, rule: &Rule) -> Result<(), ApiError> {
        self.take_failure()?;
        self.inner.borrow_mut().calls.push((
            "POST automation/rules".to_string(),
            serde_json::to_value(rule).unwrap(),
        ));
        Ok(())
    }
}

fn status_spec() -> PropertySpec {
    PropertySpec {
        id: "status".to_string(),
        name: "Status".to_string(),
        kind: PropertyKind::Select,
        options: Some(vec!["todo".to_string(), "done".to_string()]),
        number_format: None,
        date_format: None,
    }
}

fn task_database() -> Database {
    let mut schema = Schema::new();
    schema.insert("status".to_string(), status_spec());
    Database {
        id: 7,
        name: "Tasks".to_string(),
        description: Some("Team tasks".to_string()),
        schema,
    }
}

fn record(id: i64, status: &str) -> Record {
    Record::new(id, json!({"status": status}).as_object().unwrap().clone())
}

// ============ Record update round trip (end-to-end property) ============

#[test]
fn record_form_submit_puts_wrapped_data_body() {
    let api = FakeApi::with_database(task_database(), vec![record(1, "todo")]);
    let mut workspace = DatabaseWorkspace::new(api.clone(), 7);
    workspace.load();

    let form = json!({"status": "done"}).as_object().unwrap().clone();
    workspace.submit_record_update(1, form);

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "PUT databases/7/records/1");
    assert_eq!(calls[0].1, json!({"data": {"status": "done"}}));

    // Success path: no alert, records reloaded with the new value
    assert_eq!(workspace.alert(), None);
    assert_eq!(workspace.records()[0].value("status"), Some(&json!("done")));
}

#[test]
fn failed_update_alerts_and_leaves_records_untouched() {
    let api = FakeApi::with_database(task_database(), vec![record(1, "todo")]);
    let mut workspace = DatabaseWorkspace::new(api.clone(), 7);
    workspace.load();
    let before = workspace.records().to_vec();

    api.fail_next();
    let form = json!({"status": "done"}).as_object().unwrap().clone();
    workspace.submit_record_update(1, form);

    assert_eq!(workspace.take_alert().as_deref(), Some("Failed to update record."));
    assert_eq!(workspace.records(), &before[..]);
    // The failed call never reached the backend's mutation log
    assert!(api.calls().is_empty());
}

// ============ Loading and views ============

#[test]
fn load_captures_schema_and_records() {
    let api = FakeApi::with_database(task_database(), vec![record(1, "todo"), record(2, "done")]);
    let mut workspace = DatabaseWorkspace::new(api, 7);
    workspace.load();

    assert_eq!(workspace.name(), "Tasks");
    assert_eq!(workspace.description(), Some("Team tasks"));
    assert_eq!(workspace.records().len(), 2);
    assert_eq!(workspace.view(), ViewMode::Table);

    workspace.switch_view(ViewMode::Board);
    let groups = workspace.board_groups().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].option, "todo");
    assert_eq!(groups[0].records.len(), 1);
    assert_eq!(groups[1].records.len(), 1);
}

#[test]
fn failed_load_alerts_and_skips_record_fetch() {
    let api = FakeApi::with_database(task_database(), vec![record(1, "todo")]);
    api.fail_next();
    let mut workspace = DatabaseWorkspace::new(api, 7);
    workspace.load();

    assert_eq!(workspace.take_alert().as_deref(), Some("Failed to load database."));
    assert!(workspace.records().is_empty());
    assert_eq!(workspace.name(), "");
}

#[test]
fn create_and_delete_reload_the_list() {
    let api = FakeApi::with_database(task_database(), vec![]);
    let mut workspace = DatabaseWorkspace::new(api.clone(), 7);
    workspace.load();

    workspace.submit_new_record(json!({"status": "todo"}).as_object().unwrap().clone());
    assert_eq!(workspace.records().len(), 1);

    let id = workspace.records()[0].id;
    workspace.delete_record(id);
    assert!(workspace.records().is_empty());
    assert_eq!(workspace.alert(), None);
}

// ============ Automation save flow ============

#[test]
fn rule_save_posts_the_persisted_layout() {
    let api = FakeApi::default();
    let mut panel = AutomationPanel::new(api.clone());

    let rule = RuleDraft::new("archive stale")
        .trigger(TriggerKind::Scheduled)
        .every("1d")
        .finish()
        .unwrap();
    assert!(panel.save(&rule));
    assert_eq!(panel.take_alert().as_deref(), Some("Automation rule saved."));

    let calls = api.calls();
    assert_eq!(calls[0].0, "POST automation/rules");
    assert_eq!(calls[0].1["trigger"], json!({"type": "scheduled", "schedule": {"interval": "1d"}}));
    assert_eq!(calls[0].1["enabled"], json!(true));
}

#[test]
fn failed_rule_save_alerts() {
    let api = FakeApi::default();
    api.fail_next();
    let mut panel = AutomationPanel::new(api);

    let rule = RuleDraft::new("r").trigger(TriggerKind::OnCreate).finish().unwrap();
    assert!(!panel.save(&rule));
    assert_eq!(
        panel.take_alert().as_deref(),
        Some("Failed to save automation rule.")
    );
}

// ============ Page session ============

#[test]
fn page_save_creates_then_updates() {
    let api = FakeApi::default();
    api.inner.borrow_mut().next_page_id = 42;
    let mut session = PageSession::new(api.clone(), "Meeting notes");
    session
        .editor_mut()
        .document_mut()
        .push(BlockKind::Heading1, "Agenda");

    assert!(session.save());
    assert_eq!(session.page_id(), Some(42));

    session
        .editor_mut()
        .document_mut()
        .push(BlockKind::BulletList, "budget");
    assert!(session.save());

    let calls = api.calls();
    assert_eq!(calls[0].0, "POST pages");
    assert_eq!(calls[1].0, "PUT pages/42");
    assert_eq!(
        calls[1].1["content"]["blocks"],
        json!([
            {"type": "heading_1", "content": "Agenda"},
            {"type": "bullet_list", "content": "budget"}
        ])
    );
}

#[test]
fn page_open_hydrates_the_editor() {
    let api = FakeApi::default();
    let page = Page {
        id: 9,
        title: "Loaded".to_string(),
        content: PageContent {
            blocks: vec![BlockRecord::new(BlockKind::Code, "x = 1")],
        },
        parent_id: None,
    };
    let session = PageSession::open(api, &page);
    assert_eq!(session.title(), "Loaded");
    assert_eq!(session.editor().document().get(0).unwrap().kind, BlockKind::Code);
}

#[test]
fn failed_page_save_alerts_and_keeps_unsaved_state() {
    let api = FakeApi::default();
    api.fail_next();
    let mut session = PageSession::new(api, "Draft");
    assert!(!session.save());
    assert_eq!(session.take_alert().as_deref(), Some("Failed to save page."));
    assert_eq!(session.page_id(), None);
}
