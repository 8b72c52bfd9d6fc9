//! Backend API surface: payload types, the error taxonomy, and the
//! [`Api`] trait the workspace managers talk through. The HTTP
//! implementation lives in [`crate::http`]; tests substitute their own.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use notewell_engine::automation::Rule;
use notewell_engine::data::{FilterGroup, Record, Schema, SortRule};
use notewell_engine::editor::BlockRecord;

/// Failure modes of one backend call. No transient/permanent
/// distinction is made and nothing is retried; callers log, alert the
/// user, and move on.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not decode as the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// A page: a title plus the block-record content of its editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: PageContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
}

/// Body for page create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    pub title: String,
    pub content: PageContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Schema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: Schema,
}

/// Partial database update: only the present fields change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatabasePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Record create/update bodies wrap the property map: `{"data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub data: serde_json::Map<String, Value>,
}

/// The backend operations the client consumes. One call, one round
/// trip; no caching, no retries, no cancellation.
pub trait Api {
    fn list_pages(&self) -> Result<Vec<Page>, ApiError>;
    fn create_page(&self, input: &PageInput) -> Result<Page, ApiError>;
    fn update_page(&self, id: i64, input: &PageInput) -> Result<Page, ApiError>;

    fn list_databases(&self) -> Result<Vec<Database>, ApiError>;
    fn create_database(&self, input: &DatabaseInput) -> Result<Database, ApiError>;
    fn get_database(&self, id: i64) -> Result<Database, ApiError>;
    fn update_database(&self, id: i64, patch: &DatabasePatch) -> Result<Database, ApiError>;

    fn list_records(
        &self,
        database_id: i64,
        filters: &FilterGroup,
        sorts: &[SortRule],
    ) -> Result<Vec<Record>, ApiError>;
    fn create_record(
        &self,
        database_id: i64,
        data: &serde_json::Map<String, Value>,
    ) -> Result<Record, ApiError>;
    fn update_record(
        &self,
        database_id: i64,
        record_id: i64,
        data: &serde_json::Map<String, Value>,
    ) -> Result<Record, ApiError>;
    fn delete_record(&self, database_id: i64, record_id: i64) -> Result<(), ApiError>;

    fn save_rule(&self, rule: &Rule) -> Result<(), ApiError>;
}
