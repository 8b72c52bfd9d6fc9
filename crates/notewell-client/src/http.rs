//! Blocking HTTP implementation of the [`Api`] trait.
//!
//! One request in flight at a time, an explicit per-request timeout, and
//! no retries. The caller suspends at the request boundary and resumes
//! on the response; nothing else runs in the meantime.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use notewell_engine::automation::Rule;
use notewell_engine::data::{FilterGroup, Record, SortRule};

use crate::api::{
    Api, ApiError, Database, DatabaseInput, DatabasePatch, Page, PageInput, RecordPayload,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpApi {
    /// Base URL with any trailing slash trimmed, validated at build time.
    base: String,
    client: Client,
}

impl HttpApi {
    /// Build a client rooted at `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base = base_url.trim_end_matches('/').to_string();
        Url::parse(&base).map_err(|e| ApiError::Transport(format!("invalid base url: {e}")))?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { base, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(&format!("{}{path}", self.base))
            .map_err(|e| ApiError::Transport(format!("invalid endpoint {path}: {e}")))
    }

    /// Records listing URL with `filters`/`sorts` as JSON-encoded query
    /// parameters.
    fn records_url(
        &self,
        database_id: i64,
        filters: &FilterGroup,
        sorts: &[SortRule],
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&format!("/api/v1/databases/{database_id}/records"))?;
        let filters = serde_json::to_string(filters).map_err(|e| ApiError::Decode(e.to_string()))?;
        let sorts = serde_json::to_string(sorts).map_err(|e| ApiError::Decode(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("filters", &filters)
            .append_pair("sorts", &sorts);
        Ok(url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        self.send(self.client.get(url))?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.client.post(url).json(body))?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.client.put(url).json(body))?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Api for HttpApi {
    fn list_pages(&self) -> Result<Vec<Page>, ApiError> {
        self.get_json(self.endpoint("/api/v1/pages")?)
    }

    fn create_page(&self, input: &PageInput) -> Result<Page, ApiError> {
        self.post_json(self.endpoint("/api/v1/pages")?, input)
    }

    fn update_page(&self, id: i64, input: &PageInput) -> Result<Page, ApiError> {
        self.put_json(self.endpoint(&format!("/api/v1/pages/{id}"))?, input)
    }

    fn list_databases(&self) -> Result<Vec<Database>, ApiError> {
        self.get_json(self.endpoint("/api/v1/databases")?)
    }

    fn create_database(&self, input: &DatabaseInput) -> Result<Database, ApiError> {
        self.post_json(self.endpoint("/api/v1/databases")?, input)
    }

    fn get_database(&self, id: i64) -> Result<Database, ApiError> {
        self.get_json(self.endpoint(&format!("/api/v1/databases/{id}"))?)
    }

    fn update_database(&self, id: i64, patch: &DatabasePatch) -> Result<Database, ApiError> {
        self.put_json(self.endpoint(&format!("/api/v1/databases/{id}"))?, patch)
    }

    fn list_records(
        &self,
        database_id: i64,
        filters: &FilterGroup,
        sorts: &[SortRule],
    ) -> Result<Vec<Record>, ApiError> {
        self.get_json(self.records_url(database_id, filters, sorts)?)
    }

    fn create_record(
        &self,
        database_id: i64,
        data: &serde_json::Map<String, Value>,
    ) -> Result<Record, ApiError> {
        let body = RecordPayload { data: data.clone() };
        self.post_json(
            self.endpoint(&format!("/api/v1/databases/{database_id}/records"))?,
            &body,
        )
    }

    fn update_record(
        &self,
        database_id: i64,
        record_id: i64,
        data: &serde_json::Map<String, Value>,
    ) -> Result<Record, ApiError> {
        let body = RecordPayload { data: data.clone() };
        self.put_json(
            self.endpoint(&format!(
                "/api/v1/databases/{database_id}/records/{record_id}"
            ))?,
            &body,
        )
    }

    fn delete_record(&self, database_id: i64, record_id: i64) -> Result<(), ApiError> {
        let url = self.endpoint(&format!(
            "/api/v1/databases/{database_id}/records/{record_id}"
        ))?;
        self.send(self.client.delete(url))?;
        Ok(())
    }

    fn save_rule(&self, rule: &Rule) -> Result<(), ApiError> {
        let url = self.endpoint("/api/v1/automation/rules")?;
        self.send(self.client.post(url).json(rule))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notewell_engine::data::{Condition, FilterOperator, SortKind};
    use serde_json::json;

    fn api() -> HttpApi {
        HttpApi::new("http://localhost:8000").unwrap()
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpApi::new("not a url"),
            Err(ApiError::Transport(_))
        ));
    }

    #[test]
    fn endpoints_keep_the_version_prefix() {
        let url = api().endpoint("/api/v1/pages").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/pages");

        let url = api().endpoint("/api/v1/databases/7/records/3").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/databases/7/records/3"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let api = HttpApi::new("http://localhost:8000/").unwrap();
        let url = api.endpoint("/api/v1/pages").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/pages");
    }

    #[test]
    fn records_url_encodes_filters_and_sorts_as_json() {
        let filters = FilterGroup::all_of(vec![Condition::new(
            "status",
            FilterOperator::Equals,
            json!("open"),
        )]);
        let sorts = vec![SortRule::ascending("due", SortKind::Date)];

        let url = api().records_url(12, &filters, &sorts).unwrap();
        assert!(url.path().ends_with("/databases/12/records"));

        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        let filters_param: serde_json::Value =
            serde_json::from_str(&params["filters"]).unwrap();
        assert_eq!(filters_param["type"], "and");
        assert_eq!(filters_param["conditions"][0]["property"], "status");

        let sorts_param: serde_json::Value = serde_json::from_str(&params["sorts"]).unwrap();
        assert_eq!(sorts_param[0]["property"], "due");
        assert_eq!(sorts_param[0]["direction"], "ascending");
    }
}
