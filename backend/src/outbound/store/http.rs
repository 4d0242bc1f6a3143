//! Reqwest-backed record store adapter.
//!
//! Speaks the PostgREST-style REST dialect exposed by hosted Postgres
//! platforms: filters travel as query parameters (`col=eq.7`,
//! `eaten_at=is.null`), mutations ask for `Prefer: return=representation`
//! so affected rows come back in the response body. This adapter owns
//! transport details only: request building, timeout and status mapping,
//! and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;

use crate::domain::ports::{Condition, Filter, RecordStore, StoreError};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the hosted record store.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Base URL of the store's REST endpoint.
    pub url: Url,
    /// Service key sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl StoreSettings {
    /// Settings with the default request timeout.
    #[must_use]
    pub fn new(url: Url, api_key: String) -> Self {
        Self {
            url,
            api_key,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Record store adapter performing REST calls against one endpoint.
pub struct HttpRecordStore {
    client: Client,
    base: Url,
    api_key: String,
}

impl HttpRecordStore {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: StoreSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        let mut base = settings.url;
        // Url::join drops the last path segment unless the base ends in '/'.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(Self {
            client,
            base,
            api_key: settings.api_key,
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.base
            .join(table)
            .map_err(|error| StoreError::transport(format!("invalid table URL: {error}")))
    }

    async fn request(
        &self,
        method: Method,
        table: &str,
        filter: Option<&Filter>,
        body: Option<&Value>,
    ) -> Result<Vec<Value>, StoreError> {
        let url = self.table_url(table)?;
        let mut request = self
            .client
            .request(method, url)
            .header("apikey", self.api_key.as_str())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(ACCEPT, "application/json")
            .header("Prefer", "return=representation");

        if let Some(filter) = filter {
            request = request.query(&filter_query_pairs(filter));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        serde_json::from_slice(bytes.as_ref())
            .map_err(|error| StoreError::decode(format!("invalid store response: {error}")))
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        self.request(Method::GET, table, Some(filter), None).await
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        let rows = self
            .request(Method::POST, table, None, Some(&row))
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::decode("insert returned no rows"))
    }

    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<Vec<Value>, StoreError> {
        self.request(Method::PATCH, table, Some(filter), Some(&patch))
            .await
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        self.request(Method::DELETE, table, Some(filter), None).await
    }
}

fn filter_query_pairs(filter: &Filter) -> Vec<(String, String)> {
    filter
        .conditions()
        .iter()
        .map(|condition| match condition {
            Condition::Eq(column, value) => (column.clone(), format!("eq.{}", render(value))),
            Condition::Gt(column, value) => (column.clone(), format!("gt.{}", render(value))),
            Condition::IsNull(column) => (column.clone(), "is.null".to_owned()),
        })
        .collect()
}

/// Render a JSON scalar the way the store's filter grammar expects it:
/// strings unquoted, everything else in its JSON form.
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn map_transport_error(error: reqwest::Error) -> StoreError {
    if error.is_timeout() {
        StoreError::transport(format!("request timed out: {error}"))
    } else {
        StoreError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StoreError {
    StoreError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
