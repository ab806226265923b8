//! HTTP client for the Cloudflare D1 REST API.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::types::{DatabaseInfo, Envelope, QueryResponse, ResultSet};
use super::{D1Api, DatabaseDirectory, DatabaseLifecycle, QueryExecution};
use crate::config::{ApiConfig, Credentials};
use crate::error::{ConsoleError, Result};

/// D1 REST API client.
#[derive(Debug, Clone)]
pub struct D1Client {
    client: Client,
    base_url: Url,
    credentials: Credentials,
    page_size: usize,
}

impl D1Client {
    /// Creates a new client for the given API settings and credentials.
    pub fn new(config: &ApiConfig, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConsoleError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            credentials,
            page_size: config.page_size.max(1),
        })
    }

    /// Builds the full URL for an API path such as `/user/tokens/verify`.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn database_path(&self) -> String {
        format!("/accounts/{}/d1/database", self.credentials.account_id)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        self.client
            .request(method, self.endpoint(path))
            .bearer_auth(&self.credentials.api_token)
            .header("Content-Type", "application/json")
    }

    /// Sends a request and returns the status and raw body.
    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ConsoleError::api("Request timed out. Try again.")
            } else if e.is_connect() {
                ConsoleError::api("Failed to connect to the D1 API. Check your network.")
            } else {
                ConsoleError::api(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ConsoleError::api(format!("Failed to read response: {e}")))?;
        debug!("-> {}", status);
        Ok((status, body))
    }

    /// Sends a request and decodes the standard envelope, mapping failures to `Api` errors.
    async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<(StatusCode, Envelope<T>)> {
        let (status, body) = self.send(request).await?;
        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            ConsoleError::api(format!("Unexpected response ({status}): {e}"))
        })?;
        Ok((status, envelope))
    }

    /// Error message for a failed call: first envelope error, else the status text.
    fn failure_message(status: StatusCode, body: &str) -> String {
        serde_json::from_str::<Envelope<Value>>(body)
            .ok()
            .and_then(|envelope| envelope.first_error().map(str::to_string))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string())
            })
    }
}

#[async_trait]
impl DatabaseDirectory for D1Client {
    async fn list_databases(&self) -> Result<Vec<DatabaseInfo>> {
        let mut databases = Vec::new();
        let mut page = 1usize;

        loop {
            let path = format!(
                "{}?per_page={}&page={}",
                self.database_path(),
                self.page_size,
                page
            );
            let (status, envelope) = self
                .send_envelope::<Vec<DatabaseInfo>>(self.request(Method::GET, &path))
                .await?;

            if !status.is_success() || !envelope.success {
                let msg = envelope
                    .first_error()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string());
                return Err(ConsoleError::api(format!("Failed to fetch databases: {msg}")));
            }

            let batch = envelope.result.unwrap_or_default();
            let fetched = batch.len();
            databases.extend(batch);

            if fetched < self.page_size {
                break;
            }
            page += 1;
        }

        Ok(databases)
    }
}

#[async_trait]
impl DatabaseLifecycle for D1Client {
    async fn create_database(&self, name: &str) -> Result<bool> {
        let request = self
            .request(Method::POST, &self.database_path())
            .json(&serde_json::json!({ "name": name }));
        let (status, envelope) = self.send_envelope::<Value>(request).await?;

        if let Some(msg) = envelope.first_error() {
            warn!("Create database {name} failed: {msg}");
        }
        Ok(status.is_success() && envelope.success)
    }

    async fn delete_database(&self, uuid: &str) -> Result<bool> {
        let path = format!("{}/{}", self.database_path(), uuid);
        let (status, body) = self.send(self.request(Method::DELETE, &path)).await?;

        if !status.is_success() {
            warn!(
                "Delete database {uuid} failed: {}",
                Self::failure_message(status, &body)
            );
        }
        Ok(status.is_success())
    }
}

#[async_trait]
impl QueryExecution for D1Client {
    async fn execute(&self, uuid: &str, sql: &str) -> Result<QueryResponse> {
        let path = format!("{}/{}/query", self.database_path(), uuid);
        let request = self
            .request(Method::POST, &path)
            .json(&serde_json::json!({ "sql": sql }));

        let (status, body) = self
            .send(request)
            .await
            .map_err(|e| ConsoleError::remote(e.to_string()))?;

        if !status.is_success() {
            return Err(ConsoleError::remote(Self::failure_message(status, &body)));
        }

        let envelope: Value = serde_json::from_str(&body)
            .map_err(|e| ConsoleError::remote(format!("Failed to parse response: {e}")))?;
        let result_sets: Vec<ResultSet> = match envelope.get("result") {
            Some(result) if !result.is_null() => serde_json::from_value(result.clone())
                .map_err(|e| ConsoleError::remote(format!("Failed to parse results: {e}")))?,
            _ => Vec::new(),
        };

        Ok(QueryResponse {
            result_sets,
            envelope,
        })
    }
}

#[async_trait]
impl D1Api for D1Client {
    async fn verify_token(&self) -> Result<bool> {
        let (status, _) = self
            .send(self.request(Method::GET, "/user/tokens/verify"))
            .await?;
        Ok(status.is_success())
    }
}
