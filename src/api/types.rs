//! Wire types for the D1 REST API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A row as returned by the service: column name to value, in column order.
pub type Row = Map<String, Value>;

/// A database as listed by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub uuid: String,
    pub name: String,
}

impl DatabaseInfo {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
        }
    }
}

/// Result of one statement within an executed batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Rows produced by the statement.
    #[serde(default)]
    pub results: Vec<Row>,

    /// Whether the statement succeeded.
    #[serde(default = "default_success")]
    pub success: bool,

    /// Execution metadata (duration, rows written, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,

    /// Per-statement error, if the service reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn default_success() -> bool {
    true
}

impl ResultSet {
    /// Creates a successful result set with the given rows.
    pub fn with_rows(results: Vec<Row>) -> Self {
        Self {
            results,
            success: true,
            meta: None,
            error: None,
        }
    }

    /// Creates a failed result set.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            success: false,
            meta: None,
            error: Some(error.into()),
        }
    }
}

/// Successful response of a query call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    /// One entry per statement in the submitted batch, in order.
    pub result_sets: Vec<ResultSet>,

    /// The complete response envelope, kept for `json-all` output.
    pub envelope: Value,
}

impl QueryResponse {
    /// Builds a response whose envelope mirrors the result sets.
    pub fn from_result_sets(result_sets: Vec<ResultSet>) -> Self {
        let envelope = serde_json::json!({
            "result": result_sets,
            "success": true,
            "errors": [],
            "messages": [],
        });
        Self {
            result_sets,
            envelope,
        }
    }
}

/// Standard Cloudflare v4 response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    pub result: Option<T>,
}

/// An entry of an envelope's `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    pub message: String,
}

impl<T> Envelope<T> {
    /// First error message, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}
