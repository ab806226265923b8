//! In-memory D1 service for testing.
//!
//! Records every call so tests can assert on exactly what the session sent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::types::{DatabaseInfo, QueryResponse, ResultSet, Row};
use super::{D1Api, DatabaseDirectory, DatabaseLifecycle, QueryExecution};
use crate::error::{ConsoleError, Result};

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    VerifyToken,
    List,
    FindByName(String),
    Create(String),
    Delete(String),
    Execute { uuid: String, sql: String },
}

#[derive(Debug, Default)]
struct MockState {
    databases: Vec<DatabaseInfo>,
    calls: Vec<ApiCall>,
    rows: HashMap<String, Vec<Row>>,
    failures: HashMap<String, String>,
    token_valid: bool,
    next_id: usize,
}

/// Mock service that keeps databases in memory and returns canned rows.
///
/// Cloning shares the underlying state, so a test can keep a handle while the
/// session owns another.
#[derive(Debug, Clone)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    /// Creates a mock with no databases and a valid token.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                token_valid: true,
                ..Default::default()
            })),
        }
    }

    /// Adds an existing database.
    pub fn with_database(self, uuid: impl Into<String>, name: impl Into<String>) -> Self {
        self.lock().databases.push(DatabaseInfo::new(uuid, name));
        self
    }

    /// Returns `rows` for any executed statement equal to `sql` (case-insensitive).
    pub fn with_rows(self, sql: impl Into<String>, rows: Vec<Row>) -> Self {
        let sql: String = sql.into();
        self.lock().rows.insert(sql.to_uppercase(), rows);
        self
    }

    /// Makes any batch containing `sql` fail with `error`.
    pub fn with_failure(self, sql: impl Into<String>, error: impl Into<String>) -> Self {
        let sql: String = sql.into();
        self.lock().failures.insert(sql.to_uppercase(), error.into());
        self
    }

    /// Makes token verification fail.
    pub fn with_invalid_token(self) -> Self {
        self.lock().token_valid = false;
        self
    }

    /// Returns every call received so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Returns only the execute calls as `(uuid, sql)` pairs.
    pub fn executed(&self) -> Vec<(String, String)> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                ApiCall::Execute { uuid, sql } => Some((uuid.clone(), sql.clone())),
                _ => None,
            })
            .collect()
    }

    /// Returns the current database names.
    pub fn database_names(&self) -> Vec<String> {
        self.lock()
            .databases
            .iter()
            .map(|db| db.name.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the recorded calls from others.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DatabaseDirectory for MockApi {
    async fn list_databases(&self) -> Result<Vec<DatabaseInfo>> {
        let mut state = self.lock();
        state.calls.push(ApiCall::List);
        Ok(state.databases.clone())
    }

    async fn find_database(&self, name: &str) -> Result<Option<DatabaseInfo>> {
        let mut state = self.lock();
        state.calls.push(ApiCall::FindByName(name.to_string()));
        Ok(state.databases.iter().find(|db| db.name == name).cloned())
    }
}

#[async_trait]
impl DatabaseLifecycle for MockApi {
    async fn create_database(&self, name: &str) -> Result<bool> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Create(name.to_string()));
        if state.databases.iter().any(|db| db.name == name) {
            return Ok(false);
        }
        state.next_id += 1;
        let uuid = format!("mock-uuid-{}", state.next_id);
        state.databases.push(DatabaseInfo::new(uuid, name));
        Ok(true)
    }

    async fn delete_database(&self, uuid: &str) -> Result<bool> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Delete(uuid.to_string()));
        let before = state.databases.len();
        state.databases.retain(|db| db.uuid != uuid);
        Ok(state.databases.len() < before)
    }
}

#[async_trait]
impl QueryExecution for MockApi {
    async fn execute(&self, uuid: &str, sql: &str) -> Result<QueryResponse> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Execute {
            uuid: uuid.to_string(),
            sql: sql.to_string(),
        });

        if !state.databases.iter().any(|db| db.uuid == uuid) {
            return Err(ConsoleError::remote(format!("Database {uuid} does not exist")));
        }

        let statements: Vec<String> = sql
            .split(';')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        if let Some(error) = statements.iter().find_map(|s| state.failures.get(s)) {
            return Err(ConsoleError::remote(error.clone()));
        }

        let result_sets = statements
            .iter()
            .map(|s| ResultSet::with_rows(state.rows.get(s).cloned().unwrap_or_default()))
            .collect();
        Ok(QueryResponse::from_result_sets(result_sets))
    }
}

#[async_trait]
impl D1Api for MockApi {
    async fn verify_token(&self) -> Result<bool> {
        let mut state = self.lock();
        state.calls.push(ApiCall::VerifyToken);
        Ok(state.token_valid)
    }
}
