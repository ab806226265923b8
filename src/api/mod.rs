//! Remote D1 service abstraction.
//!
//! The console talks to the service through three narrow traits so the
//! session engine can be driven by the HTTP client in production and by a
//! recording mock in tests.

mod client;
mod mock;
mod types;

pub use client::D1Client;
pub use mock::{ApiCall, MockApi};
pub use types::{ApiMessage, DatabaseInfo, Envelope, QueryResponse, ResultSet, Row};

use crate::error::Result;
use async_trait::async_trait;

/// Lists and looks up databases.
#[async_trait]
pub trait DatabaseDirectory: Send + Sync {
    /// Returns every database in the account.
    async fn list_databases(&self) -> Result<Vec<DatabaseInfo>>;

    /// Finds a database by exact name.
    async fn find_database(&self, name: &str) -> Result<Option<DatabaseInfo>> {
        let databases = self.list_databases().await?;
        Ok(databases.into_iter().find(|db| db.name == name))
    }
}

/// Creates and deletes databases.
#[async_trait]
pub trait DatabaseLifecycle: Send + Sync {
    /// Creates a database. Returns whether the service accepted the request.
    async fn create_database(&self, name: &str) -> Result<bool>;

    /// Deletes a database by uuid. Returns whether the service accepted the request.
    async fn delete_database(&self, uuid: &str) -> Result<bool>;
}

/// Executes SQL against a database.
#[async_trait]
pub trait QueryExecution: Send + Sync {
    /// Executes `sql` (possibly several `;`-joined statements) against `uuid`.
    ///
    /// Failures of the call as a whole surface as
    /// [`ConsoleError::RemoteExecutionFailed`](crate::error::ConsoleError).
    async fn execute(&self, uuid: &str, sql: &str) -> Result<QueryResponse>;
}

/// Everything the console needs from the remote service.
#[async_trait]
pub trait D1Api: DatabaseDirectory + DatabaseLifecycle + QueryExecution {
    /// Checks that the configured credentials are accepted.
    async fn verify_token(&self) -> Result<bool>;
}
