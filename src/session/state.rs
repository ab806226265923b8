//! Session state: selected database and output mode.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::DatabaseInfo;

/// Prompt shown when no database is selected.
pub const DEFAULT_PROMPT_NAME: &str = "d1";

/// How query results are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Bordered table with bold headers.
    #[default]
    Table,
    /// Pretty-printed row arrays.
    Json,
    /// Pretty-printed full response envelope, metadata included.
    JsonAll,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::JsonAll => write!(f, "json-all"),
        }
    }
}

/// State owned by the dispatch loop for the lifetime of one session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    database: Option<DatabaseInfo>,
    output: OutputMode,
}

impl SessionState {
    pub fn new(output: OutputMode) -> Self {
        Self {
            database: None,
            output,
        }
    }

    /// The selected database, if any.
    pub fn database(&self) -> Option<&DatabaseInfo> {
        self.database.as_ref()
    }

    pub fn select(&mut self, database: DatabaseInfo) {
        self.database = Some(database);
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }

    /// Prompt for a fresh statement: `<database> > `.
    pub fn prompt(&self) -> String {
        let name = self
            .database
            .as_ref()
            .map(|db| db.name.as_str())
            .unwrap_or(DEFAULT_PROMPT_NAME);
        format!("{name} > ")
    }

    /// Prompt while a statement is still being typed, aligned with [`Self::prompt`].
    pub fn continuation_prompt(&self) -> String {
        let width = self.prompt().chars().count().saturating_sub(2);
        format!("{}> ", " ".repeat(width.saturating_sub(3)) + "...")
    }
}
