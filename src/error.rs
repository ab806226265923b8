//! Error types for the D1 console.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for console operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// Credentials are missing or were rejected by the API.
    #[error("Invalid authentication. Run 'login' to update your API token and/or account ID.")]
    AuthenticationInvalid,

    /// A database referenced by name does not exist.
    #[error("Database {0} not found.")]
    DatabaseNotFound(String),

    /// A query was issued before any database was selected.
    #[error(
        "No database selected. Run USE <name> to select a database, or SHOW DATABASES to list your available databases. If running non-interactively, use the -d flag to select a database."
    )]
    NoDatabaseSelected,

    /// The remote service rejected a query or batch.
    #[error("{0}")]
    RemoteExecutionFailed(String),

    /// The statement uses SQL the remote service does not support.
    #[error("{0}")]
    UnsupportedStatement(String),

    /// HTTP transport or API envelope errors.
    #[error("API error: {0}")]
    Api(String),

    /// Configuration errors (invalid config file, bad base URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal, history, or file I/O errors.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// Creates a remote execution error with the given message.
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::RemoteExecutionFailed(msg.into())
    }

    /// Creates an unsupported statement error with the given message.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedStatement(msg.into())
    }

    /// Creates an API error with the given message.
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an I/O error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::AuthenticationInvalid => "Authentication Error",
            Self::DatabaseNotFound(_) => "Database Not Found",
            Self::NoDatabaseSelected => "No Database Selected",
            Self::RemoteExecutionFailed(_) => "Query Error",
            Self::UnsupportedStatement(_) => "Unsupported Statement",
            Self::Api(_) => "API Error",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias using ConsoleError.
pub type Result<T> = std::result::Result<T, ConsoleError>;
