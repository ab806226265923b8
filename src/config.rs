//! Configuration management for the D1 console.
//!
//! Handles loading the TOML config file and resolving API credentials from
//! the environment or the credentials file written by `login`.

use crate::error::{ConsoleError, Result};
use crate::session::OutputMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable holding the API token.
pub const API_TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";

/// Environment variable holding the account id.
pub const ACCOUNT_ID_ENV: &str = "CLOUDFLARE_ACCOUNT_ID";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Console behavior settings.
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the Cloudflare v4 API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size used when listing databases.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_base_url() -> String {
    "https://api.cloudflare.com/client/v4".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> usize {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

impl ApiConfig {
    /// Parses and validates the base URL.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConsoleError::config(format!("Invalid api.base_url: {e}")))?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConsoleError::config(format!(
                "Invalid scheme '{}' in api.base_url. Expected 'https' or 'http'",
                url.scheme()
            )));
        }

        Ok(url)
    }
}

/// Console behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsoleConfig {
    /// Default result rendering.
    #[serde(default)]
    pub output: OutputMode,

    /// History file override. Defaults to `~/.d1/history`.
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Whether prompts and messages are colored.
    #[serde(default = "default_colors")]
    pub colors: bool,
}

fn default_colors() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            output: OutputMode::default(),
            history_file: None,
            colors: default_colors(),
        }
    }
}

impl ConsoleConfig {
    /// Returns the history file path, falling back to the default location.
    pub fn history_path(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| data_dir().join("history"))
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("d1-console")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConsoleError::config(format!("Failed to read config file: {e}")))?;

        let config = Self::parse_toml(&content, path)?;
        config.api.base_url()?;
        Ok(config)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            ConsoleError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}

/// Directory holding credentials and history (`~/.d1`).
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".d1")
}

/// API token and account id used to authenticate every request.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub api_token: String,
    pub account_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &self.masked_token())
            .field("account_id", &self.account_id)
            .finish()
    }
}

impl Credentials {
    pub fn new(api_token: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            account_id: account_id.into(),
        }
    }

    /// Default credentials file (`~/.d1/credentials.json`).
    pub fn default_path() -> PathBuf {
        data_dir().join("credentials.json")
    }

    /// Resolves credentials: environment first, then the credentials file.
    pub fn resolve(path: &Path) -> Option<Self> {
        Self::from_env().or_else(|| Self::load_from_file(path))
    }

    /// Reads credentials from the environment. Both variables must be set.
    pub fn from_env() -> Option<Self> {
        let api_token = std::env::var(API_TOKEN_ENV).ok()?;
        let account_id = std::env::var(ACCOUNT_ID_ENV).ok()?;
        Some(Self::new(api_token, account_id))
    }

    /// Reads the credentials file. Missing, empty, or corrupt files yield `None`.
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        if content.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(&content) {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                tracing::warn!("Ignoring unreadable credentials file {}: {e}", path.display());
                None
            }
        }
    }

    /// Writes the credentials file, creating its directory if needed.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(self)
            .map_err(|e| ConsoleError::internal(format!("Failed to encode credentials: {e}")))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Token with everything but the first four characters hidden.
    pub fn masked_token(&self) -> String {
        let visible: String = self.api_token.chars().take(4).collect();
        format!("{visible}{}", "*".repeat(self.api_token.chars().count().saturating_sub(4)))
    }
}
