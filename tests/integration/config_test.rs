//! Configuration and credentials file handling.

use d1_console::config::{Config, Credentials};
use d1_console::error::ConsoleError;
use d1_console::session::OutputMode;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_config_file() {
    let file = config_file(
        r#"
[api]
base_url = "http://localhost:8787/client/v4"
timeout_secs = 5
page_size = 50

[console]
output = "json-all"
history_file = "/tmp/d1-history"
colors = false
"#,
    );

    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.api.page_size, 50);
    assert_eq!(config.api.timeout_secs, 5);
    assert_eq!(config.console.output, OutputMode::JsonAll);
    assert!(!config.console.colors);
    assert_eq!(
        config.console.history_path(),
        std::path::PathBuf::from("/tmp/d1-history")
    );
}

#[test]
fn test_missing_config_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_from_file(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_bad_base_url_is_config_error() {
    let file = config_file("[api]\nbase_url = \"ftp://example.com\"\n");
    let err = Config::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConsoleError::Config(_)));
}

#[test]
fn test_credentials_file_uses_camel_case() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("credentials.json");

    Credentials::new("tok", "acct").save_to_file(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"apiToken\""));
    assert!(raw.contains("\"accountId\""));
    assert_eq!(
        Credentials::load_from_file(&path),
        Some(Credentials::new("tok", "acct"))
    );
}

#[test]
fn test_corrupt_credentials_file_is_ignored() {
    let file = config_file("{not json");
    assert_eq!(Credentials::load_from_file(file.path()), None);
}
