//! End-to-end session tests: typed lines in, service calls and output out.

use d1_console::api::{ApiCall, MockApi};
use d1_console::session::{Flow, SEMICOLON_HINT};

use super::common::TestConsole;

#[tokio::test]
async fn test_create_use_select_scenario() {
    let mut console = TestConsole::new(MockApi::new());

    let flow = console
        .type_lines(&["CREATE DATABASE x;", "USE x;", "SELECT 1;"])
        .await;

    assert_eq!(flow, Flow::Continue);
    assert_eq!(
        console.api.calls(),
        vec![
            ApiCall::Create("x".to_string()),
            ApiCall::FindByName("x".to_string()),
            ApiCall::Execute {
                uuid: "mock-uuid-1".to_string(),
                sql: "SELECT 1".to_string(),
            },
        ]
    );
    let database = console.session.state().database().unwrap();
    assert_eq!(database.name, "x");
    assert_eq!(console.session.prompt(), "x > ");
}

#[tokio::test]
async fn test_query_without_database_is_not_sent() {
    let mut console = TestConsole::new(MockApi::new().with_database("u-1", "shop"));

    console.type_lines(&["SELECT * FROM orders;"]).await;

    assert!(console.api.executed().is_empty());
    assert!(console.output().starts_with("No database selected."));
}

#[tokio::test]
async fn test_statements_after_use_in_same_buffer() {
    let mut console = TestConsole::new(MockApi::new().with_database("u-1", "shop"));

    console.run("SELECT 1; USE shop; SELECT 2;", &[]).await;

    // The first query runs before USE and has no database yet.
    assert_eq!(
        console.api.executed(),
        vec![("u-1".to_string(), "SELECT 2".to_string())]
    );
    let output = console.output();
    let rejected = output.find("No database selected.").unwrap();
    let selected = output.find("Now querying database shop (u-1)").unwrap();
    assert!(rejected < selected);
}

#[tokio::test]
async fn test_multi_line_statement_sent_as_one_line() {
    let mut console = TestConsole::new(MockApi::new().with_database("u-1", "shop"));

    console
        .type_lines(&["USE shop;", "SELECT id,", "    name", "FROM users", "WHERE id = 1;"])
        .await;

    assert_eq!(
        console.api.executed(),
        vec![(
            "u-1".to_string(),
            "SELECT id, name FROM users WHERE id = 1".to_string()
        )]
    );
}

#[tokio::test]
async fn test_nothing_dispatched_before_terminator() {
    let mut console = TestConsole::new(MockApi::new().with_database("u-1", "shop"));

    console.type_lines(&["USE shop", "", "SELECT 1"]).await;

    assert!(console.api.calls().is_empty());
    assert!(console.session.prompt().ends_with("...> "));
}

#[tokio::test]
async fn test_repeated_enter_prints_hint() {
    let mut console = TestConsole::new(MockApi::new());

    console.type_lines(&["SHOW DATABASES", ""]).await;

    assert_eq!(console.output(), format!("{SEMICOLON_HINT}\n"));
}

#[tokio::test]
async fn test_exit_ends_session_and_drops_rest() {
    let mut console = TestConsole::new(MockApi::new().with_database("u-1", "shop"));

    let flow = console
        .type_lines(&["USE shop;", "EXIT;", "SELECT 1;"])
        .await;

    assert_eq!(flow, Flow::Exit);
    assert!(console.api.executed().is_empty());
}

#[tokio::test]
async fn test_meta_commands_any_case() {
    let mut console = TestConsole::new(MockApi::new().with_database("u-1", "Shop"));

    console.type_lines(&["use Shop;", "show databases;"]).await;

    assert_eq!(
        console.api.calls(),
        vec![ApiCall::FindByName("Shop".to_string()), ApiCall::List]
    );
}

#[tokio::test]
async fn test_use_is_case_sensitive_on_name() {
    let mut console = TestConsole::new(MockApi::new().with_database("u-1", "Shop"));

    console.type_lines(&["USE shop;"]).await;

    assert!(console.session.state().database().is_none());
    assert_eq!(console.output(), "Database shop not found.\n");
}

#[tokio::test]
async fn test_version_help_about_do_not_touch_service() {
    let mut console = TestConsole::new(MockApi::new());

    console.type_lines(&["VERSION; HELP; ABOUT;"]).await;

    assert!(console.api.calls().is_empty());
    let output = console.output();
    assert!(output.starts_with("D1 Console "));
    assert!(output.contains("SHOW DATABASES;"));
    assert!(output.contains("Cloudflare's D1"));
}

#[tokio::test]
async fn test_unsupported_pragma_reported_not_sent() {
    let mut console = TestConsole::new(MockApi::new().with_database("u-1", "shop"));

    console
        .type_lines(&["USE shop;", "PRAGMA journal_mode; PRAGMA table_list;"])
        .await;

    assert_eq!(
        console.api.executed(),
        vec![("u-1".to_string(), "PRAGMA table_list".to_string())]
    );
    assert!(console
        .output()
        .contains("D1 only supports PRAGMA table_list, table_info, and foreign_keys."));
}
