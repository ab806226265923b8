//! Rendering of query results in each output mode.

use d1_console::api::{MockApi, Row};
use d1_console::session::{OutputMode, NO_RESULTS};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::common::TestConsole;

fn users() -> Vec<Row> {
    vec![
        json!({"id": 1, "name": "Ada"}).as_object().cloned().unwrap(),
        json!({"id": 2, "name": null}).as_object().cloned().unwrap(),
    ]
}

fn shop(mode: OutputMode) -> TestConsole {
    let api = MockApi::new()
        .with_database("u-1", "shop")
        .with_rows("SELECT id, name FROM users", users());
    TestConsole::with_mode(api, mode)
}

async fn query(console: &mut TestConsole, sql: &str) -> String {
    console.run("USE shop;", &[]).await;
    console.output.clear();
    console.run(sql, &[]).await;
    console.output()
}

#[tokio::test]
async fn test_json_mode_prints_rows() {
    let mut console = shop(OutputMode::Json);

    let output = query(&mut console, "SELECT id, name FROM users;").await;

    assert_eq!(
        output,
        r#"[
  {
    "id": 1,
    "name": "Ada"
  },
  {
    "id": 2,
    "name": null
  }
]
"#
    );
}

#[tokio::test]
async fn test_json_all_mode_prints_envelope() {
    let mut console = shop(OutputMode::JsonAll);

    let output = query(&mut console, "SELECT id, name FROM users;").await;

    let envelope: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(envelope["success"], json!(true));
    assert_eq!(envelope["result"][0]["results"][0]["name"], json!("Ada"));
}

#[tokio::test]
async fn test_table_mode_renders_columns_in_row_order() {
    let mut console = shop(OutputMode::Table);

    let output = query(&mut console, "SELECT id, name FROM users;").await;

    let header = output.lines().find(|line| line.contains("name")).unwrap();
    assert!(header.find("id").unwrap() < header.find("name").unwrap());
    assert!(output.contains("Ada"));
    assert!(output.contains("NULL"));
}

#[tokio::test]
async fn test_empty_select_prints_notice_once() {
    let mut console = shop(OutputMode::Table);

    let output = query(&mut console, "SELECT * FROM empty;").await;

    assert_eq!(output, format!("{NO_RESULTS}\n"));
}

#[tokio::test]
async fn test_empty_write_prints_nothing() {
    let mut console = shop(OutputMode::Table);

    let output = query(&mut console, "DELETE FROM users WHERE id = 3;").await;

    assert_eq!(output, "");
}

#[tokio::test]
async fn test_one_table_per_statement() {
    let mut console = shop(OutputMode::Table);

    let output = query(
        &mut console,
        "SELECT id, name FROM users; SELECT id, name FROM users;",
    )
    .await;

    assert_eq!(output.matches("Ada").count(), 2);
}

#[tokio::test]
async fn test_show_databases_table() {
    let mut console = shop(OutputMode::Table);

    console.run("SHOW DATABASES;", &[]).await;

    let output = console.output();
    assert!(output.starts_with("Databases:\n"));
    assert!(output.contains("shop"));
    assert!(output.contains("u-1"));
}
