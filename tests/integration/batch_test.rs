//! Batching of consecutive queries around console commands.

use d1_console::api::{ApiCall, MockApi};

use super::common::TestConsole;

fn selected_console(api: MockApi) -> TestConsole {
    TestConsole::new(api.with_database("u-1", "shop"))
}

#[tokio::test]
async fn test_console_command_splits_batch() {
    let mut console = selected_console(MockApi::new());
    console.run("USE shop;", &[]).await;

    console
        .run("SELECT a; SELECT b; SHOW DATABASES; SELECT c;", &[])
        .await;

    assert_eq!(
        console.api.calls()[1..].to_vec(),
        vec![
            ApiCall::Execute {
                uuid: "u-1".to_string(),
                sql: "SELECT a;SELECT b".to_string(),
            },
            ApiCall::List,
            ApiCall::Execute {
                uuid: "u-1".to_string(),
                sql: "SELECT c".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_one_buffer_is_one_batch() {
    let mut console = selected_console(MockApi::new());
    console.run("USE shop;", &[]).await;

    console
        .run("CREATE TABLE t (a INTEGER); INSERT INTO t VALUES (1); SELECT * FROM t;", &[])
        .await;

    assert_eq!(console.api.executed().len(), 1);
    assert_eq!(
        console.api.executed()[0].1,
        "CREATE TABLE t (a INTEGER);INSERT INTO t VALUES (1);SELECT * FROM t"
    );
}

#[tokio::test]
async fn test_separate_lines_are_separate_batches() {
    let mut console = selected_console(MockApi::new());

    console
        .type_lines(&["USE shop;", "SELECT 1;", "SELECT 2;"])
        .await;

    assert_eq!(console.api.executed().len(), 2);
}

#[tokio::test]
async fn test_failed_batch_does_not_stop_later_statements() {
    let api = MockApi::new().with_failure("SELECT * FROM missing", "no such table: missing");
    let mut console = selected_console(api);
    console.run("USE shop;", &[]).await;

    console
        .run("SELECT * FROM missing; SHOW DATABASES; SELECT 1;", &[])
        .await;

    assert_eq!(console.api.executed().len(), 2);
    let output = console.output();
    let failure = output.find("no such table: missing").unwrap();
    let listing = output.find("Databases:").unwrap();
    assert!(failure < listing);
}

#[tokio::test]
async fn test_rejected_query_does_not_break_batch() {
    let mut console = selected_console(MockApi::new());
    console.run("USE shop;", &[]).await;

    console.run("SELECT 1; COMMIT; SELECT 2;", &[]).await;

    assert_eq!(
        console.api.executed(),
        vec![("u-1".to_string(), "SELECT 1;SELECT 2".to_string())]
    );
}

#[tokio::test]
async fn test_only_terminators_send_nothing() {
    let mut console = selected_console(MockApi::new());
    console.run("USE shop;", &[]).await;

    console.run(";;", &[]).await;

    assert!(console.api.executed().is_empty());
}
