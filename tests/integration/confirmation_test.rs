//! DROP DATABASE confirmation dialogue.

use d1_console::api::{ApiCall, MockApi};

use super::common::TestConsole;

fn deletes(api: &MockApi) -> usize {
    api.calls()
        .iter()
        .filter(|call| matches!(call, ApiCall::Delete(_)))
        .count()
}

#[tokio::test]
async fn test_only_yes_deletes() {
    for answer in ["no", "y", "", "yes please", "ok"] {
        let mut console = TestConsole::new(MockApi::new().with_database("u-1", "shop"));
        console.run("DROP DATABASE shop;", &[answer]).await;

        assert_eq!(deletes(&console.api), 0, "answer {answer:?}");
        assert!(console.output().contains("Cancelled."));
    }
}

#[tokio::test]
async fn test_yes_in_any_case_deletes() {
    for answer in ["yes", "YES", " Yes "] {
        let mut console = TestConsole::new(MockApi::new().with_database("u-1", "shop"));
        console.run("DROP DATABASE shop;", &[answer]).await;

        assert_eq!(
            console.api.calls(),
            vec![
                ApiCall::FindByName("shop".to_string()),
                ApiCall::Delete("u-1".to_string()),
            ]
        );
        assert!(console.output().contains("Database shop deleted."));
    }
}

#[tokio::test]
async fn test_end_of_input_cancels() {
    let mut console = TestConsole::new(MockApi::new().with_database("u-1", "shop"));

    console.run("DROP DATABASE shop;", &[]).await;

    assert_eq!(deletes(&console.api), 0);
}

#[tokio::test]
async fn test_loop_resumes_after_answer() {
    let mut console = TestConsole::new(MockApi::new().with_database("u-1", "shop"));

    // The answer is consumed by the question, the next line is a statement.
    console
        .type_lines(&["DROP DATABASE shop;", "nope", "SHOW DATABASES;"])
        .await;

    assert_eq!(
        console.api.calls(),
        vec![ApiCall::FindByName("shop".to_string()), ApiCall::List]
    );
}

#[tokio::test]
async fn test_drop_unknown_database_asks_nothing() {
    let mut console = TestConsole::new(MockApi::new());

    console
        .type_lines(&["DROP DATABASE ghost;", "SHOW DATABASES;"])
        .await;

    assert_eq!(
        console.api.calls(),
        vec![ApiCall::FindByName("ghost".to_string()), ApiCall::List]
    );
    assert!(console.output().starts_with("Database ghost not found."));
}

#[tokio::test]
async fn test_batch_flushed_before_question() {
    let mut console = TestConsole::new(
        MockApi::new()
            .with_database("u-1", "shop")
            .with_database("u-2", "old"),
    );
    console.run("USE shop;", &[]).await;

    console
        .run("INSERT INTO t VALUES (1); DROP DATABASE old;", &["yes"])
        .await;

    assert_eq!(
        console.api.calls()[1..].to_vec(),
        vec![
            ApiCall::Execute {
                uuid: "u-1".to_string(),
                sql: "INSERT INTO t VALUES (1)".to_string(),
            },
            ApiCall::FindByName("old".to_string()),
            ApiCall::Delete("u-2".to_string()),
        ]
    );
}
