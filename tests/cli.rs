use std::path::Path;
use std::process::{Command, Output};

fn run(db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_taskhub"))
        .env("TASKHUB_DB", db)
        .args(args)
        .output()
        .expect("failed to run taskhub")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn add_without_arguments_reports_the_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir.path().join("todos.db"), &["add"]);

    // A missing title is user error, not a crash
    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(
        stderr(&output).contains("Title cannot be empty"),
        "got: {}",
        stderr(&output)
    );
}

#[test]
fn add_with_blank_title_reports_the_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir.path().join("todos.db"), &["add", "   "]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Title cannot be empty"));
}

#[test]
fn add_then_list_shows_the_new_todo() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("todos.db");

    let added = run(&db, &["add", "Buy milk", "2", "liters"]);
    assert!(added.status.success(), "stderr: {}", stderr(&added));
    assert!(stdout(&added).contains("Added"));
    assert!(stdout(&added).contains("Buy milk"));

    let listed = run(&db, &["list"]);
    assert!(listed.status.success(), "stderr: {}", stderr(&listed));
    assert!(stdout(&listed).contains("Buy milk"));
    assert!(stdout(&listed).contains("2 liters"));
}

#[test]
fn done_with_unknown_id_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir.path().join("todos.db"), &["done", "ghost"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Todo not found"),
        "got: {}",
        stderr(&output)
    );
}

#[test]
fn unknown_command_fails_with_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir.path().join("todos.db"), &["frobnicate"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Usage:"));
    assert!(stderr(&output).contains("unknown command"));
}
