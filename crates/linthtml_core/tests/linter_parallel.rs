//! Integration tests for parallel linting functionality.
//!
//! These tests verify that files linted in parallel each get their own
//! inline configuration state and that per-file failures are collected.

use std::fs;
use std::path::PathBuf;

use linthtml_core::{LinterConfig, Linter};
use serde_json::json;
use tempfile::TempDir;

fn create_test_linter() -> Linter {
    let mut config = LinterConfig::new();
    config.rules.insert("attr-no-dup".to_string(), json!(true));
    config
        .rules
        .insert("line-no-trailing-whitespace".to_string(), json!(true));

    Linter::new(config).expect("Failed to create linter")
}

#[test]
fn test_parallel_lint_empty_files_list() {
    let linter = create_test_linter();

    let files: Vec<PathBuf> = vec![];
    let (successes, failures) = linter.lint_files(&files).unwrap();
    assert!(successes.is_empty());
    assert!(failures.is_empty());
}

#[test]
fn test_parallel_lint_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let linter = create_test_linter();

    let test_file = temp_dir.path().join("index.html");
    fs::write(&test_file, "<p class=a class=b>text</p>").unwrap();

    let (successes, failures) = linter.lint_files(&[test_file.clone()]).unwrap();
    assert_eq!(successes.len(), 1);
    assert_eq!(failures.len(), 0);
    assert_eq!(successes[0].path, test_file);
    assert_eq!(successes[0].issues.len(), 1);
    assert_eq!(successes[0].issues[0].code, "E003");
}

#[test]
fn test_parallel_lint_with_nonexistent_files() {
    let temp_dir = TempDir::new().unwrap();
    let linter = create_test_linter();

    let existing_file = temp_dir.path().join("exists.html");
    fs::write(&existing_file, "<p></p>").unwrap();
    let nonexistent_file = temp_dir.path().join("does_not_exist.html");

    let files = vec![existing_file.clone(), nonexistent_file.clone()];
    let (successes, failures) = linter.lint_files(&files).unwrap();

    assert_eq!(successes.len(), 1);
    assert_eq!(failures.len(), 1);
    assert_eq!(successes[0].path, existing_file);
    assert_eq!(failures[0].0, nonexistent_file);
}

#[test]
fn test_parallel_lint_large_batch() {
    let temp_dir = TempDir::new().unwrap();
    let linter = create_test_linter();

    // Half of the files switch the rule off inline; that must not leak.
    let mut files = Vec::new();
    for i in 0..50 {
        let file = temp_dir.path().join(format!("page{}.html", i));
        let body = if i % 2 == 0 {
            "<!-- linthtml-configure attr-no-dup=false --><p a a></p>"
        } else {
            "<p a a></p>"
        };
        fs::write(&file, body).unwrap();
        files.push(file);
    }

    let (successes, failures) = linter.lint_files(&files).unwrap();
    assert_eq!(successes.len(), 50);
    assert_eq!(failures.len(), 0);

    let with_issues = successes.iter().filter(|r| r.has_issues()).count();
    assert_eq!(with_issues, 25);
}

#[test]
fn test_parallel_lint_empty_files() {
    let temp_dir = TempDir::new().unwrap();
    let linter = create_test_linter();

    let empty1 = temp_dir.path().join("empty1.html");
    let empty2 = temp_dir.path().join("empty2.html");
    fs::write(&empty1, "").unwrap();
    fs::write(&empty2, "").unwrap();

    let (successes, failures) = linter.lint_files(&[empty1, empty2]).unwrap();
    assert_eq!(successes.len(), 2);
    assert_eq!(failures.len(), 0);
    assert!(successes.iter().all(|r| !r.has_issues()));
}

#[test]
fn test_parallel_lint_unicode_content() {
    let temp_dir = TempDir::new().unwrap();
    let linter = create_test_linter();

    let file = temp_dir.path().join("unicode.html");
    fs::write(&file, "<p>日本語テスト   \n🎉</p>").unwrap();

    let (successes, _) = linter.lint_files(&[file]).unwrap();
    let issue = &successes[0].issues[0];
    assert_eq!(issue.code, "E055");
    // Columns count characters, not bytes.
    assert_eq!(issue.position.start.column, 10);
    assert_eq!(issue.position.end.column, 13);
}

#[test]
fn test_parallel_lint_malformed_markup_does_not_fail() {
    let temp_dir = TempDir::new().unwrap();
    let linter = create_test_linter();

    let file = temp_dir.path().join("broken.html");
    fs::write(&file, "<div><span></div></b><!-- never closed").unwrap();

    let (successes, failures) = linter.lint_files(&[file]).unwrap();
    assert!(failures.is_empty());
    let codes: Vec<&str> = successes[0]
        .issues
        .iter()
        .map(|i| i.code.as_str())
        .collect();
    assert_eq!(codes, vec!["PARSE_01", "PARSE_02", "PARSE_03"]);
}

#[test]
fn test_parallel_lint_duplicate_file_paths() {
    let temp_dir = TempDir::new().unwrap();
    let linter = create_test_linter();

    let file = temp_dir.path().join("index.html");
    fs::write(&file, "<p></p>").unwrap();

    let files = vec![file.clone(), file.clone(), file.clone()];
    let (successes, failures) = linter.lint_files(&files).unwrap();

    // Each should be processed independently
    assert_eq!(successes.len(), 3);
    assert_eq!(failures.len(), 0);
}

#[test]
fn test_parallel_lint_directory_is_a_failure() {
    let temp_dir = TempDir::new().unwrap();
    let linter = create_test_linter();

    let dir = temp_dir.path().join("sub.html");
    fs::create_dir(&dir).unwrap();

    let (successes, failures) = linter.lint_files(&[dir.clone()]).unwrap();
    assert!(successes.is_empty());
    assert_eq!(failures[0].0, dir);
}

#[test]
fn test_parallel_lint_deeply_nested_file_completes() {
    let temp_dir = TempDir::new().unwrap();
    let linter = create_test_linter();

    let deep = temp_dir.path().join("deep.html");
    fs::write(&deep, "<div>".repeat(200_000)).unwrap();
    let plain = temp_dir.path().join("plain.html");
    fs::write(&plain, "<p a a></p>").unwrap();

    let (successes, failures) = linter.lint_files(&[deep.clone(), plain.clone()]).unwrap();
    assert!(failures.is_empty());
    assert_eq!(successes.len(), 2);

    let deep_result = successes.iter().find(|r| r.path == deep).unwrap();
    assert_eq!(deep_result.issues.len(), 200_000);
    assert!(deep_result.issues.iter().all(|i| i.code == "PARSE_01"));
    // Outermost element first.
    assert_eq!(deep_result.issues[0].position.start.column, 1);

    let plain_result = successes.iter().find(|r| r.path == plain).unwrap();
    assert_eq!(plain_result.issues[0].code, "E003");
}

#[test]
fn test_parallel_lint_many_unterminated_tags() {
    let temp_dir = TempDir::new().unwrap();
    let linter = create_test_linter();

    let file = temp_dir.path().join("lt.html");
    fs::write(&file, "<a ".repeat(200_000)).unwrap();

    let started = std::time::Instant::now();
    let (successes, failures) = linter.lint_files(&[file]).unwrap();
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
    assert!(failures.is_empty());

    // The whole file is one text run ending in a space.
    let codes: Vec<&str> = successes[0]
        .issues
        .iter()
        .map(|i| i.code.as_str())
        .collect();
    assert_eq!(codes, vec!["E055"]);
}
