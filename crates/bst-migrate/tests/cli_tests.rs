use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn run(args: &[&str], dirs: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bst-migrate"))
        .args(args)
        .args(dirs)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run bst-migrate")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_clean_run_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hello.bst");
    fs::write(&path, "print(\"hi\")\nprint(x)\nprint([y])\n").unwrap();

    let output = run(&[], &[temp_dir.path()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(&path).unwrap(), "[\"hi\"]\n[x]\n[y]\n");

    let out = stdout(&output);
    assert!(out.contains("Mode: LIVE MIGRATION"));
    assert!(out.contains("Files modified: 1"));
    assert!(out.contains("Print calls migrated: 3"));
    assert!(out.contains("No errors or warnings!"));
}

#[test]
fn test_dry_run_reports_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hello.bst");
    let original = "print(\"hi\")\nprint(x)\nprint([y])\n";
    fs::write(&path, original).unwrap();

    let output = run(&["--dry-run"], &[temp_dir.path()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);

    let out = stdout(&output);
    assert!(out.contains("Mode: DRY RUN"));
    assert!(out.contains("Files modified: 1"));
    assert!(out.contains("Print calls migrated: 3"));
}

#[test]
fn test_diagnostics_exit_one() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("stuck.bst"), "print(Name)\n").unwrap();

    let output = run(&[], &[temp_dir.path()]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Skipped (no changes)"));
    assert!(out.contains("Warnings/Errors: 1"));
    assert!(out.contains("Could not auto-migrate: print(Name)"));
}

#[test]
fn test_missing_directory_is_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    let output = run(&[], &[missing.as_path()]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains(&format!("Error: Directory {} does not exist", missing.display())));
    assert!(out.contains("Files modified: 0"));
}

#[test]
fn test_json_report() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.bst"), "print(a + b)\n").unwrap();

    let output = run(&["--json", "--dry-run"], &[temp_dir.path()]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.trim_start().starts_with('{'));
    assert!(out.contains("\"kind\": \"manual_review\""));
    assert!(out.contains("\"migrations\": 1"));
    assert!(!out.contains("MIGRATION REPORT"));
}

#[test]
fn test_bad_extension_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("a.bst");
    fs::write(&path, "print(x)\n").unwrap();

    let output = run(&["--ext", "a/b"], &[temp_dir.path()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: Invalid file extension 'a/b': must not contain a path separator"));
    assert!(stdout(&output).is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "print(x)\n");
}

#[test]
fn test_no_directories_is_a_usage_error() {
    let output = run(&[], &[]);
    assert_eq!(output.status.code(), Some(2));
}
