//! Tests for the compare and normalize commands

use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

use crate::commands::compare::{compare_command, load_result_file};
use crate::commands::normalize_command;

fn write_result(dir: &TempDir, name: &str, json: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_compare_swapped_columns() {
    let dir = tempdir().unwrap();
    let reference = write_result(&dir, "gold.json", r#"[[1, "a"], [2, "b"]]"#);
    let candidate = write_result(&dir, "generated.json", r#"[["b", 2], ["a", 1]]"#);

    assert!(compare_command(&reference, &candidate, false, Some(1)).unwrap());
    assert!(!compare_command(&reference, &candidate, true, Some(1)).unwrap());
}

#[test]
fn test_compare_detects_multiplicity() {
    let dir = tempdir().unwrap();
    let reference = write_result(&dir, "gold.json", "[[1], [1], [2]]");
    let candidate = write_result(&dir, "generated.json", "[[1], [2], [2]]");

    assert!(!compare_command(&reference, &candidate, false, None).unwrap());
}

#[test]
fn test_load_result_file_errors() {
    let dir = tempdir().unwrap();
    let not_json = write_result(&dir, "bad.json", "[[1,");
    let ragged = write_result(&dir, "ragged.json", "[[1, 2], [3]]");

    let err = load_result_file(&not_json).unwrap_err();
    assert!(err.to_string().contains("Invalid JSON"));
    assert!(load_result_file(&ragged).is_err());
    assert!(load_result_file(&dir.path().join("missing.json")).is_err());
}

#[test]
fn test_normalize_command() {
    let normalized = normalize_command("SELECT DISTINCT a FROM t WHERE b < = 2", false, "generic").unwrap();
    assert_eq!(normalized, "SELECT  a FROM t WHERE b <= 2");
    assert!(normalize_command("SELECT 1", false, "nonsense").is_err());
    assert!(normalize_command("SELECT 'open", false, "generic").is_err());
}
