//! Tests for row canonicalization and the quick-reject filter

use pretty_assertions::assert_eq;

use crate::engine::canonical::{canonicalize, quick_reject};
use crate::engine::value::{ResultSet, Value};
use crate::row;

fn results(rows: Vec<crate::engine::value::Row>) -> ResultSet {
    ResultSet::new(rows).unwrap()
}

#[test]
fn test_canonicalize_sorts_by_rendering() {
    assert_eq!(canonicalize(&row!["b", 10, "a"]), row![10, "a", "b"]);
}

#[test]
fn test_canonicalize_ignores_column_order() {
    let left = row![1, "x", Value::Null, 2.5];
    let right = row![2.5, Value::Null, 1, "x"];
    assert_eq!(canonicalize(&left), canonicalize(&right));
}

#[test]
fn test_canonicalize_is_deterministic_for_equal_renderings() {
    let left = row![1, "1"];
    let right = row!["1", 1];
    assert_eq!(canonicalize(&left), canonicalize(&right));
    assert_eq!(canonicalize(&left), row![1, "1"]);
}

#[test]
fn test_canonicalize_treats_signed_zeros_alike() {
    assert_eq!(canonicalize(&row![0.0, "0"]), canonicalize(&row!["0", -0.0]));
}

#[test]
fn test_quick_reject_passes_signed_zeros() {
    let reference = results(vec![row![0.0, "0"]]);
    let candidate = results(vec![row!["0", -0.0]]);
    assert!(quick_reject(&reference, &candidate, false));
    assert!(quick_reject(&reference, &candidate, true));
}

#[test]
fn test_quick_reject_ordered_requires_same_sequence() {
    let reference = results(vec![row![1, 2], row![3, 4]]);
    let swapped_columns = results(vec![row![2, 1], row![4, 3]]);
    let swapped_rows = results(vec![row![3, 4], row![1, 2]]);

    assert!(quick_reject(&reference, &swapped_columns, true));
    assert!(!quick_reject(&reference, &swapped_rows, true));
    assert!(quick_reject(&reference, &swapped_rows, false));
}

#[test]
fn test_quick_reject_unordered_ignores_multiplicity() {
    // Passes the filter even though the multiset check will reject it
    let reference = results(vec![row![1], row![1], row![2]]);
    let candidate = results(vec![row![1], row![2], row![2]]);
    assert!(quick_reject(&reference, &candidate, false));
}

#[test]
fn test_quick_reject_detects_different_values() {
    let reference = results(vec![row![1, "a"], row![2, "b"]]);
    let candidate = results(vec![row![1, "a"], row![2, "c"]]);
    assert!(!quick_reject(&reference, &candidate, false));
    assert!(!quick_reject(&reference, &candidate, true));
}
