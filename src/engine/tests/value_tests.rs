//! Tests for the value, row and result set model

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

use crate::engine::value::{ResultSet, Row, Value};
use crate::error::Error;
use crate::row;

#[test]
fn test_values_of_different_types_are_not_equal() {
    assert_ne!(Value::Integer(1), Value::Float(1.0));
    assert_ne!(Value::Integer(1), Value::Text("1".to_string()));
    assert_ne!(Value::Boolean(true), Value::Integer(1));
    assert_ne!(Value::Null, Value::Text("NULL".to_string()));
}

#[test]
fn test_float_equality_is_total() {
    assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    assert_eq!(Value::Float(0.0), Value::Float(-0.0));

    let set: HashSet<Value> = [Value::Float(f64::NAN), Value::Float(-0.0), Value::Float(0.0)]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_render_and_type_tag() {
    let dt = NaiveDate::from_ymd_opt(2023, 5, 17)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();

    assert_eq!(Value::Null.sort_key(), ("NULL".to_string(), "null"));
    assert_eq!(Value::Float(1.0).render(), "1.0");
    assert_eq!(Value::Float(-0.0).render(), "0.0");
    assert_eq!(Value::Float(-0.0).sort_key(), Value::Float(0.0).sort_key());
    assert_eq!(Value::from(dt).sort_key(), ("2023-05-17 08:30:00".to_string(), "datetime"));
    assert_eq!(Value::Binary(vec![0xde, 0xad]).render(), "\\xdead");
    assert_eq!(Value::from(None::<i64>), Value::Null);
}

#[test]
fn test_sort_key_breaks_ties_on_type() {
    let text = Value::Text("1".to_string());
    let int = Value::Integer(1);
    assert_eq!(text.render(), int.render());
    assert!(int.sort_key() < text.sort_key());
}

#[test]
fn test_result_set_rejects_ragged_rows() {
    let err = ResultSet::new(vec![row![1, 2], row![3]]).unwrap_err();
    match err {
        Error::ArityMismatch {
            row,
            expected,
            found,
        } => {
            assert_eq!((row, expected, found), (1, 2, 1));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_empty_result_set_has_no_arity() {
    let empty = ResultSet::empty();
    assert_eq!(empty.arity(), 0);
    assert!(empty.column_value_sets().is_empty());
}

#[test]
fn test_column_value_sets_are_distinct_per_column() {
    let results = ResultSet::new(vec![row![1, "a"], row![1, "b"], row![2, "b"]]).unwrap();
    let sets = results.column_value_sets();

    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].len(), 2);
    assert!(sets[0].contains(&Value::Integer(2)));
    assert_eq!(sets[1].len(), 2);
    assert!(sets[1].contains(&Value::from("a")));
}

#[test]
fn test_from_json_decodes_scalars() {
    let json = serde_json::json!([[1, 2.5, "x", null, true, [1, 2]]]);
    let results = ResultSet::from_json(&json).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(
        results.rows()[0],
        Row::new(vec![
            Value::Integer(1),
            Value::Float(2.5),
            Value::from("x"),
            Value::Null,
            Value::Boolean(true),
            Value::from("[1,2]"),
        ])
    );
}

#[test]
fn test_from_json_rejects_non_array_rows() {
    let json = serde_json::json!([[1], {"a": 1}]);
    assert!(matches!(
        ResultSet::from_json(&json),
        Err(Error::QueryExecution(_))
    ));
    assert!(ResultSet::from_json(&serde_json::json!({"result": []})).is_err());
}
