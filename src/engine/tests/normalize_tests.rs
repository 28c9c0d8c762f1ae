//! Tests for SQL text normalization

use pretty_assertions::assert_eq;
use sqlparser::dialect::PostgreSqlDialect;
use test_case::test_case;

use crate::engine::normalize::{collapse_operators, normalize, normalize_with_dialect, order_matters};
use crate::error::Error;

#[test_case("SELECT * FROM t WHERE a > = 1", "SELECT * FROM t WHERE a >= 1"; "greater or equal")]
#[test_case("SELECT * FROM t WHERE a < = 1", "SELECT * FROM t WHERE a <= 1"; "less or equal")]
#[test_case("SELECT * FROM t WHERE a ! = 1", "SELECT * FROM t WHERE a != 1"; "not equal")]
#[test_case("SELECT * FROM t WHERE a > 1", "SELECT * FROM t WHERE a > 1"; "untouched")]
fn test_collapse_operators(input: &str, expected: &str) {
    assert_eq!(collapse_operators(input), expected);
}

#[test]
fn test_distinct_removed_by_default() {
    let sql = "SELECT DISTINCT name FROM users";
    assert_eq!(normalize(sql, false).unwrap(), "SELECT  name FROM users");
}

#[test]
fn test_distinct_kept_on_request() {
    let sql = "SELECT DISTINCT name FROM users WHERE age > = 18";
    assert_eq!(
        normalize(sql, true).unwrap(),
        "SELECT DISTINCT name FROM users WHERE age >= 18"
    );
}

#[test]
fn test_distinct_is_case_insensitive() {
    let sql = "select count(Distinct id) from users";
    assert_eq!(normalize(sql, false).unwrap(), "select count( id) from users");
}

#[test]
fn test_distinct_inside_literals_and_quoted_identifiers_untouched() {
    let sql = r#"SELECT "distinct", 'distinct' FROM t WHERE note = 'it''s distinct'"#;
    assert_eq!(normalize(sql, false).unwrap(), sql);
}

#[test]
fn test_escape_string_literals_copied_verbatim() {
    let sql = r"SELECT DISTINCT name FROM t WHERE note = E'it\'s' OR path = E'a\\b'";
    assert_eq!(
        normalize(sql, false).unwrap(),
        r"SELECT  name FROM t WHERE note = E'it\'s' OR path = E'a\\b'"
    );
}

#[test]
fn test_multibyte_text_before_distinct() {
    let sql = "SELECT 'héllo', DISTINCT_ok FROM t WHERE x = 'ü'\nAND y IN (SELECT DISTINCT z FROM u)";
    assert_eq!(
        normalize(sql, false).unwrap(),
        "SELECT 'héllo', DISTINCT_ok FROM t WHERE x = 'ü'\nAND y IN (SELECT  z FROM u)"
    );
}

#[test]
fn test_distinct_as_part_of_identifier_untouched() {
    let sql = "SELECT distinct_users FROM stats";
    assert_eq!(normalize(sql, false).unwrap(), sql);
}

#[test]
fn test_comments_and_whitespace_preserved() {
    let sql = "SELECT DISTINCT a -- pick a\nFROM t /* all */\n\tWHERE b = 2";
    assert_eq!(
        normalize(sql, false).unwrap(),
        "SELECT  a -- pick a\nFROM t /* all */\n\tWHERE b = 2"
    );
}

#[test]
fn test_unterminated_literal_is_malformed() {
    let result = normalize("SELECT 'oops FROM t", false);
    assert!(matches!(result, Err(Error::MalformedQuery(_))));
}

#[test]
fn test_malformed_query_not_detected_when_distinct_kept() {
    assert!(normalize("SELECT 'oops FROM t", true).is_ok());
}

#[test]
fn test_dialect_specific_tokenization() {
    let sql = "SELECT DISTINCT $$distinct$$ FROM t";
    assert_eq!(
        normalize_with_dialect(sql, false, &PostgreSqlDialect {}).unwrap(),
        "SELECT  $$distinct$$ FROM t"
    );
}

#[test_case("SELECT DISTINCT a FROM t WHERE b > = 1"; "distinct and split operator")]
#[test_case("SELECT a FROM t WHERE b >DISTINCT = 1"; "split operator revealed by removal")]
#[test_case("SELECT count(DISTINCT x), y FROM t GROUP BY y ORDER BY y"; "aggregate")]
#[test_case("SELECT 'DISTINCT' FROM t"; "literal")]
#[test_case(r"SELECT DISTINCT a FROM t WHERE b = E'it\'s'"; "escaped quote")]
#[test_case(r"SELECT DISTINCT a FROM t WHERE b = E'a\\b'"; "escaped backslash")]
#[test_case(""; "empty")]
fn test_normalize_is_idempotent(sql: &str) {
    let once = normalize(sql, false).unwrap();
    let twice = normalize(&once, false).unwrap();
    assert_eq!(once, twice);
}

#[test_case("SELECT a FROM t ORDER BY a", true)]
#[test_case("select a from t order by a desc", true)]
#[test_case("SELECT a FROM t", false)]
#[test_case("SELECT a FROM t GROUP BY a", false)]
fn test_order_matters(sql: &str, expected: bool) {
    assert_eq!(order_matters(sql), expected);
}
