//! Typed scalar values, rows and result sets produced by a query executor

use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// A single typed scalar returned by a query
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    Binary(Vec<u8>),
}

impl Value {
    /// Name of the variant, used as the tie-breaker of the canonical ordering key
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::DateTime(_) => "datetime",
            Value::Binary(_) => "binary",
        }
    }

    /// String rendering of the value
    pub fn render(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format!("{:?}", f64::from_bits(float_bits(*f))),
            Value::Text(s) => s.clone(),
            Value::DateTime(dt) => dt.to_string(),
            Value::Binary(bytes) => {
                let mut out = String::with_capacity(2 + bytes.len() * 2);
                out.push_str("\\x");
                for byte in bytes {
                    let _ = write!(out, "{:02x}", byte);
                }
                out
            }
        }
    }

    /// Total ordering key `(rendering, type tag)`.
    ///
    /// Only meaningful for canonicalizing rows; it says nothing about how two
    /// values compare in SQL.
    pub fn sort_key(&self) -> (String, &'static str) {
        (self.render(), self.type_tag())
    }
}

/// Bit pattern used for float equality and hashing: all NaNs are one value, -0.0 equals 0.0
fn float_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0.0f64.to_bits()
    } else {
        f.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_bits(*a) == float_bits(*b),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            // Exact comparison: values of different types are never equal
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => float_bits(*f).hash(state),
            Value::Text(s) => s.hash(state),
            Value::DateTime(dt) => dt.hash(state),
            Value::Binary(bytes) => bytes.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Binary(bytes)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            nested => Value::Text(nested.to_string()),
        }
    }
}

/// An ordered, fixed-length sequence of values
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build a [`Row`] from a list of expressions convertible into [`Value`]
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::engine::value::Row::new(vec![$($crate::engine::value::Value::from($value)),*])
    };
}

/// The set of distinct values seen in one column of a result set
pub type ColumnValueSet<'a> = HashSet<&'a Value>;

/// Rows returned by executing one query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    /// Create a result set, checking that every row shares the first row's arity
    pub fn new(rows: Vec<Row>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let expected = first.arity();
            if let Some((row, bad)) = rows
                .iter()
                .enumerate()
                .find(|(_, row)| row.arity() != expected)
            {
                return Err(Error::ArityMismatch {
                    row,
                    expected,
                    found: bad.arity(),
                });
            }
        }
        Ok(Self { rows })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a JSON array of row arrays
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let rows = json
            .as_array()
            .ok_or_else(|| Error::QueryExecution("result is not an array of rows".to_string()))?;

        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, row)| match row {
                serde_json::Value::Array(values) => Ok(values.iter().map(Value::from).collect()),
                other => Err(Error::QueryExecution(format!(
                    "row {} is not an array: {}",
                    i, other
                ))),
            })
            .collect::<Result<Vec<Row>>>()?;

        Self::new(rows)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column count, taken from the first row (0 when empty)
    pub fn arity(&self) -> usize {
        self.rows.first().map_or(0, Row::arity)
    }

    /// Distinct values per column, indexed by column position
    pub fn column_value_sets(&self) -> Vec<ColumnValueSet<'_>> {
        (0..self.arity())
            .map(|col| self.rows.iter().map(|row| &row.values()[col]).collect())
            .collect()
    }
}

impl TryFrom<Vec<Row>> for ResultSet {
    type Error = Error;

    fn try_from(rows: Vec<Row>) -> Result<Self> {
        Self::new(rows)
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
