use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared kind of a table column
///
/// Attached once when a [`Table`](crate::Table) is built and never re-inferred
/// from cell contents, so an integer-coded categorical column stays categorical.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Continuous values, scaled by the column range
    Numeric,
    /// True/false flags, compared as 0/1
    Boolean,
    /// Discrete tokens, compared by equality
    Categorical,
}

impl ColumnKind {
    /// Numeric-like columns normalize to `f64` cells
    #[inline]
    pub fn is_numeric_like(self) -> bool {
        matches!(self, ColumnKind::Numeric | ColumnKind::Boolean)
    }

    /// Guess a kind from the runtime type of a value.
    ///
    /// Only used by [`Observation::infer`](crate::Observation::infer) for bare
    /// rows that come without a schema.
    pub fn sniff(value: &Value) -> Self {
        match value {
            Value::Number(_) => ColumnKind::Numeric,
            Value::Bool(_) => ColumnKind::Boolean,
            Value::Category(_) => ColumnKind::Categorical,
        }
    }
}

/// A raw table cell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Category(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Category(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Number(x as f64)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Number(x as f64)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Number(x as f64)
    }
}

impl From<u32> for Value {
    fn from(x: u32) -> Self {
        Value::Number(x as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Category(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Category(s)
    }
}

impl From<&serde_json::Value> for Value {
    /// Numbers and booleans keep their type; strings become categories and
    /// anything else (null, arrays, objects) is kept as its JSON text.
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(x) => Value::Number(x),
                None => Value::Category(n.to_string()),
            },
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::String(s) => Value::Category(s.clone()),
            other => Value::Category(other.to_string()),
        }
    }
}
