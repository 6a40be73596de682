use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One attribute value of a region record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Attribute bag for a single region, in the caller's column order.
pub type Record = IndexMap<String, Value>;

/// Region id -> attribute bag, in the order the caller supplied them.
pub type Records = IndexMap<String, Record>;

impl Value {
    /// `false` and the empty string count as missing; everything else,
    /// including `0`, is a usable value.
    pub fn is_present(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Text(s) => !s.is_empty(),
            Value::Number(_) => true,
        }
    }

    /// Numeric reading of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(_) => None,
        }
    }

    /// Strip currency symbols, separators and other decoration from text
    /// that is not already a plain number. Only digits, `.` and `-` survive.
    pub fn scrub_numeric(&self) -> Value {
        match self {
            Value::Text(s) if s.trim().parse::<f64>().is_err() => Value::Text(
                s.chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Look up `attribute` in an optional record and return it only when present.
pub fn present<'a>(record: Option<&'a Record>, attribute: &str) -> Option<&'a Value> {
    record?.get(attribute).filter(|v| v.is_present())
}
