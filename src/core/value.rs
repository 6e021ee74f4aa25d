//! Scalar values carried by definitions and dependency options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A definition or option value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    /// Type-tagged representation, so `"1"` and `1` never collide in a digest.
    pub fn tagged(&self) -> String {
        match self {
            Value::Bool(b) => format!("b:{}", b),
            Value::Int(i) => format!("i:{}", i),
            Value::Str(s) => format!("s:{}", s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for Value {
    type Err = std::convert::Infallible;

    /// Booleans and integers are recognized; anything else is a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(b) = parse_bool(s) {
            return Ok(Value::Bool(b));
        }
        if let Ok(i) = s.parse::<i64>() {
            return Ok(Value::Int(i));
        }
        Ok(Value::Str(s.to_string()))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Parse the boolean spellings accepted on the command line and in config.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => Some(true),
        "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
