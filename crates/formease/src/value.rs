// File: src/value.rs
// Purpose: Dynamic values held by default values and the renderer's value map

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Values a form field can hold or default to
///
/// Mirrors the JSON data model so that `defaultValue` and submitted values
/// survive a serialize/parse round-trip unchanged (integers stay integers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<FormValue>),
    Object(BTreeMap<String, FormValue>),
}

impl FormValue {
    /// Whether the value counts as "set" for checkbox-style controls
    pub fn is_truthy(&self) -> bool {
        match self {
            FormValue::Bool(b) => *b,
            FormValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            FormValue::String(s) => !s.is_empty(),
            FormValue::Array(arr) => !arr.is_empty(),
            FormValue::Object(obj) => !obj.is_empty(),
            FormValue::Null => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FormValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FormValue::Null)
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Bool(b) => write!(f, "{}", b),
            FormValue::Number(n) => write!(f, "{}", n),
            FormValue::String(s) => f.write_str(s),
            FormValue::Array(arr) => {
                let items: Vec<String> = arr.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            FormValue::Object(_) => f.write_str("[Object]"),
            FormValue::Null => Ok(()),
        }
    }
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::Null
    }
}

impl From<bool> for FormValue {
    fn from(b: bool) -> Self {
        FormValue::Bool(b)
    }
}

impl From<i64> for FormValue {
    fn from(n: i64) -> Self {
        FormValue::Number(n.into())
    }
}

impl From<i32> for FormValue {
    fn from(n: i32) -> Self {
        FormValue::Number(i64::from(n).into())
    }
}

impl From<f64> for FormValue {
    // NaN and infinities have no JSON form
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n)
            .map(FormValue::Number)
            .unwrap_or(FormValue::Null)
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        FormValue::String(s)
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::String(s.to_string())
    }
}

impl From<Vec<FormValue>> for FormValue {
    fn from(arr: Vec<FormValue>) -> Self {
        FormValue::Array(arr)
    }
}

impl From<BTreeMap<String, FormValue>> for FormValue {
    fn from(obj: BTreeMap<String, FormValue>) -> Self {
        FormValue::Object(obj)
    }
}
