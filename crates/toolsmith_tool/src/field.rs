//! Field decoders over loosely-typed JSON objects.
//!
//! Strict decoders (`require_*`) return a [`FieldError`] naming the field.
//! Lenient decoders (`str_or_empty`, `optional_str`, `truthy`) never fail and
//! are what the normalizer builds on.

use serde_json::{Map, Value};

/// Why a field could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Field absent
    Missing {
        /// Field name
        field: String,
    },
    /// Field present with the wrong JSON kind
    WrongType {
        /// Field name
        field: String,
        /// Expected JSON kind
        expected: &'static str,
        /// Kind that was found
        found: &'static str,
    },
}

impl FieldError {
    /// Name of the offending field
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::WrongType { field, .. } => field,
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "missing field `{}`", field),
            Self::WrongType {
                field,
                expected,
                found,
            } => write!(f, "field `{}` must be {}, found {}", field, expected, found),
        }
    }
}

impl std::error::Error for FieldError {}

/// JSON kind of a value, for error messages
#[must_use]
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Field value, present under any kind
///
/// # Errors
///
/// Returns [`FieldError::Missing`] if the key is absent
pub fn require<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value, FieldError> {
    obj.get(field).ok_or_else(|| FieldError::Missing {
        field: field.to_string(),
    })
}

fn wrong_type(field: &str, expected: &'static str, found: &Value) -> FieldError {
    FieldError::WrongType {
        field: field.to_string(),
        expected,
        found: kind_of(found),
    }
}

/// String field
///
/// # Errors
///
/// Returns error if absent or not a string
pub fn require_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a str, FieldError> {
    let value = require(obj, field)?;
    value.as_str().ok_or_else(|| wrong_type(field, "string", value))
}

/// Boolean field
///
/// # Errors
///
/// Returns error if absent or not a boolean
pub fn require_bool(obj: &Map<String, Value>, field: &str) -> Result<bool, FieldError> {
    let value = require(obj, field)?;
    value.as_bool().ok_or_else(|| wrong_type(field, "boolean", value))
}

/// Array field
///
/// # Errors
///
/// Returns error if absent or not an array
pub fn require_array<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a [Value], FieldError> {
    let value = require(obj, field)?;
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| wrong_type(field, "array", value))
}

/// String field if present and textual
#[must_use]
pub fn optional_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    obj.get(field).and_then(Value::as_str)
}

/// String field, or `""` when absent or not textual
#[must_use]
pub fn str_or_empty<'a>(obj: &'a Map<String, Value>, field: &str) -> &'a str {
    optional_str(obj, field).unwrap_or("")
}

/// JavaScript-style truthiness.
///
/// `null`, `false`, zero and `""` are falsy. Everything else is truthy,
/// including `"false"`, `[]` and `{}`.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Truthiness of an optional field; absent is falsy
#[must_use]
pub fn truthy(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}
