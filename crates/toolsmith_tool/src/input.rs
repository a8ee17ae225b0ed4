//! Checking of LLM-supplied tool arguments against a compiled input schema.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::schema::{CompiledToolSpec, InputJsonSchema, JsonType};

const REQUIRED: &str = "This field is required";
const NOT_A_NUMBER: &str = "Must be a number";
const NOT_A_BOOLEAN: &str = "Must be a boolean";
const NOT_AN_ARRAY: &str = "Must be a valid JSON array";
const NOT_AN_OBJECT: &str = "Must be a valid JSON object";
const UNEXPECTED: &str = "Unexpected field";

/// Per-field argument errors, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputErrors(IndexMap<String, String>);

impl InputErrors {
    fn record(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Message recorded for `field`
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of failing fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing failed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(field, message)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for InputErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for InputErrors {}

fn is_blank_argument(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn parses_as_json(text: &str) -> bool {
    serde_json::from_str::<Value>(text).is_ok()
}

fn type_error(kind: JsonType, value: &Value) -> Option<&'static str> {
    match (kind, value) {
        (JsonType::String, _) => None,
        (JsonType::Number, Value::Number(_)) => None,
        (JsonType::Number, Value::String(s)) if s.trim().parse::<f64>().is_ok() => None,
        (JsonType::Number, _) => Some(NOT_A_NUMBER),
        (JsonType::Boolean, Value::Bool(_)) => None,
        (JsonType::Boolean, Value::String(s))
            if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") =>
        {
            None
        }
        (JsonType::Boolean, _) => Some(NOT_A_BOOLEAN),
        (JsonType::Array, Value::Array(_)) => None,
        (JsonType::Array, Value::String(s)) if parses_as_json(s) => None,
        (JsonType::Array, _) => Some(NOT_AN_ARRAY),
        (JsonType::Object, Value::Object(_)) => None,
        (JsonType::Object, Value::String(s)) if parses_as_json(s) => None,
        (JsonType::Object, _) => Some(NOT_AN_OBJECT),
    }
}

/// Check arguments against an input schema.
///
/// Required fields must be present, non-null and non-empty. Declared fields
/// must agree with their type, where textual encodings of numbers, booleans
/// and JSON values are accepted. Undeclared fields are rejected.
///
/// # Errors
///
/// Returns every failing field with its message
pub fn check_input(schema: &InputJsonSchema, input: &Value) -> Result<(), InputErrors> {
    let mut errors = InputErrors::default();

    let Some(args) = input.as_object() else {
        errors.record("input", NOT_AN_OBJECT);
        return Err(errors);
    };

    for field in &schema.required {
        if args.get(field).is_none_or(is_blank_argument) {
            errors.record(field, REQUIRED);
        }
    }

    for (field, value) in args {
        match schema.property(field) {
            Some(property) => {
                if let Some(message) = type_error(property.kind, value) {
                    errors.record(field, message);
                }
            }
            None => errors.record(field, UNEXPECTED),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(failures = errors.len(), "tool input rejected");
        Err(errors)
    }
}

/// Check arguments against a compiled spec.
///
/// A spec without an input schema accepts only an empty object.
///
/// # Errors
///
/// Returns every failing field with its message
pub fn check_tool_input(spec: &CompiledToolSpec, input: &Value) -> Result<(), InputErrors> {
    match spec.input_json() {
        Some(schema) => check_input(schema, input),
        None => check_input(&InputJsonSchema::new(), input),
    }
}
