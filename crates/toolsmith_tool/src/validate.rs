//! Structural validation of tool and parameter values.
//!
//! Validation never coerces. The `check_*` functions decode an untyped value
//! into the typed model or report the first violation; the `is_valid_*`
//! predicates are the boolean view of the same checks.

use serde_json::Value;
use toolsmith_core::Timestamp;

use crate::field::{self, FieldError};
use crate::model::{ParamType, Tool, ToolParameter};

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value is not a JSON object
    NotAnObject {
        /// What was being validated ("tool" or "parameter")
        kind: &'static str,
        /// JSON kind that was found
        found: &'static str,
    },
    /// Field missing or of the wrong kind
    Field(FieldError),
    /// Field empty after trimming
    Blank {
        /// Field name
        field: &'static str,
    },
    /// Parameter type outside the accepted kinds
    UnknownType {
        /// Offending value
        value: String,
    },
    /// A nested parameter failed
    Parameter {
        /// Position in `parameters`
        index: usize,
        /// Underlying failure
        source: Box<ValidationError>,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject { kind, found } => {
                write!(f, "{} must be an object, found {}", kind, found)
            }
            Self::Field(err) => write!(f, "{}", err),
            Self::Blank { field } => write!(f, "field `{}` must not be blank", field),
            Self::UnknownType { value } => write!(f, "unknown parameter type: {}", value),
            Self::Parameter { index, source } => write!(f, "parameter {}: {}", index, source),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            Self::Parameter { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<FieldError> for ValidationError {
    fn from(err: FieldError) -> Self {
        Self::Field(err)
    }
}

fn require_non_blank(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

/// Check a typed parameter
///
/// # Errors
///
/// Returns error if the name is blank
pub fn validate_parameter(param: &ToolParameter) -> Result<(), ValidationError> {
    require_non_blank(&param.name, "name")
}

/// Check a typed tool and every one of its parameters
///
/// # Errors
///
/// Returns the first violation found
pub fn validate_tool(tool: &Tool) -> Result<(), ValidationError> {
    require_non_blank(&tool.name, "name")?;
    require_non_blank(&tool.description, "description")?;
    for (index, param) in tool.parameters.iter().enumerate() {
        validate_parameter(param).map_err(|e| ValidationError::Parameter {
            index,
            source: Box::new(e),
        })?;
    }
    require_non_blank(&tool.python_code_key, "pythonCodeKey")
}

/// Decode and check an untyped parameter value
///
/// # Errors
///
/// Returns the first violation found
pub fn check_parameter(value: &Value) -> Result<ToolParameter, ValidationError> {
    let obj = value.as_object().ok_or(ValidationError::NotAnObject {
        kind: "parameter",
        found: field::kind_of(value),
    })?;

    let id = field::require_str(obj, "id")?;
    let name = field::require_str(obj, "name")?;
    let type_name = field::require_str(obj, "type")?;
    let param_type = ParamType::parse(type_name).ok_or_else(|| ValidationError::UnknownType {
        value: type_name.to_string(),
    })?;
    let description = field::require_str(obj, "description")?;
    let required = field::require_bool(obj, "required")?;

    let param = ToolParameter {
        id: id.to_string(),
        name: name.to_string(),
        param_type,
        description: description.to_string(),
        required,
        default_value: obj.get("defaultValue").filter(|v| !v.is_null()).cloned(),
    };
    validate_parameter(&param)?;
    Ok(param)
}

/// Decode and check an untyped tool value.
///
/// Optional fields never fail the check: a non-textual `requirementsKey` or
/// `owner` is dropped and an unparsable `createdAt` becomes the epoch.
///
/// # Errors
///
/// Returns the first violation found
pub fn check_tool(value: &Value) -> Result<Tool, ValidationError> {
    let obj = value.as_object().ok_or(ValidationError::NotAnObject {
        kind: "tool",
        found: field::kind_of(value),
    })?;

    let id = field::require_str(obj, "id")?;
    let name = field::require_str(obj, "name")?;
    require_non_blank(name, "name")?;
    let description = field::require_str(obj, "description")?;
    require_non_blank(description, "description")?;

    let parameters = field::require_array(obj, "parameters")?
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            check_parameter(raw).map_err(|e| ValidationError::Parameter {
                index,
                source: Box::new(e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let python_code_key = field::require_str(obj, "pythonCodeKey")?;
    require_non_blank(python_code_key, "pythonCodeKey")?;
    let is_active = field::require_bool(obj, "isActive")?;

    let created_at = field::optional_str(obj, "createdAt")
        .and_then(|s| Timestamp::parse_rfc3339(s).ok())
        .unwrap_or_default();

    Ok(Tool {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        parameters,
        python_code_key: python_code_key.to_string(),
        requirements_key: field::optional_str(obj, "requirementsKey").map(str::to_string),
        is_active,
        created_at,
        owner: field::optional_str(obj, "owner").map(str::to_string),
    })
}

/// Whether `value` satisfies the parameter contract
#[must_use]
pub fn is_valid_parameter(value: &Value) -> bool {
    check_parameter(value).is_ok()
}

/// Whether `value` satisfies the tool contract
#[must_use]
pub fn is_valid_tool(value: &Value) -> bool {
    check_tool(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn param_json() -> Value {
        json!({
            "id": "p1",
            "name": "query",
            "type": "string",
            "description": "Search query",
            "required": true
        })
    }

    fn tool_json() -> Value {
        json!({
            "id": "t1",
            "name": "search",
            "description": "Search the web",
            "parameters": [param_json()],
            "pythonCodeKey": "tools/search.py",
            "isActive": true,
            "createdAt": "2024-05-01T12:30:00Z",
            "owner": "alice"
        })
    }

    #[test]
    fn test_valid_parameter() {
        assert!(is_valid_parameter(&param_json()));
        let param = check_parameter(&param_json()).unwrap();
        assert_eq!(param.param_type, ParamType::String);
        assert!(param.required);
    }

    #[test]
    fn test_parameter_rejects_non_objects() {
        for value in [json!(null), json!("x"), json!(3), json!([param_json()])] {
            assert!(!is_valid_parameter(&value));
        }
        assert_eq!(
            check_parameter(&json!(null)),
            Err(ValidationError::NotAnObject {
                kind: "parameter",
                found: "null"
            })
        );
    }

    #[test]
    fn test_parameter_blank_name() {
        let mut value = param_json();
        value["name"] = json!("   ");
        assert_eq!(
            check_parameter(&value),
            Err(ValidationError::Blank { field: "name" })
        );
    }

    #[test]
    fn test_parameter_unknown_type() {
        let mut value = param_json();
        value["type"] = json!("integer");
        assert_eq!(
            check_parameter(&value),
            Err(ValidationError::UnknownType {
                value: "integer".to_string()
            })
        );
    }

    #[test]
    fn test_parameter_does_not_coerce() {
        let mut value = param_json();
        value["required"] = json!(1);
        assert!(!is_valid_parameter(&value));

        let mut value = param_json();
        value.as_object_mut().unwrap().remove("description");
        assert!(matches!(
            check_parameter(&value),
            Err(ValidationError::Field(FieldError::Missing { .. }))
        ));

        let mut value = param_json();
        value["id"] = json!(7);
        assert!(!is_valid_parameter(&value));
    }

    #[test]
    fn test_valid_tool() {
        let tool = check_tool(&tool_json()).unwrap();
        assert_eq!(tool.parameters.len(), 1);
        assert_eq!(tool.owner.as_deref(), Some("alice"));
        assert_eq!(tool.created_at.to_string(), "2024-05-01T12:30:00.000Z");
        assert!(is_valid_tool(&tool_json()));
    }

    #[test]
    fn test_tool_required_fields() {
        for (field, replacement) in [
            ("id", json!(1)),
            ("name", json!(" ")),
            ("description", json!("")),
            ("parameters", json!({})),
            ("pythonCodeKey", json!("\t")),
            ("isActive", json!("yes")),
        ] {
            let mut value = tool_json();
            value[field] = replacement;
            assert!(!is_valid_tool(&value), "{} should invalidate the tool", field);
        }
    }

    #[test]
    fn test_tool_invalid_parameter_reports_index() {
        let mut value = tool_json();
        value["parameters"] = json!([param_json(), {"id": "p2", "name": ""}]);
        let err = check_tool(&value).unwrap_err();
        match err {
            ValidationError::Parameter { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_tool_optional_fields_are_lenient() {
        let mut value = tool_json();
        value["owner"] = json!(42);
        value["requirementsKey"] = json!(null);
        value["createdAt"] = json!("not a date");
        let tool = check_tool(&value).unwrap();
        assert_eq!(tool.owner, None);
        assert_eq!(tool.requirements_key, None);
        assert_eq!(tool.created_at, Timestamp::epoch());
    }

    #[test]
    fn test_typed_validation() {
        let tool = Tool::new("t1", "search", "Search", "tools/search.py")
            .with_parameter(ToolParameter::new("p1", " ", ParamType::String));
        assert!(matches!(
            tool.validate(),
            Err(ValidationError::Parameter { index: 0, .. })
        ));

        let tool = Tool::new("t1", "search", "Search", "");
        assert_eq!(
            tool.validate(),
            Err(ValidationError::Blank {
                field: "pythonCodeKey"
            })
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::Parameter {
            index: 2,
            source: Box::new(ValidationError::Blank { field: "name" }),
        };
        assert_eq!(err.to_string(), "parameter 2: field `name` must not be blank");
    }
}
