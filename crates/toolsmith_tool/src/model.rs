//! Canonical tool and parameter records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use toolsmith_core::Timestamp;

use crate::validate::{self, ValidationError};

/// Kind of value a parameter accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Free text
    #[default]
    String,
    /// Integer or floating point number
    Number,
    /// true / false
    Boolean,
    /// Ordered list
    Array,
    /// Key/value mapping
    Object,
}

impl ParamType {
    /// Every accepted kind, in declaration order
    pub const ALL: [ParamType; 5] = [
        ParamType::String,
        ParamType::Number,
        ParamType::Boolean,
        ParamType::Array,
        ParamType::Object,
    ];

    /// Strict parse; `None` for anything outside the five kinds
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == input)
    }

    /// Lenient parse used during normalization.
    ///
    /// Missing, non-textual, or unknown values become [`ParamType::String`].
    #[must_use]
    pub fn coerce(value: Option<&Value>) -> Self {
        value
            .and_then(Value::as_str)
            .and_then(Self::parse)
            .unwrap_or_default()
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named, typed input slot of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolParameter {
    /// Parameter id
    pub id: String,
    /// Parameter name, as the LLM will see it
    pub name: String,
    /// Accepted kind
    #[serde(rename = "type")]
    pub param_type: ParamType,
    /// Human readable description
    pub description: String,
    /// Whether the LLM must supply it
    pub required: bool,
    /// Default value, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl ToolParameter {
    /// Create an optional parameter with an empty description
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            param_type,
            description: String::new(),
            required: false,
            default_value: None,
        }
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set required flag
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set default value
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Check the parameter contract
    ///
    /// # Errors
    ///
    /// Returns error if the name is blank
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_parameter(self)
    }
}

/// A user-defined callable capability exposed to an LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Tool id; the wire name is derived from it
    pub id: String,
    /// Display name
    pub name: String,
    /// Description sent to the LLM
    pub description: String,
    /// Ordered parameters
    pub parameters: Vec<ToolParameter>,
    /// Key of the externally stored executable code
    pub python_code_key: String,
    /// Key of the externally stored requirements file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements_key: Option<String>,
    /// Inactive tools are never offered to the LLM
    pub is_active: bool,
    /// Creation time
    #[serde(default)]
    pub created_at: Timestamp,
    /// Owning user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Tool {
    /// Create an active tool with no parameters
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        python_code_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            python_code_key: python_code_key.into(),
            requirements_key: None,
            is_active: true,
            created_at: Timestamp::now(),
            owner: None,
        }
    }

    /// Append a parameter
    #[must_use]
    pub fn with_parameter(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Replace all parameters
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ToolParameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set requirements key
    #[must_use]
    pub fn with_requirements_key(mut self, key: impl Into<String>) -> Self {
        self.requirements_key = Some(key.into());
        self
    }

    /// Set active flag
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Set owner
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set creation time
    #[must_use]
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Check the tool contract, including every parameter
    ///
    /// # Errors
    ///
    /// Returns the first violation found
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_tool(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_type_parse() {
        assert_eq!(ParamType::parse("number"), Some(ParamType::Number));
        assert_eq!(ParamType::parse("object"), Some(ParamType::Object));
        assert_eq!(ParamType::parse("integer"), None);
        assert_eq!(ParamType::parse("String"), None);
    }

    #[test]
    fn test_param_type_coerce() {
        assert_eq!(ParamType::coerce(Some(&json!("array"))), ParamType::Array);
        assert_eq!(ParamType::coerce(Some(&json!("float"))), ParamType::String);
        assert_eq!(ParamType::coerce(Some(&json!(3))), ParamType::String);
        assert_eq!(ParamType::coerce(None), ParamType::String);
    }

    #[test]
    fn test_param_type_serde_lowercase() {
        assert_eq!(serde_json::to_value(ParamType::Boolean).unwrap(), json!("boolean"));
        let parsed: ParamType = serde_json::from_value(json!("number")).unwrap();
        assert_eq!(parsed, ParamType::Number);
    }

    #[test]
    fn test_parameter_serde_camel_case() {
        let param = ToolParameter::new("p1", "limit", ParamType::Number)
            .with_required(true)
            .with_default(json!(10));
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "p1",
                "name": "limit",
                "type": "number",
                "description": "",
                "required": true,
                "defaultValue": 10
            })
        );
    }

    #[test]
    fn test_tool_deserialize_defaults() {
        let tool: Tool = serde_json::from_value(json!({
            "id": "t1",
            "name": "weather",
            "description": "Look up the weather",
            "parameters": [],
            "pythonCodeKey": "tools/weather.py",
            "isActive": true
        }))
        .unwrap();
        assert!(tool.parameters.is_empty());
        assert_eq!(tool.created_at, Timestamp::epoch());
        assert_eq!(tool.owner, None);
        assert_eq!(tool.requirements_key, None);
    }

    #[test]
    fn test_deserialize_requires_contract_fields() {
        let no_parameters = json!({
            "id": "t1",
            "name": "weather",
            "description": "Look up the weather",
            "pythonCodeKey": "tools/weather.py",
            "isActive": true
        });
        assert!(serde_json::from_value::<Tool>(no_parameters).is_err());

        for param in [
            json!({"id": "p1", "name": "city", "type": "string", "required": true}),
            json!({"id": "p1", "name": "city", "type": "string", "description": ""}),
        ] {
            assert!(serde_json::from_value::<ToolParameter>(param).is_err());
        }
    }

    #[test]
    fn test_tool_builder() {
        let tool = Tool::new("t1", "weather", "Look up the weather", "tools/weather.py")
            .with_parameter(ToolParameter::new("p1", "city", ParamType::String))
            .with_owner("alice")
            .with_active(false);
        assert_eq!(tool.parameters.len(), 1);
        assert_eq!(tool.owner.as_deref(), Some("alice"));
        assert!(!tool.is_active);
        assert!(tool.validate().is_ok());
    }
}
