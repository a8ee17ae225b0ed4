//! Wire schemas for the LLM provider's tool-calling API.
//!
//! Field names here are the provider's and must not change: `toolSpec`,
//! `inputSchema.json.{type, properties, required, additionalProperties}`,
//! `toolConfig.tools`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::ParamType;

/// JSON Schema type vocabulary used on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// `"string"`
    String,
    /// `"number"`
    Number,
    /// `"boolean"`
    Boolean,
    /// `"array"`
    Array,
    /// `"object"`
    Object,
}

impl From<ParamType> for JsonType {
    fn from(value: ParamType) -> Self {
        match value {
            ParamType::String => Self::String,
            ParamType::Number => Self::Number,
            ParamType::Boolean => Self::Boolean,
            ParamType::Array => Self::Array,
            ParamType::Object => Self::Object,
        }
    }
}

/// One declared argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// Argument type
    #[serde(rename = "type")]
    pub kind: JsonType,
    /// Argument description
    pub description: String,
}

impl PropertySchema {
    /// Create a property schema
    #[must_use]
    pub fn new(kind: JsonType, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

/// The `inputSchema.json` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputJsonSchema {
    /// Always [`JsonType::Object`]
    #[serde(rename = "type")]
    pub kind: JsonType,
    /// Declared arguments, in parameter order
    pub properties: IndexMap<String, PropertySchema>,
    /// Required argument names, ordered and unique
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Always `false`: undeclared arguments are rejected
    pub additional_properties: bool,
}

impl InputJsonSchema {
    /// Create an empty object schema
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: JsonType::Object,
            properties: IndexMap::new(),
            required: Vec::new(),
            additional_properties: false,
        }
    }

    /// Add or replace a property.
    ///
    /// A replaced property keeps its original position.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, property: PropertySchema) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// Mark a property as required; repeated names are ignored
    #[must_use]
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Look up a declared property
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.get(name)
    }

    /// Whether `name` is required
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Whether no property is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Default for InputJsonSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// The `inputSchema` wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSchema {
    /// JSON Schema body
    pub json: InputJsonSchema,
}

/// The `toolSpec` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    /// Wire name (prefix + tool id)
    pub name: String,
    /// Tool description, verbatim
    pub description: String,
    /// Omitted when the tool declares no usable parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<InputSchema>,
}

/// A compiled tool, as placed in the provider request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledToolSpec {
    /// The spec body
    pub tool_spec: ToolSpec,
}

impl CompiledToolSpec {
    /// Wire name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.tool_spec.name
    }

    /// Input schema body, if any
    #[must_use]
    pub fn input_json(&self) -> Option<&InputJsonSchema> {
        self.tool_spec.input_schema.as_ref().map(|s| &s.json)
    }
}

/// The provider's `toolConfig` request field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Compiled tools
    pub tools: Vec<CompiledToolSpec>,
}

impl ToolConfig {
    /// Whether no tool is offered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Number of tools offered
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }
}
