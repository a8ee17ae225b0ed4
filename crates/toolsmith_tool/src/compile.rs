//! Compilation of validated tools into provider tool specs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Tool, ToolParameter};
use crate::schema::{
    CompiledToolSpec, InputJsonSchema, InputSchema, JsonType, PropertySchema, ToolSpec,
};
use crate::validate::{self, ValidationError};

/// Default wire-name prefix
pub const DEFAULT_NAME_PREFIX: &str = "custom_tool_";

/// Default prefix of the description given to undocumented parameters
pub const DEFAULT_FALLBACK_DESCRIPTION: &str = "Parameter ";

/// Compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Prepended to the tool id to form the wire name
    pub name_prefix: String,
    /// Prepended to the parameter name when its description is empty
    pub fallback_description_prefix: String,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            fallback_description_prefix: DEFAULT_FALLBACK_DESCRIPTION.to_string(),
        }
    }
}

/// Compiler from [`Tool`] to [`CompiledToolSpec`]
#[derive(Debug, Clone, Default)]
pub struct ToolSpecCompiler {
    config: CompileConfig,
}

impl ToolSpecCompiler {
    /// Create a compiler with default config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler with custom config
    #[must_use]
    pub fn with_config(config: CompileConfig) -> Self {
        Self { config }
    }

    /// Current config
    #[must_use]
    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Wire name for a tool id
    #[must_use]
    pub fn wire_name(&self, tool_id: &str) -> String {
        format!("{}{}", self.config.name_prefix, tool_id)
    }

    /// Tool id encoded in a wire name, if it carries this compiler's prefix
    #[must_use]
    pub fn tool_id<'a>(&self, wire_name: &'a str) -> Option<&'a str> {
        wire_name.strip_prefix(self.config.name_prefix.as_str())
    }

    /// Compile a typed tool
    ///
    /// # Errors
    ///
    /// Returns error if the tool fails validation; nothing is compiled then
    pub fn compile(&self, tool: &Tool) -> Result<CompiledToolSpec, ValidationError> {
        if let Err(e) = validate::validate_tool(tool) {
            tracing::warn!(tool_id = %tool.id, reason = %e, "refusing to compile invalid tool");
            return Err(e);
        }

        Ok(CompiledToolSpec {
            tool_spec: ToolSpec {
                name: self.wire_name(&tool.id),
                description: tool.description.clone(),
                input_schema: self.input_schema(&tool.parameters),
            },
        })
    }

    /// Validate and compile an untyped tool value
    ///
    /// # Errors
    ///
    /// Returns error if the value fails validation
    pub fn compile_value(&self, value: &Value) -> Result<CompiledToolSpec, ValidationError> {
        let tool = validate::check_tool(value).inspect_err(|e| {
            tracing::warn!(reason = %e, "refusing to compile invalid tool value");
        })?;
        self.compile(&tool)
    }

    fn input_schema(&self, parameters: &[ToolParameter]) -> Option<InputSchema> {
        let mut schema = InputJsonSchema::new();
        for param in parameters {
            let name = param.name.trim();
            if name.is_empty() {
                continue;
            }

            let description = if param.description.is_empty() {
                format!("{}{}", self.config.fallback_description_prefix, name)
            } else {
                param.description.clone()
            };
            schema = schema.with_property(
                name,
                PropertySchema::new(JsonType::from(param.param_type), description),
            );
            if param.required {
                schema = schema.with_required(name);
            }
        }

        if schema.is_empty() {
            None
        } else {
            Some(InputSchema { json: schema })
        }
    }
}
