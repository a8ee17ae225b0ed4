//! TOOLSMITH Tool Pipeline
//!
//! Turns loosely-typed, user-authored tool definitions into validated
//! records and provider tool specs. Input is treated as untrusted:
//! normalization prunes what it cannot repair, compilation refuses
//! anything that fails validation.
//!
//! ```text
//! raw input -> Normalizer -> validation gate -> ToolSpecCompiler -> wire spec
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compile;
pub mod field;
pub mod input;
pub mod model;
pub mod normalize;
pub mod registry;
pub mod schema;
pub mod validate;

pub use compile::{CompileConfig, DEFAULT_NAME_PREFIX, ToolSpecCompiler};
pub use field::FieldError;
pub use input::{InputErrors, check_input, check_tool_input};
pub use model::{ParamType, Tool, ToolParameter};
pub use normalize::{NormalizeConfig, Normalizer};
pub use registry::{RegistryError, ToolRegistry, build_tool_config};
pub use schema::{
    CompiledToolSpec, InputJsonSchema, InputSchema, JsonType, PropertySchema, ToolConfig, ToolSpec,
};
pub use validate::{
    ValidationError, check_parameter, check_tool, is_valid_parameter, is_valid_tool,
};

use serde_json::Value;

/// Normalize a raw parameter list with default settings
#[must_use]
pub fn normalize_tool_parameters(raw: &Value) -> Vec<ToolParameter> {
    Normalizer::new().normalize(raw)
}

/// Whether `value` is a valid tool
#[must_use]
pub fn validate_tool(value: &Value) -> bool {
    is_valid_tool(value)
}

/// Whether `value` is a valid tool parameter
#[must_use]
pub fn validate_tool_parameter(value: &Value) -> bool {
    is_valid_parameter(value)
}

/// Compile an untyped tool into a provider tool spec with default settings.
///
/// `None` means the tool must not be offered to the LLM.
#[must_use]
pub fn create_tool_spec(value: &Value) -> Option<CompiledToolSpec> {
    ToolSpecCompiler::new().compile_value(value).ok()
}
