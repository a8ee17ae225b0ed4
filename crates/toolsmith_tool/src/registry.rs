//! Tool registry and `toolConfig` assembly.

use indexmap::IndexMap;

use crate::compile::ToolSpecCompiler;
use crate::model::Tool;
use crate::schema::ToolConfig;
use crate::validate::ValidationError;

/// Error from registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Tool already registered
    AlreadyRegistered {
        /// Conflicting tool id
        id: String,
    },
    /// Tool not found
    NotFound {
        /// Requested tool id
        id: String,
    },
    /// Tool failed validation
    Invalid {
        /// Tool id
        id: String,
        /// Underlying failure
        reason: ValidationError,
    },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyRegistered { id } => write!(f, "Tool already registered: {}", id),
            Self::NotFound { id } => write!(f, "Tool not found: {}", id),
            Self::Invalid { id, reason } => write!(f, "Tool {} is invalid: {}", id, reason),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry of tools, keyed by id in registration order
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Tool>,
    compiler: ToolSpecCompiler,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that compiles with `compiler`
    #[must_use]
    pub fn with_compiler(compiler: ToolSpecCompiler) -> Self {
        Self {
            tools: IndexMap::new(),
            compiler,
        }
    }

    /// Register a tool
    ///
    /// # Errors
    ///
    /// Returns error if the id is taken or the tool is invalid
    pub fn register(&mut self, tool: Tool) -> Result<(), RegistryError> {
        if self.tools.contains_key(&tool.id) {
            return Err(RegistryError::AlreadyRegistered { id: tool.id });
        }
        if let Err(reason) = tool.validate() {
            return Err(RegistryError::Invalid {
                id: tool.id,
                reason,
            });
        }

        tracing::debug!(tool_id = %tool.id, "registered tool");
        self.tools.insert(tool.id.clone(), tool);
        Ok(())
    }

    /// Get a tool by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Tool> {
        self.tools.get(id)
    }

    /// Tool behind a wire name produced by this registry's compiler
    #[must_use]
    pub fn resolve(&self, wire_name: &str) -> Option<&Tool> {
        self.compiler.tool_id(wire_name).and_then(|id| self.get(id))
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.tools.contains_key(id)
    }

    /// Set a tool's active flag
    ///
    /// # Errors
    ///
    /// Returns error if tool not found
    pub fn set_active(&mut self, id: &str, active: bool) -> Result<(), RegistryError> {
        self.tools
            .get_mut(id)
            .map(|t| t.is_active = active)
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })
    }

    /// Unregister a tool, returning it
    ///
    /// # Errors
    ///
    /// Returns error if tool not found
    pub fn unregister(&mut self, id: &str) -> Result<Tool, RegistryError> {
        self.tools
            .shift_remove(id)
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })
    }

    /// Active tools, in registration order
    pub fn active(&self) -> impl Iterator<Item = &Tool> {
        self.tools.values().filter(|t| t.is_active)
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Assemble the provider `toolConfig` from active tools.
    ///
    /// With a non-empty `selected` list only those ids are offered.
    #[must_use]
    pub fn tool_config(&self, selected: Option<&[String]>) -> ToolConfig {
        let tools: Vec<&Tool> = self.tools.values().collect();
        assemble(&tools, selected, &self.compiler)
    }
}

/// Assemble a provider `toolConfig` from a slice of tools.
///
/// Inactive tools, tools outside a non-empty `selected` list, and tools that
/// fail compilation are left out. Order follows `tools`.
#[must_use]
pub fn build_tool_config(
    tools: &[Tool],
    selected: Option<&[String]>,
    compiler: &ToolSpecCompiler,
) -> ToolConfig {
    let tools: Vec<&Tool> = tools.iter().collect();
    assemble(&tools, selected, compiler)
}

fn assemble(
    tools: &[&Tool],
    selected: Option<&[String]>,
    compiler: &ToolSpecCompiler,
) -> ToolConfig {
    let selected = selected.filter(|ids| !ids.is_empty());
    let specs = tools
        .iter()
        .filter(|t| t.is_active)
        .filter(|t| selected.is_none_or(|ids| ids.contains(&t.id)))
        .filter_map(|t| match compiler.compile(t) {
            Ok(spec) => Some(spec),
            Err(e) => {
                tracing::warn!(tool_id = %t.id, reason = %e, "leaving tool out of toolConfig");
                None
            }
        })
        .collect();
    ToolConfig { tools: specs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::CompileConfig;
    use crate::model::{ParamType, ToolParameter};

    fn make_tool(id: &str) -> Tool {
        Tool::new(id, format!("tool {}", id), "does things", format!("tools/{}.py", id))
            .with_parameter(ToolParameter::new("p", "arg", ParamType::String).with_required(true))
    }

    #[test]
    fn test_registry_new() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.tool_config(None).is_empty());
    }

    #[test]
    fn test_registry_register() {
        let mut registry = ToolRegistry::new();
        registry.register(make_tool("a")).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("a"));
        assert_eq!(registry.get("a").unwrap().name, "tool a");
    }

    #[test]
    fn test_registry_register_duplicate() {
        let mut registry = ToolRegistry::new();
        registry.register(make_tool("a")).unwrap();
        assert_eq!(
            registry.register(make_tool("a")),
            Err(RegistryError::AlreadyRegistered { id: "a".to_string() })
        );
    }

    #[test]
    fn test_registry_register_invalid() {
        let mut registry = ToolRegistry::new();
        let mut tool = make_tool("a");
        tool.python_code_key = String::new();
        assert!(matches!(
            registry.register(tool),
            Err(RegistryError::Invalid { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_set_active_and_unregister() {
        let mut registry = ToolRegistry::new();
        registry.register(make_tool("a")).unwrap();
        registry.register(make_tool("b")).unwrap();

        registry.set_active("a", false).unwrap();
        let active: Vec<&str> = registry.active().map(|t| t.id.as_str()).collect();
        assert_eq!(active, vec!["b"]);

        assert!(registry.set_active("missing", true).is_err());
        let removed = registry.unregister("b").unwrap();
        assert_eq!(removed.id, "b");
        assert!(registry.unregister("b").is_err());
    }

    #[test]
    fn test_tool_config_filters_and_orders() {
        let mut registry = ToolRegistry::new();
        for id in ["c", "a", "b", "d"] {
            registry.register(make_tool(id)).unwrap();
        }
        registry.set_active("d", false).unwrap();

        let all = registry.tool_config(None);
        let names: Vec<&str> = all.tools.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["custom_tool_c", "custom_tool_a", "custom_tool_b"]);

        let selected = vec!["b".to_string(), "d".to_string(), "c".to_string()];
        let some = registry.tool_config(Some(selected.as_slice()));
        let names: Vec<&str> = some.tools.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["custom_tool_c", "custom_tool_b"]);

        let empty: Vec<String> = Vec::new();
        assert_eq!(registry.tool_config(Some(empty.as_slice())).len(), 3);
    }

    #[test]
    fn test_build_tool_config_skips_invalid() {
        let mut broken = make_tool("x");
        broken.description = " ".to_string();
        let tools = vec![make_tool("a"), broken, make_tool("b")];
        let config = build_tool_config(&tools, None, &ToolSpecCompiler::new());
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_resolve_wire_name() {
        let mut registry = ToolRegistry::with_compiler(ToolSpecCompiler::with_config(CompileConfig {
            name_prefix: "fn_".to_string(),
            ..CompileConfig::default()
        }));
        registry.register(make_tool("abc")).unwrap();
        assert_eq!(registry.resolve("fn_abc").map(|t| t.id.as_str()), Some("abc"));
        assert!(registry.resolve("custom_tool_abc").is_none());
        assert!(registry.resolve("fn_zzz").is_none());
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::NotFound { id: "x".to_string() };
        assert_eq!(err.to_string(), "Tool not found: x");
    }
}
