//! Lenient normalization of user-authored parameter lists.
//!
//! Input is untrusted. Anything that cannot be repaired is dropped, never
//! reported: the caller always gets a usable (possibly empty) list.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use toolsmith_core::{ClockIdSource, IdSource};
use toolsmith_core::id::IdBatch;

use crate::field;
use crate::model::{ParamType, ToolParameter};

/// Normalization configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Prefix of generated parameter ids
    pub id_prefix: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            id_prefix: "param".to_string(),
        }
    }
}

/// Normalizer for raw parameter lists
#[derive(Clone)]
pub struct Normalizer {
    config: NormalizeConfig,
    ids: Arc<dyn IdSource>,
}

impl Normalizer {
    /// Create a new normalizer with default config and wall clock ids
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: NormalizeConfig::default(),
            ids: Arc::new(ClockIdSource::new()),
        }
    }

    /// Create a normalizer with custom config
    #[must_use]
    pub fn with_config(config: NormalizeConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    /// Replace the id source
    #[must_use]
    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Current config
    #[must_use]
    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Normalize a raw parameter list.
    ///
    /// `raw` may be an array, or a string holding a JSON array. Falsy values,
    /// unparsable text and any other shape yield an empty list.
    #[must_use]
    pub fn normalize(&self, raw: &Value) -> Vec<ToolParameter> {
        if !field::is_truthy(raw) {
            return Vec::new();
        }

        let parsed: Cow<'_, Value> = match raw {
            Value::String(text) => match serde_json::from_str(text) {
                Ok(value) => Cow::Owned(value),
                Err(e) => {
                    tracing::debug!(reason = %e, "parameter text is not JSON, treating as empty");
                    return Vec::new();
                }
            },
            other => Cow::Borrowed(other),
        };

        let Some(items) = parsed.as_array() else {
            tracing::debug!(kind = field::kind_of(&parsed), "parameters are not a list");
            return Vec::new();
        };

        let batch = self.ids.batch();
        let params: Vec<ToolParameter> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| self.normalize_item(index, item, &batch))
            .collect();

        tracing::debug!(
            received = items.len(),
            kept = params.len(),
            "normalized tool parameters"
        );
        params
    }

    /// Normalize parameter text
    #[must_use]
    pub fn normalize_str(&self, raw: &str) -> Vec<ToolParameter> {
        self.normalize(&Value::String(raw.to_string()))
    }

    fn normalize_item(&self, index: usize, item: &Value, batch: &IdBatch) -> Option<ToolParameter> {
        let Some(obj) = item.as_object() else {
            tracing::trace!(index, kind = field::kind_of(item), "dropping non-object parameter");
            return None;
        };

        let candidate = self.coerce(index, obj, batch);
        match candidate.validate() {
            Ok(()) => Some(candidate),
            Err(e) => {
                tracing::trace!(index, reason = %e, "dropping invalid parameter");
                None
            }
        }
    }

    fn coerce(&self, index: usize, obj: &Map<String, Value>, batch: &IdBatch) -> ToolParameter {
        let id = field::optional_str(obj, "id")
            .map_or_else(|| batch.id_for(&self.config.id_prefix, index), str::to_string);

        ToolParameter {
            id,
            name: field::str_or_empty(obj, "name").trim().to_string(),
            param_type: ParamType::coerce(obj.get("type")),
            description: field::str_or_empty(obj, "description").trim().to_string(),
            required: field::truthy(obj.get("required")),
            default_value: obj.get("defaultValue").filter(|v| !v.is_null()).cloned(),
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
