//! Function schemas and name-based classification.
//!
//! A function's category is decided by its name prefix and nothing else:
//!
//! | Prefix | Kind |
//! |--------|------|
//! | `fetch_`, `get_` | [`FunctionKind::Fetch`] |
//! | `render_` | [`FunctionKind::Render`] |
//! | `set_` | [`FunctionKind::Mutate`] |
//!
//! The prefix is parsed once when a [`FunctionSpec`] is built so that call
//! sites branch on the enum instead of inspecting strings.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const FETCH_PREFIXES: [&str; 2] = ["fetch_", "get_"];
const RENDER_PREFIX: &str = "render_";
const MUTATE_PREFIX: &str = "set_";

/// Category of a callable function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    /// Reads external data; executed locally, result fed back to the model.
    Fetch,
    /// Describes UI; returned to the caller un-executed.
    Render,
    /// Changes state; executed locally like a fetch.
    Mutate,
}

impl FunctionKind {
    /// Derive the kind from a function name's prefix.
    pub fn from_name(name: &str) -> Option<Self> {
        if FETCH_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
            Some(Self::Fetch)
        } else if name.starts_with(RENDER_PREFIX) {
            Some(Self::Render)
        } else if name.starts_with(MUTATE_PREFIX) {
            Some(Self::Mutate)
        } else {
            None
        }
    }

    /// Whether functions of this kind run on the server.
    pub fn is_executable(self) -> bool {
        !matches!(self, Self::Render)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Render => "render",
            Self::Mutate => "mutate",
        }
    }
}

impl std::fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function name that matches none of the classification prefixes.
#[derive(Debug, Clone, Error)]
#[error("function name '{0}' has no fetch_/get_/render_/set_ prefix")]
pub struct UnclassifiedName(pub String);

/// Schema of a function the model may call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSpec {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    parameters: Value,
    kind: FunctionKind,
}

impl FunctionSpec {
    /// Build a spec, classifying it from its name.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Result<Self, UnclassifiedName> {
        let name = name.into();
        let kind = FunctionKind::from_name(&name).ok_or_else(|| UnclassifiedName(name.clone()))?;
        let description = description.into();

        Ok(Self {
            name,
            description: (!description.is_empty()).then_some(description),
            parameters,
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// JSON-Schema-like description of the accepted arguments.
    pub fn parameters(&self) -> &Value {
        &self.parameters
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// Names listed in the schema's top-level `required` array.
    pub fn required(&self) -> Vec<&str> {
        self.parameters
            .get("required")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_from_prefix() {
        assert_eq!(FunctionKind::from_name("fetch_current_weather"), Some(FunctionKind::Fetch));
        assert_eq!(FunctionKind::from_name("get_username"), Some(FunctionKind::Fetch));
        assert_eq!(FunctionKind::from_name("render_buttons"), Some(FunctionKind::Render));
        assert_eq!(FunctionKind::from_name("set_theme"), Some(FunctionKind::Mutate));
        assert_eq!(FunctionKind::from_name("delete_everything"), None);
        assert_eq!(FunctionKind::from_name("eval_code_in_browser"), None);
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        assert_eq!(FunctionKind::from_name("Render_buttons"), None);
        assert_eq!(FunctionKind::from_name("getter"), None);
    }

    #[test]
    fn test_spec_classified_at_construction() {
        let spec = FunctionSpec::new(
            "get_current_weather",
            "Get the current weather",
            json!({
                "type": "object",
                "properties": {"location": {"type": "string"}},
                "required": ["location"]
            }),
        )
        .unwrap();

        assert_eq!(spec.kind(), FunctionKind::Fetch);
        assert_eq!(spec.required(), vec!["location"]);
        assert_eq!(spec.description(), Some("Get the current weather"));
    }

    #[test]
    fn test_spec_rejects_unprefixed_name() {
        let err = FunctionSpec::new("weather", "", json!({"type": "object"})).unwrap_err();
        assert_eq!(err.0, "weather");
    }

    #[test]
    fn test_render_is_not_executable() {
        assert!(!FunctionKind::Render.is_executable());
        assert!(FunctionKind::Fetch.is_executable());
        assert!(FunctionKind::Mutate.is_executable());
    }
}
