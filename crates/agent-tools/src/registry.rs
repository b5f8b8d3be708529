//! Function registry: name → schema, classification and handler.

use std::sync::Arc;

use brain_core::{FunctionKind, FunctionSpec};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::info;

use crate::error::RegistryError;
use crate::handler::FunctionHandler;

/// Classification of a function name against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Fetch,
    Render,
    Mutate,
    /// Not registered. `intended` is the category the name's prefix implies,
    /// if any.
    Unknown { intended: Option<FunctionKind> },
}

impl From<FunctionKind> for Classification {
    fn from(kind: FunctionKind) -> Self {
        match kind {
            FunctionKind::Fetch => Self::Fetch,
            FunctionKind::Render => Self::Render,
            FunctionKind::Mutate => Self::Mutate,
        }
    }
}

struct RegisteredFunction {
    spec: FunctionSpec,
    handler: Option<Arc<dyn FunctionHandler>>,
}

/// Registry of every function the model may call.
///
/// Built once at startup and then shared read-only (wrap it in an `Arc`).
/// Registration order is preserved so schema lists are stable.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: IndexMap<String, RegisteredFunction>,
}

impl FunctionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a render function. Render functions have no handler.
    pub fn register_render(&mut self, spec: FunctionSpec) -> Result<(), RegistryError> {
        self.register(spec, None)
    }

    /// Register a fetch or mutate function with its handler.
    pub fn register_handler<H: FunctionHandler + 'static>(
        &mut self,
        spec: FunctionSpec,
        handler: H,
    ) -> Result<(), RegistryError> {
        self.register(spec, Some(Arc::new(handler)))
    }

    /// Register a function.
    ///
    /// Fails on duplicate names, non-object schemas, and when the presence of
    /// a handler does not match the function's kind.
    pub fn register(
        &mut self,
        spec: FunctionSpec,
        handler: Option<Arc<dyn FunctionHandler>>,
    ) -> Result<(), RegistryError> {
        let name = spec.name().to_string();

        if self.functions.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }

        match spec.parameters().get("type").and_then(Value::as_str) {
            Some("object") => {}
            other => {
                return Err(RegistryError::InvalidSchema {
                    name,
                    reason: format!("expected type \"object\", found {:?}", other),
                })
            }
        }

        let kind = spec.kind();
        match (kind.is_executable(), handler.is_some()) {
            (true, false) => {
                return Err(RegistryError::HandlerMismatch {
                    name,
                    kind,
                    reason: "requires a handler",
                })
            }
            (false, true) => {
                return Err(RegistryError::HandlerMismatch {
                    name,
                    kind,
                    reason: "must not have a handler",
                })
            }
            _ => {}
        }

        info!(function = %name, kind = %kind, "Registering function");
        self.functions
            .insert(name, RegisteredFunction { spec, handler });
        Ok(())
    }

    /// Classify a function name.
    ///
    /// Registered names report their parsed kind. Unregistered names report
    /// `Unknown` together with whatever category their prefix implies.
    pub fn classify(&self, name: &str) -> Classification {
        match self.functions.get(name) {
            Some(entry) => entry.spec.kind().into(),
            None => Classification::Unknown {
                intended: FunctionKind::from_name(name),
            },
        }
    }

    /// Get a function's schema by name.
    pub fn lookup(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name).map(|entry| &entry.spec)
    }

    pub(crate) fn entry(
        &self,
        name: &str,
    ) -> Option<(&FunctionSpec, Option<&Arc<dyn FunctionHandler>>)> {
        self.functions
            .get(name)
            .map(|entry| (&entry.spec, entry.handler.as_ref()))
    }

    /// All schemas, in registration order.
    pub fn specs(&self) -> impl Iterator<Item = &FunctionSpec> {
        self.functions.values().map(|entry| &entry.spec)
    }

    /// All registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.functions.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a function is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
