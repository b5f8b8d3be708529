//! Function handler trait and argument types.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::HandlerError;

/// Validated arguments passed to a handler.
#[derive(Debug, Clone, Default)]
pub struct FunctionArgs {
    params: Map<String, Value>,
}

impl FunctionArgs {
    /// Create arguments from an already-validated JSON object.
    pub fn new(params: Map<String, Value>) -> Self {
        Self { params }
    }

    /// Deserialize the arguments into a typed struct.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(Value::Object(self.params.clone()))
            .map_err(|e| HandlerError::InvalidArguments(e.to_string()))
    }

    /// Get a raw parameter by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Get an optional string parameter.
    pub fn get_string_opt(&self, key: &str) -> Option<String> {
        self.params.get(key)?.as_str().map(|s| s.to_string())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Server-side implementation of a fetch or mutate function.
///
/// Handlers receive arguments that already passed loose schema validation
/// and return a structured JSON result. Real I/O lives behind the handler.
#[async_trait]
pub trait FunctionHandler: Send + Sync {
    /// Run the function.
    async fn call(&self, args: FunctionArgs) -> Result<Value, HandlerError>;
}

/// Handler built from a closure over typed arguments.
///
/// Created with [`handler_fn`].
pub struct FnHandler<A, F> {
    f: F,
    _args: PhantomData<fn(A)>,
}

/// Wrap an async closure taking typed arguments as a [`FunctionHandler`].
///
/// Arguments that do not deserialize into `A` surface as
/// [`HandlerError::InvalidArguments`] without calling the closure.
///
/// ```rust
/// use agent_tools::{handler_fn, HandlerError};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct Args {
///     location: String,
/// }
///
/// let handler = handler_fn(|args: Args| async move {
///     Ok::<_, HandlerError>(json!({"location": args.location, "temperature": 72}))
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<A, F, Fut>(f: F) -> FnHandler<A, F>
where
    A: DeserializeOwned + Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
{
    FnHandler {
        f,
        _args: PhantomData,
    }
}

#[async_trait]
impl<A, F, Fut> FunctionHandler for FnHandler<A, F>
where
    A: DeserializeOwned + Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
{
    async fn call(&self, args: FunctionArgs) -> Result<Value, HandlerError> {
        let typed: A = args.parse()?;
        (self.f)(typed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Greeting {
        name: String,
    }

    fn args(value: Value) -> FunctionArgs {
        match value {
            Value::Object(map) => FunctionArgs::new(map),
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_handler_fn_typed_args() {
        let handler = handler_fn(|g: Greeting| async move {
            Ok::<_, HandlerError>(json!({"greeting": format!("hello {}", g.name)}))
        });

        let value = handler.call(args(json!({"name": "ada"}))).await.unwrap();
        assert_eq!(value, json!({"greeting": "hello ada"}));
    }

    #[tokio::test]
    async fn test_handler_fn_rejects_wrong_shape() {
        let handler = handler_fn(|g: Greeting| async move { Ok::<_, HandlerError>(json!(g.name)) });

        let result = handler.call(args(json!({"name": 42}))).await;
        assert!(matches!(result, Err(HandlerError::InvalidArguments(_))));
    }

    #[test]
    fn test_args_accessors() {
        let a = args(json!({"location": "Boston, MA", "days": 3}));
        assert_eq!(a.get_string_opt("location").as_deref(), Some("Boston, MA"));
        assert_eq!(a.get_string_opt("days"), None);
        assert_eq!(a.get("days"), Some(&json!(3)));
        assert_eq!(a.len(), 2);
        assert!(FunctionArgs::default().is_empty());
    }
}
