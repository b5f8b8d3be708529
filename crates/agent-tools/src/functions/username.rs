//! `get_username` backed by configuration.

use async_trait::async_trait;
use brain_core::{FunctionSpec, UnclassifiedName};
use serde_json::{json, Value};

use crate::error::HandlerError;
use crate::handler::{FunctionArgs, FunctionHandler};

/// Returns the configured username of the person chatting.
#[derive(Debug, Clone)]
pub struct Username {
    username: String,
}

impl Username {
    pub const NAME: &'static str = "get_username";

    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn spec() -> Result<FunctionSpec, UnclassifiedName> {
        FunctionSpec::new(
            Self::NAME,
            "Get the username of the user",
            json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        )
    }
}

#[async_trait]
impl FunctionHandler for Username {
    async fn call(&self, _args: FunctionArgs) -> Result<Value, HandlerError> {
        Ok(json!({ "username": self.username }))
    }
}
