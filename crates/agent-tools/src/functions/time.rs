//! `get_current_time` from the system clock.

use async_trait::async_trait;
use brain_core::{FunctionSpec, UnclassifiedName};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::error::HandlerError;
use crate::handler::{FunctionArgs, FunctionHandler};

/// Reports the current UTC time.
#[derive(Debug, Clone, Default)]
pub struct CurrentTime;

impl CurrentTime {
    pub const NAME: &'static str = "get_current_time";

    pub fn new() -> Self {
        Self
    }

    pub fn spec() -> Result<FunctionSpec, UnclassifiedName> {
        FunctionSpec::new(
            Self::NAME,
            "Get the current time",
            json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        )
    }
}

fn describe(now: DateTime<Utc>) -> Value {
    json!({
        "iso8601": now.to_rfc3339_opts(SecondsFormat::Secs, true),
        "unix": now.timestamp(),
        "timezone": "UTC",
    })
}

#[async_trait]
impl FunctionHandler for CurrentTime {
    async fn call(&self, _args: FunctionArgs) -> Result<Value, HandlerError> {
        Ok(describe(Utc::now()))
    }
}
