//! Send one message through OpenAiBrain with the built-in functions offered.
//!
//! Run with: cargo run -p openai-brain --example test_chat
//! Or with a custom message: cargo run -p openai-brain --example test_chat -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   OPENAI_API_KEY - OpenAI API key for authentication

use brain_core::FunctionSpec;
use openai_brain::{CallPolicy, Invocation, InvocationResult, Message, ModelClient, OpenAiBrain};
use serde_json::json;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "What's the weather like in Boston?".to_string()
    };

    let brain = OpenAiBrain::from_env()?;
    println!("Brain initialized: {}", brain.name());
    println!("API URL: {}", brain.config().api_url);
    println!("Model: {}", brain.config().model);
    println!();

    let functions = vec![FunctionSpec::new(
        "get_current_weather",
        "Get the current weather",
        json!({
            "type": "object",
            "properties": {
                "location": {"type": "string", "description": "The city and state, e.g. San Francisco, CA"}
            },
            "required": ["location"]
        }),
    )?];
    let transcript = vec![Message::user(message_text.as_str())];
    let policy = CallPolicy::Auto;

    println!("Sending: \"{}\"", message_text);
    let result = brain
        .invoke(Invocation {
            transcript: &transcript,
            functions: &functions,
            policy: &policy,
            model: None,
        })
        .await?;

    println!("=== Response ===");
    match result {
        InvocationResult::Answer { text } => println!("{}", text),
        InvocationResult::Invoke(call) => println!("call {}({})", call.name, call.arguments),
    }
    println!("================");

    Ok(())
}
