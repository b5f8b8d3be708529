//! List the built-in registry and call each fetch function once.
//!
//! Run with: cargo run -p agent-tools --example call_functions

use std::sync::Arc;

use agent_tools::{default_registry, Classification, LocalExecutor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agent_tools=debug".parse()?),
        )
        .init();

    let registry = Arc::new(default_registry("example-user")?);

    println!("Registered functions:");
    for spec in registry.specs() {
        println!("  - {} [{}]", spec.name(), spec.kind());
    }
    println!();

    let executor = LocalExecutor::new(registry.clone());
    let calls = [
        ("get_current_time", "{}"),
        ("get_username", ""),
        (
            "get_current_weather",
            r#"{"location": "Boston, MA", "format": "fahrenheit"}"#,
        ),
        ("get_current_weather", r#"{"location": "Boston, MA"}"#),
    ];

    for (name, args) in calls {
        if registry.classify(name) != Classification::Fetch {
            continue;
        }
        match executor.execute(name, args).await {
            Ok(output) => println!("{} -> {}", name, output.content),
            Err(e) => println!("{} -> error: {}", name, e),
        }
    }

    Ok(())
}
