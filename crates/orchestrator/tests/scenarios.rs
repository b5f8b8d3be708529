//! End-to-end orchestration scenarios against a scripted model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agent_tools::{handler_fn, ExecutionError, FunctionRegistry, HandlerError};
use brain_core::{is_paired, BrainError, CallPolicy, FunctionKind, FunctionSpec, InvocationResult, Message, Role};
use mock_brain::{DelayedBrain, ScriptedBrain};
use orchestrator::{
    CancellationToken, FailureKind, OrchestratorError, OrchestratorOutcome, RenderPayload,
    TurnOrchestrator, MAX_DEPTH,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
struct WeatherArgs {
    location: String,
    format: String,
}

/// Registry with a weather fetch, a mutate, a slow fetch and two render functions.
/// The returned counter tracks every handler execution.
fn registry() -> (Arc<FunctionRegistry>, Arc<AtomicUsize>) {
    let executions = Arc::new(AtomicUsize::new(0));
    let mut registry = FunctionRegistry::new();

    let count = executions.clone();
    registry
        .register_handler(
            FunctionSpec::new(
                "fetch_current_weather",
                "Get the current weather",
                json!({
                    "type": "object",
                    "properties": {
                        "location": {"type": "string"},
                        "format": {"type": "string", "enum": ["celsius", "fahrenheit"]}
                    },
                    "required": ["location", "format"]
                }),
            )
            .unwrap(),
            handler_fn(move |args: WeatherArgs| {
                let count = count.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, HandlerError>(json!({
                        "location": args.location,
                        "temperature": 72,
                        "format": args.format,
                        "description": "Sunny"
                    }))
                }
            }),
        )
        .unwrap();

    let count = executions.clone();
    registry
        .register_handler(
            FunctionSpec::new(
                "set_theme",
                "Change the UI theme",
                json!({
                    "type": "object",
                    "properties": {"theme": {"type": "string"}},
                    "required": ["theme"]
                }),
            )
            .unwrap(),
            handler_fn(move |args: Value| {
                let count = count.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, HandlerError>(json!({"theme": args["theme"], "applied": true}))
                }
            }),
        )
        .unwrap();

    let count = executions.clone();
    registry
        .register_handler(
            FunctionSpec::new(
                "get_slow_value",
                "Takes a while",
                json!({"type": "object", "properties": {}}),
            )
            .unwrap(),
            handler_fn(move |_args: Value| {
                let count = count.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok::<_, HandlerError>(json!({"value": 1}))
                }
            }),
        )
        .unwrap();

    for name in ["render_buttons", "render_response"] {
        registry
            .register_render(
                FunctionSpec::new(name, "", json!({"type": "object", "properties": {}})).unwrap(),
            )
            .unwrap();
    }

    (Arc::new(registry), executions)
}

fn weather_question() -> Vec<Message> {
    vec![Message::user("What's the weather in Boston?")]
}

#[tokio::test]
async fn scenario_a_fetch_then_answer() {
    let (registry, executions) = registry();
    let brain = Arc::new(ScriptedBrain::new([
        InvocationResult::invoke(
            "fetch_current_weather",
            r#"{"location": "Boston, MA", "format": "fahrenheit"}"#,
        ),
        InvocationResult::answer("It's 72°F and sunny in Boston."),
    ]));
    let orchestrator = TurnOrchestrator::new(brain.clone(), registry);
    let input = weather_question();

    let output = orchestrator.run(&input, &CallPolicy::Auto, None, 0).await.unwrap();

    assert_eq!(
        output.outcome,
        OrchestratorOutcome::text("It's 72°F and sunny in Boston.")
    );
    assert_eq!(output.transcript.len(), input.len() + 2);
    assert_eq!(output.depth, 1);
    assert_eq!(executions.load(Ordering::SeqCst), 1);

    // Second model call saw the original prefix plus the paired call and result
    let calls = brain.invocations().await;
    assert_eq!(calls.len(), 2);
    let seen = &calls[1].transcript;
    assert_eq!(seen.len(), input.len() + 2);
    assert_eq!(&seen[..input.len()], &input[..]);
    assert_eq!(seen[1].role, Role::Assistant);
    assert_eq!(seen[1].function_call.as_ref().unwrap().name, "fetch_current_weather");
    assert_eq!(seen[2].role, Role::Function);
    assert_eq!(seen[2].name.as_deref(), Some("fetch_current_weather"));
    assert!(is_paired(seen));

    let result: Value = serde_json::from_str(seen[2].content.as_deref().unwrap()).unwrap();
    assert_eq!(result["temperature"], 72);
    assert_eq!(result["location"], "Boston, MA");

    // Caller's transcript untouched
    assert_eq!(input, weather_question());
}

#[tokio::test]
async fn scenario_b_render_is_terminal() {
    let (registry, executions) = registry();
    let arguments = r#"{"elements": [{"id": "yes", "label": "Yes", "value": "yes", "colorTheme": "success"}]}"#;
    let brain = Arc::new(ScriptedBrain::new([InvocationResult::invoke("render_buttons", arguments)]));
    let orchestrator = TurnOrchestrator::new(brain.clone(), registry);

    let output = orchestrator
        .run(&[Message::user("Should I go?")], &CallPolicy::Auto, None, 0)
        .await
        .unwrap();

    assert_eq!(
        output.outcome,
        OrchestratorOutcome::RenderPayload(RenderPayload::new("render_buttons", arguments))
    );
    assert_eq!(output.depth, 0);
    assert_eq!(output.transcript.len(), 1);
    assert_eq!(brain.call_count(), 1);
    assert_eq!(executions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn scenario_c_unknown_function() {
    let (registry, executions) = registry();
    let brain = Arc::new(ScriptedBrain::new([InvocationResult::invoke("delete_everything", "{}")]));
    let orchestrator = TurnOrchestrator::new(brain, registry);

    let outcome = orchestrator
        .respond(&[Message::user("Clean up")], &CallPolicy::Auto, None)
        .await;

    match outcome {
        OrchestratorOutcome::Failure(failure) => {
            assert_eq!(failure.kind, FailureKind::UnknownFunction);
            assert_eq!(failure.detail, "delete_everything");
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(executions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn scenario_d_missing_required_argument() {
    let (registry, executions) = registry();
    let brain = Arc::new(ScriptedBrain::new([
        InvocationResult::invoke("fetch_current_weather", r#"{"format": "celsius"}"#),
        InvocationResult::answer("unreachable"),
    ]));
    let orchestrator = TurnOrchestrator::new(brain.clone(), registry);

    let result = orchestrator.run(&weather_question(), &CallPolicy::Auto, None, 0).await;

    let err = result.unwrap_err();
    assert_eq!(err.kind(), FailureKind::FunctionExecutionError);
    assert!(err.is_invalid_arguments());
    assert!(matches!(
        err,
        OrchestratorError::FunctionExecution(ExecutionError::InvalidArguments { .. })
    ));
    assert_eq!(brain.call_count(), 1);
    assert_eq!(executions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_argument_json_is_execution_error() {
    let (registry, _) = registry();
    let brain = Arc::new(ScriptedBrain::new([InvocationResult::invoke(
        "fetch_current_weather",
        r#"{"location": "Boston"#,
    )]));
    let orchestrator = TurnOrchestrator::new(brain, registry);

    let outcome = orchestrator.respond(&weather_question(), &CallPolicy::Auto, None).await;

    assert!(matches!(
        outcome,
        OrchestratorOutcome::Failure(ref f)
            if f.kind == FailureKind::FunctionExecutionError && f.invalid_arguments
    ));
}

#[tokio::test]
async fn max_depth_fails_without_calling_model() {
    let (registry, _) = registry();
    let brain = Arc::new(ScriptedBrain::new([InvocationResult::answer("hi")]));
    let orchestrator = TurnOrchestrator::new(brain.clone(), registry);

    let result = orchestrator
        .run(&[Message::user("hi")], &CallPolicy::Auto, None, MAX_DEPTH)
        .await;

    assert!(matches!(
        result,
        Err(OrchestratorError::MaxDepthExceeded { depth: MAX_DEPTH, max: MAX_DEPTH })
    ));
    assert_eq!(brain.call_count(), 0);
}

#[tokio::test]
async fn looping_model_hits_depth_bound() {
    let (registry, executions) = registry();
    let brain = Arc::new(ScriptedBrain::repeating(
        InvocationResult::invoke("set_theme", r#"{"theme": "dark"}"#),
        MAX_DEPTH + 5,
    ));
    let orchestrator = TurnOrchestrator::new(brain.clone(), registry);

    let outcome = orchestrator
        .respond(&[Message::user("Toggle forever")], &CallPolicy::Auto, None)
        .await;

    match outcome {
        OrchestratorOutcome::Failure(failure) => assert_eq!(failure.kind, FailureKind::MaxDepthExceeded),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(brain.call_count(), MAX_DEPTH);
    assert_eq!(executions.load(Ordering::SeqCst), MAX_DEPTH);
}

#[tokio::test]
async fn sequential_fetches_keep_pairing() {
    let (registry, executions) = registry();
    let brain = Arc::new(ScriptedBrain::new([
        InvocationResult::invoke("fetch_current_weather", r#"{"location": "Boston", "format": "celsius"}"#),
        InvocationResult::invoke("set_theme", r#"{"theme": "rainy"}"#),
        InvocationResult::invoke("render_response", r#"{"elements": []}"#),
    ]));
    let orchestrator = TurnOrchestrator::new(brain.clone(), registry);
    let input = weather_question();

    let output = orchestrator.run(&input, &CallPolicy::Auto, None, 0).await.unwrap();

    assert_eq!(output.depth, 2);
    assert_eq!(output.transcript.len(), input.len() + 4);
    assert!(is_paired(&output.transcript));
    assert_eq!(executions.load(Ordering::SeqCst), 2);

    // Every call's transcript extends the previous one
    let calls = brain.invocations().await;
    for pair in calls.windows(2) {
        let (before, after) = (&pair[0].transcript, &pair[1].transcript);
        assert_eq!(after.len(), before.len() + 2);
        assert_eq!(&after[..before.len()], &before[..]);
    }
}

#[tokio::test]
async fn composite_render_children_are_not_executed() {
    let (registry, executions) = registry();
    let arguments = json!({
        "elements": [
            {"name": "fetch_current_weather", "arguments": "{\"location\":\"Boston\",\"format\":\"celsius\"}"},
            {"name": "render_buttons", "arguments": "{\"elements\":[]}"}
        ]
    })
    .to_string();
    let brain = Arc::new(ScriptedBrain::new([InvocationResult::invoke(
        "render_response",
        arguments.clone(),
    )]));
    let orchestrator = TurnOrchestrator::new(brain.clone(), registry);

    let output = orchestrator
        .run(&weather_question(), &CallPolicy::forced("render_response"), None, 0)
        .await
        .unwrap();

    let OrchestratorOutcome::RenderPayload(payload) = output.outcome else {
        panic!("expected render payload");
    };
    assert_eq!(payload.arguments, arguments);
    assert_eq!(payload.children().unwrap().len(), 2);
    assert_eq!(brain.call_count(), 1);
    assert_eq!(executions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unregistered_render_name_reports_intended_kind() {
    let (registry, _) = registry();
    let brain = Arc::new(ScriptedBrain::new([InvocationResult::invoke("render_carousel", "{}")]));
    let orchestrator = TurnOrchestrator::new(brain, registry);

    let err = orchestrator
        .run(&[Message::user("Show me pictures")], &CallPolicy::Auto, None, 0)
        .await
        .unwrap_err();

    match err {
        OrchestratorError::UnknownFunction { name, intended } => {
            assert_eq!(name, "render_carousel");
            assert_eq!(intended, Some(FunctionKind::Render));
        }
        other => panic!("expected UnknownFunction, got {:?}", other),
    }
}

#[tokio::test]
async fn upstream_error_is_not_retried() {
    let (registry, _) = registry();
    let brain = Arc::new(ScriptedBrain::with_script([
        Err(BrainError::Api {
            status: 503,
            message: "overloaded".to_string(),
        }),
        Ok(InvocationResult::answer("retry would see this")),
    ]));
    let orchestrator = TurnOrchestrator::new(brain.clone(), registry);

    let result = orchestrator.run(&weather_question(), &CallPolicy::Auto, None, 0).await;

    let err = result.unwrap_err();
    assert_eq!(err.kind(), FailureKind::UpstreamError);
    assert!(matches!(err, OrchestratorError::Upstream(BrainError::Api { status: 503, .. })));
    assert_eq!(brain.call_count(), 1);
}

#[tokio::test]
async fn concurrent_runs_share_registry() {
    let (registry, executions) = registry();
    let script = |city: &str| {
        ScriptedBrain::new([
            InvocationResult::invoke(
                "fetch_current_weather",
                json!({"location": city, "format": "celsius"}).to_string(),
            ),
            InvocationResult::answer(format!("Weather for {}", city)),
        ])
    };
    let boston = TurnOrchestrator::new(Arc::new(script("Boston")), registry.clone());
    let paris = TurnOrchestrator::new(Arc::new(script("Paris")), registry);
    let input = weather_question();

    let (a, b) = tokio::join!(
        boston.run(&input, &CallPolicy::Auto, None, 0),
        paris.run(&input, &CallPolicy::Auto, None, 0),
    );

    assert_eq!(a.unwrap().outcome, OrchestratorOutcome::text("Weather for Boston"));
    assert_eq!(b.unwrap().outcome, OrchestratorOutcome::text("Weather for Paris"));
    assert_eq!(executions.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cancellation_abandons_in_flight_execution() {
    let (registry, executions) = registry();
    let brain = Arc::new(ScriptedBrain::new([
        InvocationResult::invoke("get_slow_value", "{}"),
        InvocationResult::answer("unreachable"),
    ]));
    let orchestrator = TurnOrchestrator::new(brain.clone(), registry);
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel.cancel();
        })
    };

    let started = std::time::Instant::now();
    let result = orchestrator
        .run_with_cancel(&[Message::user("slow")], &CallPolicy::Auto, None, 0, &cancel)
        .await;
    canceller.await.unwrap();

    assert!(matches!(result, Err(OrchestratorError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(executions.load(Ordering::SeqCst), 1);
    assert_eq!(brain.call_count(), 1);
}

#[tokio::test]
async fn cancellation_abandons_in_flight_model_call() {
    let (registry, _) = registry();
    let brain = Arc::new(DelayedBrain::with_millis(
        ScriptedBrain::new([InvocationResult::answer("late")]),
        10_000,
    ));
    let orchestrator = TurnOrchestrator::new(brain, registry);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();

    let messages = [Message::user("hi")];
    let (result, _) = tokio::join!(
        orchestrator.run_with_cancel(&messages, &CallPolicy::Auto, None, 0, &cancel),
        async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        },
    );

    assert!(matches!(result, Err(OrchestratorError::Cancelled)));
}
