//! LocalBrain against a real HTTP server on an ephemeral port.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use brain_core::{
    CompletionClient, CompletionOutcome, FailureReason, HistoryMessage, PromptAssembler,
};
use local_brain::{LocalBrain, LocalBrainConfig};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Captured {
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn brain_for(addr: SocketAddr, timeout: Duration) -> LocalBrain {
    let config = LocalBrainConfig::builder()
        .api_url(format!("http://{}/v1/chat/completions", addr))
        .timeout(timeout)
        .build();
    LocalBrain::new(config).unwrap()
}

#[tokio::test]
async fn test_success_sends_full_prompt() {
    let captured = Captured::default();
    let router = Router::new()
        .route(
            "/v1/chat/completions",
            post(|State(c): State<Captured>, Json(body): Json<Value>| async move {
                c.bodies.lock().unwrap().push(body);
                Json(json!({"choices": [{"message": {"role": "assistant", "content": "Ответ"}}]}))
            }),
        )
        .with_state(captured.clone());
    let addr = serve(router).await;
    let brain = brain_for(addr, Duration::from_secs(5));

    let history = vec![HistoryMessage::user("q1"), HistoryMessage::assistant("a1")];
    let prompt = PromptAssembler::new("P ").assemble("S ", "D", &history, "q2");

    let outcome = brain.ask(&prompt).await;
    assert_eq!(outcome, CompletionOutcome::Success("Ответ".to_string()));

    let bodies = captured.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["stream"], false);
    assert_eq!(body["max_tokens"], 250);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "P S D");
    assert_eq!(messages[1]["content"], "q1");
    assert_eq!(messages[2]["role"], "assistant");
    assert_eq!(messages[3]["role"], "user");
    assert_eq!(messages[3]["content"], "q2");
}

#[tokio::test]
async fn test_bad_status_is_reported() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model not loaded") }),
    );
    let addr = serve(router).await;
    let brain = brain_for(addr, Duration::from_secs(5));

    let prompt = PromptAssembler::default().assemble("", "", &[], "hi");
    assert_eq!(brain.ask(&prompt).await, CompletionOutcome::bad_status(503));
}

#[tokio::test]
async fn test_malformed_body_is_a_failure() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let addr = serve(router).await;
    let brain = brain_for(addr, Duration::from_secs(5));

    let prompt = PromptAssembler::default().assemble("", "", &[], "hi");
    assert!(matches!(
        brain.ask(&prompt).await,
        CompletionOutcome::Failure(FailureReason::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_timeout_is_a_network_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"choices": [{"message": {"content": "too late"}}]}))
        }),
    );
    let addr = serve(router).await;
    let brain = brain_for(addr, Duration::from_millis(100));

    let prompt = PromptAssembler::default().assemble("", "", &[], "hi");
    assert!(matches!(
        brain.ask(&prompt).await,
        CompletionOutcome::Failure(FailureReason::Network(_))
    ));
}

#[tokio::test]
async fn test_connection_refused_is_a_network_error() {
    // Bind and drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let brain = brain_for(addr, Duration::from_secs(2));
    let prompt = PromptAssembler::default().assemble("", "", &[], "hi");
    assert!(matches!(
        brain.ask(&prompt).await,
        CompletionOutcome::Failure(FailureReason::Network(_))
    ));
}
