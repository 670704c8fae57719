//! Integration tests for the chat HTTP API.
//!
//! Drives the router in-process with a scripted completion gateway.

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{header, Method, Request, StatusCode},
    Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

use policy_rag::{
    config::{PolicyRagConfig, DEFAULT_FALLBACK_MESSAGE},
    server::{build_router, state::AppState},
    CompletionGateway, DocumentLoader, Error, Result, Role,
};

const POLICY: &str = "Refunds are processed within 14 days.\nShipping takes 3-5 days.";

/// Gateway returning queued outcomes and recording every prompt
#[derive(Default)]
struct FakeGateway {
    outcomes: Mutex<Vec<Result<Option<String>>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGateway {
    fn with(outcomes: Vec<Result<Option<String>>>) -> Arc<Self> {
        let gateway = Self::default();
        gateway.outcomes.lock().extend(outcomes.into_iter().rev());
        Arc::new(gateway)
    }

    fn calls(&self) -> usize {
        self.prompts.lock().len()
    }

    fn prompt(&self, index: usize) -> String {
        self.prompts.lock()[index].clone()
    }
}

#[async_trait]
impl CompletionGateway for FakeGateway {
    async fn complete(&self, prompt: &str) -> Result<Option<String>> {
        self.prompts.lock().push(prompt.to_string());
        self.outcomes
            .lock()
            .pop()
            .unwrap_or_else(|| Ok(Some("Unscripted answer.".to_string())))
    }

    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

fn test_state(gateway: Arc<FakeGateway>) -> AppState {
    let config = PolicyRagConfig::default();
    let document = DocumentLoader::new(config.chunking.chunk_max_len)
        .from_text(Path::new("policy.txt"), POLICY);
    AppState::from_parts(config, document, gateway)
}

fn app_for(state: &AppState, ip: [u8; 4]) -> Router {
    build_router(state.clone()).layer(MockConnectInfo(SocketAddr::from((ip, 40000))))
}

async fn post_chat(app: &Router, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn ask(app: &Router, question: &str) -> (StatusCode, Value) {
    post_chat(app, Body::from(json!({ "question": question }).to_string())).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_answers_from_best_matching_chunk() {
    let gateway = FakeGateway::with(vec![Ok(Some("Refunds take 14 days.\n".to_string()))]);
    let state = test_state(Arc::clone(&gateway));
    let app = app_for(&state, [10, 0, 0, 1]);

    let (status, body) = ask(&app, "How long do refunds take?").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "answer": "Refunds take 14 days." }));

    // Both lines fit in one 1500-char chunk, so the excerpt is that chunk
    let prompt = gateway.prompt(0);
    assert!(prompt.contains(&format!("\"\"\"\n{}\n\"\"\"", POLICY)));
    assert!(prompt.ends_with("User: How long do refunds take?\nAssistant:"));
}

#[tokio::test]
async fn test_empty_question_is_rejected() {
    let gateway = FakeGateway::with(vec![]);
    let state = test_state(Arc::clone(&gateway));
    let app = app_for(&state, [10, 0, 0, 2]);

    for question in ["", "   \n\t"] {
        let (status, body) = ask(&app, question).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Empty question" }));
    }

    assert_eq!(gateway.calls(), 0);
    assert!(state.sessions().is_empty());
}

#[tokio::test]
async fn test_missing_or_malformed_body_reads_as_empty_question() {
    let gateway = FakeGateway::with(vec![]);
    let state = test_state(Arc::clone(&gateway));
    let app = app_for(&state, [10, 0, 0, 3]);

    let (status, body) = post_chat(&app, Body::from("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Empty question");

    let (status, _) = post_chat(&app, Body::from("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_gateway_error_is_500_without_history() {
    let gateway = FakeGateway::with(vec![Err(Error::Gateway {
        status: 503,
        body: "Service Unavailable".to_string(),
    })]);
    let state = test_state(Arc::clone(&gateway));
    let app = app_for(&state, [10, 0, 0, 4]);

    let (status, body) = ask(&app, "How long do refunds take?").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("API error 503: "), "got {}", message);
    assert!(state.sessions().history("10.0.0.4").await.is_empty());
}

#[tokio::test]
async fn test_gateway_timeout_is_500() {
    let gateway = FakeGateway::with(vec![Err(Error::GatewayTimeout(60))]);
    let state = test_state(gateway);
    let app = app_for(&state, [10, 0, 0, 5]);

    let (status, body) = ask(&app, "refunds").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_missing_answer_text_returns_fallback() {
    let gateway = FakeGateway::with(vec![Ok(None)]);
    let state = test_state(gateway);
    let app = app_for(&state, [10, 0, 0, 6]);

    let (status, body) = ask(&app, "Can I bring my dog?").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "answer": DEFAULT_FALLBACK_MESSAGE }));

    let history = state.sessions().history("10.0.0.6").await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].content, DEFAULT_FALLBACK_MESSAGE);
}

// ─────────────────────────────────────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_history_grows_by_two_per_exchange() {
    let gateway = FakeGateway::with(vec![]);
    let state = test_state(Arc::clone(&gateway));
    let app = app_for(&state, [192, 168, 1, 7]);

    for i in 0..3 {
        let (status, _) = ask(&app, &format!("question {}", i)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let history = state.sessions().history("192.168.1.7").await;
    assert_eq!(history.len(), 6);
    let contents: Vec<&str> = history.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(
        contents,
        vec![
            "question 0",
            "Unscripted answer.",
            "question 1",
            "Unscripted answer.",
            "question 2",
            "Unscripted answer.",
        ]
    );

    // the third prompt carries the first two exchanges
    let third = gateway.prompt(2);
    assert!(third.contains("User: question 0\nAssistant: Unscripted answer.\nUser: question 1\n"));
}

#[tokio::test]
async fn test_sessions_are_keyed_by_peer_ip() {
    let gateway = FakeGateway::with(vec![]);
    let state = test_state(Arc::clone(&gateway));
    let alice = app_for(&state, [10, 1, 1, 1]);
    let bob = app_for(&state, [10, 2, 2, 2]);

    ask(&alice, "alice asks").await;
    ask(&bob, "bob asks").await;

    assert_eq!(state.sessions().len(), 2);
    assert_eq!(state.sessions().history("10.1.1.1").await.len(), 2);
    assert!(!gateway.prompt(1).contains("alice asks"));
}

#[tokio::test]
async fn test_concurrent_requests_from_one_user_keep_pairs_together() {
    let gateway = FakeGateway::with(vec![]);
    let state = test_state(gateway);
    let app = app_for(&state, [10, 9, 9, 9]);

    let requests = (0..20).map(|i| {
        let app = app.clone();
        async move { ask(&app, &format!("q{}", i)).await }
    });
    let results = futures::future::join_all(requests).await;
    assert!(results.iter().all(|(status, _)| *status == StatusCode::OK));

    let history = state.sessions().history("10.9.9.9").await;
    assert_eq!(history.len(), 40);
    for pair in history.chunks(2) {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[1].role, Role::Assistant);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Auxiliary endpoints
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_and_info() {
    let state = test_state(FakeGateway::with(vec![]));
    let app = app_for(&state, [127, 0, 0, 1]);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/api/info").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let info: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(info["name"], "policy-rag");
    assert_eq!(info["document"]["chunks"], 1);
    assert_eq!(info["model"], "fake-model");
    assert!(!info.to_string().contains("api_key"));
}

#[tokio::test]
async fn test_index_served_from_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Policy chat</h1>").unwrap();

    let mut config = PolicyRagConfig::default();
    config.server.static_dir = dir.path().to_path_buf();
    let document = DocumentLoader::new(1500).from_text(Path::new("policy.txt"), POLICY);
    let state = AppState::from_parts(config, document, FakeGateway::with(vec![]));
    let app = app_for(&state, [127, 0, 0, 1]);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>Policy chat</h1>");
}
