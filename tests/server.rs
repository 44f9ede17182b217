mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::RecordingGenerator;
use persona_chat::dispatcher::{DispatchReply, DispatchRequest};
use persona_chat::error::ChatError;
use persona_chat::models::{Message, Role};
use persona_chat::prompts;
use persona_chat::server::{create_router, AppState, ErrorEnvelope, CHAT_ROUTE, DISPATCH_FAILURE};
use persona_chat::session::{DispatchTransport, HttpTransport};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

fn create_test_app(generator: Arc<RecordingGenerator>) -> axum::Router {
    create_router(AppState::new(generator, "test-model"))
}

fn post_chat(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(CHAT_ROUTE)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_dispatcher(generator: Arc<RecordingGenerator>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_test_app(generator);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn question(text: &str) -> DispatchRequest {
    DispatchRequest {
        messages: vec![Message::assistant("Greetings."), Message::user(text)],
        character_id: Some("solomon".to_string()),
        topic_id: None,
    }
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_chat_success() {
    let generator = Arc::new(RecordingGenerator::replying("Wisdom begins with humility."));
    let app = create_test_app(generator.clone());

    let payload = json!({
        "messages": [
            { "role": "assistant", "content": "Greetings." },
            { "role": "user", "content": "Where does wisdom begin?" }
        ],
        "characterId": "solomon"
    });
    let response = app.oneshot(post_chat(payload.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply: DispatchReply = serde_json::from_value(read_json(response).await).unwrap();
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.content, "Wisdom begins with humility.");
    assert!(generator
        .last_prompt()
        .contains("Human: Where does wisdom begin?"));
}

#[tokio::test]
async fn test_chat_unknown_character_still_answers() {
    let generator = Arc::new(RecordingGenerator::replying("Hello."));
    let app = create_test_app(generator.clone());

    let payload = json!({
        "messages": [{ "role": "user", "content": "Hi." }],
        "characterId": "pharaoh"
    });
    let response = app.oneshot(post_chat(payload.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["role"], "assistant");
    assert!(body["content"].is_string());
    assert!(generator.last_prompt().contains(prompts::default_prompt().text));
}

#[tokio::test]
async fn test_chat_missing_messages_is_error_envelope() {
    let generator = Arc::new(RecordingGenerator::replying("unused"));
    let app = create_test_app(generator.clone());

    let response = app
        .oneshot(post_chat(json!({ "topicId": "wisdom" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope: ErrorEnvelope = serde_json::from_value(read_json(response).await).unwrap();
    assert_eq!(envelope.error, DISPATCH_FAILURE);
    assert!(envelope.details.unwrap().contains("Invalid messages format"));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_chat_non_json_body_is_error_envelope() {
    let generator = Arc::new(RecordingGenerator::replying("unused"));
    let app = create_test_app(generator);

    let response = app.oneshot(post_chat("not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["error"], DISPATCH_FAILURE);
}

#[tokio::test]
async fn test_chat_upstream_failure_reports_selection() {
    let generator = Arc::new(RecordingGenerator::failing());
    let app = create_test_app(generator.clone());

    let payload = json!({
        "messages": [{ "role": "user", "content": "Pray with me." }],
        "topicId": "prayer"
    });
    let response = app.oneshot(post_chat(payload.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope: ErrorEnvelope = serde_json::from_value(read_json(response).await).unwrap();
    let details = envelope.details.unwrap();
    assert!(details.contains("Upstream error"));
    assert!(details.contains("topic: prayer"));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_chat_empty_upstream_reply() {
    let generator = Arc::new(RecordingGenerator::replying(""));
    let app = create_test_app(generator);

    let payload = json!({ "messages": [{ "role": "user", "content": "Hello?" }] });
    let response = app.oneshot(post_chat(payload.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope: ErrorEnvelope = serde_json::from_value(read_json(response).await).unwrap();
    assert!(envelope.details.unwrap().contains("Empty response"));
}

#[tokio::test]
async fn test_status_and_catalogs() {
    let generator = Arc::new(RecordingGenerator::replying("unused"));
    let app = create_test_app(generator);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let status = read_json(response).await;
    assert_eq!(status["status"], "ok");
    assert_eq!(status["model"], "test-model");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/personas").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let personas = read_json(response).await;
    assert_eq!(personas.as_array().unwrap().len(), 10);
    assert_eq!(personas[0]["id"], "solomon");

    let response = app
        .oneshot(Request::builder().uri("/api/topics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let topics = read_json(response).await;
    assert!(topics
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t["id"] == "warfare"));
}

#[tokio::test]
async fn test_oversized_body_is_error_envelope() {
    let generator = Arc::new(RecordingGenerator::replying("unused"));
    let app = create_test_app(generator.clone());

    let response = app
        .oneshot(post_chat("x".repeat(3 * 1024 * 1024)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope: ErrorEnvelope = serde_json::from_value(read_json(response).await).unwrap();
    assert_eq!(envelope.error, DISPATCH_FAILURE);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_http_transport_round_trip() {
    let generator = Arc::new(RecordingGenerator::replying("Guard your heart."));
    let base_url = spawn_dispatcher(generator.clone()).await;
    let transport = HttpTransport::new(&base_url, Duration::from_secs(5)).unwrap();

    let reply = transport.send(&question("How should I live?")).await.unwrap();

    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.content, "Guard your heart.");
    assert!(generator.last_prompt().contains("Human: How should I live?"));
}

#[tokio::test]
async fn test_http_transport_surfaces_error_envelope() {
    let generator = Arc::new(RecordingGenerator::failing());
    let base_url = spawn_dispatcher(generator.clone()).await;
    let transport = HttpTransport::new(&base_url, Duration::from_secs(5)).unwrap();

    let result = transport.send(&question("Are you there?")).await;

    match result {
        Err(ChatError::Transport(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains(DISPATCH_FAILURE));
            assert!(message.contains("connection reset"));
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_http_transport_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport =
        HttpTransport::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    let result = transport.send(&question("Hello?")).await;

    assert!(matches!(result, Err(ChatError::Transport(_))));
}
