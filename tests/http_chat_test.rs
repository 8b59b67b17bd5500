// tests/http_chat_test.rs
// In-process router tests: the chat endpoint drives the pipeline with
// fake collaborators, no socket or upstream service required.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use solace::llm::classifier::{IntentClassifier, RemoteClassification};
use solace::llm::generation::ReplyGenerator;
use solace::memory::{HistoryStore, InMemoryHistoryStore};
use solace::pipeline::error::PipelineError;
use solace::pipeline::types::{Emotion, Intensity, Intent};
use solace::pipeline::{ChatPipeline, PipelineTables};
use solace::state::create_app_state;

// ============================================================================
// TEST SETUP UTILITIES
// ============================================================================

struct FakeClassifier;

#[async_trait]
impl IntentClassifier for FakeClassifier {
    async fn classify(&self, _text: &str) -> Result<RemoteClassification, PipelineError> {
        Ok(RemoteClassification {
            intent: Intent::EmotionalExpression,
            confidence: 0.8,
            primary_emotion: Emotion::Sadness,
            intensity: Intensity::Medium,
        })
    }
}

struct DownClassifier;

#[async_trait]
impl IntentClassifier for DownClassifier {
    async fn classify(&self, _text: &str) -> Result<RemoteClassification, PipelineError> {
        Err(PipelineError::ClassificationUnavailable("down".to_string()))
    }
}

struct FakeGenerator;

#[async_trait]
impl ReplyGenerator for FakeGenerator {
    async fn generate(&self, _instruction: &str) -> Result<String, PipelineError> {
        Ok("It sounds like today asked a lot of you.".to_string())
    }
}

struct FailingGenerator;

#[async_trait]
impl ReplyGenerator for FailingGenerator {
    async fn generate(&self, _instruction: &str) -> Result<String, PipelineError> {
        Err(PipelineError::GenerationFailed("upstream 500".to_string()))
    }
}

fn test_router(
    classifier: Arc<dyn IntentClassifier>,
    generator: Arc<dyn ReplyGenerator>,
    history: Arc<dyn HistoryStore>,
) -> Router {
    let pipeline = ChatPipeline::new(Arc::new(PipelineTables::standard()), classifier, generator);
    solace::api::router(Arc::new(create_app_state(pipeline, history)))
}

fn chat_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// ROUTES
// ============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let app = test_router(
        Arc::new(FakeClassifier),
        Arc::new(FakeGenerator),
        Arc::new(InMemoryHistoryStore::new()),
    );

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn chat_happy_path_returns_reply_and_persists_both_turns() {
    let history: Arc<InMemoryHistoryStore> = Arc::new(InMemoryHistoryStore::new());
    let app = test_router(
        Arc::new(FakeClassifier),
        Arc::new(FakeGenerator),
        history.clone(),
    );

    let response = app
        .oneshot(chat_request(json!({
            "user_id": "user-1",
            "message": "I feel worn down today"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["intent"], "emotional_expression");
    assert_eq!(body["crisis_bypass"], false);
    assert!(body["reply"].as_str().unwrap().len() > 0);

    let turns = history.recent_turns("user-1", 10).await.unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].content, "I feel worn down today");
}

#[tokio::test]
async fn crisis_message_succeeds_with_collaborators_down() {
    let app = test_router(
        Arc::new(DownClassifier),
        Arc::new(FailingGenerator),
        Arc::new(InMemoryHistoryStore::new()),
    );

    let response = app
        .oneshot(chat_request(json!({
            "user_id": "user-1",
            "message": "I want to kill myself"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["crisis_bypass"], true);
    assert_eq!(body["strategy"], "crisis_support");
    assert!(body["reply"].as_str().unwrap().contains("Are you safe right now?"));
}

#[tokio::test]
async fn generation_failure_maps_to_bad_gateway_with_no_reply() {
    let app = test_router(
        Arc::new(FakeClassifier),
        Arc::new(FailingGenerator),
        Arc::new(InMemoryHistoryStore::new()),
    );

    let response = app
        .oneshot(chat_request(json!({
            "user_id": "user-1",
            "message": "I feel a bit flat this evening"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert!(body.get("reply").is_none());
    assert_eq!(body["code"], "UPSTREAM_FAILED");
}

#[tokio::test]
async fn empty_message_is_a_bad_request() {
    let app = test_router(
        Arc::new(FakeClassifier),
        Arc::new(FakeGenerator),
        Arc::new(InMemoryHistoryStore::new()),
    );

    let response = app
        .oneshot(chat_request(json!({
            "user_id": "user-1",
            "message": "   "
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
