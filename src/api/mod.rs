// src/api/mod.rs
// HTTP surface: one chat route invoking the pipeline, plus liveness.
// The handler is the "caller" in pipeline terms: it reads history before
// the call and persists both turns after, so the pipeline itself stays
// read-only.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tracing::info;

pub mod error;
pub mod types;

pub use error::ApiError;
pub use types::{ChatRequest, ChatResponse};

use crate::pipeline::memory::STM_WINDOW;
use crate::pipeline::types::{Role, Turn, Utterance};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(ApiError::bad_request("message must not be empty"));
    }
    if req.user_id.trim().is_empty() {
        return Err(ApiError::bad_request("user_id must not be empty"));
    }

    let utterance = Utterance::new(req.user_id.as_str(), req.message.as_str());
    info!(turn_id = %utterance.turn_id, user_id = %utterance.user_id, "chat turn received");

    let history = state
        .history
        .recent_turns(&req.user_id, STM_WINDOW)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let response = state.pipeline.respond(&utterance, &history).await?;

    // Persist both turns now that the pipeline has returned.
    state
        .history
        .append_turn(
            &req.user_id,
            Turn {
                role: Role::User,
                content: utterance.text.clone(),
                intent: Some(response.intent),
            },
        )
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    state
        .history
        .append_turn(
            &req.user_id,
            Turn {
                role: Role::Assistant,
                content: response.text.clone(),
                intent: None,
            },
        )
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(ChatResponse {
        reply: response.text,
        intent: response.intent,
        emotion: response.emotion,
        strategy: response.strategy,
        crisis_bypass: response.crisis_bypass,
        turn_id: response.turn_id,
    }))
}
