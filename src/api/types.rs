// src/api/types.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pipeline::types::{Emotion, Intent, Strategy};

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Opaque identity supplied by the caller; used for audit only.
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub intent: Intent,
    pub emotion: Emotion,
    pub strategy: Strategy,
    pub crisis_bypass: bool,
    pub turn_id: Uuid,
}
