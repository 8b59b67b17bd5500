// src/state.rs

use std::sync::Arc;

use crate::memory::HistoryStore;
use crate::pipeline::ChatPipeline;

/// Shared application state handed to every request handler.
pub struct AppState {
    pub pipeline: ChatPipeline,
    pub history: Arc<dyn HistoryStore>,
}

pub fn create_app_state(pipeline: ChatPipeline, history: Arc<dyn HistoryStore>) -> AppState {
    AppState { pipeline, history }
}
