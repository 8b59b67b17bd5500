// src/llm/generation.rs
// Generation collaborator: turns a rendered instruction into reply prose.
// Unlike classification, a failure here is fatal to the request — the
// pipeline never fabricates a reply. The crisis path never reaches this.

use async_trait::async_trait;
use serde_json::json;

use crate::llm::client::OpenAIClient;
use crate::pipeline::error::PipelineError;

#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, instruction: &str) -> Result<String, PipelineError>;
}

/// Generation over an OpenAI-compatible chat-completions call.
pub struct OpenAiReplyGenerator {
    client: OpenAIClient,
    model: String,
    max_tokens: usize,
}

impl OpenAiReplyGenerator {
    pub fn new(client: OpenAIClient, model: String, max_tokens: usize) -> Self {
        Self {
            client,
            model,
            max_tokens,
        }
    }
}

#[async_trait]
impl ReplyGenerator for OpenAiReplyGenerator {
    async fn generate(&self, instruction: &str) -> Result<String, PipelineError> {
        let body = json!({
            "model": self.model,
            "messages": [{
                "role": "system",
                "content": instruction
            }],
            "temperature": 0.7,
            "max_tokens": self.max_tokens
        });

        let response = self
            .client
            .post_chat(body)
            .await
            .map_err(|e| PipelineError::GenerationFailed(e.to_string()))?;

        let content = OpenAIClient::first_choice_content(&response).ok_or_else(|| {
            PipelineError::GenerationFailed("response carried no message content".to_string())
        })?;

        Ok(content.trim().to_string())
    }
}
