// src/llm/client.rs

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Thin client for an OpenAI-compatible chat-completions API. Both
/// external collaborators (classification, generation) ride on this.
#[derive(Clone)]
pub struct OpenAIClient {
    pub client: Client,
    pub api_key: String,
    pub api_base: String,
}

impl OpenAIClient {
    pub fn new(api_key: String, api_base: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            api_base,
        })
    }

    /// POST a chat-completions payload and return the raw JSON response.
    pub async fn post_chat(&self, body: Value) -> Result<Value> {
        let url = format!(
            "{}/chat/completions",
            self.api_base.trim_end_matches('/')
        );

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("failed to send chat request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(anyhow::anyhow!("API error {}: {}", status, error_text));
        }

        resp.json().await.context("failed to parse response body")
    }

    /// Pull the first choice's message content out of a chat-completions
    /// response.
    pub fn first_choice_content(response: &Value) -> Option<&str> {
        response
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
    }
}
