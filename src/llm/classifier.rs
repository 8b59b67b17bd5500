// src/llm/classifier.rs
// External classification collaborator: given one utterance, return a
// validated intent/emotion record. Failures never block the pipeline;
// the classify stage substitutes documented defaults.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::llm::client::OpenAIClient;
use crate::pipeline::error::PipelineError;
use crate::pipeline::types::{Emotion, Intensity, Intent};

/// The classifier's result as a closed-variant record. Unknown intents,
/// emotions, or intensities fail deserialization outright, which routes
/// the request onto the documented-default path instead of letting
/// undefined values flow downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteClassification {
    pub intent: Intent,
    pub confidence: f32,
    pub primary_emotion: Emotion,
    pub intensity: Intensity,
}

#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<RemoteClassification, PipelineError>;
}

/// Classification over an OpenAI-compatible structured-output call.
pub struct OpenAiIntentClassifier {
    client: OpenAIClient,
    model: String,
}

impl OpenAiIntentClassifier {
    pub fn new(client: OpenAIClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl IntentClassifier for OpenAiIntentClassifier {
    async fn classify(&self, text: &str) -> Result<RemoteClassification, PipelineError> {
        let schema = json!({
            "type": "json_schema",
            "json_schema": {
                "name": "utterance_classification",
                "strict": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "intent": {
                            "type": "string",
                            "enum": [
                                "emotional_expression",
                                "understanding_emotions",
                                "help_seeking",
                                "withdrawal",
                                "crisis"
                            ]
                        },
                        "confidence": {
                            "type": "number",
                            "minimum": 0,
                            "maximum": 1
                        },
                        "primary_emotion": {
                            "type": "string",
                            "enum": [
                                "anxiety",
                                "sadness",
                                "anger",
                                "overwhelm",
                                "loneliness",
                                "numbness",
                                "neutral"
                            ]
                        },
                        "intensity": {
                            "type": "string",
                            "enum": ["low", "medium", "high"]
                        }
                    },
                    "required": ["intent", "confidence", "primary_emotion", "intensity"],
                    "additionalProperties": false
                }
            }
        });

        let body = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": format!(
                    "Classify this message from a wellness-app user.\n\n\
                    Message: \"{}\"\n\n\
                    Return intent, confidence (0.0-1.0), primary_emotion, and intensity.",
                    text
                )
            }],
            "temperature": 0.0,
            "max_tokens": 128,
            "response_format": schema
        });

        let response = self
            .client
            .post_chat(body)
            .await
            .map_err(|e| PipelineError::ClassificationUnavailable(e.to_string()))?;

        let content = OpenAIClient::first_choice_content(&response).ok_or_else(|| {
            PipelineError::MalformedClassifierOutput(
                "response carried no message content".to_string(),
            )
        })?;

        serde_json::from_str::<RemoteClassification>(content)
            .map_err(|e| PipelineError::MalformedClassifierOutput(e.to_string()))
    }
}
