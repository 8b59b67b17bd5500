// src/pipeline/classify.rs
// Fuses a local rule layer with the external classification collaborator.
// The rule layer catches obvious high-precision phrasings cheaply and
// keeps working when the collaborator is down.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm::classifier::IntentClassifier;

use super::tables::PipelineTables;
use super::types::{Classification, Intent, PreprocessedSignal, StructureTag};

const RULE_WEIGHT: f32 = 0.3;
const EXTERNAL_WEIGHT: f32 = 0.6;
const SIGNAL_ADJUSTMENT: f32 = 0.05;

pub struct IntentEmotionClassifier {
    tables: Arc<PipelineTables>,
    remote: Arc<dyn IntentClassifier>,
}

impl IntentEmotionClassifier {
    pub fn new(tables: Arc<PipelineTables>, remote: Arc<dyn IntentClassifier>) -> Self {
        Self { tables, remote }
    }

    pub async fn classify(&self, raw_text: &str, signal: &PreprocessedSignal) -> Classification {
        let rule_match = self.rule_match(&signal.normalized);

        let external = match self.remote.classify(raw_text).await {
            Ok(result) => Classification {
                intent: result.intent,
                confidence: result.confidence.clamp(0.0, 1.0),
                emotion: result.primary_emotion,
                intensity: result.intensity,
            },
            Err(e) => {
                // Degraded but available: substitute the documented default
                // and keep going. Never block on classifier failure.
                warn!("classifier unavailable, using defaults: {}", e);
                Classification::fallback()
            }
        };

        let (rule_intent, rule_confidence) = match rule_match {
            Some((intent, confidence)) => (Some(intent), confidence),
            None => (None, 0.0),
        };

        let confidence = fuse_confidence(
            rule_confidence,
            external.confidence,
            signal.emoji_hint.is_some(),
            signal.structure == StructureTag::Fragmented,
        );

        let intent = match rule_intent {
            Some(intent)
                if rule_confidence > external.confidence && rule_confidence > 0.6 =>
            {
                intent
            }
            _ => external.intent,
        };

        let mut classification = Classification {
            intent,
            confidence,
            emotion: external.emotion,
            intensity: external.intensity,
        };

        // Crisis override outranks everything the fusion computed.
        if signal.crisis_tier.requires_bypass() {
            classification.intent = Intent::Crisis;
            classification.confidence = 1.0;
        }

        debug!(
            intent = %classification.intent,
            confidence = classification.confidence,
            emotion = %classification.emotion,
            "classification complete"
        );

        classification
    }

    /// First matching rule pattern wins.
    fn rule_match(&self, normalized: &str) -> Option<(Intent, f32)> {
        self.tables
            .rule_patterns
            .iter()
            .find(|rule| rule.pattern.is_match(normalized))
            .map(|rule| (rule.intent, rule.confidence))
    }
}

/// Deterministic confidence fusion. The signal adjustments contribute at
/// most 0.10 on top of the weighted sum; the result is clamped to [0, 1]
/// so downstream consumers can treat it as a probability.
pub fn fuse_confidence(
    rule_confidence: f32,
    external_confidence: f32,
    has_emoji_hint: bool,
    is_fragmented: bool,
) -> f32 {
    let mut adjustment = 0.0;
    if has_emoji_hint {
        adjustment += SIGNAL_ADJUSTMENT;
    }
    if is_fragmented {
        adjustment += SIGNAL_ADJUSTMENT;
    }

    let fused =
        RULE_WEIGHT * rule_confidence + EXTERNAL_WEIGHT * external_confidence + adjustment;
    fused.clamp(0.0, 1.0)
}
