// src/pipeline/mod.rs
// The conversational safety-and-strategy pipeline: one raw utterance in,
// one policy-compliant reply out. Stages run strictly sequentially; the
// only suspension points are the two collaborator calls, and the crisis
// path never reaches either of them.

use std::sync::Arc;

use tracing::{info, warn};

use crate::llm::classifier::IntentClassifier;
use crate::llm::generation::ReplyGenerator;
use crate::persona::PersonaOverlay;

pub mod classify;
pub mod crisis;
pub mod error;
pub mod memory;
pub mod preprocess;
pub mod prompt;
pub mod safety;
pub mod strategy;
pub mod tables;
pub mod tone;
pub mod types;

pub use error::PipelineError;
pub use tables::PipelineTables;
pub use types::{FinalResponse, Turn, Utterance};

use classify::IntentEmotionClassifier;
use crisis::CrisisResponder;
use preprocess::Preprocessor;
use prompt::PromptBuilder;
use safety::{SafetyAction, SafetyFilter};
use strategy::StrategySelector;
use tone::ToneChecker;
use types::{Emotion, Intent, Strategy};

pub struct ChatPipeline {
    preprocessor: Preprocessor,
    classifier: IntentEmotionClassifier,
    selector: StrategySelector,
    prompt_builder: PromptBuilder,
    safety: SafetyFilter,
    tone: ToneChecker,
    crisis: CrisisResponder,
    generator: Arc<dyn ReplyGenerator>,
}

impl ChatPipeline {
    pub fn new(
        tables: Arc<PipelineTables>,
        remote_classifier: Arc<dyn IntentClassifier>,
        generator: Arc<dyn ReplyGenerator>,
    ) -> Self {
        Self {
            preprocessor: Preprocessor::new(tables.clone()),
            classifier: IntentEmotionClassifier::new(tables.clone(), remote_classifier),
            selector: StrategySelector::new(),
            prompt_builder: PromptBuilder::new(PersonaOverlay::Default),
            safety: SafetyFilter::new(tables.clone()),
            tone: ToneChecker::new(tables.clone()),
            crisis: CrisisResponder::new(tables),
            generator,
        }
    }

    /// Handle one utterance end to end. History is a read-only snapshot
    /// supplied by the caller; persistence of both turns is the caller's
    /// job after this returns.
    pub async fn respond(
        &self,
        utterance: &Utterance,
        history: &[Turn],
    ) -> Result<FinalResponse, PipelineError> {
        let signal = self.preprocessor.run(&utterance.text);

        // Hard safety override: a bypass-worthy tier suspends everything
        // downstream, including both collaborator calls.
        if let Some(template) = self.crisis.respond(signal.crisis_tier) {
            warn!(
                turn_id = %utterance.turn_id,
                tier = %signal.crisis_tier,
                "crisis bypass fired"
            );
            return Ok(FinalResponse {
                text: template,
                intent: Intent::Crisis,
                emotion: signal.emoji_hint.unwrap_or(Emotion::Neutral),
                strategy: Strategy::CrisisSupport,
                crisis_bypass: true,
                turn_id: utterance.turn_id,
            });
        }

        let memory = memory::summarize(history);
        let classification = self.classifier.classify(&utterance.text, &signal).await;
        let decision = self
            .selector
            .select(&classification, signal.crisis_tier, &memory);

        // The external classifier can call crisis even when the lexicon
        // did not. Honor it with the fixed template; the softer of the
        // two is appropriate for a non-lexicon-confirmed signal.
        if decision.strategy == Strategy::CrisisSupport {
            warn!(
                turn_id = %utterance.turn_id,
                "classifier-detected crisis, using fixed template"
            );
            return Ok(FinalResponse {
                text: self
                    .crisis
                    .respond(types::CrisisTier::Likely)
                    .unwrap_or_default(),
                intent: Intent::Crisis,
                emotion: classification.emotion,
                strategy: Strategy::CrisisSupport,
                crisis_bypass: true,
                turn_id: utterance.turn_id,
            });
        }

        let instruction =
            self.prompt_builder
                .build(utterance, &signal, &classification, &decision, &memory);

        let generated = self.generator.generate(&instruction).await?;

        let filtered = self.safety.apply(&generated, &decision);
        let text = self.tone.apply(&filtered.text, classification.intent);

        info!(
            turn_id = %utterance.turn_id,
            tier = %signal.crisis_tier,
            intent = %classification.intent,
            strategy = %decision.strategy,
            safety_action = ?filtered.action,
            rewrote = filtered.action != SafetyAction::Passed,
            "pipeline complete"
        );

        Ok(FinalResponse {
            text,
            intent: classification.intent,
            emotion: classification.emotion,
            strategy: decision.strategy,
            crisis_bypass: false,
            turn_id: utterance.turn_id,
        })
    }
}
