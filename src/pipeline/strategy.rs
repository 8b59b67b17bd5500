// src/pipeline/strategy.rs
// The single strategy authority: one decision per message, keyed on the
// fused classification, the crisis tier, and short-term memory. No state
// machine persists across turns beyond what the memory window feeds in.

use tracing::debug;

use super::types::{
    Classification, CrisisTier, Intensity, Intent, Modifier, ResponseConstraints,
    ShortTermMemory, Strategy, StrategyDecision,
};

/// Open-question cap: never more than one open question per reply.
const MAX_QUESTIONS: u8 = 1;

pub struct StrategySelector;

impl StrategySelector {
    pub fn new() -> Self {
        Self
    }

    pub fn select(
        &self,
        classification: &Classification,
        crisis_tier: CrisisTier,
        memory: &ShortTermMemory,
    ) -> StrategyDecision {
        let strategy = if crisis_tier.requires_bypass() || classification.intent == Intent::Crisis
        {
            Strategy::CrisisSupport
        } else {
            match (classification.intent, classification.intensity) {
                (Intent::EmotionalExpression, Intensity::High) => Strategy::PureEmpathy,
                (Intent::EmotionalExpression, _) => Strategy::EmpathyReflection,
                (Intent::HelpSeeking, _) => Strategy::EmpathyPermission,
                (Intent::Withdrawal, _) => Strategy::GentlePresence,
                _ => Strategy::PureEmpathy,
            }
        };

        let mut modifiers = Vec::new();
        if classification.intensity == Intensity::High {
            modifiers.push(Modifier::HighIntensity);
        }
        if classification.confidence < 0.6 {
            modifiers.push(Modifier::LowConfidence);
        }

        let constraints = match strategy {
            Strategy::CrisisSupport => ResponseConstraints {
                allow_advice: false,
                allow_tool: false,
                max_questions: 0,
            },
            Strategy::EmpathyPermission => ResponseConstraints {
                // Advice is permitted only when the caller asked for help,
                // and downstream stages still check this flag.
                allow_advice: true,
                allow_tool: true,
                max_questions: MAX_QUESTIONS,
            },
            _ => ResponseConstraints {
                allow_advice: false,
                allow_tool: false,
                max_questions: MAX_QUESTIONS,
            },
        };

        debug!(
            strategy = %strategy,
            previous_intent = ?memory.last_intent,
            modifiers = modifiers.len(),
            "strategy selected"
        );

        StrategyDecision {
            strategy,
            modifiers,
            constraints,
        }
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new()
    }
}
