// src/pipeline/safety.rs
// Post-generation rewriting. Rewrites are expected, silent
// transformations, never errors. Wholesale replacement guards against
// the generation collaborator hallucinating risky or clinical content
// even when the input itself was not flagged.

use std::sync::Arc;

use tracing::warn;

use super::tables::PipelineTables;
use super::types::{Strategy, StrategyDecision};

/// What the filter did, recorded for audit logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyAction {
    Passed,
    Softened,
    ReplacedCrisisLeak,
    ReplacedClinical,
}

#[derive(Debug, Clone)]
pub struct SafetyOutcome {
    pub text: String,
    pub action: SafetyAction,
}

pub struct SafetyFilter {
    tables: Arc<PipelineTables>,
}

impl SafetyFilter {
    pub fn new(tables: Arc<PipelineTables>) -> Self {
        Self { tables }
    }

    pub fn apply(&self, generated: &str, decision: &StrategyDecision) -> SafetyOutcome {
        // The crisis path already produced a fixed template; nothing to do.
        if decision.strategy == Strategy::CrisisSupport {
            return SafetyOutcome {
                text: generated.to_string(),
                action: SafetyAction::Passed,
            };
        }

        // Crisis-tier keywords in generated text under a non-crisis
        // strategy never pass through, whatever the surrounding prose.
        if self.tables.contains_crisis_language(generated) {
            warn!("generated text leaked crisis language; replaced wholesale");
            return SafetyOutcome {
                text: self.tables.compassionate_fallback.clone(),
                action: SafetyAction::ReplacedCrisisLeak,
            };
        }

        // Clinical authority must never come from this system.
        let lower = generated.to_lowercase();
        if self.tables.clinical_terms.iter().any(|t| lower.contains(t.as_str())) {
            warn!("generated text used clinical vocabulary; replaced wholesale");
            return SafetyOutcome {
                text: self.tables.supportive_fallback.clone(),
                action: SafetyAction::ReplacedClinical,
            };
        }

        let mut text = generated.to_string();
        let mut softened = false;

        if !decision.constraints.allow_advice {
            for rewrite in &self.tables.directive_rewrites {
                if rewrite.pattern.is_match(&text) {
                    text = rewrite
                        .pattern
                        .replace_all(&text, rewrite.replacement)
                        .into_owned();
                    softened = true;
                }
            }
        }

        for rewrite in &self.tables.positivity_rewrites {
            if rewrite.pattern.is_match(&text) {
                text = rewrite
                    .pattern
                    .replace_all(&text, rewrite.replacement)
                    .into_owned();
                softened = true;
            }
        }

        SafetyOutcome {
            text,
            action: if softened {
                SafetyAction::Softened
            } else {
                SafetyAction::Passed
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::{Modifier, ResponseConstraints};

    fn filter() -> SafetyFilter {
        SafetyFilter::new(Arc::new(PipelineTables::standard()))
    }

    fn decision(strategy: Strategy, allow_advice: bool) -> StrategyDecision {
        StrategyDecision {
            strategy,
            modifiers: Vec::<Modifier>::new(),
            constraints: ResponseConstraints {
                allow_advice,
                allow_tool: allow_advice,
                max_questions: 1,
            },
        }
    }

    #[test]
    fn crisis_leak_is_replaced_wholesale() {
        let out = filter().apply(
            "Maybe you want to die because things are hard.",
            &decision(Strategy::PureEmpathy, false),
        );
        assert_eq!(out.action, SafetyAction::ReplacedCrisisLeak);
        assert!(!out.text.to_lowercase().contains("want to die"));
    }

    #[test]
    fn crisis_support_strategy_passes_untouched() {
        let template = "Are you safe right now? Call 988.";
        let out = filter().apply(template, &decision(Strategy::CrisisSupport, false));
        assert_eq!(out.action, SafetyAction::Passed);
        assert_eq!(out.text, template);
    }

    #[test]
    fn clinical_vocabulary_never_survives() {
        for risky in [
            "You have a disorder.",
            "That sounds like a DIAGNOSIS of anxiety.",
            "Maybe medication would help.",
            "Ask about a prescription.",
        ] {
            let out = filter().apply(risky, &decision(Strategy::EmpathyReflection, false));
            assert_eq!(out.action, SafetyAction::ReplacedClinical);
            let lower = out.text.to_lowercase();
            for term in ["diagnos", "disorder", "medication", "prescri"] {
                assert!(!lower.contains(term), "clinical term survived: {}", term);
            }
        }
    }

    #[test]
    fn directives_soften_in_place_when_advice_disallowed() {
        let out = filter().apply(
            "You should rest. Try to breathe slowly.",
            &decision(Strategy::PureEmpathy, false),
        );
        assert_eq!(out.action, SafetyAction::Softened);
        assert_eq!(out.text, "perhaps you could rest. we could breathe slowly.");
    }

    #[test]
    fn directives_pass_when_advice_is_allowed() {
        let text = "You should talk to someone you trust.";
        let out = filter().apply(text, &decision(Strategy::EmpathyPermission, true));
        assert_eq!(out.text, text);
    }

    #[test]
    fn toxic_positivity_is_rewritten_not_deleted() {
        let out = filter().apply(
            "Don't worry, everything will be fine.",
            &decision(Strategy::EmpathyReflection, false),
        );
        assert_eq!(out.action, SafetyAction::Softened);
        assert!(!out.text.to_lowercase().contains("don't worry"));
        assert!(!out.text.to_lowercase().contains("everything will be fine"));
        // The sentence still reads as a sentence.
        assert!(out.text.contains("it's understandable to feel this way"));
    }
}
