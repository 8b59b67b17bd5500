// src/pipeline/prompt.rs
// Deterministic rendering of the generation instruction. Straight
// interpolation only: every section below is always emitted, so the
// voice rules can never be silently dropped.

use crate::persona::PersonaOverlay;

use super::types::{
    Classification, PreprocessedSignal, ShortTermMemory, Strategy, StrategyDecision, Utterance,
};

pub struct PromptBuilder {
    persona: PersonaOverlay,
}

impl PromptBuilder {
    pub fn new(persona: PersonaOverlay) -> Self {
        Self { persona }
    }

    pub fn build(
        &self,
        utterance: &Utterance,
        signal: &PreprocessedSignal,
        classification: &Classification,
        decision: &StrategyDecision,
        memory: &ShortTermMemory,
    ) -> String {
        let mut prompt = String::new();

        // 1. Persona framing
        prompt.push_str(self.persona.prompt().trim());
        prompt.push_str("\n\n");

        // 2. What we know about this message
        prompt.push_str("What we understand about this message:\n");
        prompt.push_str(&format!("- Intent: {}\n", classification.intent));
        prompt.push_str(&format!("- Primary emotion: {}\n", classification.emotion));
        prompt.push_str(&format!("- Intensity: {:?}\n", classification.intensity));
        prompt.push_str(&format!("- Risk signal: {}\n", signal.crisis_tier));
        prompt.push_str("\n");

        // 3. Response strategy and modifiers
        prompt.push_str(&format!("Response strategy: {}\n", decision.strategy));
        prompt.push_str(strategy_guidance(decision.strategy));
        if !decision.modifiers.is_empty() {
            let tags: Vec<String> =
                decision.modifiers.iter().map(|m| m.to_string()).collect();
            prompt.push_str(&format!("Modifiers: {}\n", tags.join(", ")));
        }
        prompt.push_str("\n");

        // 4. Voice rules — always emitted in full
        prompt.push_str("Voice rules (all of these are hard requirements):\n");
        prompt.push_str("- Keep the reply under 120 words.\n");
        prompt.push_str("- Never use absolute words like \"should\", \"always\", or \"never\".\n");
        prompt.push_str("- Never use diagnostic or clinical language of any kind.\n");
        if decision.constraints.max_questions > 0 {
            prompt.push_str("- Ask at most one gentle, optional question.\n");
        } else {
            prompt.push_str("- Do not ask questions.\n");
        }
        if decision.constraints.allow_advice {
            prompt.push_str("- They asked for guidance: you may offer one small suggestion, framed as optional.\n");
        } else {
            prompt.push_str("- Do not give advice or suggestions of any kind.\n");
        }
        prompt.push_str("\n");

        // 5. Recent conversation window
        if !memory.turns.is_empty() {
            prompt.push_str("Recent conversation:\n");
            for turn in &memory.turns {
                prompt.push_str(&format!("{}: {}\n", turn.role, turn.content));
            }
            prompt.push_str("\n");
        }

        // 6. The message to respond to, verbatim
        prompt.push_str(&format!("They just said: \"{}\"\n", utterance.text));
        prompt.push_str("Respond as Solace.");

        prompt
    }
}

fn strategy_guidance(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::CrisisSupport => {
            "Stay with them. Safety and presence only; nothing else matters right now.\n"
        }
        Strategy::PureEmpathy => {
            "Only validate. Reflect the feeling back softly; do not analyze or redirect.\n"
        }
        Strategy::EmpathyReflection => {
            "Validate first, then gently mirror what you heard in their own words.\n"
        }
        Strategy::EmpathyPermission => {
            "Validate first. If a suggestion feels right, ask permission before offering it.\n"
        }
        Strategy::GentlePresence => {
            "They are pulling away. Keep it short, warm, and pressure-free; leave the door open.\n"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::preprocess::Preprocessor;
    use crate::pipeline::strategy::StrategySelector;
    use crate::pipeline::tables::PipelineTables;
    use crate::pipeline::types::{CrisisTier, Emotion, Intensity, Intent, Role, Turn};
    use std::sync::Arc;

    fn render(text: &str, intent: Intent, allow_advice_intent: bool) -> String {
        let tables = Arc::new(PipelineTables::standard());
        let utterance = Utterance::new("user-1", text);
        let signal = Preprocessor::new(tables).run(text);
        let classification = Classification {
            intent,
            confidence: 0.8,
            emotion: Emotion::Anxiety,
            intensity: Intensity::Medium,
        };
        let decision = StrategySelector::new().select(
            &classification,
            CrisisTier::None,
            &ShortTermMemory::default(),
        );
        assert_eq!(decision.constraints.allow_advice, allow_advice_intent);
        let memory = ShortTermMemory {
            turns: vec![Turn {
                role: Role::User,
                content: "yesterday was rough".to_string(),
                intent: None,
            }],
            last_intent: None,
        };
        PromptBuilder::new(PersonaOverlay::Default).build(
            &utterance,
            &signal,
            &classification,
            &decision,
            &memory,
        )
    }

    #[test]
    fn voice_rules_are_always_present() {
        let prompt = render("i feel anxious", Intent::EmotionalExpression, false);
        assert!(prompt.contains("under 120 words"));
        assert!(prompt.contains("diagnostic or clinical"));
        assert!(prompt.contains("at most one gentle, optional question"));
        assert!(prompt.contains("Do not give advice"));
    }

    #[test]
    fn advice_line_flips_with_the_constraint() {
        let prompt = render("what should i do", Intent::HelpSeeking, true);
        assert!(prompt.contains("you may offer one small suggestion"));
        assert!(!prompt.contains("Do not give advice"));
    }

    #[test]
    fn utterance_and_memory_are_interpolated_verbatim() {
        let prompt = render("i feel anxious about tomorrow", Intent::EmotionalExpression, false);
        assert!(prompt.contains("They just said: \"i feel anxious about tomorrow\""));
        assert!(prompt.contains("user: yesterday was rough"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render("i feel anxious", Intent::EmotionalExpression, false);
        let b = render("i feel anxious", Intent::EmotionalExpression, false);
        assert_eq!(a, b);
    }
}
