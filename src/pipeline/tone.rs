// src/pipeline/tone.rs
// Final textual pass over the reply. Purely textual and idempotent:
// reapplying the checker to its own output changes nothing.

use std::sync::Arc;

use regex::Regex;

use super::tables::PipelineTables;
use super::types::Intent;

const VALIDATION_PREFIX: &str = "That sounds really heavy. ";

pub struct ToneChecker {
    tables: Arc<PipelineTables>,
    should_pattern: Regex,
    just_pattern: Regex,
}

impl ToneChecker {
    pub fn new(tables: Arc<PipelineTables>) -> Self {
        Self {
            tables,
            should_pattern: Regex::new(r"(?i)\bshould\b").expect("static tone pattern"),
            just_pattern: Regex::new(r"(?i)\bjust\s+").expect("static tone pattern"),
        }
    }

    pub fn apply(&self, text: &str, intent: Intent) -> String {
        let mut out = text.to_string();

        out = self.should_pattern.replace_all(&out, "might").into_owned();
        out = self.just_pattern.replace_all(&out, "").into_owned();

        if intent == Intent::EmotionalExpression && !self.opens_with_validation(&out) {
            out = format!("{}{}", VALIDATION_PREFIX, out);
        }

        out
    }

    fn opens_with_validation(&self, text: &str) -> bool {
        let lower = text.trim_start().to_lowercase();
        self.tables
            .validation_openers
            .iter()
            .any(|opener| lower.starts_with(opener.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> ToneChecker {
        ToneChecker::new(Arc::new(PipelineTables::standard()))
    }

    #[test]
    fn softens_should_and_strips_just() {
        let out = checker().apply(
            "It sounds like you should rest, it's just a lot right now.",
            Intent::EmotionalExpression,
        );
        assert_eq!(out, "It sounds like you might rest, it's a lot right now.");
    }

    #[test]
    fn prepends_validation_for_emotional_expression_without_opener() {
        let out = checker().apply("Rough days happen.", Intent::EmotionalExpression);
        assert!(out.starts_with(VALIDATION_PREFIX));
    }

    #[test]
    fn leaves_recognized_openers_alone() {
        let text = "I hear you. Today took a lot out of you.";
        let out = checker().apply(text, Intent::EmotionalExpression);
        assert_eq!(out, text);
    }

    #[test]
    fn no_prepend_for_other_intents() {
        let out = checker().apply("Rough days happen.", Intent::Withdrawal);
        assert_eq!(out, "Rough days happen.");
    }

    #[test]
    fn idempotent_when_reapplied() {
        let c = checker();
        let once = c.apply("you should rest, just breathe", Intent::EmotionalExpression);
        let twice = c.apply(&once, Intent::EmotionalExpression);
        assert_eq!(once, twice);
    }

    #[test]
    fn words_containing_the_targets_are_untouched() {
        let out = checker().apply(
            "Your shoulder carries so much, and justice matters to you.",
            Intent::Withdrawal,
        );
        assert_eq!(out, "Your shoulder carries so much, and justice matters to you.");
    }
}
