// src/pipeline/memory.rs

use super::types::{ShortTermMemory, Turn};

/// How many prior turns the strategy stage may see.
pub const STM_WINDOW: usize = 3;

/// Windows caller-supplied history (ordered, newest last) down to the
/// last few turns plus the most recent turn's recorded intent. No I/O.
pub fn summarize(history: &[Turn]) -> ShortTermMemory {
    let start = history.len().saturating_sub(STM_WINDOW);
    let turns: Vec<Turn> = history[start..].to_vec();
    let last_intent = turns.last().and_then(|turn| turn.intent);

    ShortTermMemory { turns, last_intent }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::{Intent, Role};

    fn turn(content: &str, intent: Option<Intent>) -> Turn {
        Turn {
            role: Role::User,
            content: content.to_string(),
            intent,
        }
    }

    #[test]
    fn empty_history_yields_empty_memory() {
        let memory = summarize(&[]);
        assert!(memory.turns.is_empty());
        assert!(memory.last_intent.is_none());
    }

    #[test]
    fn window_keeps_only_the_last_three_turns() {
        let history = vec![
            turn("one", None),
            turn("two", None),
            turn("three", Some(Intent::Withdrawal)),
            turn("four", Some(Intent::HelpSeeking)),
        ];
        let memory = summarize(&history);
        assert_eq!(memory.turns.len(), 3);
        assert_eq!(memory.turns[0].content, "two");
        assert_eq!(memory.last_intent, Some(Intent::HelpSeeking));
    }

    #[test]
    fn last_intent_is_none_when_unrecorded() {
        let memory = summarize(&[turn("hi", None)]);
        assert!(memory.last_intent.is_none());
    }
}
