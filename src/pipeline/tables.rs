// src/pipeline/tables.rs
// Immutable constant tables injected into the pipeline at construction.
// Nothing in here is env-configurable: these are policy, not deployment
// settings. Tests substitute smaller tables through the same struct.

use regex::Regex;

use super::types::{Emotion, Intent};

/// One ordered rule-layer entry: first matching pattern wins.
#[derive(Debug, Clone)]
pub struct RulePattern {
    pub intent: Intent,
    pub pattern: Regex,
    pub confidence: f32,
}

/// An in-place rewrite: matched phrase is replaced, never deleted.
#[derive(Debug, Clone)]
pub struct PhraseRewrite {
    pub pattern: Regex,
    pub replacement: &'static str,
}

/// The full set of lexicons, maps, and templates the pipeline runs on.
#[derive(Debug, Clone)]
pub struct PipelineTables {
    /// Tiered self-harm lexicon. Matching is substring-on-normalized-text.
    pub crisis_immediate: Vec<String>,
    pub crisis_likely: Vec<String>,
    pub crisis_possible: Vec<String>,

    /// Emoji to emotion hint. First match found in the text wins; no voting.
    pub emoji_map: Vec<(char, Emotion)>,

    /// Ordered high-precision intent patterns for the rule layer.
    pub rule_patterns: Vec<RulePattern>,

    /// Recognized reply openers that count as validation phrases.
    pub validation_openers: Vec<String>,

    /// Clinical/diagnostic vocabulary stems. Any hit replaces the reply
    /// wholesale with `supportive_fallback`.
    pub clinical_terms: Vec<String>,

    /// Directive phrasings softened in place when advice is not allowed.
    pub directive_rewrites: Vec<PhraseRewrite>,

    /// Toxic-positivity phrasings rewritten to validating alternatives.
    pub positivity_rewrites: Vec<PhraseRewrite>,

    /// Fixed crisis templates. Both carry helpline contacts and the
    /// explicit safety question.
    pub crisis_template_immediate: String,
    pub crisis_template_likely: String,

    /// Wholesale replacement when generated text leaks crisis-tier
    /// keywords under a non-crisis strategy.
    pub compassionate_fallback: String,

    /// Wholesale replacement when generated text uses clinical vocabulary.
    pub supportive_fallback: String,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static table pattern")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl PipelineTables {
    /// The production tables.
    pub fn standard() -> Self {
        Self {
            crisis_immediate: strings(&[
                "kill myself",
                "killing myself",
                "end my life",
                "ending my life",
                "want to die",
                "suicide",
                "suicidal",
                "better off dead",
                "end it all tonight",
            ]),
            crisis_likely: strings(&[
                "hurt myself",
                "hurting myself",
                "harm myself",
                "self harm",
                "self-harm",
                "cutting myself",
                "no reason to live",
                "can't go on",
                "end it all",
            ]),
            crisis_possible: strings(&[
                "hopeless",
                "worthless",
                "want to disappear",
                "what's the point",
                "give up on everything",
                "empty inside",
            ]),
            emoji_map: vec![
                ('\u{1F630}', Emotion::Anxiety),   // 😰
                ('\u{1F628}', Emotion::Anxiety),   // 😨
                ('\u{1F62D}', Emotion::Sadness),   // 😭
                ('\u{1F622}', Emotion::Sadness),   // 😢
                ('\u{1F494}', Emotion::Sadness),   // 💔
                ('\u{1F621}', Emotion::Anger),     // 😡
                ('\u{1F620}', Emotion::Anger),     // 😠
                ('\u{1F635}', Emotion::Overwhelm), // 😵
                ('\u{1F92F}', Emotion::Overwhelm), // 🤯
                ('\u{1F972}', Emotion::Loneliness), // 🥲
                ('\u{1F636}', Emotion::Numbness),  // 😶
            ],
            rule_patterns: vec![
                RulePattern {
                    intent: Intent::HelpSeeking,
                    pattern: re(
                        r"(?i)\b(what should i do|how do i (cope|deal|stop|handle)|can you help|any advice|help me figure)\b",
                    ),
                    confidence: 0.85,
                },
                RulePattern {
                    intent: Intent::Withdrawal,
                    pattern: re(
                        r"(?i)\b(leave me alone|i don'?t want to talk|doesn'?t matter anymore|forget it|never ?mind)\b",
                    ),
                    confidence: 0.8,
                },
                RulePattern {
                    intent: Intent::UnderstandingEmotions,
                    pattern: re(
                        r"(?i)\b(why (do|am) i feel|what('s| is) wrong with me|why can'?t i (stop|just))\b",
                    ),
                    confidence: 0.75,
                },
                RulePattern {
                    intent: Intent::EmotionalExpression,
                    pattern: re(
                        r"(?i)\b(i feel|i'?m feeling|i am feeling|it hurts|i can'?t stop crying)\b",
                    ),
                    confidence: 0.7,
                },
            ],
            validation_openers: strings(&[
                "that sounds",
                "it sounds like",
                "it makes sense",
                "i hear you",
                "that must",
                "what you're feeling",
            ]),
            clinical_terms: strings(&[
                "diagnos",
                "disorder",
                "medication",
                "prescri",
            ]),
            directive_rewrites: vec![
                PhraseRewrite {
                    pattern: re(r"(?i)\byou should\b"),
                    replacement: "perhaps you could",
                },
                PhraseRewrite {
                    pattern: re(r"(?i)\btry to\b"),
                    replacement: "we could",
                },
            ],
            positivity_rewrites: vec![
                PhraseRewrite {
                    pattern: re(r"(?i)\bdon'?t worry\b"),
                    replacement: "it's understandable to feel this way",
                },
                PhraseRewrite {
                    pattern: re(r"(?i)\beverything will be (fine|okay|ok|alright)\b"),
                    replacement: "whatever you're feeling right now is valid",
                },
            ],
            crisis_template_immediate: "\
I'm really glad you told me. What you're carrying right now sounds unbearably heavy, \
and you don't have to hold it alone. Are you safe right now?\n\n\
If you are in immediate danger, please reach out to someone who can be with you in \
this moment:\n\
- Call or text 988 (Suicide & Crisis Lifeline, US & Canada)\n\
- Call 116 123 (Samaritans, UK & Ireland)\n\
- Or call your local emergency number\n\n\
I'm staying right here with you. You matter, and this feeling is not the end of your story."
                .to_string(),
            crisis_template_likely: "\
Thank you for trusting me with this. It sounds like things have been incredibly painful, \
and I want you to know that what you're feeling deserves real care. Are you safe right now?\n\n\
If the pain ever feels like too much, please reach out:\n\
- Call or text 988 (Suicide & Crisis Lifeline, US & Canada)\n\
- Call 116 123 (Samaritans, UK & Ireland)\n\n\
You don't have to go through this alone. I'm here, and I'm listening."
                .to_string(),
            compassionate_fallback:
                "I'm here with you. What you're feeling matters, and I'm listening. \
Would you like to tell me more about what's on your mind?"
                    .to_string(),
            supportive_fallback:
                "I can't speak to anything medical, but I can be here with you. \
What you're going through sounds genuinely hard, and your feelings make sense."
                    .to_string(),
        }
    }

    /// Highest matching crisis tier for normalized text, or `None`.
    /// Tier priority is immediate > likely > possible; an immediate hit
    /// can never be downgraded by later matches.
    pub fn crisis_tier_of(&self, normalized: &str) -> super::types::CrisisTier {
        use super::types::CrisisTier;
        if self.crisis_immediate.iter().any(|k| normalized.contains(k.as_str())) {
            return CrisisTier::Immediate;
        }
        if self.crisis_likely.iter().any(|k| normalized.contains(k.as_str())) {
            return CrisisTier::Likely;
        }
        if self.crisis_possible.iter().any(|k| normalized.contains(k.as_str())) {
            return CrisisTier::Possible;
        }
        CrisisTier::None
    }

    /// Whether text contains any immediate- or likely-tier keyword.
    /// Used by the safety filter to catch crisis leakage in generated text.
    pub fn contains_crisis_language(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.crisis_immediate
            .iter()
            .chain(self.crisis_likely.iter())
            .any(|k| lower.contains(k.as_str()))
    }
}
