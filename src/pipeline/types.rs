// src/pipeline/types.rs
// Core data model for the safety-and-strategy pipeline.
// Everything here except Utterance and FinalResponse is transient:
// created and discarded within the handling of a single message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One raw user message. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    pub turn_id: Uuid,
    pub user_id: String,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl Utterance {
    pub fn new(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            turn_id: Uuid::new_v4(),
            user_id: user_id.into(),
            text: text.into(),
            received_at: Utc::now(),
        }
    }
}

/// Severity bucket from the tiered self-harm lexicon.
/// Ordering matters: a higher tier never downgrades to a lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisTier {
    None,
    Possible,
    Likely,
    Immediate,
}

impl CrisisTier {
    /// Whether this tier suspends normal response generation entirely.
    pub fn requires_bypass(self) -> bool {
        matches!(self, CrisisTier::Likely | CrisisTier::Immediate)
    }
}

impl std::fmt::Display for CrisisTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CrisisTier::None => "none",
            CrisisTier::Possible => "possible",
            CrisisTier::Likely => "likely",
            CrisisTier::Immediate => "immediate",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthBucket {
    VeryShort,
    Short,
    Medium,
    Long,
    VeryLong,
}

/// Coarse structure heuristic, not a grammatical parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureTag {
    Fragmented,
    Simple,
}

/// Signal features derived from one utterance by the preprocessor.
#[derive(Debug, Clone)]
pub struct PreprocessedSignal {
    pub normalized: String,
    pub emoji_hint: Option<Emotion>,
    pub crisis_tier: CrisisTier,
    pub length_bucket: LengthBucket,
    pub structure: StructureTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    EmotionalExpression,
    UnderstandingEmotions,
    HelpSeeking,
    Withdrawal,
    Crisis,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Intent::EmotionalExpression => "emotional_expression",
            Intent::UnderstandingEmotions => "understanding_emotions",
            Intent::HelpSeeking => "help_seeking",
            Intent::Withdrawal => "withdrawal",
            Intent::Crisis => "crisis",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Anxiety,
    Sadness,
    Anger,
    Overwhelm,
    Loneliness,
    Numbness,
    Neutral,
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Emotion::Anxiety => "anxiety",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Overwhelm => "overwhelm",
            Emotion::Loneliness => "loneliness",
            Emotion::Numbness => "numbness",
            Emotion::Neutral => "neutral",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

/// Fused intent/emotion classification. Created once per utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub intent: Intent,
    /// Fused confidence, clamped to [0.0, 1.0]. Advisory.
    pub confidence: f32,
    pub emotion: Emotion,
    pub intensity: Intensity,
}

impl Classification {
    /// Documented default used whenever the external classifier is
    /// unavailable or returns something unparseable.
    pub fn fallback() -> Self {
        Self {
            intent: Intent::EmotionalExpression,
            confidence: 0.5,
            emotion: Emotion::Neutral,
            intensity: Intensity::Medium,
        }
    }
}

/// Named response policy selected for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    CrisisSupport,
    PureEmpathy,
    EmpathyReflection,
    EmpathyPermission,
    GentlePresence,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Strategy::CrisisSupport => "crisis_support",
            Strategy::PureEmpathy => "pure_empathy",
            Strategy::EmpathyReflection => "empathy_reflection",
            Strategy::EmpathyPermission => "empathy_permission",
            Strategy::GentlePresence => "gentle_presence",
        };
        write!(f, "{}", s)
    }
}

/// Non-exclusive tag that fine-tunes generation without changing the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    HighIntensity,
    LowConfidence,
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Modifier::HighIntensity => "high_intensity",
            Modifier::LowConfidence => "low_confidence",
        };
        write!(f, "{}", s)
    }
}

/// Hard limits the downstream stages must still honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseConstraints {
    pub allow_advice: bool,
    pub allow_tool: bool,
    /// Never more than one open question per reply.
    pub max_questions: u8,
}

#[derive(Debug, Clone)]
pub struct StrategyDecision {
    pub strategy: Strategy,
    pub modifiers: Vec<Modifier>,
    pub constraints: ResponseConstraints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        write!(f, "{}", s)
    }
}

/// One prior conversation turn, as supplied by the history collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// Intent recorded for the turn, when the pipeline produced one.
    pub intent: Option<Intent>,
}

/// Bounded window of recent turns fed to the strategy stage.
/// Read-only snapshot per request; never persisted by this subsystem.
#[derive(Debug, Clone, Default)]
pub struct ShortTermMemory {
    pub turns: Vec<Turn>,
    pub last_intent: Option<Intent>,
}

/// The pipeline's terminal output, carrying everything the caller
/// needs for persistence and audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalResponse {
    pub text: String,
    pub intent: Intent,
    pub emotion: Emotion,
    pub strategy: Strategy,
    pub crisis_bypass: bool,
    pub turn_id: Uuid,
}
