// src/pipeline/preprocess.rs

use std::sync::Arc;

use super::tables::PipelineTables;
use super::types::{CrisisTier, Emotion, LengthBucket, PreprocessedSignal, StructureTag};

/// Turns raw text into signal features. Pure; no side effects.
/// Malformed or empty input yields bucket `very_short` and tier `none`.
pub struct Preprocessor {
    tables: Arc<PipelineTables>,
}

impl Preprocessor {
    pub fn new(tables: Arc<PipelineTables>) -> Self {
        Self { tables }
    }

    pub fn run(&self, raw: &str) -> PreprocessedSignal {
        let normalized = normalize(raw);
        let emoji_hint = self.emoji_hint(raw);
        let crisis_tier = self.tables.crisis_tier_of(&normalized);
        let length_bucket = length_bucket(&normalized);
        let structure = structure_tag(&normalized);

        PreprocessedSignal {
            normalized,
            emoji_hint,
            crisis_tier,
            length_bucket,
            structure,
        }
    }

    /// First emoji with a known emotion mapping wins; no voting across
    /// multiple emojis.
    fn emoji_hint(&self, raw: &str) -> Option<Emotion> {
        for ch in raw.chars() {
            if let Some((_, emotion)) = self.tables.emoji_map.iter().find(|(e, _)| *e == ch) {
                return Some(*emotion);
            }
        }
        None
    }
}

fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn length_bucket(normalized: &str) -> LengthBucket {
    let words = normalized.split_whitespace().count();
    match words {
        0..=2 => LengthBucket::VeryShort,
        3..=10 => LengthBucket::Short,
        11..=30 => LengthBucket::Medium,
        31..=80 => LengthBucket::Long,
        _ => LengthBucket::VeryLong,
    }
}

/// Coarse heuristic: ellipsis-like markers, or very short text broken
/// into pieces, read as fragmented. Not a grammatical parse.
fn structure_tag(normalized: &str) -> StructureTag {
    let ellipsis = normalized.contains("...") || normalized.contains('\u{2026}');
    let short_and_broken = normalized.len() <= 12 && normalized.contains(' ');
    if ellipsis || short_and_broken {
        StructureTag::Fragmented
    } else {
        StructureTag::Simple
    }
}
