// src/pipeline/crisis.rs
// Deterministic, un-improvisable crisis responses. This stage never
// calls the generation collaborator, so the safety bypass stays
// available even when every other collaborator is down.

use std::sync::Arc;

use super::tables::PipelineTables;
use super::types::CrisisTier;

pub struct CrisisResponder {
    tables: Arc<PipelineTables>,
}

impl CrisisResponder {
    pub fn new(tables: Arc<PipelineTables>) -> Self {
        Self { tables }
    }

    /// The fixed template for a bypass-worthy tier, or `None` when the
    /// tier does not warrant suspending normal generation.
    pub fn respond(&self, tier: CrisisTier) -> Option<String> {
        match tier {
            CrisisTier::Immediate => Some(self.tables.crisis_template_immediate.clone()),
            CrisisTier::Likely => Some(self.tables.crisis_template_likely.clone()),
            CrisisTier::Possible | CrisisTier::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responder() -> CrisisResponder {
        CrisisResponder::new(Arc::new(PipelineTables::standard()))
    }

    #[test]
    fn bypass_tiers_get_fixed_templates_with_safety_question() {
        for tier in [CrisisTier::Immediate, CrisisTier::Likely] {
            let text = responder().respond(tier).expect("template for bypass tier");
            assert!(text.contains("Are you safe right now?"));
            assert!(text.contains("988"));
        }
    }

    #[test]
    fn lower_tiers_do_not_bypass() {
        assert!(responder().respond(CrisisTier::Possible).is_none());
        assert!(responder().respond(CrisisTier::None).is_none());
    }

    #[test]
    fn templates_differ_by_tier() {
        let immediate = responder().respond(CrisisTier::Immediate).unwrap();
        let likely = responder().respond(CrisisTier::Likely).unwrap();
        assert_ne!(immediate, likely);
    }
}
