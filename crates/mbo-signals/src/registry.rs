//! Extractor registry: runs every enabled extractor in canonical kind order.

use mbo_core::config::TierConfig;
use mbo_core::models::{Feature, SignalKind, SubscriberProfile};
use mbo_core::traits::{ExtractionContext, ISignalExtractor};

use crate::extractors::{
    AdjacencyExtractor, CyclicalExtractor, FrequencyExtractor, PassthroughExtractor,
    PersonalExtractor,
};

pub struct SignalRegistry {
    extractors: Vec<Box<dyn ISignalExtractor>>,
    tiers: TierConfig,
}

impl SignalRegistry {
    /// Empty registry. Every kind yields a passthrough feature until registered.
    pub fn new(tiers: TierConfig) -> Self {
        Self {
            extractors: Vec::new(),
            tiers,
        }
    }

    /// Registry with the four built-in extractors.
    pub fn with_defaults(tiers: TierConfig) -> Self {
        let mut registry = Self::new(tiers);
        registry.register(Box::new(FrequencyExtractor));
        registry.register(Box::new(CyclicalExtractor));
        registry.register(Box::new(PersonalExtractor));
        registry.register(Box::new(AdjacencyExtractor));
        registry
    }

    /// Register an extractor, replacing any existing one of the same kind.
    pub fn register(&mut self, extractor: Box<dyn ISignalExtractor>) {
        self.extractors.retain(|e| e.kind() != extractor.kind());
        self.extractors.push(extractor);
        self.extractors.sort_by_key(|e| e.kind());
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// One feature per [`SignalKind`], in canonical order. Kinds the tier
    /// disables or no extractor supports come back `Disabled`.
    pub fn extract_all(
        &self,
        profile: &SubscriberProfile,
        ctx: &ExtractionContext<'_>,
    ) -> Vec<Feature> {
        let policy = self.tiers.policy(profile.tier);
        SignalKind::ALL
            .into_iter()
            .map(|kind| {
                let extractor = self
                    .extractors
                    .iter()
                    .find(|e| e.kind() == kind)
                    .filter(|e| policy.enables(kind) && e.supports(profile.tier, ctx.rule));
                match extractor {
                    Some(e) => {
                        let feature = e.extract(profile, ctx);
                        if feature.is_degraded() {
                            tracing::warn!(
                                subscriber = %profile.id,
                                game = %ctx.game,
                                session = %ctx.session,
                                kind = %kind,
                                reason = feature.explanation.as_deref().unwrap_or(""),
                                "DegradedSignal"
                            );
                        }
                        feature
                    }
                    None => PassthroughExtractor::new(kind).extract(profile, ctx),
                }
            })
            .collect()
    }
}
