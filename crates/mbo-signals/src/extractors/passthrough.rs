use mbo_core::models::{Feature, SignalKind, SubscriberProfile};
use mbo_core::traits::{ExtractionContext, ISignalExtractor};

/// Stand-in for a kind the tier does not enable. Always `Disabled`.
pub struct PassthroughExtractor {
    kind: SignalKind,
}

impl PassthroughExtractor {
    pub fn new(kind: SignalKind) -> Self {
        Self { kind }
    }
}

impl ISignalExtractor for PassthroughExtractor {
    fn kind(&self) -> SignalKind {
        self.kind
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn extract(&self, _profile: &SubscriberProfile, _ctx: &ExtractionContext<'_>) -> Feature {
        Feature::disabled(self.kind)
    }
}
