use chrono::NaiveDate;

use crate::models::{
    Feature, GameId, GameRule, OutcomeHistory, Session, SignalKind, SubscriberProfile, Tier,
};

/// Read-only inputs shared by every extractor for one `(game, date, session)`.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    pub game: &'a GameId,
    pub rule: &'a GameRule,
    pub date: NaiveDate,
    pub session: Session,
    pub history: &'a OutcomeHistory,
    pub lookback: usize,
}

/// Signal extraction. Implementations are pure and total: missing optional
/// data yields a degraded feature instead of an error.
pub trait ISignalExtractor: Send + Sync {
    fn kind(&self) -> SignalKind;

    /// Extractor name recorded as the feature source.
    fn name(&self) -> &'static str;

    /// Whether this extractor applies to the tier and game.
    fn supports(&self, _tier: Tier, _rule: &GameRule) -> bool {
        true
    }

    fn extract(&self, profile: &SubscriberProfile, ctx: &ExtractionContext<'_>) -> Feature;
}
