//! Confidence aggregator: features + weights → ranked candidates.

use chrono::{DateTime, NaiveDate, Utc};
use mbo_core::config::AggregationConfig;
use mbo_core::errors::{MboResult, StoreError};
use mbo_core::models::{Candidate, Feature, GameId, GameRule, Session, SignalKind, WeightKey};
use mbo_core::traits::IWeightSource;

use crate::formula;
use crate::pools::{self, CandidatePool};
use crate::ranking::{self, Ball, Weighted};

/// Everything that identifies one aggregation run.
#[derive(Debug, Clone, Copy)]
pub struct AggregationInput<'a> {
    pub subscriber_id: &'a str,
    pub game: &'a GameId,
    pub rule: &'a GameRule,
    pub date: NaiveDate,
    pub session: Session,
    /// Tie-break seed derived from `(subscriber, game, date)`.
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
}

/// Combines features into confidence-ranked candidates. Pure.
#[derive(Debug, Clone)]
pub struct ConfidenceAggregator {
    max_candidates: usize,
    degraded_band: [f64; 2],
}

impl ConfidenceAggregator {
    pub fn new(config: &AggregationConfig) -> Self {
        Self {
            max_candidates: config.max_candidates.max(1),
            degraded_band: config.degraded_band,
        }
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// Ranked candidates, primary first. Never empty.
    ///
    /// Disabled features are ignored. A participating feature without a
    /// weight entry is a store error.
    pub fn aggregate(
        &self,
        input: &AggregationInput<'_>,
        features: &[Feature],
        weights: &dyn IWeightSource,
    ) -> MboResult<Vec<Candidate>> {
        let mut weighted = Vec::with_capacity(features.len());
        for feature in features.iter().filter(|f| f.participates()) {
            let key = WeightKey::new(input.game.clone(), feature.kind);
            let weight = weights
                .weight(&key)
                .ok_or_else(|| StoreError::MissingEntry { key: key.to_string() })?;
            weighted.push(Weighted { feature, weight });
        }
        let any_active = weighted.iter().any(|w| w.feature.is_active());
        let band = (!any_active).then_some(self.degraded_band);

        let rule = input.rule;
        let main_ranking = ranking::blended(&weighted, rule.main, Ball::Main, input.seed);
        let bonus = rule.bonus.and_then(|range| {
            ranking::blended(&weighted, range, Ball::Bonus, input.seed ^ 0xB0)
                .first()
                .copied()
        });

        let mut pool = CandidatePool::new();
        if let Some(primary) = pools::pick(&main_ranking, 0, rule) {
            pool.push(primary);
        }
        for w in weighted.iter().filter(|w| w.feature.is_active()) {
            let own = ranking::single(w.feature, rule.main, input.seed);
            if let Some(set) = pools::pick(&own, 0, rule) {
                pool.push(set);
            }
        }
        for offset in 1..=self.max_candidates {
            if let Some(set) = pools::pick(&main_ranking, offset, rule) {
                pool.push(set);
            }
        }

        let mut candidates: Vec<Candidate> = pool
            .into_sets()
            .into_iter()
            .map(|numbers| {
                let breakdown = formula::compute_breakdown(&weighted, &numbers, bonus);
                let confidence = formula::compute(&breakdown, band);
                Candidate {
                    id: Candidate::compute_id(
                        input.subscriber_id,
                        input.game,
                        input.date,
                        input.session,
                        &numbers,
                        bonus,
                    ),
                    subscriber_id: input.subscriber_id.to_string(),
                    game: input.game.clone(),
                    date: input.date,
                    session: input.session,
                    numbers,
                    bonus,
                    confidence,
                    breakdown,
                    eligibility: None,
                    adjacency: None,
                    seed: input.seed,
                    generated_at: input.generated_at,
                }
            })
            .collect();

        candidates.sort_by(|a, b| {
            ranking::desc(a.confidence, b.confidence)
                .then_with(|| {
                    ranking::desc(
                        a.contribution(SignalKind::Frequency),
                        b.contribution(SignalKind::Frequency),
                    )
                })
                .then_with(|| a.number_sum().cmp(&b.number_sum()))
                .then_with(|| a.numbers.cmp(&b.numbers))
        });
        candidates.truncate(self.max_candidates);

        tracing::debug!(
            game = %input.game,
            session = %input.session,
            participating = weighted.len(),
            degraded = band.is_some(),
            candidates = candidates.len(),
            top_confidence = candidates.first().map(|c| c.confidence).unwrap_or(0.0),
            "aggregated"
        );
        Ok(candidates)
    }
}
