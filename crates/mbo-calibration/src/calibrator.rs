//! Outcome-driven weight calibration.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use mbo_core::config::{CalibrationConfig, EngineConfig};
use mbo_core::errors::{MboResult, StoreError, ValidationError};
use mbo_core::models::{
    CalibrationDelta, Candidate, GameId, GameRule, OutcomeRecord, SignalKind, WeightKey,
};
use mbo_core::traits::IWeightSource;

use crate::distance::MatchDistance;
use crate::snapshot::WeightSnapshot;
use crate::step;
use crate::store::WeightStore;

/// One weight adjustment decided by [`Calibrator::plan`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedStep {
    pub key: WeightKey,
    /// Best closeness among candidates this signal contributed to.
    pub closeness: f64,
    /// Signed step in `[-1, 1]`, scaled by the entry's max step when applied.
    pub unit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationPlan {
    pub outcome: OutcomeRecord,
    /// Candidates that matched the outcome's game, date and session.
    pub considered: usize,
    pub steps: Vec<PlannedStep>,
}

impl CalibrationPlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Turns outcomes into bounded weight adjustments.
pub struct Calibrator {
    config: CalibrationConfig,
    games: BTreeMap<GameId, GameRule>,
}

impl Calibrator {
    pub fn new(config: &CalibrationConfig, games: &BTreeMap<GameId, GameRule>) -> Self {
        Self {
            config: config.clone(),
            games: games.clone(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.calibration, &config.games)
    }

    /// Decide the adjustments for `outcome` without touching any weights.
    ///
    /// Fails with a validation error for an unknown game or out-of-range
    /// outcome, and with a store error if a contributing signal has no
    /// weight entry.
    pub fn plan(
        &self,
        weights: &dyn IWeightSource,
        candidates: &[Candidate],
        outcome: &OutcomeRecord,
    ) -> MboResult<CalibrationPlan> {
        let rule = self
            .games
            .get(&outcome.game)
            .ok_or_else(|| ValidationError::UnknownGame {
                game: outcome.game.to_string(),
            })?;
        outcome.validate(rule)?;

        let mut drawn = outcome.numbers.clone();
        if !rule.positional {
            drawn.sort_unstable();
        }

        let mut considered = 0;
        let mut best: BTreeMap<SignalKind, f64> = BTreeMap::new();
        for candidate in candidates.iter().filter(|c| {
            c.game == outcome.game
                && c.date == outcome.date
                && c.session == outcome.session
                && c.confidence >= self.config.min_confidence
        }) {
            considered += 1;
            let closeness =
                MatchDistance::measure(&candidate.numbers, &drawn).closeness(&self.config);
            for contribution in candidate
                .breakdown
                .iter()
                .filter(|c| !c.degraded && c.contribution > 0.0)
            {
                let slot = best.entry(contribution.kind).or_insert(closeness);
                if closeness > *slot {
                    *slot = closeness;
                }
            }
        }

        let mut steps = Vec::with_capacity(best.len());
        for (kind, closeness) in best {
            let key = WeightKey::new(outcome.game.clone(), kind);
            if weights.entry(&key).is_none() {
                return Err(StoreError::MissingEntry {
                    key: key.to_string(),
                }
                .into());
            }
            steps.push(PlannedStep {
                key,
                closeness,
                unit: step::signed_step(closeness, self.config.neutral_closeness),
            });
        }

        Ok(CalibrationPlan {
            outcome: outcome.clone(),
            considered,
            steps,
        })
    }

    /// Apply `outcome` to the store. An outcome already processed, or one
    /// no candidate matched, yields no deltas and changes nothing.
    pub fn calibrate(
        &self,
        store: &WeightStore,
        candidates: &[Candidate],
        outcome: &OutcomeRecord,
        at: DateTime<Utc>,
    ) -> MboResult<Vec<CalibrationDelta>> {
        let plan = self.plan(&store.snapshot(), candidates, outcome)?;
        if plan.is_empty() {
            tracing::debug!(outcome = %outcome.key(), "no matching candidates");
            return Ok(Vec::new());
        }
        if !store.mark_processed(outcome.key(), at) {
            tracing::info!(outcome = %outcome.key(), "outcome already processed, skipping");
            return Ok(Vec::new());
        }

        let deltas = store.apply_steps(&plan.steps, outcome, at)?;
        for delta in &deltas {
            tracing::debug!(
                key = %delta.key,
                previous = delta.previous,
                new_weight = delta.new_weight,
                closeness = delta.closeness,
                "weight adjusted"
            );
        }
        tracing::info!(
            outcome = %outcome.key(),
            candidates = plan.considered,
            adjusted = deltas.len(),
            version = store.version(),
            "calibration applied"
        );
        Ok(deltas)
    }

    /// Pure form of [`Calibrator::calibrate`]: the input snapshot is left
    /// as is and the adjusted weights come back as a new snapshot.
    pub fn replay(
        &self,
        snapshot: &WeightSnapshot,
        candidates: &[Candidate],
        outcome: &OutcomeRecord,
        at: DateTime<Utc>,
    ) -> MboResult<(WeightSnapshot, Vec<CalibrationDelta>)> {
        let plan = self.plan(snapshot, candidates, outcome)?;
        let mut updated = Vec::with_capacity(plan.steps.len());
        let mut deltas = Vec::with_capacity(plan.steps.len());
        for planned in &plan.steps {
            let Some(mut entry) = snapshot.entry(&planned.key).cloned() else {
                return Err(StoreError::MissingEntry {
                    key: planned.key.to_string(),
                }
                .into());
            };
            deltas.push(step::apply(&mut entry, planned.unit, planned.closeness, outcome, at));
            updated.push(entry);
        }
        Ok((snapshot.with_updates(updated), deltas))
    }
}
