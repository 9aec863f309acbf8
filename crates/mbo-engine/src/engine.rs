//! The generation and calibration pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;

use mbo_aggregation::{AdjacencyEnhancer, AggregationInput, ConfidenceAggregator};
use mbo_calibration::{Calibrator, WeightStore};
use mbo_core::config::EngineConfig;
use mbo_core::errors::{MboResult, ValidationError};
use mbo_core::models::{CalibrationDelta, Candidate, GameId, OutcomeRecord, SubscriberProfile};
use mbo_core::profile::normalize_profile;
use mbo_core::seed;
use mbo_core::traits::ExtractionContext;
use mbo_gate::EligibilityGate;
use mbo_signals::SignalRegistry;

use crate::inputs::{BatchRequest, CalibrationEvent, GenerationRequest, ProfileSource, RunInputs};
use crate::output::{BatchItem, CalibrationItem, GameOutput, GenerationOutput, ItemError};
use crate::{aggregate_span, calibrate_span, extract_span, gate_span, generate_span};

/// Every subsystem, built once from a validated configuration.
pub struct Engine {
    config: EngineConfig,
    registry: SignalRegistry,
    aggregator: ConfidenceAggregator,
    enhancer: AdjacencyEnhancer,
    gate: EligibilityGate,
    calibrator: Calibrator,
}

impl Engine {
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            registry: SignalRegistry::with_defaults(config.tiers.clone()),
            aggregator: ConfidenceAggregator::new(&config.aggregation),
            enhancer: AdjacencyEnhancer::new(),
            gate: EligibilityGate::from_config(&config),
            calibrator: Calibrator::from_config(&config),
            config,
        }
    }

    /// Replace the default extractor set.
    pub fn with_registry(mut self, registry: SignalRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A fresh store holding the configured default weights.
    pub fn new_weight_store(&self) -> WeightStore {
        WeightStore::from_config(&self.config)
    }

    /// Candidates for every requested game.
    ///
    /// An invalid profile fails the whole call. Problems with a single game
    /// (unknown, not in the tier) are attached to that game's entry.
    pub fn generate(
        &self,
        profile: &SubscriberProfile,
        request: &GenerationRequest,
        inputs: &RunInputs,
    ) -> MboResult<GenerationOutput> {
        let span = generate_span!(profile.id, request.date);
        let _guard = span.enter();

        profile.validate()?;

        let games = if request.games.is_empty() {
            self.config.tiers.policy(profile.tier).games.clone()
        } else {
            request.games.clone()
        };

        let games: Vec<GameOutput> = games
            .into_iter()
            .map(|game| match self.generate_game(profile, &game, request.date, inputs) {
                Ok(output) => output,
                Err(err) => {
                    tracing::warn!(
                        subscriber_id = %profile.id,
                        game = %game,
                        error = %err,
                        "game failed"
                    );
                    GameOutput::failed(game, &err)
                }
            })
            .collect();

        tracing::info!(
            subscriber_id = %profile.id,
            games = games.len(),
            candidates = games.iter().map(|g| g.candidates.len()).sum::<usize>(),
            "generation complete"
        );

        Ok(GenerationOutput {
            subscriber_id: profile.id.clone(),
            date: request.date,
            games,
        })
    }

    fn generate_game(
        &self,
        profile: &SubscriberProfile,
        game: &GameId,
        date: NaiveDate,
        inputs: &RunInputs,
    ) -> MboResult<GameOutput> {
        let rule = self
            .config
            .game(game)
            .ok_or_else(|| ValidationError::UnknownGame {
                game: game.to_string(),
            })?;
        if !self.config.tiers.policy(profile.tier).includes_game(game) {
            return Err(ValidationError::GameNotInTier {
                game: game.to_string(),
                tier: profile.tier.to_string(),
            }
            .into());
        }

        let decision = {
            let span = gate_span!(game, profile.tier);
            let _guard = span.enter();
            self.gate.evaluate(game, date, profile.tier)?
        };
        if !decision.state.emits() {
            return Ok(GameOutput::emitted(game.clone(), decision.state, Vec::new()));
        }

        let tie_seed = seed::derive_seed(&profile.id, game, date);
        let mut candidates: Vec<Candidate> = Vec::new();
        for &session in &rule.sessions {
            let ctx = ExtractionContext {
                game,
                rule,
                date,
                session,
                history: inputs.history.as_ref(),
                lookback: self.config.aggregation.lookback_draws,
            };
            let features = {
                let span = extract_span!(game, session);
                let _guard = span.enter();
                self.registry.extract_all(profile, &ctx)
            };

            let raw = {
                let span = aggregate_span!(game, session);
                let _guard = span.enter();
                let input = AggregationInput {
                    subscriber_id: &profile.id,
                    game,
                    rule,
                    date,
                    session,
                    seed: tie_seed,
                    generated_at: inputs.run_at,
                };
                self.aggregator.aggregate(&input, &features, &inputs.weights)?
            };

            candidates.extend(raw.into_iter().map(|c| self.enhancer.enhance(c, rule)));
        }

        let candidates = self.gate.apply(&decision, candidates)?;
        Ok(GameOutput::emitted(game.clone(), decision.state, candidates))
    }

    /// Generate for many subscribers in parallel. Results come back in
    /// request order; a failed subscriber yields an error at its index.
    pub fn generate_batch(&self, requests: &[BatchRequest], inputs: &RunInputs) -> Vec<BatchItem> {
        let items: Vec<BatchItem> = requests
            .par_iter()
            .enumerate()
            .map(|(index, req)| {
                let profile = match &req.profile {
                    ProfileSource::Profile(p) => Ok(p.clone()),
                    ProfileSource::Raw(value) => normalize_profile(value),
                };
                let subscriber_id = profile.as_ref().ok().map(|p| p.id.clone());
                let result = profile
                    .and_then(|p| self.generate(&p, &req.request, inputs))
                    .map_err(|err| {
                        tracing::warn!(index, error = %err, "batch item failed");
                        ItemError::from(err)
                    });
                BatchItem {
                    index,
                    subscriber_id,
                    result,
                }
            })
            .collect();

        let failed = items.iter().filter(|i| !i.is_ok()).count();
        tracing::info!(total = items.len(), failed, "batch complete");
        items
    }

    /// Feed one outcome back into the store.
    pub fn calibrate(
        &self,
        store: &WeightStore,
        candidates: &[Candidate],
        outcome: &OutcomeRecord,
        at: DateTime<Utc>,
    ) -> MboResult<Vec<CalibrationDelta>> {
        let span = calibrate_span!(outcome.key());
        let _guard = span.enter();
        self.calibrator.calibrate(store, candidates, outcome, at)
    }

    /// Calibrate many outcomes in parallel. Writes to the same weight entry
    /// are serialized by the store.
    pub fn calibrate_batch(
        &self,
        store: &WeightStore,
        events: &[CalibrationEvent],
        at: DateTime<Utc>,
    ) -> Vec<CalibrationItem> {
        events
            .par_iter()
            .enumerate()
            .map(|(index, event)| CalibrationItem {
                index,
                outcome: event.outcome.key(),
                result: self
                    .calibrate(store, &event.candidates, &event.outcome, at)
                    .map_err(ItemError::from),
            })
            .collect()
    }
}
