use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use mbo_aggregation::{AggregationInput, ConfidenceAggregator};
use mbo_core::config::{AggregationConfig, EngineConfig};
use mbo_core::errors::{MboError, StoreError};
use mbo_core::models::*;
use mbo_core::seed::derive_seed;
use mbo_core::traits::{ExtractionContext, IWeightSource};
use mbo_signals::SignalRegistry;
use proptest::prelude::*;
use test_fixtures::*;

/// Weights straight from the config defaults.
struct StaticWeights(BTreeMap<WeightKey, WeightEntry>);

impl StaticWeights {
    fn from_config(config: &EngineConfig) -> Self {
        let mut map = BTreeMap::new();
        for game in config.games.keys() {
            for kind in SignalKind::ALL {
                let b = config.signals.bounds(kind);
                let key = WeightKey::new(game.clone(), kind);
                map.insert(
                    key.clone(),
                    WeightEntry::new(key, b.default_weight, b.min, b.max, b.step_fraction),
                );
            }
        }
        Self(map)
    }
}

impl IWeightSource for StaticWeights {
    fn entry(&self, key: &WeightKey) -> Option<&WeightEntry> {
        self.0.get(key)
    }

    fn version(&self) -> u64 {
        0
    }
}

fn features_for(
    profile: &SubscriberProfile,
    game: &GameId,
    day: chrono::NaiveDate,
    session: Session,
    history: &OutcomeHistory,
) -> Vec<Feature> {
    let config = default_config();
    let registry = SignalRegistry::with_defaults(config.tiers.clone());
    let ctx = ExtractionContext {
        game,
        rule: config.game(game).unwrap(),
        date: day,
        session,
        history,
        lookback: 120,
    };
    registry.extract_all(profile, &ctx)
}

fn run(
    profile: &SubscriberProfile,
    game: &str,
    day: chrono::NaiveDate,
    session: Session,
    history: &OutcomeHistory,
) -> Vec<Candidate> {
    let config = default_config();
    let game = GameId::new(game);
    let features = features_for(profile, &game, day, session, history);
    let input = AggregationInput {
        subscriber_id: &profile.id,
        game: &game,
        rule: config.game(&game).unwrap(),
        date: day,
        session,
        seed: derive_seed(&profile.id, &game, day),
        generated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    };
    ConfidenceAggregator::new(&config.aggregation)
        .aggregate(&input, &features, &StaticWeights::from_config(&config))
        .unwrap()
}

fn assert_valid(candidates: &[Candidate], rule: &GameRule) {
    assert!(!candidates.is_empty());
    for c in candidates {
        rule.validate_numbers(&c.game, &c.numbers, c.bonus).unwrap();
        assert!((0.0..=100.0).contains(&c.confidence));
        assert!(c.eligibility.is_none());
        if !rule.positional {
            assert!(c.numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn jackpot_game_produces_ranked_valid_candidates() {
    let day = date(2025, 1, 10);
    let history = HistoryBuilder::new().daily("MEGAMILLIONS", day, 200).build();
    let candidates = run(&premium_profile("JDS"), "MEGAMILLIONS", day, Session::Main, &history);
    let config = default_config();
    assert_valid(&candidates, config.game(&GameId::new("MM")).unwrap());
    assert!(candidates.len() <= config.aggregation.max_candidates);
    assert!(candidates.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    assert!(candidates.iter().all(|c| c.bonus.is_some()));

    let mut ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), candidates.len());

    // Breakdown covers every participating kind in canonical order.
    let kinds: Vec<SignalKind> = candidates[0].breakdown.iter().map(|b| b.kind).collect();
    assert_eq!(kinds, SignalKind::ALL.to_vec());
    let sum: f64 = candidates[0].breakdown.iter().map(|b| b.contribution).sum();
    assert!((sum - candidates[0].confidence).abs() < 1e-9);
}

#[test]
fn digit_game_keeps_positional_digits() {
    let day = date(2025, 1, 9);
    let history = HistoryBuilder::new().daily("CASH3", day, 60).build();
    let candidates = run(&basic_profile("AB"), "CASH3", day, Session::Evening, &history);
    let config = default_config();
    assert_valid(&candidates, config.game(&GameId::new("CASH3")).unwrap());
    assert!(candidates.iter().all(|c| c.numbers.len() == 3 && c.bonus.is_none()));
    // Basic tier: only frequency and adjacency participate.
    assert_eq!(candidates[0].breakdown.len(), 2);
}

#[test]
fn all_degraded_pins_confidence_into_the_low_band() {
    // No history and no birth data: frequency and adjacency degrade; the
    // basic tier disables the rest.
    let candidates = run(
        &basic_profile("AB"),
        "CASH3",
        date(2025, 1, 9),
        Session::Midday,
        &OutcomeHistory::default(),
    );
    assert!(!candidates.is_empty());
    for c in &candidates {
        assert!((5.0..=20.0).contains(&c.confidence), "{}", c.confidence);
        assert!(c.breakdown.iter().all(|b| b.degraded));
    }
}

#[test]
fn missing_weight_entry_is_a_store_error() {
    let config = default_config();
    let game = GameId::new("CASH3");
    let day = date(2025, 1, 9);
    let features = vec![Feature::active(
        SignalKind::Frequency,
        "frequency",
        60.0,
        NumberAffinity::uniform(0.5),
    )];
    let empty = StaticWeights(BTreeMap::new());
    let input = AggregationInput {
        subscriber_id: "AB",
        game: &game,
        rule: config.game(&game).unwrap(),
        date: day,
        session: Session::Midday,
        seed: 1,
        generated_at: Utc::now(),
    };
    let err = ConfidenceAggregator::new(&config.aggregation)
        .aggregate(&input, &features, &empty)
        .unwrap_err();
    assert!(matches!(err, MboError::Store(StoreError::MissingEntry { .. })));

    // Disabled features need no weight.
    let disabled = vec![Feature::disabled(SignalKind::Frequency)];
    let candidates = ConfidenceAggregator::new(&config.aggregation)
        .aggregate(&input, &disabled, &empty)
        .unwrap();
    assert!(!candidates.is_empty());
    assert!(candidates[0].breakdown.is_empty());
}

#[test]
fn max_candidates_is_respected() {
    let config = AggregationConfig {
        max_candidates: 1,
        ..AggregationConfig::default()
    };
    let engine_config = default_config();
    let game = GameId::new("POWERBALL");
    let day = date(2025, 1, 11);
    let history: OutcomeHistory = load_fixture("outcomes/powerball_jan_2025.json");
    let profile = premium_profile("JDS");
    let features = features_for(&profile, &game, day, Session::Main, &history);
    let input = AggregationInput {
        subscriber_id: &profile.id,
        game: &game,
        rule: engine_config.game(&game).unwrap(),
        date: day,
        session: Session::Main,
        seed: derive_seed(&profile.id, &game, day),
        generated_at: Utc::now(),
    };
    let candidates = ConfidenceAggregator::new(&config)
        .aggregate(&input, &features, &StaticWeights::from_config(&engine_config))
        .unwrap();
    assert_eq!(candidates.len(), 1);
}

#[test]
fn generation_is_deterministic() {
    let day = date(2025, 1, 10);
    let history = HistoryBuilder::new().daily("MEGAMILLIONS", day, 120).build();
    let a = run(&premium_profile("JDS"), "MEGAMILLIONS", day, Session::Main, &history);
    let b = run(&premium_profile("JDS"), "MEGAMILLIONS", day, Session::Main, &history);
    assert_eq!(a, b);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn candidates_always_valid(
        day_offset in 0i64..365,
        seed in 0u64..10_000,
        id in "[A-Z]{2,4}",
        game_idx in 0usize..5,
    ) {
        let games = ["CASH3", "CASH4", "MEGAMILLIONS", "POWERBALL", "CASH4LIFE"];
        let game = games[game_idx];
        let config = default_config();
        let rule = config.game(&GameId::new(game)).unwrap().clone();
        let day = date(2025, 1, 1) + chrono::Duration::days(day_offset);
        let history = HistoryBuilder::new().with_seed(seed).daily(game, day, 30).build();
        let session = rule.sessions[seed as usize % rule.sessions.len()];
        let candidates = run(&premium_profile(&id), game, day, session, &history);
        prop_assert!(!candidates.is_empty());
        for c in &candidates {
            prop_assert!(rule.validate_numbers(&c.game, &c.numbers, c.bonus).is_ok());
            prop_assert!((0.0..=100.0).contains(&c.confidence));
        }
    }
}
