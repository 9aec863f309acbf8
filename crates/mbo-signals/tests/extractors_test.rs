use mbo_core::models::{FeatureStatus, GameId, OutcomeHistory, Session, SignalKind, Tier};
use mbo_core::traits::{ExtractionContext, ISignalExtractor};
use mbo_signals::{AdjacencyExtractor, CyclicalExtractor, FrequencyExtractor, PersonalExtractor};
use proptest::prelude::*;
use test_fixtures::*;

fn ctx<'a>(
    game: &'a GameId,
    config: &'a mbo_core::EngineConfig,
    history: &'a OutcomeHistory,
    day: chrono::NaiveDate,
    session: Session,
) -> ExtractionContext<'a> {
    ExtractionContext {
        game,
        rule: config.game(game).unwrap(),
        date: day,
        session,
        history,
        lookback: config.aggregation.lookback_draws,
    }
}

// ── Frequency ────────────────────────────────────────────────────────────

#[test]
fn frequency_degrades_without_history() {
    let config = default_config();
    let game = GameId::new("CASH3");
    let history = OutcomeHistory::default();
    let f = FrequencyExtractor.extract(
        &basic_profile("AB"),
        &ctx(&game, &config, &history, date(2025, 1, 9), Session::Midday),
    );
    assert_eq!(f.status, FeatureStatus::Degraded);
    assert_eq!(f.value, 50.0);
    assert_eq!(f.affinity.main(3), f.affinity.main(7));
}

#[test]
fn frequency_favours_repeated_numbers() {
    let config = default_config();
    let game = GameId::new("POWERBALL");
    let history: OutcomeHistory = load_fixture("outcomes/powerball_jan_2025.json");
    let f = FrequencyExtractor.extract(
        &basic_profile("AB"),
        &ctx(&game, &config, &history, date(2025, 1, 11), Session::Main),
    );
    assert_eq!(f.status, FeatureStatus::Active);
    // 22 and 61 each appear twice, 12 once.
    assert_eq!(f.affinity.main(22), 1.0);
    assert!(f.affinity.main(61) > f.affinity.main(12));
    assert_eq!(f.affinity.main(1), 0.0);
    assert_eq!(f.affinity.bonus(8), 1.0);
}

#[test]
fn frequency_ignores_draws_on_or_after_the_target_date() {
    let config = default_config();
    let game = GameId::new("POWERBALL");
    let history: OutcomeHistory = load_fixture("outcomes/powerball_jan_2025.json");
    let f = FrequencyExtractor.extract(
        &basic_profile("AB"),
        &ctx(&game, &config, &history, date(2025, 1, 1), Session::Main),
    );
    assert_eq!(f.status, FeatureStatus::Degraded);
}

// ── Cyclical ─────────────────────────────────────────────────────────────

#[test]
fn cyclical_is_deterministic_and_session_sensitive() {
    let config = default_config();
    let game = GameId::new("CASH3");
    let history = OutcomeHistory::default();
    let profile = basic_profile("AB");
    let day = date(2025, 1, 9);
    let extract = |session| {
        CyclicalExtractor.extract(&profile, &ctx(&game, &config, &history, day, session))
    };
    // Thursday: midday falls in a Saturn hour, night in a Venus hour.
    let a = extract(Session::Midday);
    let b = extract(Session::Midday);
    let c = extract(Session::Night);
    assert_eq!(a, b);
    assert_eq!(a.status, FeatureStatus::Active);
    assert_ne!(a.explanation, c.explanation);
}

// ── Personal ─────────────────────────────────────────────────────────────

#[test]
fn personal_degrades_without_birth_date() {
    let config = default_config();
    let game = GameId::new("CASH3");
    let history = OutcomeHistory::default();
    let profile = mbo_core::SubscriberProfile::new("X", Tier::Standard);
    let f = PersonalExtractor.extract(
        &profile,
        &ctx(&game, &config, &history, date(2025, 1, 9), Session::Midday),
    );
    assert_eq!(f.status, FeatureStatus::Degraded);
    assert_eq!(f.value, 50.0);
}

#[test]
fn personal_marks_favorites_and_birth_numbers() {
    let config = default_config();
    let game = GameId::new("MEGAMILLIONS");
    let history = OutcomeHistory::default();
    let f = PersonalExtractor.extract(
        &premium_profile("JDS"),
        &ctx(&game, &config, &history, date(2025, 1, 10), Session::Main),
    );
    assert_eq!(f.status, FeatureStatus::Active);
    // Favorites
    assert_eq!(f.affinity.main(40), 1.0);
    // Birth day 14 and month 7
    assert_eq!(f.affinity.main(14), 0.9);
    assert_eq!(f.affinity.main(7), 0.9);
    assert!(f.value >= 50.0 && f.value <= 80.0);
}

#[test]
fn personal_is_not_offered_to_basic_tier() {
    let rule = &default_config().games[&GameId::new("CASH3")];
    assert!(!PersonalExtractor.supports(Tier::Basic, rule));
    assert!(PersonalExtractor.supports(Tier::Premium, rule));
}

// ── Adjacency ────────────────────────────────────────────────────────────

#[test]
fn adjacency_needs_two_draws() {
    let config = default_config();
    let game = GameId::new("CASH4LIFE");
    let history = OutcomeHistory::new([outcome(
        "CASH4LIFE",
        date(2025, 1, 8),
        Session::Main,
        &[1, 2, 3, 4, 5],
        Some(1),
    )]);
    let f = AdjacencyExtractor.extract(
        &basic_profile("AB"),
        &ctx(&game, &config, &history, date(2025, 1, 9), Session::Main),
    );
    assert_eq!(f.status, FeatureStatus::Degraded);
}

#[test]
fn adjacency_points_at_neighbors_of_the_latest_draw() {
    let config = default_config();
    let game = GameId::new("CASH4LIFE");
    let history = OutcomeHistory::new([
        outcome("CASH4LIFE", date(2025, 1, 7), Session::Main, &[10, 20, 30, 40, 50], Some(2)),
        outcome("CASH4LIFE", date(2025, 1, 8), Session::Main, &[11, 21, 31, 41, 51], Some(3)),
    ]);
    let f = AdjacencyExtractor.extract(
        &basic_profile("AB"),
        &ctx(&game, &config, &history, date(2025, 1, 9), Session::Main),
    );
    assert_eq!(f.status, FeatureStatus::Active);
    // Every number of the latest draw neighbors the one before: maximal rate.
    assert!(f.value > 50.0);
    assert_eq!(f.affinity.main(12), 1.0);
    assert_eq!(f.affinity.main(50), 1.0);
    assert_eq!(f.affinity.main(11), 0.4);
    assert_eq!(f.affinity.main(33), 0.2);
    assert_eq!(f.affinity.bonus(4), 1.0);
}

// ── Bounds ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_extractor_stays_in_bounds(day_offset in 0i64..400, seed in 0u64..1000) {
        let config = default_config();
        let day = date(2025, 1, 1) + chrono::Duration::days(day_offset);
        let history = HistoryBuilder::new()
            .with_seed(seed)
            .daily("CASH3", day, 40)
            .daily("MEGAMILLIONS", day, 40)
            .build();
        let profile = premium_profile("JDS");
        let extractors: [&dyn ISignalExtractor; 4] = [
            &FrequencyExtractor,
            &CyclicalExtractor,
            &PersonalExtractor,
            &AdjacencyExtractor,
        ];
        for (game, session) in [("CASH3", Session::Evening), ("MEGAMILLIONS", Session::Main)] {
            let game = GameId::new(game);
            let c = ctx(&game, &config, &history, day, session);
            for e in extractors {
                let f = e.extract(&profile, &c);
                prop_assert!((0.0..=100.0).contains(&f.value));
                prop_assert!(f.affinity.main.values().all(|a| (0.0..=1.0).contains(a)));
                prop_assert!(f.affinity.bonus.values().all(|a| (0.0..=1.0).contains(a)));
                prop_assert_eq!(f.kind, e.kind());
            }
        }
    }
}

#[test]
fn signal_kinds_are_distinct() {
    let kinds = [
        FrequencyExtractor.kind(),
        CyclicalExtractor.kind(),
        PersonalExtractor.kind(),
        AdjacencyExtractor.kind(),
    ];
    assert_eq!(kinds.to_vec(), SignalKind::ALL.to_vec());
}
