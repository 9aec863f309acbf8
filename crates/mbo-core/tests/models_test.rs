use chrono::{NaiveDate, Utc};
use mbo_core::errors::GateError;
use mbo_core::models::*;
use proptest::prelude::*;

fn candidate() -> Candidate {
    let game = GameId::new("CASH3");
    let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
    Candidate {
        id: Candidate::compute_id("JDS", &game, date, Session::Midday, &[1, 2, 3], None),
        subscriber_id: "JDS".to_string(),
        game,
        date,
        session: Session::Midday,
        numbers: vec![1, 2, 3],
        bonus: None,
        confidence: 42.0,
        breakdown: Vec::new(),
        eligibility: None,
        adjacency: None,
        seed: 7,
        generated_at: Utc::now(),
    }
}

#[test]
fn eligibility_is_set_exactly_once() {
    let c = candidate().mark(Eligibility::Final).unwrap();
    assert_eq!(c.eligibility, Some(Eligibility::Final));
    let err = c.mark(Eligibility::Preview).unwrap_err();
    assert!(matches!(err, GateError::EligibilityAlreadySet { ref current, .. } if current == "final"));
}

#[test]
fn candidate_ids_depend_on_numbers() {
    let game = GameId::new("CASH3");
    let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
    let a = Candidate::compute_id("JDS", &game, date, Session::Midday, &[1, 2, 3], None);
    let b = Candidate::compute_id("JDS", &game, date, Session::Midday, &[1, 2, 4], None);
    let c = Candidate::compute_id("JDS", &game, date, Session::Evening, &[1, 2, 3], None);
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 16);
}

#[test]
fn outcome_validation_checks_session_and_numbers() {
    let rule = mbo_core::config::defaults::default_games()
        .remove(&GameId::new("POWERBALL"))
        .unwrap();
    let mut outcome = OutcomeRecord {
        game: GameId::new("POWERBALL"),
        date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        session: Session::Main,
        numbers: vec![3, 14, 27, 45, 69],
        bonus: Some(26),
    };
    assert!(outcome.validate(&rule).is_ok());
    outcome.session = Session::Midday;
    assert!(outcome.validate(&rule).is_err());
    outcome.session = Session::Main;
    outcome.bonus = Some(27);
    assert!(outcome.validate(&rule).is_err());
}

#[test]
fn history_serializes_as_a_record_list() {
    let history = OutcomeHistory::new([OutcomeRecord {
        game: GameId::new("CASH3"),
        date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        session: Session::Evening,
        numbers: vec![4, 4, 9],
        bonus: None,
    }]);
    let json = serde_json::to_value(&history).unwrap();
    assert!(json.is_array());
    let back: OutcomeHistory = serde_json::from_value(json).unwrap();
    assert_eq!(back.len(), 1);
}

proptest! {
    #[test]
    fn game_id_normalization_is_idempotent(raw in "[a-zA-Z0-9_ ]{1,16}") {
        let once = GameId::new(&raw);
        let twice = GameId::new(once.as_str());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn entry_clamp_always_lands_in_bounds(w in proptest::num::f64::ANY) {
        let entry = WeightEntry::new(
            WeightKey::new(GameId::new("MM"), SignalKind::Cyclical),
            w,
            0.1,
            3.0,
            0.05,
        );
        prop_assert!(entry.in_bounds());
    }
}
