use chrono::Utc;
use mbo_aggregation::AdjacencyEnhancer;
use mbo_core::models::*;
use proptest::prelude::*;
use test_fixtures::*;

fn candidate(game: &str, numbers: Vec<u32>, seed: u64) -> Candidate {
    let game = GameId::new(game);
    let day = date(2025, 1, 9);
    Candidate {
        id: Candidate::compute_id("AB", &game, day, Session::Main, &numbers, Some(2)),
        subscriber_id: "AB".to_string(),
        game,
        date: day,
        session: Session::Main,
        numbers,
        bonus: Some(2),
        confidence: 61.5,
        breakdown: Vec::new(),
        eligibility: None,
        adjacency: None,
        seed,
        generated_at: Utc::now(),
    }
}

#[test]
fn games_without_a_policy_are_untouched() {
    let config = default_config();
    let rule = config.game(&GameId::new("POWERBALL")).unwrap();
    let c = candidate("POWERBALL", vec![5, 10, 15, 20, 25], 3);
    let out = AdjacencyEnhancer::new().enhance(c.clone(), rule);
    assert_eq!(out, c);
    assert!(!out.is_enhanced());
}

#[test]
fn enhancement_records_a_trace_and_keeps_confidence() {
    let config = default_config();
    let rule = config.game(&GameId::new("CASH4LIFE")).unwrap();
    let c = candidate("CASH4LIFE", vec![5, 10, 15, 52, 58], 3);
    let out = AdjacencyEnhancer::new().enhance(c.clone(), rule);
    let trace = out.adjacency.as_ref().unwrap();
    // Default policy: two substitutions, lowest values first, split at 50.
    assert_eq!(trace.substitutions.len(), 2);
    assert_eq!(out.numbers, vec![4, 9, 15, 52, 58]);
    assert_eq!(out.confidence, c.confidence);
    assert_ne!(out.id, c.id);
    rule.validate_numbers(&out.game, &out.numbers, out.bonus).unwrap();
}

#[test]
fn descending_order_starts_from_the_top() {
    let mut config = default_config();
    let rule = config.games.get_mut(&GameId::new("CASH4LIFE")).unwrap();
    if let Some(policy) = rule.adjacency.as_mut() {
        policy.order = PositionOrder::Descending;
        policy.max_substitutions = 1;
    }
    let rule = config.game(&GameId::new("CASH4LIFE")).unwrap();
    let c = candidate("CASH4LIFE", vec![5, 10, 15, 52, 58], 3);
    let out = AdjacencyEnhancer::new().enhance(c, rule);
    assert_eq!(out.numbers, vec![5, 10, 15, 52, 59]);
}

fn cash3_with_policy(direction: NeighborDirection, max_substitutions: usize) -> GameRule {
    let config = default_config();
    let mut rule = config.game(&GameId::new("CASH3")).unwrap().clone();
    rule.adjacency = Some(AdjacencyPolicy {
        max_substitutions,
        direction,
        ..AdjacencyPolicy::default()
    });
    rule
}

fn has_repeats(numbers: &[u32]) -> bool {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).any(|w| w[0] == w[1])
}

#[test]
fn digit_game_neighbors_never_repeat_a_digit() {
    let rule = cash3_with_policy(NeighborDirection::Up, 1);
    let out = AdjacencyEnhancer::new().enhance(candidate("CASH3", vec![3, 4, 7], 3), &rule);
    // 3 -> 4 would repeat the 4, so the fallback direction is used.
    assert_eq!(out.numbers, vec![2, 4, 7]);
    assert_eq!(
        out.adjacency.unwrap().substitutions,
        vec![Substitution { position: 0, from: 3, to: 2 }]
    );
}

#[test]
fn digit_game_keeps_positions() {
    let rule = cash3_with_policy(NeighborDirection::Down, 3);
    let out = AdjacencyEnhancer::new().enhance(candidate("CASH3", vec![8, 1, 5], 3), &rule);
    // Ascending by value: 1 -> 0, 5 -> 4, 8 -> 7, each in its own slot.
    assert_eq!(out.numbers, vec![7, 0, 4]);
}

proptest! {
    #[test]
    fn digit_games_stay_duplicate_free(
        picks in proptest::sample::subsequence((0u32..=9).collect::<Vec<_>>(), 3)
            .prop_shuffle(),
        seed in any::<u64>(),
        direction in prop_oneof![
            Just(NeighborDirection::Down),
            Just(NeighborDirection::Up),
            Just(NeighborDirection::Split),
            Just(NeighborDirection::Seeded),
        ],
        max_substitutions in 0usize..=3,
    ) {
        let rule = cash3_with_policy(direction, max_substitutions);
        let out = AdjacencyEnhancer::new().enhance(candidate("CASH3", picks, seed), &rule);
        prop_assert!(!has_repeats(&out.numbers), "repeated digit in {:?}", out.numbers);
        prop_assert!(out.numbers.iter().all(|&n| n <= 9));
    }

    #[test]
    fn enhancing_twice_equals_enhancing_once(
        picks in proptest::sample::subsequence((1u32..=60).collect::<Vec<_>>(), 5),
        seed in any::<u64>(),
        direction in prop_oneof![
            Just(NeighborDirection::Down),
            Just(NeighborDirection::Up),
            Just(NeighborDirection::Split),
            Just(NeighborDirection::Seeded),
        ],
        max_substitutions in 0usize..=5,
    ) {
        let mut config = default_config();
        if let Some(policy) = config
            .games
            .get_mut(&GameId::new("CASH4LIFE"))
            .and_then(|r| r.adjacency.as_mut())
        {
            policy.direction = direction;
            policy.max_substitutions = max_substitutions;
        }
        let rule = config.game(&GameId::new("CASH4LIFE")).unwrap();
        let enhancer = AdjacencyEnhancer::new();
        let once = enhancer.enhance(candidate("CASH4LIFE", picks, seed), rule);
        let twice = enhancer.enhance(once.clone(), rule);
        prop_assert_eq!(&once, &twice);
        prop_assert!(rule.validate_numbers(&once.game, &once.numbers, once.bonus).is_ok());
        prop_assert!(once.adjacency.as_ref().unwrap().substitutions.len() <= max_substitutions);
    }
}
