//! One-shot ±1 neighbor substitution for games that enable it.

use mbo_core::models::{
    AdjacencyPolicy, AdjacencyTrace, Candidate, GameRule, NeighborDirection, PositionOrder,
    Substitution,
};
use mbo_core::seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Down,
    Up,
}

impl Step {
    fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    fn apply(self, n: u32) -> Option<u32> {
        match self {
            Self::Down => n.checked_sub(1),
            Self::Up => n.checked_add(1),
        }
    }
}

/// Applies the game's adjacency policy once per candidate.
///
/// Confidence is left unchanged. A candidate that already carries an
/// adjacency trace is returned as is, so enhancing twice equals enhancing once.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacencyEnhancer;

impl AdjacencyEnhancer {
    pub fn new() -> Self {
        Self
    }

    pub fn enhance(&self, candidate: Candidate, rule: &GameRule) -> Candidate {
        let Some(policy) = rule.adjacency.as_ref() else {
            return candidate;
        };
        if candidate.is_enhanced() {
            return candidate;
        }
        let mut candidate = candidate;
        let (numbers, substitutions) =
            substitute(&candidate.numbers, candidate.seed, rule, policy);

        if !substitutions.is_empty() {
            tracing::debug!(
                candidate = %candidate.id,
                substitutions = substitutions.len(),
                "adjacency substitutions applied"
            );
            candidate.id = Candidate::compute_id(
                &candidate.subscriber_id,
                &candidate.game,
                candidate.date,
                candidate.session,
                &numbers,
                candidate.bonus,
            );
            candidate.numbers = numbers;
        }
        candidate.adjacency = Some(AdjacencyTrace { substitutions });
        candidate
    }
}

fn substitute(
    original: &[u32],
    candidate_seed: u64,
    rule: &GameRule,
    policy: &AdjacencyPolicy,
) -> (Vec<u32>, Vec<Substitution>) {
    let mut positions: Vec<usize> = (0..original.len()).collect();
    match policy.order {
        PositionOrder::Ascending => positions.sort_by_key(|&i| (original[i], i)),
        PositionOrder::Descending => {
            positions.sort_by_key(|&i| (std::cmp::Reverse(original[i]), i))
        }
    }

    let mut numbers = original.to_vec();
    let mut substitutions = Vec::new();
    for position in positions {
        if substitutions.len() >= policy.max_substitutions {
            break;
        }
        let from = numbers[position];
        let preferred = preferred_step(policy, from, candidate_seed, position);
        for step in [preferred, preferred.opposite()] {
            let Some(to) = step.apply(from).filter(|&m| rule.main.contains(m)) else {
                continue;
            };
            if numbers.contains(&to) {
                continue;
            }
            numbers[position] = to;
            substitutions.push(Substitution { position, from, to });
            break;
        }
    }

    if !rule.positional {
        numbers.sort_unstable();
    }
    (numbers, substitutions)
}

fn preferred_step(policy: &AdjacencyPolicy, n: u32, candidate_seed: u64, position: usize) -> Step {
    match policy.direction {
        NeighborDirection::Down => Step::Down,
        NeighborDirection::Up => Step::Up,
        NeighborDirection::Split if n >= policy.split_pivot => Step::Up,
        NeighborDirection::Split => Step::Down,
        NeighborDirection::Seeded => {
            if seed::mix(candidate_seed, position as u64) & 1 == 1 {
                Step::Up
            } else {
                Step::Down
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use mbo_core::models::{NumberRange, Session};

    fn rule(direction: NeighborDirection, max_substitutions: usize) -> GameRule {
        GameRule {
            main_count: 5,
            main: NumberRange::new(1, 60),
            bonus: Some(NumberRange::new(1, 4)),
            positional: false,
            draw_days: vec![Weekday::Mon],
            sessions: vec![Session::Main],
            adjacency: Some(AdjacencyPolicy {
                max_substitutions,
                direction,
                split_pivot: 50,
                order: PositionOrder::Ascending,
            }),
        }
    }

    #[test]
    fn split_moves_low_numbers_down_and_high_numbers_up() {
        let r = rule(NeighborDirection::Split, 5);
        let (numbers, subs) =
            substitute(&[10, 20, 30, 55, 59], 0, &r, r.adjacency.as_ref().unwrap());
        assert_eq!(numbers, vec![9, 19, 29, 56, 60]);
        assert_eq!(subs.len(), 5);
    }

    #[test]
    fn blocked_neighbors_fall_back_to_the_opposite_direction() {
        let r = rule(NeighborDirection::Down, 1);
        // 1 cannot go down (range), so it goes up to 2.
        let (numbers, subs) =
            substitute(&[1, 5, 10, 20, 30], 0, &r, r.adjacency.as_ref().unwrap());
        assert_eq!(subs, vec![Substitution { position: 0, from: 1, to: 2 }]);
        assert_eq!(numbers, vec![2, 5, 10, 20, 30]);
    }

    #[test]
    fn duplicates_are_never_introduced() {
        let r = rule(NeighborDirection::Down, 5);
        let (numbers, _) = substitute(&[1, 2, 3, 4, 5], 0, &r, r.adjacency.as_ref().unwrap());
        let mut dedup = numbers.clone();
        dedup.dedup();
        assert_eq!(dedup, numbers);
        assert!(numbers.iter().all(|n| (1..=60).contains(n)));
    }
}
