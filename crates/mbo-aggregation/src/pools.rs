//! Candidate number sets drawn from rankings.

use mbo_core::models::GameRule;

/// Take `rule.main_count` numbers from `ranking` starting at `offset`.
///
/// Pool games are emitted sorted ascending. Positional games keep rank order
/// and wrap around the end of the ranking; with `main_count` no larger than
/// the range, the wrapped pick is still duplicate-free.
pub fn pick(ranking: &[u32], offset: usize, rule: &GameRule) -> Option<Vec<u32>> {
    let k = rule.main_count;
    if ranking.is_empty() || k == 0 {
        return None;
    }
    if rule.positional {
        return Some(
            (0..k)
                .map(|i| ranking[(offset + i) % ranking.len()])
                .collect(),
        );
    }
    let mut numbers = ranking.get(offset..offset + k)?.to_vec();
    numbers.sort_unstable();
    Some(numbers)
}

/// Ordered, duplicate-free collection of number sets.
#[derive(Debug, Default)]
pub struct CandidatePool {
    sets: Vec<Vec<u32>>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the set was already present.
    pub fn push(&mut self, numbers: Vec<u32>) -> bool {
        if self.sets.contains(&numbers) {
            return false;
        }
        self.sets.push(numbers);
        true
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn into_sets(self) -> Vec<Vec<u32>> {
        self.sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use mbo_core::models::{NumberRange, Session};

    fn rule(positional: bool, count: usize) -> GameRule {
        GameRule {
            main_count: count,
            main: NumberRange::new(0, 9),
            bonus: None,
            positional,
            draw_days: vec![Weekday::Mon],
            sessions: vec![Session::Midday],
            adjacency: None,
        }
    }

    #[test]
    fn pool_picks_are_sorted() {
        assert_eq!(pick(&[9, 2, 5, 1], 0, &rule(false, 3)), Some(vec![2, 5, 9]));
        assert_eq!(pick(&[9, 2, 5, 1], 1, &rule(false, 3)), Some(vec![1, 2, 5]));
        assert_eq!(pick(&[9, 2, 5, 1], 2, &rule(false, 3)), None);
    }

    #[test]
    fn positional_picks_keep_rank_order_and_wrap() {
        assert_eq!(pick(&[9, 2, 5], 0, &rule(true, 3)), Some(vec![9, 2, 5]));
        assert_eq!(pick(&[9, 2, 5, 1], 2, &rule(true, 4)), Some(vec![5, 1, 9, 2]));
    }

    #[test]
    fn pool_rejects_duplicates() {
        let mut pool = CandidatePool::new();
        assert!(pool.push(vec![1, 2, 3]));
        assert!(!pool.push(vec![1, 2, 3]));
        assert_eq!(pool.len(), 1);
    }
}
