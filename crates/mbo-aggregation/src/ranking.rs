//! Per-number scoring and deterministic ranking.

use std::cmp::Ordering;

use mbo_core::models::{Feature, NumberRange};
use mbo_core::seed;

/// Which affinity map a ranking reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ball {
    Main,
    Bonus,
}

/// A participating feature paired with its weight.
#[derive(Debug, Clone, Copy)]
pub struct Weighted<'a> {
    pub feature: &'a Feature,
    pub weight: f64,
}

fn affinity(feature: &Feature, ball: Ball, n: u32) -> f64 {
    match ball {
        Ball::Main => feature.affinity.main(n),
        Ball::Bonus => feature.affinity.bonus(n),
    }
}

/// `score(n) = Σ weight × value/100 × affinity(n)`
pub fn score(features: &[Weighted<'_>], ball: Ball, n: u32) -> f64 {
    features
        .iter()
        .map(|w| w.weight * w.feature.value / 100.0 * affinity(w.feature, ball, n))
        .sum()
}

/// Rank every number in `range` by score, highest first.
/// Ties break on the seeded mix of the number, then on the number itself.
pub fn rank_by(range: NumberRange, tie_seed: u64, score_of: impl Fn(u32) -> f64) -> Vec<u32> {
    let mut scored: Vec<(u32, f64, u64)> = range
        .iter()
        .map(|n| (n, score_of(n), seed::mix(tie_seed, u64::from(n))))
        .collect();
    scored.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| b.2.cmp(&a.2))
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.into_iter().map(|(n, _, _)| n).collect()
}

/// Blended ranking across every participating feature.
pub fn blended(
    features: &[Weighted<'_>],
    range: NumberRange,
    ball: Ball,
    tie_seed: u64,
) -> Vec<u32> {
    rank_by(range, tie_seed, |n| score(features, ball, n))
}

/// Ranking by a single feature's affinity.
pub fn single(feature: &Feature, range: NumberRange, tie_seed: u64) -> Vec<u32> {
    rank_by(range, tie_seed, |n| feature.affinity.main(n))
}

/// Total order on `f64` used for descending sorts.
pub fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_are_broken_deterministically() {
        let range = NumberRange::new(1, 10);
        let a = rank_by(range, 42, |_| 1.0);
        let b = rank_by(range, 42, |_| 1.0);
        let c = rank_by(range, 43, |_| 1.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn higher_scores_rank_first() {
        let ranked = rank_by(NumberRange::new(0, 9), 1, |n| f64::from(n));
        assert_eq!(ranked[0], 9);
        assert_eq!(ranked[9], 0);
    }
}
