//! Candidate-to-outcome distance.

use mbo_core::config::CalibrationConfig;

/// Match counts between a candidate's main numbers and a drawn outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchDistance {
    /// Same number in the same position.
    pub exact: usize,
    /// Numbers present in both, counted as a multiset.
    pub overlap: usize,
    /// Candidate numbers not drawn but within 1 of a drawn number.
    pub adjacent: usize,
    /// Numbers per draw.
    pub k: usize,
}

impl MatchDistance {
    /// Measure `candidate` against `drawn`. Both are compared in the order
    /// given; pool games are stored sorted so positions line up.
    pub fn measure(candidate: &[u32], drawn: &[u32]) -> Self {
        let exact = candidate
            .iter()
            .zip(drawn)
            .filter(|(c, d)| c == d)
            .count();

        let mut unmatched: Vec<u32> = drawn.to_vec();
        let mut overlap = 0;
        let mut misses = Vec::new();
        for &n in candidate {
            match unmatched.iter().position(|&d| d == n) {
                Some(i) => {
                    unmatched.swap_remove(i);
                    overlap += 1;
                }
                None => misses.push(n),
            }
        }

        let adjacent = misses
            .iter()
            .filter(|&&n| !drawn.contains(&n) && drawn.iter().any(|&d| d.abs_diff(n) == 1))
            .count();

        Self {
            exact,
            overlap,
            adjacent,
            k: drawn.len().max(candidate.len()),
        }
    }

    /// Weighted closeness in `[0, 1]`. A full exact match scores 1.
    pub fn closeness(&self, config: &CalibrationConfig) -> f64 {
        let denom = self.k as f64 * (config.exact_weight + config.overlap_weight);
        if denom <= 0.0 {
            return 0.0;
        }
        let raw = config.exact_weight * self.exact as f64
            + config.overlap_weight * self.overlap as f64
            + config.adjacent_weight * self.adjacent as f64;
        (raw / denom).clamp(0.0, 1.0)
    }
}
