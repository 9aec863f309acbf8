//! Confidence formula.
//!
//! ```text
//! fit(f)          = mean affinity of the candidate's numbers under f
//! contribution(f) = weight(f) × value(f) × fit(f) / Σ weight
//! confidence      = Σ contribution(f)
//! ```
//!
//! With values in `[0, 100]` and fits in `[0, 1]`, confidence lands in `[0, 100]`.
//! When no participating feature is active the raw confidence is mapped
//! linearly into the degraded band.

use mbo_core::models::SignalContribution;

use crate::ranking::Weighted;

pub fn fit(w: &Weighted<'_>, numbers: &[u32], bonus: Option<u32>) -> f64 {
    let aff = &w.feature.affinity;
    let mut total: f64 = numbers.iter().map(|&n| aff.main(n)).sum();
    let mut count = numbers.len();
    if let Some(b) = bonus {
        total += aff.bonus(b);
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Per-feature contributions for one number set.
pub fn compute_breakdown(
    features: &[Weighted<'_>],
    numbers: &[u32],
    bonus: Option<u32>,
) -> Vec<SignalContribution> {
    let weight_sum: f64 = features.iter().map(|w| w.weight).sum();
    features
        .iter()
        .map(|w| {
            let fit = fit(w, numbers, bonus);
            let contribution = if weight_sum > 0.0 {
                w.weight * w.feature.value * fit / weight_sum
            } else {
                0.0
            };
            SignalContribution {
                kind: w.feature.kind,
                weight: w.weight,
                value: w.feature.value,
                fit,
                contribution,
                degraded: w.feature.is_degraded(),
            }
        })
        .collect()
}

/// Sum of contributions, clamped to `[0, 100]`, or pinned into `band` when
/// no active signal backs it.
pub fn compute(breakdown: &[SignalContribution], band: Option<[f64; 2]>) -> f64 {
    let raw = breakdown
        .iter()
        .map(|c| c.contribution)
        .sum::<f64>()
        .clamp(0.0, 100.0);
    match band {
        Some([lo, hi]) => lo + (hi - lo) * raw / 100.0,
        None => raw,
    }
}
