//! Closeness to signed step mapping.

use chrono::{DateTime, Utc};
use mbo_core::models::{CalibrationDelta, OutcomeRecord, WeightEntry};

/// Map closeness onto a signed unit step.
///
/// Above `neutral` maps linearly onto `(0, 1]`, below onto `[-1, 0)`,
/// exactly `neutral` is zero.
pub fn signed_step(closeness: f64, neutral: f64) -> f64 {
    let c = if closeness.is_finite() {
        closeness.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if c > neutral {
        let span = 1.0 - neutral;
        if span <= 0.0 {
            1.0
        } else {
            ((c - neutral) / span).min(1.0)
        }
    } else if c < neutral {
        ((c - neutral) / neutral).max(-1.0)
    } else {
        0.0
    }
}

/// Proposed weight after a unit step, clamped into the entry's bounds.
pub fn stepped_weight(entry: &WeightEntry, unit: f64) -> f64 {
    entry.clamp(entry.weight + unit * entry.max_step())
}

/// Apply one unit step to `entry` in place and describe what changed.
///
/// Shared by the store and by snapshot replay so both paths agree exactly.
pub fn apply(
    entry: &mut WeightEntry,
    unit: f64,
    closeness: f64,
    outcome: &OutcomeRecord,
    at: DateTime<Utc>,
) -> CalibrationDelta {
    let previous = entry.weight;
    let new_weight = stepped_weight(entry, unit);
    entry.weight = new_weight;
    entry.version += 1;
    entry.calibrated_at = Some(at);
    CalibrationDelta {
        key: entry.key.clone(),
        previous,
        delta: new_weight - previous,
        new_weight,
        closeness,
        version: entry.version,
        outcome: outcome.clone(),
        recorded_at: at,
    }
}
