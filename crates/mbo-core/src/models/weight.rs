//! Signal weights keyed by `(game, signal kind)`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GameId, SignalKind};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeightKey {
    pub game: GameId,
    pub kind: SignalKind,
}

impl WeightKey {
    pub fn new(game: GameId, kind: SignalKind) -> Self {
        Self { game, kind }
    }
}

impl fmt::Display for WeightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.game, self.kind)
    }
}

/// Bounds and saturation step for one weight.
///
/// Invariants:
/// - `min <= weight <= max`
/// - a single calibration event moves the weight by at most `max_step()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub key: WeightKey,
    pub weight: f64,
    pub min: f64,
    pub max: f64,
    /// Fraction of `max - min` a single event may move the weight.
    pub step_fraction: f64,
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibrated_at: Option<DateTime<Utc>>,
}

impl WeightEntry {
    pub fn new(key: WeightKey, weight: f64, min: f64, max: f64, step_fraction: f64) -> Self {
        let mut entry = Self {
            key,
            weight: 0.0,
            min,
            max,
            step_fraction,
            version: 0,
            calibrated_at: None,
        };
        entry.weight = entry.clamp(weight);
        entry
    }

    /// Largest absolute change one calibration event may apply.
    pub fn max_step(&self) -> f64 {
        self.step_fraction * (self.max - self.min)
    }

    /// Clamp into `[min, max]`. Non-finite input falls back to the range midpoint.
    pub fn clamp(&self, weight: f64) -> f64 {
        if !weight.is_finite() {
            return (self.min + self.max) / 2.0;
        }
        weight.clamp(self.min, self.max)
    }

    pub fn in_bounds(&self) -> bool {
        self.weight >= self.min && self.weight <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(w: f64) -> WeightEntry {
        WeightEntry::new(
            WeightKey::new(GameId::new("CASH3"), SignalKind::Frequency),
            w,
            0.1,
            3.0,
            0.05,
        )
    }

    #[test]
    fn construction_clamps() {
        assert_eq!(entry(9.0).weight, 3.0);
        assert_eq!(entry(-1.0).weight, 0.1);
        assert!((entry(f64::NAN).weight - 1.55).abs() < 1e-12);
    }

    #[test]
    fn max_step_is_fraction_of_range() {
        assert!((entry(1.0).max_step() - 0.145).abs() < 1e-12);
    }
}
