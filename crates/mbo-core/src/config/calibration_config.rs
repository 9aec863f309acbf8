use serde::{Deserialize, Serialize};

use super::defaults;

/// Calibration tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Closeness that maps to a zero step.
    pub neutral_closeness: f64,
    /// Candidates below this confidence are ignored when calibrating.
    pub min_confidence: f64,
    /// Distance coefficients `e`, `o`, `a`.
    pub exact_weight: f64,
    pub overlap_weight: f64,
    pub adjacent_weight: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            neutral_closeness: defaults::DEFAULT_NEUTRAL_CLOSENESS,
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
            exact_weight: defaults::DEFAULT_EXACT_WEIGHT,
            overlap_weight: defaults::DEFAULT_OVERLAP_WEIGHT,
            adjacent_weight: defaults::DEFAULT_ADJACENT_WEIGHT,
        }
    }
}
