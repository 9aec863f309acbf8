use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Upper bound on candidates per game and session.
    pub max_candidates: usize,
    /// Draws of history fed to the extractors.
    pub lookback_draws: usize,
    /// Confidence band used when no active signal is available.
    pub degraded_band: [f64; 2],
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            max_candidates: defaults::DEFAULT_MAX_CANDIDATES,
            lookback_draws: defaults::DEFAULT_LOOKBACK_DRAWS,
            degraded_band: defaults::DEFAULT_DEGRADED_BAND,
        }
    }
}
