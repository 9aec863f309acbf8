use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::SignalKind;

/// Initial weight, bounds and step fraction for one signal kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalBounds {
    pub default_weight: f64,
    pub min: f64,
    pub max: f64,
    pub step_fraction: f64,
}

impl SignalBounds {
    fn with_weight(default_weight: f64) -> Self {
        Self {
            default_weight,
            ..Self::default()
        }
    }
}

impl Default for SignalBounds {
    fn default() -> Self {
        Self {
            default_weight: 1.0,
            min: defaults::DEFAULT_WEIGHT_MIN,
            max: defaults::DEFAULT_WEIGHT_MAX,
            step_fraction: defaults::DEFAULT_STEP_FRACTION,
        }
    }
}

/// Per-kind weight configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub frequency: SignalBounds,
    pub cyclical: SignalBounds,
    pub personal: SignalBounds,
    pub adjacency: SignalBounds,
}

impl SignalConfig {
    pub fn bounds(&self, kind: SignalKind) -> &SignalBounds {
        match kind {
            SignalKind::Frequency => &self.frequency,
            SignalKind::Cyclical => &self.cyclical,
            SignalKind::Personal => &self.personal,
            SignalKind::Adjacency => &self.adjacency,
        }
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            frequency: SignalBounds::with_weight(defaults::DEFAULT_FREQUENCY_WEIGHT),
            cyclical: SignalBounds::with_weight(defaults::DEFAULT_CYCLICAL_WEIGHT),
            personal: SignalBounds::with_weight(defaults::DEFAULT_PERSONAL_WEIGHT),
            adjacency: SignalBounds::with_weight(defaults::DEFAULT_ADJACENCY_WEIGHT),
        }
    }
}
