//! Signal features produced by extractors.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// The four independent signal kinds. Declaration order is the canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Frequency,
    Cyclical,
    Personal,
    Adjacency,
}

impl SignalKind {
    pub const ALL: [SignalKind; 4] = [
        Self::Frequency,
        Self::Cyclical,
        Self::Personal,
        Self::Adjacency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frequency => "frequency",
            Self::Cyclical => "cyclical",
            Self::Personal => "personal",
            Self::Adjacency => "adjacency",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::ValidationFailed {
                field: "signal kind".to_string(),
                message: format!("unknown signal kind '{s}'"),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureStatus {
    Active,
    /// Required optional data was missing; the value is neutral.
    Degraded,
    /// The tier does not enable this kind. Ignored by aggregation.
    Disabled,
}

/// Per-number affinity in `[0, 1]`. Numbers absent from a map take `default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberAffinity {
    pub main: BTreeMap<u32, f64>,
    pub bonus: BTreeMap<u32, f64>,
    pub default: f64,
}

impl NumberAffinity {
    pub fn uniform(default: f64) -> Self {
        Self {
            main: BTreeMap::new(),
            bonus: BTreeMap::new(),
            default: default.clamp(0.0, 1.0),
        }
    }

    pub fn main(&self, n: u32) -> f64 {
        self.main.get(&n).copied().unwrap_or(self.default)
    }

    pub fn bonus(&self, n: u32) -> f64 {
        self.bonus.get(&n).copied().unwrap_or(self.default)
    }

    /// Clamp every entry into `[0, 1]`; NaN becomes the default.
    pub fn clamped(mut self) -> Self {
        let default = if self.default.is_nan() {
            0.5
        } else {
            self.default.clamp(0.0, 1.0)
        };
        self.default = default;
        for v in self.main.values_mut().chain(self.bonus.values_mut()) {
            *v = if v.is_nan() { default } else { v.clamp(0.0, 1.0) };
        }
        self
    }
}

/// Neutral value used by degraded and disabled features.
pub const NEUTRAL_VALUE: f64 = 50.0;

/// One extractor's judgement about a draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub kind: SignalKind,
    /// Strength in `[0, 100]`.
    pub value: f64,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub status: FeatureStatus,
    pub affinity: NumberAffinity,
}

impl Feature {
    pub fn active(kind: SignalKind, source: &str, value: f64, affinity: NumberAffinity) -> Self {
        Self {
            kind,
            value: clamp_value(value),
            source: source.to_string(),
            explanation: None,
            status: FeatureStatus::Active,
            affinity: affinity.clamped(),
        }
    }

    pub fn degraded(kind: SignalKind, source: &str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            value: NEUTRAL_VALUE,
            source: source.to_string(),
            explanation: Some(reason.into()),
            status: FeatureStatus::Degraded,
            affinity: NumberAffinity::uniform(0.5),
        }
    }

    pub fn disabled(kind: SignalKind) -> Self {
        Self {
            kind,
            value: NEUTRAL_VALUE,
            source: "passthrough".to_string(),
            explanation: None,
            status: FeatureStatus::Disabled,
            affinity: NumberAffinity::uniform(0.5),
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == FeatureStatus::Active
    }

    pub fn is_degraded(&self) -> bool {
        self.status == FeatureStatus::Degraded
    }

    /// Active and degraded features take part in aggregation.
    pub fn participates(&self) -> bool {
        self.status != FeatureStatus::Disabled
    }
}

fn clamp_value(v: f64) -> f64 {
    if v.is_nan() {
        NEUTRAL_VALUE
    } else {
        v.clamp(0.0, 100.0)
    }
}
