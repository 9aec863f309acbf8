use std::fmt;

use mbo_core::models::Eligibility;
use serde::{Deserialize, Serialize};

/// Gate state for one `(game, date, tier)`. Evaluated fresh every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    /// Nothing is emitted.
    Suppressed,
    /// Non-final output ahead of a draw.
    Preview,
    /// Final output for a draw day.
    Active,
}

impl GateState {
    /// Draw days are active for every tier. Other days preview only for tiers
    /// with preview rights.
    pub fn resolve(draw_day: bool, preview_allowed: bool) -> Self {
        match (draw_day, preview_allowed) {
            (true, _) => Self::Active,
            (false, true) => Self::Preview,
            (false, false) => Self::Suppressed,
        }
    }

    pub fn eligibility(self) -> Option<Eligibility> {
        match self {
            Self::Active => Some(Eligibility::Final),
            Self::Preview => Some(Eligibility::Preview),
            Self::Suppressed => None,
        }
    }

    pub fn emits(self) -> bool {
        self != Self::Suppressed
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Suppressed => "suppressed",
            Self::Preview => "preview",
            Self::Active => "active",
        })
    }
}
