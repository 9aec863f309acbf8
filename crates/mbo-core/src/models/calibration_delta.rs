//! Append-only audit record of one weight adjustment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OutcomeRecord, WeightKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationDelta {
    pub key: WeightKey,
    pub previous: f64,
    /// Signed change actually applied after clamping.
    pub delta: f64,
    pub new_weight: f64,
    pub closeness: f64,
    /// Entry version after the change.
    pub version: u64,
    pub outcome: OutcomeRecord,
    pub recorded_at: DateTime<Utc>,
}
