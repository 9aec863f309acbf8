//! Per-run inputs and request types.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use mbo_calibration::WeightSnapshot;
use mbo_core::models::{Candidate, GameId, OutcomeHistory, OutcomeRecord, SubscriberProfile};

/// Everything a generation run reads besides the profile. Immutable for
/// the whole run and shared across worker threads.
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub weights: WeightSnapshot,
    pub history: Arc<OutcomeHistory>,
    pub run_at: DateTime<Utc>,
}

impl RunInputs {
    pub fn new(weights: WeightSnapshot, history: OutcomeHistory, run_at: DateTime<Utc>) -> Self {
        Self {
            weights,
            history: Arc::new(history),
            run_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub date: NaiveDate,
    /// Games to generate for. Empty means every game the tier includes.
    #[serde(default)]
    pub games: Vec<GameId>,
}

impl GenerationRequest {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            games: Vec::new(),
        }
    }

    pub fn with_games(mut self, games: impl IntoIterator<Item = GameId>) -> Self {
        self.games = games.into_iter().collect();
        self
    }
}

/// A profile already normalized, or a raw record still to be normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSource {
    Profile(SubscriberProfile),
    Raw(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub profile: ProfileSource,
    pub request: GenerationRequest,
}

/// One outcome and the candidates that were issued for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationEvent {
    pub outcome: OutcomeRecord,
    pub candidates: Vec<Candidate>,
}
