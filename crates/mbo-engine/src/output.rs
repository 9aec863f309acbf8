//! Run results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use mbo_core::errors::{MboError, MboErrorCode};
use mbo_core::models::{CalibrationDelta, Candidate, GameId, OutcomeKey};
use mbo_gate::GateState;

/// Error object attached to a failed batch item or game entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl From<&MboError> for ItemError {
    fn from(err: &MboError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<MboError> for ItemError {
    fn from(err: MboError) -> Self {
        Self::from(&err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutput {
    pub game: GameId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<GateState>,
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
}

impl GameOutput {
    pub fn emitted(game: GameId, state: GateState, candidates: Vec<Candidate>) -> Self {
        Self {
            game,
            state: Some(state),
            candidates,
            error: None,
        }
    }

    pub fn failed(game: GameId, err: &MboError) -> Self {
        Self {
            game,
            state: None,
            candidates: Vec::new(),
            error: Some(ItemError::from(err)),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub subscriber_id: String,
    pub date: NaiveDate,
    pub games: Vec<GameOutput>,
}

impl GenerationOutput {
    pub fn game(&self, game: &GameId) -> Option<&GameOutput> {
        self.games.iter().find(|g| &g.game == game)
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.games.iter().flat_map(|g| g.candidates.iter())
    }
}

/// Result for one subscriber, at its position in the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<String>,
    pub result: Result<GenerationOutput, ItemError>,
}

impl BatchItem {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result for one outcome in a calibration batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationItem {
    pub index: usize,
    pub outcome: OutcomeKey,
    pub result: Result<Vec<CalibrationDelta>, ItemError>,
}
