//! Eligibility gate errors.

use super::error_code::{self, MboErrorCode};

/// Errors raised while deciding or applying eligibility.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GateError {
    #[error("candidate {candidate_id} already has eligibility {current}")]
    EligibilityAlreadySet {
        candidate_id: String,
        current: String,
    },

    #[error("game {game} has no draw schedule")]
    NoSchedule { game: String },
}

impl MboErrorCode for GateError {
    fn error_code(&self) -> &'static str {
        error_code::GATE_ERROR
    }
}
