//! Input validation errors.

use super::error_code::{self, MboErrorCode};

/// Malformed or missing required input. Fatal for the affected subscriber or
/// game only, never for a whole batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("subscriber {subscriber_id}: tier {tier} requires birth data")]
    MissingBirthData { subscriber_id: String, tier: String },

    #[error("subscriber identifier is empty")]
    EmptySubscriberId,

    #[error("unknown tier: {value}")]
    UnknownTier { value: String },

    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("unknown game: {game}")]
    UnknownGame { game: String },

    #[error("game {game} is not available for tier {tier}")]
    GameNotInTier { game: String, tier: String },

    #[error("game {game}: session {session} is not scheduled")]
    UnknownSession { game: String, session: String },

    #[error("game {game}: expected {expected} main numbers, got {actual}")]
    WrongCount {
        game: String,
        expected: usize,
        actual: usize,
    },

    #[error("game {game}: number {number} outside [{min}, {max}]")]
    NumberOutOfRange {
        game: String,
        number: u32,
        min: u32,
        max: u32,
    },

    #[error("game {game}: duplicate main number {number}")]
    DuplicateNumber { game: String, number: u32 },

    #[error("game {game}: bonus number {detail}")]
    InvalidBonus { game: String, detail: String },
}

impl MboErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingBirthData { .. } => error_code::MISSING_BIRTH_DATA,
            _ => error_code::VALIDATION_ERROR,
        }
    }
}
