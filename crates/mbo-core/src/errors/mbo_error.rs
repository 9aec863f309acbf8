//! Top-level error aggregating every subsystem error.

use super::error_code::{self, MboErrorCode};
use super::{ConfigError, FormatError, GateError, StoreError, ValidationError};

/// Errors surfaced by the engine. Subsystem errors convert via `From`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MboError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Gate error: {0}")]
    Gate(#[from] GateError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MboErrorCode for MboError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Format(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Gate(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

impl From<serde_json::Error> for MboError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type MboResult<T> = Result<T, MboError>;
