//! Inbound record format errors.

use super::error_code::{self, MboErrorCode};

/// Unrecognized inbound record shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    #[error("unrecognized profile shape: {reason}")]
    UnrecognizedShape { reason: String },

    #[error("malformed field '{field}': {reason}")]
    MalformedField { field: String, reason: String },

    #[error("invalid JSON: {message}")]
    InvalidJson { message: String },
}

impl MboErrorCode for FormatError {
    fn error_code(&self) -> &'static str {
        error_code::FORMAT_ERROR
    }
}
