//! Weight store errors.

use super::error_code::{self, MboErrorCode};

/// Errors raised by the weight store and its snapshots.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate weight entry for {key}")]
    DuplicateEntry { key: String },

    #[error("no weight entry for {key}")]
    MissingEntry { key: String },

    #[error("lock poisoned: {what}")]
    LockPoisoned { what: String },

    #[error("snapshot serialization failed: {message}")]
    Serialization { message: String },
}

impl MboErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        error_code::STORE_ERROR
    }
}
