//! # mbo-core
//!
//! Foundation crate for the MBO scoring engine.
//! Defines the data model, traits, errors, config, profile normalization,
//! and deterministic seed derivation. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod profile;
pub mod seed;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::EngineConfig;
pub use errors::{MboError, MboErrorCode, MboResult};
pub use models::{
    Candidate, Feature, FeatureStatus, GameId, GameRule, OutcomeHistory, OutcomeRecord, Session,
    SignalKind, SubscriberProfile, Tier, WeightEntry, WeightKey,
};
