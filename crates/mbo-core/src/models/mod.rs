pub mod calibration_delta;
pub mod candidate;
pub mod feature;
pub mod game;
pub mod outcome;
pub mod profile;
pub mod weight;

pub use calibration_delta::CalibrationDelta;
pub use candidate::{AdjacencyTrace, Candidate, Eligibility, SignalContribution, Substitution};
pub use feature::{Feature, FeatureStatus, NumberAffinity, SignalKind, NEUTRAL_VALUE};
pub use game::{
    AdjacencyPolicy, GameId, GameRule, NeighborDirection, NumberRange, PositionOrder, Session,
};
pub use outcome::{OutcomeHistory, OutcomeKey, OutcomeRecord};
pub use profile::{BirthData, BirthLocation, SubscriberProfile, Tier};
pub use weight::{WeightEntry, WeightKey};
