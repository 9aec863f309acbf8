//! # mbo-signals
//!
//! Signal extraction for the MBO engine.
//!
//! Four independent extractors, each a pure and total function of the
//! subscriber profile and the draw context:
//! - **Frequency**: number counts over the lookback window
//! - **Cyclical**: planetary hour of the session and lunar phase
//! - **Personal**: birth-date numerology and favorite numbers
//! - **Adjacency**: tendency of draws to land next to the previous draw
//!
//! Missing optional data degrades a feature to the neutral value instead of failing.

pub mod calendar;
pub mod extractors;
pub mod registry;

pub use extractors::{
    AdjacencyExtractor, CyclicalExtractor, FrequencyExtractor, PassthroughExtractor,
    PersonalExtractor,
};
pub use registry::SignalRegistry;
