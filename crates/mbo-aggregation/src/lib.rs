//! # mbo-aggregation
//!
//! Turns extracted features and signal weights into confidence-ranked
//! candidates, and applies the one-shot adjacency enhancer.

pub mod aggregator;
pub mod enhancer;
pub mod formula;
pub mod pools;
pub mod ranking;

pub use aggregator::{AggregationInput, ConfidenceAggregator};
pub use enhancer::AdjacencyEnhancer;
