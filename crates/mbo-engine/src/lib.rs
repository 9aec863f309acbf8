//! # mbo-engine
//!
//! Wires the subsystems into one pipeline:
//!
//! profile → extractors → aggregator → adjacency enhancer → gate → candidates
//!
//! and, once the real draw is known,
//!
//! candidates + outcome → calibrator → weight store.
//!
//! Batch entry points run subscribers (or outcomes) in parallel with rayon.
//! A failure is reported at the item's position and never aborts the batch.

pub mod engine;
pub mod inputs;
pub mod output;
pub mod tracing_setup;

pub use engine::Engine;
pub use inputs::{BatchRequest, CalibrationEvent, GenerationRequest, ProfileSource, RunInputs};
pub use output::{BatchItem, CalibrationItem, GameOutput, GenerationOutput, ItemError};
