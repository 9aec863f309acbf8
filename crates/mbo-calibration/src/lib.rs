//! # mbo-calibration
//!
//! Weight store and calibrator.
//!
//! Generation reads an immutable [`WeightSnapshot`]; the only mutation path
//! is [`Calibrator::calibrate`], which nudges each contributing signal weight
//! by a bounded step derived from how close the candidates came to a real
//! outcome. [`Calibrator::replay`] is the same computation as a pure function
//! over snapshots.

pub mod calibrator;
pub mod distance;
pub mod snapshot;
pub mod step;
pub mod store;

pub use calibrator::{CalibrationPlan, Calibrator, PlannedStep};
pub use distance::MatchDistance;
pub use snapshot::WeightSnapshot;
pub use store::WeightStore;
