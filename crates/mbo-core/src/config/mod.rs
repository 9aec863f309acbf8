//! Configuration for the MBO engine.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod aggregation_config;
pub mod calibration_config;
pub mod defaults;
pub mod engine_config;
pub mod observability_config;
pub mod signal_config;
pub mod tier_config;

pub use aggregation_config::AggregationConfig;
pub use calibration_config::CalibrationConfig;
pub use engine_config::EngineConfig;
pub use observability_config::ObservabilityConfig;
pub use signal_config::{SignalBounds, SignalConfig};
pub use tier_config::{TierConfig, TierPolicy};
