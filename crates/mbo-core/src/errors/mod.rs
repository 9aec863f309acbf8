//! Error handling for the MBO engine.
//! One error enum per subsystem, `thiserror` only, aggregated into [`MboError`].

pub mod config_error;
pub mod error_code;
pub mod format_error;
pub mod gate_error;
pub mod mbo_error;
pub mod store_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use error_code::MboErrorCode;
pub use format_error::FormatError;
pub use gate_error::GateError;
pub use mbo_error::{MboError, MboResult};
pub use store_error::StoreError;
pub use validation_error::ValidationError;
