//! Stable, machine-readable error codes.

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const MISSING_BIRTH_DATA: &str = "MISSING_BIRTH_DATA";
pub const FORMAT_ERROR: &str = "FORMAT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORE_ERROR: &str = "STORE_ERROR";
pub const GATE_ERROR: &str = "GATE_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

/// Every error surfaced outside the engine carries a stable code.
pub trait MboErrorCode {
    fn error_code(&self) -> &'static str;
}
