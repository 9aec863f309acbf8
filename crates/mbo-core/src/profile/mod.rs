//! Inbound profile normalization.

pub mod dates;
pub mod normalize;

pub use normalize::{detect_shape, normalize_profile, normalize_profile_str, ProfileShape};
