//! Deterministic seeds. No hidden randomness anywhere in the engine.

use chrono::NaiveDate;

use crate::models::GameId;

/// Seed derived from `(subscriber id, game, date)`.
pub fn derive_seed(subscriber_id: &str, game: &GameId, date: NaiveDate) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(subscriber_id.as_bytes());
    hasher.update(b"|");
    hasher.update(game.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(date.to_string().as_bytes());
    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// SplitMix64 finalizer over `seed ^ value`. Used for per-number tie-breaks.
pub fn mix(seed: u64, value: u64) -> u64 {
    let mut z = seed ^ value.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
