use crate::models::{WeightEntry, WeightKey};

/// Read access to signal weights during generation.
pub trait IWeightSource: Send + Sync {
    fn entry(&self, key: &WeightKey) -> Option<&WeightEntry>;

    /// Monotonic store version the weights were taken from.
    fn version(&self) -> u64;

    fn weight(&self, key: &WeightKey) -> Option<f64> {
        self.entry(key).map(|e| e.weight)
    }
}
