//! Immutable, versioned view of the weights.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use mbo_core::errors::StoreError;
use mbo_core::models::{WeightEntry, WeightKey};
use mbo_core::traits::IWeightSource;

/// Weights as of one store version. Cheap to clone and share across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSnapshot {
    version: u64,
    entries: Arc<BTreeMap<WeightKey, WeightEntry>>,
}

/// Wire form: entries as a list, since keys are structured.
#[derive(Serialize, Deserialize)]
struct SnapshotRecord {
    version: u64,
    entries: Vec<WeightEntry>,
}

impl WeightSnapshot {
    pub fn new(version: u64, entries: impl IntoIterator<Item = WeightEntry>) -> Self {
        Self {
            version,
            entries: Arc::new(entries.into_iter().map(|e| (e.key.clone(), e)).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &WeightEntry> {
        self.entries.values()
    }

    /// New snapshot with `updated` entries swapped in and the version bumped
    /// once per updated entry. `self` is untouched.
    pub(crate) fn with_updates(&self, updated: Vec<WeightEntry>) -> Self {
        let bump = updated.len() as u64;
        let mut entries = (*self.entries).clone();
        for entry in updated {
            entries.insert(entry.key.clone(), entry);
        }
        Self {
            version: self.version + bump,
            entries: Arc::new(entries),
        }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        let record = SnapshotRecord {
            version: self.version,
            entries: self.entries.values().cloned().collect(),
        };
        serde_json::to_string_pretty(&record).map_err(|e| StoreError::Serialization {
            message: e.to_string(),
        })
    }

    /// Parse an exported snapshot. Duplicate keys and out-of-bounds weights
    /// are rejected.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let record: SnapshotRecord =
            serde_json::from_str(json).map_err(|e| StoreError::Serialization {
                message: e.to_string(),
            })?;
        let mut entries = BTreeMap::new();
        for entry in record.entries {
            if !entry.in_bounds() {
                return Err(StoreError::Serialization {
                    message: format!(
                        "weight {} for {} outside [{}, {}]",
                        entry.weight, entry.key, entry.min, entry.max
                    ),
                });
            }
            if entries.contains_key(&entry.key) {
                return Err(StoreError::DuplicateEntry {
                    key: entry.key.to_string(),
                });
            }
            entries.insert(entry.key.clone(), entry);
        }
        Ok(Self {
            version: record.version,
            entries: Arc::new(entries),
        })
    }
}

impl IWeightSource for WeightSnapshot {
    fn entry(&self, key: &WeightKey) -> Option<&WeightEntry> {
        self.entries.get(key)
    }

    fn version(&self) -> u64 {
        self.version
    }
}
