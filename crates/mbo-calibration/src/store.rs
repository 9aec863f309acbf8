//! Concurrent weight store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use mbo_core::config::EngineConfig;
use mbo_core::errors::StoreError;
use mbo_core::models::{
    CalibrationDelta, OutcomeKey, OutcomeRecord, SignalKind, WeightEntry, WeightKey,
};

use mbo_core::traits::IWeightSource;

use crate::calibrator::PlannedStep;
use crate::snapshot::WeightSnapshot;
use crate::step;

/// Weights keyed by `(game, signal kind)`.
///
/// All steps of one outcome are applied under the commit lock, and
/// [`WeightStore::snapshot`] takes the same lock shared, so a snapshot sees
/// either none or all of an outcome's steps.
#[derive(Clone, Default)]
pub struct WeightStore {
    entries: Arc<DashMap<WeightKey, WeightEntry>>,
    commit: Arc<RwLock<()>>,
    processed: Arc<DashMap<OutcomeKey, DateTime<Utc>>>,
    audit: Arc<Mutex<Vec<CalibrationDelta>>>,
    version: Arc<AtomicU64>,
}

impl WeightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per configured game and signal kind, at the configured
    /// default weight.
    pub fn from_config(config: &EngineConfig) -> Self {
        let store = Self::new();
        for game in config.games.keys() {
            for kind in SignalKind::ALL {
                let bounds = config.signals.bounds(kind);
                store.entries.insert(
                    WeightKey::new(game.clone(), kind),
                    WeightEntry::new(
                        WeightKey::new(game.clone(), kind),
                        bounds.default_weight,
                        bounds.min,
                        bounds.max,
                        bounds.step_fraction,
                    ),
                );
            }
        }
        tracing::debug!(entries = store.entries.len(), "weight store initialized");
        store
    }

    /// Rebuild a store from an exported snapshot.
    pub fn from_snapshot(snapshot: &WeightSnapshot) -> Self {
        let store = Self::new();
        for entry in snapshot.entries() {
            store.entries.insert(entry.key.clone(), entry.clone());
        }
        store.version.store(snapshot.version(), Ordering::SeqCst);
        store
    }

    pub fn insert(&self, entry: WeightEntry) -> Result<(), StoreError> {
        match self.entries.entry(entry.key.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateEntry {
                key: entry.key.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &WeightKey) -> Option<WeightEntry> {
        self.entries.get(key).map(|e| e.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of applied calibration steps.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> WeightSnapshot {
        // Writers only touch entries that were validated up front, so a
        // poisoned lock still guards a consistent map.
        let _read = self.commit.read().unwrap_or_else(PoisonError::into_inner);
        WeightSnapshot::new(
            self.version(),
            self.entries.iter().map(|e| e.value().clone()),
        )
    }

    pub fn is_processed(&self, key: &OutcomeKey) -> bool {
        self.processed.contains_key(key)
    }

    /// Record `key` as processed. Returns `false` if it already was, in
    /// which case the caller must not apply anything.
    pub(crate) fn mark_processed(&self, key: OutcomeKey, at: DateTime<Utc>) -> bool {
        match self.processed.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(at);
                true
            }
        }
    }

    /// Apply every step of one outcome as a single commit.
    pub(crate) fn apply_steps(
        &self,
        steps: &[PlannedStep],
        outcome: &OutcomeRecord,
        at: DateTime<Utc>,
    ) -> Result<Vec<CalibrationDelta>, StoreError> {
        let _write = self.commit.write().map_err(|_| StoreError::LockPoisoned {
            what: "weight store commit".to_string(),
        })?;
        let mut log = self.audit.lock().map_err(|_| StoreError::LockPoisoned {
            what: "calibration audit".to_string(),
        })?;

        if let Some(missing) = steps.iter().find(|s| !self.entries.contains_key(&s.key)) {
            return Err(StoreError::MissingEntry {
                key: missing.key.to_string(),
            });
        }

        let mut deltas = Vec::with_capacity(steps.len());
        for planned in steps {
            let Some(mut entry) = self.entries.get_mut(&planned.key) else {
                continue;
            };
            deltas.push(step::apply(
                entry.value_mut(),
                planned.unit,
                planned.closeness,
                outcome,
                at,
            ));
        }
        self.version.fetch_add(deltas.len() as u64, Ordering::SeqCst);
        log.extend(deltas.iter().cloned());
        Ok(deltas)
    }

    /// Copy of the audit trail, oldest first.
    pub fn audit(&self) -> Result<Vec<CalibrationDelta>, StoreError> {
        self.audit
            .lock()
            .map(|log| log.clone())
            .map_err(|_| StoreError::LockPoisoned {
                what: "calibration audit".to_string(),
            })
    }

    pub fn export_json(&self) -> Result<String, StoreError> {
        self.snapshot().to_json()
    }

    pub fn import_json(json: &str) -> Result<Self, StoreError> {
        WeightSnapshot::from_json(json).map(|s| Self::from_snapshot(&s))
    }
}
