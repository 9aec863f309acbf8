//! Top-level engine configuration with layered resolution.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    defaults, AggregationConfig, CalibrationConfig, ObservabilityConfig, SignalConfig,
    TierConfig,
};
use crate::errors::ConfigError;
use crate::models::{GameId, GameRule, SignalKind};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`MBO_*`)
/// 2. TOML file, deep-merged over the defaults
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub games: BTreeMap<GameId, GameRule>,
    pub tiers: TierConfig,
    pub signals: SignalConfig,
    pub aggregation: AggregationConfig,
    pub calibration: CalibrationConfig,
    pub observability: ObservabilityConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            games: defaults::default_games(),
            tiers: TierConfig::default(),
            signals: SignalConfig::default(),
            aggregation: AggregationConfig::default(),
            calibration: CalibrationConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file, apply `MBO_*` overrides, then validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |name| std::env::var(name).ok())
    }

    /// Same as [`EngineConfig::load`] with an injectable variable lookup.
    pub fn load_with_env(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config = Self::merge_over_defaults(&content, &path.display().to_string())?;
        config.apply_env_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML string merged over the defaults. Not validated.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::merge_over_defaults(toml_str, "<string>")
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn game(&self, id: &GameId) -> Option<&GameRule> {
        self.games.get(id)
    }

    /// Tables merge key by key; scalars and arrays in the file replace the default.
    fn merge_over_defaults(toml_str: &str, origin: &str) -> Result<Self, ConfigError> {
        let parse_err = |message: String| ConfigError::ParseError {
            path: origin.to_string(),
            message,
        };
        let overlay: toml::Value = toml::from_str(toml_str).map_err(|e| parse_err(e.to_string()))?;
        let mut base =
            toml::Value::try_from(Self::default()).map_err(|e| parse_err(e.to_string()))?;
        deep_merge(&mut base, overlay);
        base.try_into().map_err(|e: toml::de::Error| parse_err(e.to_string()))
    }

    /// Pattern: `MBO_<SECTION>_<FIELD>`. Unparseable values are ignored.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("MBO_LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = lookup("MBO_LOG_JSON").and_then(|v| v.parse::<bool>().ok()) {
            self.observability.json = v;
        }
        if let Some(v) = lookup("MBO_AGGREGATION_MAX_CANDIDATES").and_then(|v| v.parse().ok()) {
            self.aggregation.max_candidates = v;
        }
        if let Some(v) = lookup("MBO_AGGREGATION_LOOKBACK_DRAWS").and_then(|v| v.parse().ok()) {
            self.aggregation.lookback_draws = v;
        }
        if let Some(v) = lookup("MBO_CALIBRATION_NEUTRAL_CLOSENESS").and_then(|v| v.parse().ok())
        {
            self.calibration.neutral_closeness = v;
        }
        if let Some(v) = lookup("MBO_CALIBRATION_MIN_CONFIDENCE").and_then(|v| v.parse().ok()) {
            self.calibration.min_confidence = v;
        }
        if let Some(v) = lookup("MBO_SIGNALS_STEP_FRACTION").and_then(|v| v.parse::<f64>().ok()) {
            self.signals.frequency.step_fraction = v;
            self.signals.cyclical.step_fraction = v;
            self.signals.personal.step_fraction = v;
            self.signals.adjacency.step_fraction = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games.is_empty() {
            return Err(invalid("games", "at least one game is required"));
        }
        for (id, rule) in &self.games {
            validate_game(id, rule)?;
        }

        for (name, policy) in [
            ("basic", &self.tiers.basic),
            ("standard", &self.tiers.standard),
            ("premium", &self.tiers.premium),
        ] {
            if let Some(game) = policy.games.iter().find(|g| !self.games.contains_key(*g)) {
                return Err(invalid(
                    &format!("tiers.{name}.games"),
                    &format!("unknown game {game}"),
                ));
            }
        }

        for kind in SignalKind::ALL {
            let b = self.signals.bounds(kind);
            let field = format!("signals.{kind}");
            if ![b.default_weight, b.min, b.max, b.step_fraction]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(invalid(&field, "values must be finite"));
            }
            if b.min < 0.0 || b.min > b.max {
                return Err(invalid(&field, "requires 0 <= min <= max"));
            }
            if b.default_weight < b.min || b.default_weight > b.max {
                return Err(invalid(&field, "default_weight must lie within [min, max]"));
            }
            if b.step_fraction <= 0.0 || b.step_fraction > 1.0 {
                return Err(invalid(&field, "step_fraction must be in (0, 1]"));
            }
        }

        let agg = &self.aggregation;
        if agg.max_candidates == 0 {
            return Err(invalid("aggregation.max_candidates", "must be greater than 0"));
        }
        if agg.lookback_draws == 0 {
            return Err(invalid("aggregation.lookback_draws", "must be greater than 0"));
        }
        let [lo, hi] = agg.degraded_band;
        if !(0.0..=100.0).contains(&lo) || !(0.0..=100.0).contains(&hi) || lo > hi {
            return Err(invalid(
                "aggregation.degraded_band",
                "requires 0 <= low <= high <= 100",
            ));
        }

        let cal = &self.calibration;
        if !(0.0..1.0).contains(&cal.neutral_closeness) {
            return Err(invalid("calibration.neutral_closeness", "must be in [0, 1)"));
        }
        if !(0.0..=100.0).contains(&cal.min_confidence) {
            return Err(invalid("calibration.min_confidence", "must be in [0, 100]"));
        }
        if cal.exact_weight < 0.0 || cal.overlap_weight < 0.0 || cal.adjacent_weight < 0.0 {
            return Err(invalid("calibration", "distance coefficients must be non-negative"));
        }
        if cal.exact_weight + cal.overlap_weight <= 0.0 {
            return Err(invalid(
                "calibration",
                "exact_weight + overlap_weight must be positive",
            ));
        }
        Ok(())
    }
}

fn validate_game(id: &GameId, rule: &GameRule) -> Result<(), ConfigError> {
    let field = format!("games.{id}");
    if rule.main_count == 0 {
        return Err(invalid(&field, "main_count must be greater than 0"));
    }
    if rule.main.is_empty() {
        return Err(invalid(&field, "main range is empty"));
    }
    if rule.main_count > rule.main.len() {
        return Err(invalid(&field, "main_count exceeds the number range"));
    }
    if rule.bonus.is_some_and(|b| b.is_empty()) {
        return Err(invalid(&field, "bonus range is empty"));
    }
    if rule.sessions.is_empty() {
        return Err(invalid(&field, "at least one session is required"));
    }
    if let Some(policy) = &rule.adjacency {
        if policy.max_substitutions > rule.main_count {
            return Err(invalid(
                &format!("{field}.adjacency"),
                "max_substitutions exceeds main_count",
            ));
        }
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn deep_merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
