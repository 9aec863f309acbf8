//! Test fixtures for the MBO workspace: JSON profile records, outcome
//! histories, and ready-made engine configs.

use std::path::PathBuf;

use chrono::{Datelike, Duration, NaiveDate};
use mbo_core::config::EngineConfig;
use mbo_core::models::{
    BirthData, GameId, OutcomeHistory, OutcomeRecord, Session, SubscriberProfile, Tier,
};
use mbo_core::seed;
use serde::de::DeserializeOwned;

/// Root directory of the fixture data.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(|| panic!("invalid date {y}-{m}-{d}"))
}

pub fn default_config() -> EngineConfig {
    EngineConfig::default()
}

/// Config whose CASH3 schedule is Monday and Thursday only.
pub fn mon_thu_cash3_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    if let Some(rule) = config.games.get_mut(&GameId::new("CASH3")) {
        rule.draw_days = vec![chrono::Weekday::Mon, chrono::Weekday::Thu];
    }
    config
}

pub fn basic_profile(id: &str) -> SubscriberProfile {
    SubscriberProfile::new(id, Tier::Basic)
}

pub fn standard_profile(id: &str) -> SubscriberProfile {
    SubscriberProfile::new(id, Tier::Standard).with_birth(BirthData {
        date: date(1990, 2, 3),
        time: None,
        location: None,
    })
}

pub fn premium_profile(id: &str) -> SubscriberProfile {
    SubscriberProfile::new(id, Tier::Premium)
        .with_birth(BirthData {
            date: date(1985, 7, 14),
            time: chrono::NaiveTime::from_hms_opt(6, 30, 0),
            location: None,
        })
        .with_favorites(GameId::new("CASH3"), vec![1, 2, 3, 7])
        .with_favorites(GameId::new("MEGAMILLIONS"), vec![4, 18, 22, 40, 61])
}

/// Deterministic synthetic outcome history.
///
/// Draws are generated from a fixed seed so every test sees the same data.
pub struct HistoryBuilder {
    records: Vec<OutcomeRecord>,
    config: EngineConfig,
    seed: u64,
}

impl HistoryBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            config: EngineConfig::default(),
            seed: 0x5eed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Add `days` consecutive days of draws for `game`, ending the day before
    /// `until`, on the game's draw days and in each of its sessions.
    pub fn daily(mut self, game: &str, until: NaiveDate, days: i64) -> Self {
        let game = GameId::new(game);
        let Some(rule) = self.config.game(&game).cloned() else {
            panic!("unknown fixture game {game}");
        };
        for offset in (1..=days).rev() {
            let day = until - Duration::days(offset);
            if !rule.is_draw_day(day.weekday()) {
                continue;
            }
            for &session in &rule.sessions {
                let mut state = seed::mix(self.seed, day.num_days_from_ce() as u64)
                    ^ session.hour() as u64;
                let mut numbers = Vec::with_capacity(rule.main_count);
                while numbers.len() < rule.main_count {
                    state = seed::mix(state, numbers.len() as u64 + 1);
                    let n = rule.main.min + (state % rule.main.len() as u64) as u32;
                    if rule.positional || !numbers.contains(&n) {
                        numbers.push(n);
                    }
                }
                if !rule.positional {
                    numbers.sort_unstable();
                }
                let bonus = rule.bonus.map(|b| {
                    state = seed::mix(state, 99);
                    b.min + (state % b.len() as u64) as u32
                });
                self.records.push(OutcomeRecord {
                    game: game.clone(),
                    date: day,
                    session,
                    numbers,
                    bonus,
                });
            }
        }
        self
    }

    pub fn record(mut self, record: OutcomeRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn build(self) -> OutcomeHistory {
        OutcomeHistory::new(self.records)
    }
}

impl Default for HistoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn outcome(
    game: &str,
    day: NaiveDate,
    session: Session,
    numbers: &[u32],
    bonus: Option<u32>,
) -> OutcomeRecord {
    OutcomeRecord {
        game: GameId::new(game),
        date: day,
        session,
        numbers: numbers.to_vec(),
        bonus,
    }
}
