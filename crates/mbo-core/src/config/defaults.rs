//! Compiled defaults.

use std::collections::BTreeMap;

use chrono::Weekday;

use crate::models::{AdjacencyPolicy, GameId, GameRule, NumberRange, Session};

// Signal weights
pub const DEFAULT_FREQUENCY_WEIGHT: f64 = 1.2;
pub const DEFAULT_CYCLICAL_WEIGHT: f64 = 0.8;
pub const DEFAULT_PERSONAL_WEIGHT: f64 = 1.0;
pub const DEFAULT_ADJACENCY_WEIGHT: f64 = 0.6;
pub const DEFAULT_WEIGHT_MIN: f64 = 0.1;
pub const DEFAULT_WEIGHT_MAX: f64 = 3.0;
pub const DEFAULT_STEP_FRACTION: f64 = 0.05;

// Aggregation
pub const DEFAULT_MAX_CANDIDATES: usize = 3;
pub const DEFAULT_LOOKBACK_DRAWS: usize = 120;
pub const DEFAULT_DEGRADED_BAND: [f64; 2] = [5.0, 20.0];

// Calibration
pub const DEFAULT_NEUTRAL_CLOSENESS: f64 = 0.2;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.0;
pub const DEFAULT_EXACT_WEIGHT: f64 = 1.0;
pub const DEFAULT_OVERLAP_WEIGHT: f64 = 1.0;
pub const DEFAULT_ADJACENT_WEIGHT: f64 = 0.5;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";

const DAILY: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn digit_game(count: usize) -> GameRule {
    GameRule {
        main_count: count,
        main: NumberRange::new(0, 9),
        bonus: None,
        positional: true,
        draw_days: DAILY.to_vec(),
        sessions: vec![Session::Midday, Session::Evening, Session::Night],
        adjacency: None,
    }
}

/// Built-in game table.
pub fn default_games() -> BTreeMap<GameId, GameRule> {
    let mut games = BTreeMap::new();
    games.insert(GameId::new("CASH3"), digit_game(3));
    games.insert(GameId::new("CASH4"), digit_game(4));
    games.insert(
        GameId::new("MEGAMILLIONS"),
        GameRule {
            main_count: 5,
            main: NumberRange::new(1, 70),
            bonus: Some(NumberRange::new(1, 25)),
            positional: false,
            draw_days: vec![Weekday::Tue, Weekday::Fri],
            sessions: vec![Session::Main],
            adjacency: None,
        },
    );
    games.insert(
        GameId::new("POWERBALL"),
        GameRule {
            main_count: 5,
            main: NumberRange::new(1, 69),
            bonus: Some(NumberRange::new(1, 26)),
            positional: false,
            draw_days: vec![Weekday::Mon, Weekday::Wed, Weekday::Sat],
            sessions: vec![Session::Main],
            adjacency: None,
        },
    );
    games.insert(
        GameId::new("CASH4LIFE"),
        GameRule {
            main_count: 5,
            main: NumberRange::new(1, 60),
            bonus: Some(NumberRange::new(1, 4)),
            positional: false,
            draw_days: DAILY.to_vec(),
            sessions: vec![Session::Main],
            adjacency: Some(AdjacencyPolicy::default()),
        },
    );
    games
}
