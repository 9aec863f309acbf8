//! Per-game draw schedules.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Weekday};
use mbo_core::errors::GateError;
use mbo_core::models::{GameId, GameRule};

#[derive(Debug, Clone, Default)]
pub struct DrawCalendar {
    schedules: BTreeMap<GameId, BTreeSet<u32>>,
}

impl DrawCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_games<'a>(games: impl IntoIterator<Item = (&'a GameId, &'a GameRule)>) -> Self {
        let mut calendar = Self::new();
        for (game, rule) in games {
            calendar.set_schedule(game.clone(), rule.draw_days.iter().copied());
        }
        calendar
    }

    pub fn set_schedule(&mut self, game: GameId, days: impl IntoIterator<Item = Weekday>) {
        self.schedules.insert(
            game,
            days.into_iter().map(|d| d.num_days_from_monday()).collect(),
        );
    }

    pub fn is_draw_day(&self, game: &GameId, date: NaiveDate) -> Result<bool, GateError> {
        let days = self.schedule(game)?;
        Ok(days.contains(&date.weekday().num_days_from_monday()))
    }

    fn schedule(&self, game: &GameId) -> Result<&BTreeSet<u32>, GateError> {
        self.schedules.get(game).ok_or_else(|| GateError::NoSchedule {
            game: game.to_string(),
        })
    }
}
