//! Eligibility gate: decides whether and how candidates are emitted.

use chrono::{Datelike, NaiveDate};
use mbo_core::config::{EngineConfig, TierConfig};
use mbo_core::errors::GateError;
use mbo_core::models::{Candidate, GameId, Tier};
use serde::{Deserialize, Serialize};

use crate::calendar::DrawCalendar;
use crate::state::GateState;

/// Outcome of evaluating the gate for one `(game, date, tier)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    pub game: GameId,
    pub date: NaiveDate,
    pub tier: Tier,
    pub draw_day: bool,
    pub state: GateState,
}

pub struct EligibilityGate {
    calendar: DrawCalendar,
    tiers: TierConfig,
}

impl EligibilityGate {
    pub fn new(calendar: DrawCalendar, tiers: TierConfig) -> Self {
        Self { calendar, tiers }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(DrawCalendar::from_games(&config.games), config.tiers.clone())
    }

    pub fn calendar(&self) -> &DrawCalendar {
        &self.calendar
    }

    pub fn evaluate(
        &self,
        game: &GameId,
        date: NaiveDate,
        tier: Tier,
    ) -> Result<GateDecision, GateError> {
        let draw_day = self.calendar.is_draw_day(game, date)?;
        let preview = self.tiers.policy(tier).preview;
        let state = GateState::resolve(draw_day, preview);
        tracing::debug!(
            game = %game,
            date = %date,
            weekday = ?date.weekday(),
            tier = %tier,
            state = %state,
            "gate evaluated"
        );
        Ok(GateDecision {
            game: game.clone(),
            date,
            tier,
            draw_day,
            state,
        })
    }

    /// Stamp eligibility on every candidate. A suppressed decision yields an
    /// empty list; a candidate that already has eligibility is an error.
    pub fn apply(
        &self,
        decision: &GateDecision,
        candidates: Vec<Candidate>,
    ) -> Result<Vec<Candidate>, GateError> {
        let Some(eligibility) = decision.state.eligibility() else {
            return Ok(Vec::new());
        };
        candidates.into_iter().map(|c| c.mark(eligibility)).collect()
    }
}
