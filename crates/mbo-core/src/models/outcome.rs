//! Observed draw outcomes and the immutable history built from them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{GameId, GameRule, Session};
use crate::errors::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutcomeKey {
    pub game: GameId,
    pub date: NaiveDate,
    pub session: Session,
}

impl fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}/{}", self.game, self.date, self.session)
    }
}

/// A real draw result, already normalized by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub game: GameId,
    pub date: NaiveDate,
    pub session: Session,
    pub numbers: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<u32>,
}

impl OutcomeRecord {
    pub fn key(&self) -> OutcomeKey {
        OutcomeKey {
            game: self.game.clone(),
            date: self.date,
            session: self.session,
        }
    }

    /// Check numbers and session against the game rule.
    pub fn validate(&self, rule: &GameRule) -> Result<(), ValidationError> {
        if !rule.sessions.contains(&self.session) {
            return Err(ValidationError::UnknownSession {
                game: self.game.to_string(),
                session: self.session.to_string(),
            });
        }
        rule.validate_numbers(&self.game, &self.numbers, self.bonus)
    }
}

/// Immutable `(game, date, session) -> outcome` mapping.
/// Serialized as a flat list of records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<OutcomeRecord>", into = "Vec<OutcomeRecord>")]
pub struct OutcomeHistory {
    records: BTreeMap<OutcomeKey, OutcomeRecord>,
}

impl OutcomeHistory {
    pub fn new(records: impl IntoIterator<Item = OutcomeRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.key(), r)).collect(),
        }
    }

    pub fn get(&self, key: &OutcomeKey) -> Option<&OutcomeRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Up to `lookback` draws of `game`/`session` strictly before `date`,
    /// most recent first.
    pub fn draws_before(
        &self,
        game: &GameId,
        session: Session,
        date: NaiveDate,
        lookback: usize,
    ) -> Vec<&OutcomeRecord> {
        self.records
            .values()
            .rev()
            .filter(|r| &r.game == game && r.session == session && r.date < date)
            .take(lookback)
            .collect()
    }
}

impl From<Vec<OutcomeRecord>> for OutcomeHistory {
    fn from(records: Vec<OutcomeRecord>) -> Self {
        Self::new(records)
    }
}

impl From<OutcomeHistory> for Vec<OutcomeRecord> {
    fn from(history: OutcomeHistory) -> Self {
        history.records.into_values().collect()
    }
}
