//! Ranked candidate outputs.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{GameId, Session, SignalKind};
use crate::errors::GateError;

/// Final for draw days, preview otherwise. Set exactly once, by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eligibility {
    Final,
    Preview,
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Final => "final",
            Self::Preview => "preview",
        })
    }
}

/// How much one signal contributed to a candidate's confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalContribution {
    pub kind: SignalKind,
    pub weight: f64,
    pub value: f64,
    /// Mean affinity of the candidate's numbers under this signal.
    pub fit: f64,
    pub contribution: f64,
    pub degraded: bool,
}

/// One ±1 replacement applied by the adjacency enhancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub position: usize,
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AdjacencyTrace {
    pub substitutions: Vec<Substitution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub subscriber_id: String,
    pub game: GameId,
    pub date: NaiveDate,
    pub session: Session,
    pub numbers: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<u32>,
    /// In `[0, 100]`.
    pub confidence: f64,
    pub breakdown: Vec<SignalContribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Eligibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacency: Option<AdjacencyTrace>,
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
}

impl Candidate {
    /// Stable id over everything that identifies the pick.
    pub fn compute_id(
        subscriber_id: &str,
        game: &GameId,
        date: NaiveDate,
        session: Session,
        numbers: &[u32],
        bonus: Option<u32>,
    ) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(subscriber_id.as_bytes());
        hasher.update(b"|");
        hasher.update(game.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(date.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(session.as_str().as_bytes());
        for n in numbers {
            hasher.update(b"|");
            hasher.update(&n.to_le_bytes());
        }
        if let Some(b) = bonus {
            hasher.update(b"|b");
            hasher.update(&b.to_le_bytes());
        }
        hasher.finalize().to_hex()[..16].to_string()
    }

    /// Set eligibility. A candidate that already carries one is rejected.
    pub fn mark(mut self, eligibility: Eligibility) -> Result<Self, GateError> {
        if let Some(current) = self.eligibility {
            return Err(GateError::EligibilityAlreadySet {
                candidate_id: self.id,
                current: current.to_string(),
            });
        }
        self.eligibility = Some(eligibility);
        Ok(self)
    }

    pub fn contribution(&self, kind: SignalKind) -> f64 {
        self.breakdown
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.contribution)
            .unwrap_or(0.0)
    }

    pub fn number_sum(&self) -> u64 {
        self.numbers.iter().map(|&n| u64::from(n)).sum()
    }

    pub fn is_enhanced(&self) -> bool {
        self.adjacency.is_some()
    }
}
