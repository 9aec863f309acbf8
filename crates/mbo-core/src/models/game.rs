//! Game identity, draw sessions, and per-game rules.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Normalized uppercase game code. Known aliases are folded on construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct GameId(String);

impl GameId {
    pub fn new(raw: &str) -> Self {
        let folded: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_uppercase)
            .collect();
        let canonical = match folded.as_str() {
            "MM" | "MEGA" => "MEGAMILLIONS",
            "PB" => "POWERBALL",
            "C4L" => "CASH4LIFE",
            "PICK3" => "CASH3",
            "PICK4" => "CASH4",
            other => other,
        };
        Self(canonical.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for GameId {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for GameId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scheduled draw slot within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    Midday,
    Evening,
    Night,
    Main,
}

impl Session {
    pub const ALL: [Session; 4] = [Self::Midday, Self::Evening, Self::Night, Self::Main];

    /// Local hour at which the session draws.
    pub fn hour(self) -> u32 {
        match self {
            Self::Midday => 12,
            Self::Evening => 19,
            Self::Night | Self::Main => 23,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Midday => "midday",
            Self::Evening => "evening",
            Self::Night => "night",
            Self::Main => "main",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive number range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: u32,
    pub max: u32,
}

impl NumberRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, n: u32) -> bool {
        n >= self.min && n <= self.max
    }

    pub fn len(&self) -> usize {
        (self.max.saturating_sub(self.min) + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.min..=self.max
    }
}

/// Which neighbor the enhancer tries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NeighborDirection {
    Down,
    Up,
    /// Numbers at or above the pivot go up, the rest go down.
    #[default]
    Split,
    /// Direction drawn from the candidate seed per position.
    Seeded,
}

/// Order in which candidate positions are visited for substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PositionOrder {
    #[default]
    Ascending,
    Descending,
}

/// Neighbor-substitution policy for games that enable the adjacency enhancer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjacencyPolicy {
    pub max_substitutions: usize,
    pub direction: NeighborDirection,
    pub split_pivot: u32,
    pub order: PositionOrder,
}

impl Default for AdjacencyPolicy {
    fn default() -> Self {
        Self {
            max_substitutions: 2,
            direction: NeighborDirection::Split,
            split_pivot: 50,
            order: PositionOrder::Ascending,
        }
    }
}

/// Declarative rule table for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRule {
    pub main_count: usize,
    pub main: NumberRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<NumberRange>,
    /// Digit games keep positional order and allow repeated digits.
    #[serde(default)]
    pub positional: bool,
    pub draw_days: Vec<Weekday>,
    pub sessions: Vec<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacency: Option<AdjacencyPolicy>,
}

impl GameRule {
    pub fn is_draw_day(&self, day: Weekday) -> bool {
        self.draw_days.contains(&day)
    }

    /// Check a number set against this rule. Positional games permit repeats.
    pub fn validate_numbers(
        &self,
        game: &GameId,
        main: &[u32],
        bonus: Option<u32>,
    ) -> Result<(), ValidationError> {
        if main.len() != self.main_count {
            return Err(ValidationError::WrongCount {
                game: game.to_string(),
                expected: self.main_count,
                actual: main.len(),
            });
        }
        for (i, &n) in main.iter().enumerate() {
            if !self.main.contains(n) {
                return Err(ValidationError::NumberOutOfRange {
                    game: game.to_string(),
                    number: n,
                    min: self.main.min,
                    max: self.main.max,
                });
            }
            if !self.positional && main[..i].contains(&n) {
                return Err(ValidationError::DuplicateNumber {
                    game: game.to_string(),
                    number: n,
                });
            }
        }
        match (self.bonus, bonus) {
            (Some(range), Some(b)) if !range.contains(b) => Err(ValidationError::InvalidBonus {
                game: game.to_string(),
                detail: format!("{b} outside [{}, {}]", range.min, range.max),
            }),
            (None, Some(b)) => Err(ValidationError::InvalidBonus {
                game: game.to_string(),
                detail: format!("{b} given but the game has no bonus ball"),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_fold_to_canonical_ids() {
        assert_eq!(GameId::new("MM").as_str(), "MEGAMILLIONS");
        assert_eq!(GameId::new("Mega Millions").as_str(), "MEGAMILLIONS");
        assert_eq!(GameId::new("pb").as_str(), "POWERBALL");
        assert_eq!(GameId::new("Cash_4_Life").as_str(), "CASH4LIFE");
        assert_eq!(GameId::new("c4l").as_str(), "CASH4LIFE");
        assert_eq!(GameId::new("cash3").as_str(), "CASH3");
    }

    #[test]
    fn game_id_deserializes_through_normalization() {
        let id: GameId = serde_json::from_str("\"mega millions\"").unwrap();
        assert_eq!(id, GameId::new("MEGAMILLIONS"));
    }

    #[test]
    fn positional_rules_allow_repeats() {
        let rule = GameRule {
            main_count: 3,
            main: NumberRange::new(0, 9),
            bonus: None,
            positional: true,
            draw_days: vec![Weekday::Mon],
            sessions: vec![Session::Midday],
            adjacency: None,
        };
        assert!(rule.validate_numbers(&GameId::new("CASH3"), &[7, 7, 1], None).is_ok());
    }

    #[test]
    fn pool_rules_reject_duplicates_and_bad_bonus() {
        let rule = GameRule {
            main_count: 3,
            main: NumberRange::new(1, 10),
            bonus: Some(NumberRange::new(1, 4)),
            positional: false,
            draw_days: vec![Weekday::Mon],
            sessions: vec![Session::Main],
            adjacency: None,
        };
        let game = GameId::new("X");
        assert!(matches!(
            rule.validate_numbers(&game, &[1, 1, 2], Some(1)),
            Err(ValidationError::DuplicateNumber { number: 1, .. })
        ));
        assert!(matches!(
            rule.validate_numbers(&game, &[1, 2, 3], Some(9)),
            Err(ValidationError::InvalidBonus { .. })
        ));
        assert!(matches!(
            rule.validate_numbers(&game, &[1, 2, 11], None),
            Err(ValidationError::NumberOutOfRange { number: 11, .. })
        ));
    }
}
