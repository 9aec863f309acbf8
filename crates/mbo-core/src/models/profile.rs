//! Canonical subscriber profile.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::GameId;
use crate::errors::ValidationError;

/// Subscription tier. Legacy kit names map onto tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Standard,
    Premium,
}

impl Tier {
    /// Standard and Premium outputs are personalized, so birth data is mandatory.
    pub fn requires_birth_data(self) -> bool {
        matches!(self, Self::Standard | Self::Premium)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BASIC" | "BOSK" => Ok(Self::Basic),
            "STANDARD" | "BOOK" => Ok(Self::Standard),
            "PREMIUM" | "BOOK3" => Ok(Self::Premium),
            _ => Err(ValidationError::UnknownTier {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthData {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<BirthLocation>,
}

/// A subscriber after normalization. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberProfile {
    pub id: String,
    pub tier: Tier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<BirthData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Numbers the subscriber sees most often, per game.
    #[serde(default)]
    pub favorite_numbers: BTreeMap<GameId, Vec<u32>>,
}

impl SubscriberProfile {
    pub fn new(id: impl Into<String>, tier: Tier) -> Self {
        Self {
            id: id.into(),
            tier,
            birth: None,
            display_name: None,
            favorite_numbers: BTreeMap::new(),
        }
    }

    pub fn with_birth(mut self, birth: BirthData) -> Self {
        self.birth = Some(birth);
        self
    }

    pub fn with_favorites(mut self, game: GameId, numbers: Vec<u32>) -> Self {
        self.favorite_numbers.insert(game, numbers);
        self
    }

    /// Enforce the tier's birth-data requirement and a non-empty id.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptySubscriberId);
        }
        if self.tier.requires_birth_data() && self.birth.is_none() {
            return Err(ValidationError::MissingBirthData {
                subscriber_id: self.id.clone(),
                tier: self.tier.to_string(),
            });
        }
        Ok(())
    }

    pub fn favorites_for(&self, game: &GameId) -> &[u32] {
        self.favorite_numbers
            .get(game)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
