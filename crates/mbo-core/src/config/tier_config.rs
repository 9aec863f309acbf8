use serde::{Deserialize, Serialize};

use crate::models::{GameId, SignalKind, Tier};

/// What one tier is entitled to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPolicy {
    pub signals: Vec<SignalKind>,
    pub games: Vec<GameId>,
    /// Receives non-final previews on non-draw days.
    #[serde(default)]
    pub preview: bool,
}

impl TierPolicy {
    pub fn enables(&self, kind: SignalKind) -> bool {
        self.signals.contains(&kind)
    }

    pub fn includes_game(&self, game: &GameId) -> bool {
        self.games.contains(game)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    pub basic: TierPolicy,
    pub standard: TierPolicy,
    pub premium: TierPolicy,
}

impl TierConfig {
    pub fn policy(&self, tier: Tier) -> &TierPolicy {
        match tier {
            Tier::Basic => &self.basic,
            Tier::Standard => &self.standard,
            Tier::Premium => &self.premium,
        }
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        let all_games: Vec<GameId> = ["CASH3", "CASH4", "MEGAMILLIONS", "POWERBALL", "CASH4LIFE"]
            .into_iter()
            .map(GameId::new)
            .collect();
        Self {
            basic: TierPolicy {
                signals: vec![SignalKind::Frequency, SignalKind::Adjacency],
                games: vec![GameId::new("CASH3"), GameId::new("CASH4")],
                preview: false,
            },
            standard: TierPolicy {
                signals: SignalKind::ALL.to_vec(),
                games: all_games.clone(),
                preview: false,
            },
            premium: TierPolicy {
                signals: SignalKind::ALL.to_vec(),
                games: all_games,
                preview: true,
            },
        }
    }
}
