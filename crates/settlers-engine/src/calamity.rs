//! Tile-attached calamities such as the robber.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Effect a calamity has on the tile it sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileEffect {
    /// The tile produces nothing while the calamity is there
    BlockYield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalamityKind {
    Robber,
}

/// A calamity piece. Identity is the `id`; a board may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Calamity {
    pub id: u8,
    pub kind: CalamityKind,
}

impl Calamity {
    pub const fn robber(id: u8) -> Self {
        Self {
            id,
            kind: CalamityKind::Robber,
        }
    }

    /// The dice roll that triggers this calamity
    pub fn roll_value(&self) -> u8 {
        match self.kind {
            CalamityKind::Robber => 7,
        }
    }

    pub fn tile_effect(&self) -> TileEffect {
        match self.kind {
            CalamityKind::Robber => TileEffect::BlockYield,
        }
    }

    pub fn blocks_yield(&self) -> bool {
        self.tile_effect() == TileEffect::BlockYield
    }

    /// Cards a player holding `hand_total` must give up when triggered
    pub fn discard_count(&self, hand_total: u32, threshold: u32) -> u32 {
        match self.kind {
            CalamityKind::Robber if hand_total > threshold => hand_total / 2,
            CalamityKind::Robber => 0,
        }
    }
}

impl fmt::Display for Calamity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CalamityKind::Robber => write!(f, "robber #{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robber() {
        let robber = Calamity::robber(0);
        assert_eq!(robber.roll_value(), 7);
        assert!(robber.blocks_yield());
        assert_eq!(robber.discard_count(7, 7), 0);
        assert_eq!(robber.discard_count(9, 7), 4);
    }
}
