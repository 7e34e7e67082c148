//! Game configuration

use crate::bank::Bank;
use crate::board::Board;
use crate::structure::{StructureCatalog, StructureKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Everything needed to set up a game, loaded once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub game: GameSettings,
    #[serde(default)]
    pub board: BoardSettings,
    #[serde(default)]
    pub rules: RuleSettings,
    #[serde(default = "default_structures")]
    pub structures: Vec<StructureKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub points_to_win: u32,
    pub player_count: u8,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            points_to_win: 10,
            player_count: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Number of rings, center included
    pub radius: u32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self { radius: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    /// Another player's settlement cuts a road for longest-road purposes
    pub opponent_structures_block_roads: bool,
    /// Hands above this size lose half when the robber is rolled
    pub robber_discard_threshold: u32,
    /// Cards of each resource in the bank; one per tile when unset
    pub initial_bank_per_resource: Option<u32>,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            opponent_structures_block_roads: false,
            robber_discard_threshold: 7,
            initial_bank_per_resource: None,
        }
    }
}

fn default_structures() -> Vec<StructureKind> {
    StructureCatalog::standard().iter().cloned().collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            board: BoardSettings::default(),
            rules: RuleSettings::default(),
            structures: default_structures(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reject configurations the engine cannot set up
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.radius < Board::MIN_RADIUS {
            return Err(ConfigError::Invalid(format!(
                "board radius must be at least {}",
                Board::MIN_RADIUS
            )));
        }
        if self.game.player_count == 0 {
            return Err(ConfigError::Invalid("at least one player is required".into()));
        }
        if self.structures.is_empty() {
            return Err(ConfigError::Invalid("no structures defined".into()));
        }

        let mut names = HashSet::new();
        for kind in &self.structures {
            if !names.insert(kind.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "structure {} defined twice",
                    kind.name
                )));
            }
        }

        for kind in &self.structures {
            let Some(base) = kind.augments.base_kind() else {
                continue;
            };
            match self.structures.iter().find(|k| k.name == base) {
                Some(base) if base.position == kind.position => {}
                Some(_) => {
                    return Err(ConfigError::Invalid(format!(
                        "{} and its base {} are built in different places",
                        kind.name, base
                    )))
                }
                None => {
                    return Err(ConfigError::Invalid(format!(
                        "{} augments unknown structure {}",
                        kind.name, base
                    )))
                }
            }
        }

        Ok(())
    }

    pub fn catalog(&self) -> StructureCatalog {
        StructureCatalog::new(self.structures.clone())
    }

    pub fn build_board(&self) -> Result<Board, crate::error::BoardError> {
        Board::new(self.board.radius)
    }

    /// The opening bank for a board of this configuration
    pub fn initial_bank(&self, board: &Board) -> Bank {
        match self.rules.initial_bank_per_resource {
            Some(per_resource) => Bank::new(per_resource),
            None => Bank::for_tile_count(board.tile_count()),
        }
    }
}
