//! Data-driven structure descriptors.
//!
//! Roads, settlements, cities and anything a configuration adds are all the
//! same type: a [`StructureKind`] carrying its cost, yield and where it may be
//! built. The "city upgrades settlement" family of rules is expressed by the
//! [`Augments`] field instead of a type per structure.

use crate::board::PlayerId;
use crate::error::BoardError;
use crate::player::ResourceHand;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where on a tile a structure is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionType {
    /// Corners: settlements, cities
    Vertex,
    /// Sides: roads
    Edge,
}

/// How a structure relates to one already standing in the same slot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Augments {
    /// Built on an empty slot
    #[default]
    None,
    /// Replaces an existing structure of `base_kind`
    Upgrade { base_kind: String },
    /// Added on top of an existing structure of `base_kind`, which stays
    Extension { base_kind: String },
}

impl Augments {
    /// The kind this structure must be built on, if any
    pub fn base_kind(&self) -> Option<&str> {
        match self {
            Augments::None => None,
            Augments::Upgrade { base_kind } | Augments::Extension { base_kind } => Some(base_kind),
        }
    }
}

/// Catalog entry describing one kind of structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureKind {
    pub name: String,
    pub position: PositionType,
    #[serde(default)]
    pub cost: ResourceHand,
    /// Pieces each player starts with
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub point_value: u32,
    /// Resources produced per matching roll on each adjacent tile
    #[serde(default)]
    pub base_yield: u32,
    #[serde(default)]
    pub augments: Augments,
}

impl StructureKind {
    /// Whether this kind must be built on top of another structure
    pub fn is_augmenting(&self) -> bool {
        !matches!(self.augments, Augments::None)
    }

    /// Whether this kind may be built on an existing structure of `base`
    pub fn can_augment(&self, base: &StructureKind) -> bool {
        self.augments.base_kind() == Some(base.name.as_str()) && self.position == base.position
    }

    /// Road: 1 brick, 1 lumber
    pub fn road() -> Self {
        Self {
            name: "road".into(),
            position: PositionType::Edge,
            cost: ResourceHand::with_amounts(1, 1, 0, 0, 0),
            count: 15,
            point_value: 0,
            base_yield: 0,
            augments: Augments::None,
        }
    }

    /// Settlement: 1 brick, 1 lumber, 1 grain, 1 wool
    pub fn settlement() -> Self {
        Self {
            name: "settlement".into(),
            position: PositionType::Vertex,
            cost: ResourceHand::with_amounts(1, 1, 0, 1, 1),
            count: 5,
            point_value: 1,
            base_yield: 1,
            augments: Augments::None,
        }
    }

    /// City: 3 ore, 2 grain, replaces a settlement
    pub fn city() -> Self {
        Self {
            name: "city".into(),
            position: PositionType::Vertex,
            cost: ResourceHand::with_amounts(0, 0, 3, 2, 0),
            count: 5,
            point_value: 2,
            base_yield: 2,
            augments: Augments::Upgrade {
                base_kind: "settlement".into(),
            },
        }
    }

    /// Castle: 5 ore, replaces a city
    pub fn castle() -> Self {
        Self {
            name: "castle".into(),
            position: PositionType::Vertex,
            cost: ResourceHand::with_amounts(0, 0, 5, 0, 0),
            count: 2,
            point_value: 3,
            base_yield: 3,
            augments: Augments::Upgrade {
                base_kind: "city".into(),
            },
        }
    }
}

/// A structure owned by a player, ready to be placed or already on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub owner: PlayerId,
    pub kind: StructureKind,
}

impl Structure {
    pub fn new(owner: PlayerId, kind: StructureKind) -> Self {
        Self { owner, kind }
    }

    pub fn name(&self) -> &str {
        &self.kind.name
    }

    pub fn position(&self) -> PositionType {
        self.kind.position
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} owned by player {}", self.kind.name, self.owner)
    }
}

/// The set of structure kinds available in a game, loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureCatalog {
    kinds: Vec<StructureKind>,
}

impl StructureCatalog {
    pub fn new(kinds: Vec<StructureKind>) -> Self {
        Self { kinds }
    }

    /// Base game kinds plus the castle demo upgrade
    pub fn standard() -> Self {
        Self::new(vec![
            StructureKind::road(),
            StructureKind::settlement(),
            StructureKind::city(),
            StructureKind::castle(),
        ])
    }

    /// Look up a kind by name
    pub fn get(&self, name: &str) -> Result<&StructureKind, BoardError> {
        self.kinds
            .iter()
            .find(|k| k.name == name)
            .ok_or_else(|| BoardError::UnknownStructure { kind: name.into() })
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructureKind> {
        self.kinds.iter()
    }
}

impl Default for StructureCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
