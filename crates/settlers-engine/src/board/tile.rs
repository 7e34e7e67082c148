//! Resources, tile types and the tile itself.

use super::slot::{EdgeId, VertexId};
use crate::calamity::Calamity;
use crate::hex::{EdgeDirection, HexCoord, VertexDirection};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five arable resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Brick,
    Lumber,
    Ore,
    Grain,
    Wool,
}

impl Resource {
    /// All resource types
    pub const ALL: [Resource; 5] = [
        Resource::Brick,
        Resource::Lumber,
        Resource::Ore,
        Resource::Grain,
        Resource::Wool,
    ];
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Brick => "brick",
            Resource::Lumber => "lumber",
            Resource::Ore => "ore",
            Resource::Grain => "grain",
            Resource::Wool => "wool",
        };
        f.write_str(name)
    }
}

/// Type of hex tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    /// Produces a resource when its chit is rolled
    Resource(Resource),
    /// Produces nothing
    #[default]
    Fallow,
}

/// Harbor kinds attached to coastal tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Harbor {
    /// 3:1 trade any resource
    Generic,
    /// 2:1 trade for a specific resource
    Specific(Resource),
}

/// Whether `value` is a legal chit for the given tile type.
///
/// Fallow tiles carry 0; arable tiles carry 2..=12 except the calamity roll 7.
pub fn is_valid_chit(tile_type: TileType, value: u8) -> bool {
    match tile_type {
        TileType::Fallow => value == 0,
        TileType::Resource(_) => (2..=12).contains(&value) && value != 7,
    }
}

/// A single hex tile on the board.
///
/// The tile does not own its corners and sides: it holds handles into the
/// board's slot store, shared with the neighbors that touch the same corner
/// or side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    /// Position on the hex grid
    pub coord: HexCoord,
    pub tile_type: TileType,
    /// Dice value that triggers production, 0 for none
    pub chit: u8,
    pub(crate) vertices: [VertexId; 6],
    pub(crate) edges: [EdgeId; 6],
    pub(crate) calamities: Vec<Calamity>,
    /// Reserved for trading rules; only perimeter tiles carry one
    pub harbor: Option<Harbor>,
}

impl Tile {
    pub(crate) fn new(coord: HexCoord, vertices: [VertexId; 6], edges: [EdgeId; 6]) -> Self {
        Self {
            coord,
            tile_type: TileType::Fallow,
            chit: 0,
            vertices,
            edges,
            calamities: Vec::new(),
            harbor: None,
        }
    }

    /// Slot handle of the corner in `direction`
    pub fn vertex(&self, direction: VertexDirection) -> VertexId {
        self.vertices[direction.index()]
    }

    /// Slot handle of the side in `direction`
    pub fn edge(&self, direction: EdgeDirection) -> EdgeId {
        self.edges[direction.index()]
    }

    pub fn vertices(&self) -> &[VertexId; 6] {
        &self.vertices
    }

    pub fn edges(&self) -> &[EdgeId; 6] {
        &self.edges
    }

    /// Get the resource this tile produces, if any
    pub fn resource(&self) -> Option<Resource> {
        match self.tile_type {
            TileType::Resource(r) => Some(r),
            TileType::Fallow => None,
        }
    }

    pub fn calamities(&self) -> &[Calamity] {
        &self.calamities
    }

    pub fn has_calamity(&self, calamity: &Calamity) -> bool {
        self.calamities.contains(calamity)
    }

    /// Whether an attached calamity stops this tile from producing
    pub fn is_blocked(&self) -> bool {
        self.calamities.iter().any(Calamity::blocks_yield)
    }

    /// Check if this tile produces on a roll of `roll`
    pub fn produces_on(&self, roll: u8) -> bool {
        self.resource().is_some() && self.chit == roll && !self.is_blocked()
    }

    pub(crate) fn add_calamity(&mut self, calamity: Calamity) {
        if !self.has_calamity(&calamity) {
            self.calamities.push(calamity);
        }
    }

    pub(crate) fn remove_calamity(&mut self, calamity: &Calamity) -> bool {
        let before = self.calamities.len();
        self.calamities.retain(|c| c != calamity);
        self.calamities.len() != before
    }
}
