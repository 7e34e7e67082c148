//! Scripted scenarios driven through the engine.

use serde::{Deserialize, Serialize};
use settlers_engine::{
    EdgeCoord, EdgeDirection, HexCoord, PlayerId, TileType, VertexCoord, VertexDirection,
};
use std::path::Path;

/// A scripted game: who plays, the board, and what happens in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Seed for terrain dealing, dice and robber steals
    #[serde(default)]
    pub seed: u64,
    pub players: Vec<String>,
    /// Fixed terrain; dealt at random when empty
    #[serde(default)]
    pub terrain: Vec<TerrainSpec>,
    /// Where the robber starts with fixed terrain; the first fallow tile otherwise
    #[serde(default)]
    pub robber: Option<HexCoord>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainSpec {
    pub x: i32,
    pub y: i32,
    pub tile_type: TileType,
    #[serde(default)]
    pub chit: u8,
}

/// A corner or side on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "on", rename_all = "snake_case")]
pub enum Position {
    Vertex {
        x: i32,
        y: i32,
        direction: VertexDirection,
    },
    Edge {
        x: i32,
        y: i32,
        direction: EdgeDirection,
    },
}

impl Position {
    pub fn vertex(x: i32, y: i32, direction: VertexDirection) -> Self {
        Position::Vertex { x, y, direction }
    }

    pub fn edge(x: i32, y: i32, direction: EdgeDirection) -> Self {
        Position::Edge { x, y, direction }
    }
}

/// One scripted event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Free settlement plus a road touching it
    Opening {
        player: PlayerId,
        settlement: Position,
        road: Position,
    },

    /// Paid structure in normal play, connected to the player's roads
    Build {
        player: PlayerId,
        kind: String,
        at: Position,
    },

    /// One roll: a fixed value, or the dice when unset
    Roll {
        #[serde(default)]
        value: Option<u8>,
    },

    /// Several dice rolls in a row
    Rolls { count: u32 },
}

impl Scenario {
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

pub fn vertex_coord(x: i32, y: i32, direction: VertexDirection) -> VertexCoord {
    VertexCoord::new(HexCoord::new(x, y), direction)
}

pub fn edge_coord(x: i32, y: i32, direction: EdgeDirection) -> EdgeCoord {
    EdgeCoord::new(HexCoord::new(x, y), direction)
}
