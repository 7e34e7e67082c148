//! Settlers - board engine for a hex-tile settlement game
//!
//! This crate provides the spatial and graph logic of the board, including:
//! - Hex coordinate system and ring traversal
//! - Board construction with corners and sides shared between tiles
//! - Structure placement rules
//! - Resource distribution against a finite bank
//! - Longest road search
//!
//! The turn loop, trading and card effects are left to the caller: the
//! engine answers "is this legal", "who gets what" and "how long is it".
//!
//! # Modules
//!
//! - [`hex`]: Coordinate system for tiles, corners and sides
//! - [`board`]: Tiles, the shared slot store and adjacency queries
//! - [`placement`]: Placement validation and commit
//! - [`distribution`]: Per-roll production
//! - [`longest_road`]: Longest road per player
//! - [`structure`]: Data-driven structure kinds
//! - [`config`]: Typed game configuration

pub mod bank;
pub mod board;
pub mod calamity;
pub mod config;
pub mod distribution;
pub mod error;
pub mod hex;
pub mod longest_road;
pub mod placement;
pub mod player;
pub mod structure;

// Re-export commonly used types
pub use bank::Bank;
pub use board::{
    Board, BoardJson, EdgeId, Harbor, PlayerId, Resource, Slot, Tile, TileType, VertexId,
};
pub use calamity::{Calamity, CalamityKind, TileEffect};
pub use config::{ConfigError, GameConfig};
pub use distribution::Distribution;
pub use error::BoardError;
pub use hex::{EdgeCoord, EdgeDirection, HexCoord, VertexCoord, VertexDirection};
pub use longest_road::LongestRoadSearch;
pub use placement::{PlacementRules, PlacementValidator, Target};
pub use player::{Player, ResourceHand};
pub use structure::{Augments, PositionType, Structure, StructureCatalog, StructureKind};
