//! Error taxonomy shared by the board, the placement rules and the bank.

use crate::board::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by board construction, lookups, placement and purchases.
///
/// Every placement error is raised before the board is touched, so a caller
/// receiving one can assume nothing changed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    /// Distance rule, anchor rule or claimed-edge rule violated
    #[error("Invalid structure placement")]
    InvalidStructurePlacement,

    /// Upgrade or extension built on the wrong kind of structure
    #[error("{kind} cannot be built on {found}")]
    InvalidBaseStructure { kind: String, found: String },

    /// Slot already holds another player's structure
    #[error("Board position is occupied by another player")]
    BoardPositionOccupied,

    #[error("Not enough {resource:?} cards")]
    NotEnoughResources { resource: Resource },

    #[error("No {kind} pieces remaining")]
    NotEnoughStructures { kind: String },

    #[error("No tile at ({x}, {y})")]
    InvalidCoordinates { x: i32, y: i32 },

    #[error("Board radius must be at least {min}, got {radius}")]
    InvalidRadius { radius: u32, min: u32 },

    #[error("Invalid chit value {value}")]
    InvalidChitValue { value: u8 },

    #[error("Unknown structure kind {kind}")]
    UnknownStructure { kind: String },

    /// A calamity must move to a different tile
    #[error("Calamity must move to a different tile")]
    CalamityNotMoved,

    /// A calamity is on one tile at a time; use `move_calamity` to relocate it
    #[error("Calamity is already on tile ({x}, {y})")]
    CalamityAlreadyPlaced { x: i32, y: i32 },

    #[error("Tile ({x}, {y}) is not on the perimeter")]
    NotPerimeterTile { x: i32, y: i32 },
}
