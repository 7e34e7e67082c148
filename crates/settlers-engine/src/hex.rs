//! Hex coordinate system using axial coordinates (x, y).
//!
//! This module provides the foundational coordinate types for the board:
//! - `HexCoord`: identifies individual hex tiles
//! - `EdgeDirection` / `VertexDirection`: the six sides and six corners of a
//!   pointy-top hex, both listed clockwise
//! - `VertexCoord` / `EdgeCoord`: a corner or side as seen from one tile
//!
//! Tiles are enumerated ring by ring (see [`ring_coordinates`]). The board
//! construction relies on that ordering: when a tile is visited, only
//! neighbors at earlier positions can already exist.
//!
//! A `VertexCoord` or `EdgeCoord` is *located* rather than canonical: the
//! same corner can be described from up to three tiles. The board resolves
//! every description to one shared slot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an edge relative to a hex, clockwise from NorthEast.
///
/// Each edge borders the neighbor in that direction, so every edge direction
/// doubles as an axial unit vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeDirection {
    /// Northeast edge (top-right)
    NorthEast,
    /// East edge (right)
    East,
    /// Southeast edge (bottom-right)
    SouthEast,
    /// Southwest edge (bottom-left)
    SouthWest,
    /// West edge (left)
    West,
    /// Northwest edge (top-left)
    NorthWest,
}

impl EdgeDirection {
    /// All edge directions in clockwise order starting from NorthEast
    pub const ALL: [EdgeDirection; 6] = [
        EdgeDirection::NorthEast,
        EdgeDirection::East,
        EdgeDirection::SouthEast,
        EdgeDirection::SouthWest,
        EdgeDirection::West,
        EdgeDirection::NorthWest,
    ];

    /// Position in the clockwise ordering.
    pub const fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// Axial `(dx, dy)` step to the neighbor across this edge.
    pub const fn unit_vector(self) -> (i32, i32) {
        match self {
            EdgeDirection::NorthEast => (0, 1),
            EdgeDirection::East => (1, 0),
            EdgeDirection::SouthEast => (1, -1),
            EdgeDirection::SouthWest => (0, -1),
            EdgeDirection::West => (-1, 0),
            EdgeDirection::NorthWest => (-1, 1),
        }
    }

    /// The edge on the far side of the hex. Also the direction the neighbor
    /// across this edge uses for the same shared edge.
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// The two corners this edge runs between, in clockwise order.
    pub fn vertex_directions(self) -> [VertexDirection; 2] {
        let i = self.index();
        [VertexDirection::from_index(i), VertexDirection::from_index(i + 1)]
    }
}

impl fmt::Display for EdgeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeDirection::NorthEast => "NE",
            EdgeDirection::East => "E",
            EdgeDirection::SouthEast => "SE",
            EdgeDirection::SouthWest => "SW",
            EdgeDirection::West => "W",
            EdgeDirection::NorthWest => "NW",
        };
        f.write_str(name)
    }
}

/// Direction of a vertex (corner) relative to a hex, clockwise from Top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VertexDirection {
    /// Top vertex of the hex
    Top,
    TopRight,
    BottomRight,
    /// Bottom vertex of the hex
    Bottom,
    BottomLeft,
    TopLeft,
}

impl VertexDirection {
    /// All vertex directions in clockwise order starting from Top
    pub const ALL: [VertexDirection; 6] = [
        VertexDirection::Top,
        VertexDirection::TopRight,
        VertexDirection::BottomRight,
        VertexDirection::Bottom,
        VertexDirection::BottomLeft,
        VertexDirection::TopLeft,
    ];

    /// Position in the clockwise ordering.
    pub const fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// The corner diagonally across the hex.
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// The two edges of the same hex that meet at this corner.
    ///
    /// The first edge ends at this corner, the second one starts here.
    pub fn edge_directions(self) -> [EdgeDirection; 2] {
        let i = self.index();
        [EdgeDirection::from_index(i + 5), EdgeDirection::from_index(i)]
    }
}

impl fmt::Display for VertexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VertexDirection::Top => "T",
            VertexDirection::TopRight => "TR",
            VertexDirection::BottomRight => "BR",
            VertexDirection::Bottom => "B",
            VertexDirection::BottomLeft => "BL",
            VertexDirection::TopLeft => "TL",
        };
        f.write_str(name)
    }
}

/// Reproject a corner into the frame of the neighbor across `edge_dir`.
///
/// Returns `None` when `edge_dir` is not one of the two edges meeting at
/// `vertex_dir`, since the neighbor in that direction does not touch the
/// corner at all.
pub fn equivalent_vertex_dir_on_neighbor(
    vertex_dir: VertexDirection,
    edge_dir: EdgeDirection,
) -> Option<VertexDirection> {
    let [ending, starting] = vertex_dir.edge_directions();
    let v = vertex_dir.index();
    if edge_dir == starting {
        // Corner is the first endpoint of the shared edge; seen from the
        // other side it becomes the second endpoint of the opposite edge.
        Some(VertexDirection::from_index(v + 4))
    } else if edge_dir == ending {
        Some(VertexDirection::from_index(v + 2))
    } else {
        None
    }
}

/// Axial coordinate for the hex grid.
///
/// - `x` increases going east
/// - `y` increases going northeast
/// - The third cubic coordinate `z` (not stored) satisfies x + y + z = 0
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
}

impl HexCoord {
    /// Create a new hex coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The implicit third coordinate (z = -x - y)
    pub const fn z(&self) -> i32 {
        -self.x - self.y
    }

    /// Get the neighbor in a specific direction
    pub fn neighbor(&self, direction: EdgeDirection) -> HexCoord {
        let (dx, dy) = direction.unit_vector();
        HexCoord::new(self.x + dx, self.y + dy)
    }

    /// The six neighboring hexes in clockwise order starting from NorthEast
    pub fn neighbors(&self) -> [HexCoord; 6] {
        EdgeDirection::ALL.map(|dir| self.neighbor(dir))
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        let dz = (self.z() - other.z()).abs();
        ((dx + dy + dz) / 2) as u32
    }

    /// Index of the concentric ring this hex lies on (0 for the center).
    pub fn ring(&self) -> u32 {
        self.distance_to(&HexCoord::default())
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Coordinates of one ring of tiles, clockwise from the westernmost tile.
///
/// Ring 0 is the single center tile. Ring `n` has `6n` tiles and is walked
/// in six straight runs: up the northwest side, along the north side, down
/// the northeast side, down the southeast side, back along the south side
/// and up the southwest side.
pub fn ring_coordinates(ring_index: u32) -> Vec<HexCoord> {
    let n = ring_index as i32;
    if n == 0 {
        return vec![HexCoord::default()];
    }

    let mut coords = Vec::with_capacity(6 * ring_index as usize);
    let mut x = -n;
    let mut y = 0;

    // Northwest side: walk along the y axis.
    while y != n {
        coords.push(HexCoord::new(x, y));
        y += 1;
    }
    // North side: walk along the x axis.
    while x != 0 {
        coords.push(HexCoord::new(x, y));
        x += 1;
    }
    // Northeast side: walk along the z axis.
    while x != n || y != 0 {
        coords.push(HexCoord::new(x, y));
        x += 1;
        y -= 1;
    }
    // Southeast side.
    while y != -n {
        coords.push(HexCoord::new(x, y));
        y -= 1;
    }
    // South side.
    while x != 0 {
        coords.push(HexCoord::new(x, y));
        x -= 1;
    }
    // Southwest side, ending next to the start.
    while x != -n {
        coords.push(HexCoord::new(x, y));
        x -= 1;
        y += 1;
    }

    coords
}

/// Coordinates of every tile on a board of `radius` rings, innermost first.
pub fn board_coordinates(radius: u32) -> Vec<HexCoord> {
    (0..radius).flat_map(ring_coordinates).collect()
}

/// Number of tiles on a board of `radius` rings: `1 + 3R(R-1)`.
pub const fn tile_count(radius: u32) -> usize {
    if radius == 0 {
        0
    } else {
        1 + 3 * (radius as usize) * (radius as usize - 1)
    }
}

/// A corner as seen from one particular tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexCoord {
    pub hex: HexCoord,
    pub direction: VertexDirection,
}

impl VertexCoord {
    pub const fn new(hex: HexCoord, direction: VertexDirection) -> Self {
        Self { hex, direction }
    }

    /// The same corner described from the neighbor across `edge_dir`.
    pub fn reprojected(&self, edge_dir: EdgeDirection) -> Option<VertexCoord> {
        equivalent_vertex_dir_on_neighbor(self.direction, edge_dir)
            .map(|dir| VertexCoord::new(self.hex.neighbor(edge_dir), dir))
    }
}

impl fmt::Display for VertexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hex, self.direction)
    }
}

/// A side as seen from one particular tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeCoord {
    pub hex: HexCoord,
    pub direction: EdgeDirection,
}

impl EdgeCoord {
    pub const fn new(hex: HexCoord, direction: EdgeDirection) -> Self {
        Self { hex, direction }
    }

    /// The same edge described from the neighbor on the other side.
    pub fn mirrored(&self) -> EdgeCoord {
        EdgeCoord::new(self.hex.neighbor(self.direction), self.direction.opposite())
    }
}

impl fmt::Display for EdgeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hex, self.direction)
    }
}
