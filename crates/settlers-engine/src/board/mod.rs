//! Game board representation: tiles, shared slots and board queries.
//!
//! This module contains:
//! - Resource and tile types
//! - The slot store shared between neighboring tiles
//! - Adjacency queries used by the placement rules and road search
//! - Terrain dealing, calamity movement and the harbor hook

mod slot;
mod tile;
mod topology;

pub use slot::{EdgeId, Slot, VertexId};
pub use tile::{is_valid_chit, Harbor, Resource, Tile, TileType};

use crate::calamity::Calamity;
use crate::error::BoardError;
use crate::hex::{EdgeCoord, EdgeDirection, HexCoord, VertexCoord, VertexDirection};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Player identifier
pub type PlayerId = u8;

/// The complete game board.
///
/// Tiles and slots are created together by [`Board::new`] and never resized.
/// Each corner and side exists exactly once in the slot store; every tile
/// touching it holds the same handle, so a structure written through one
/// tile is seen from all of them.
#[derive(Debug, Clone)]
pub struct Board {
    radius: u32,
    /// All tiles indexed by coordinate
    tiles: HashMap<HexCoord, Tile>,
    /// Tile coordinates in ring order
    order: Vec<HexCoord>,
    vertex_slots: Vec<Slot>,
    vertex_coords: Vec<VertexCoord>,
    edge_slots: Vec<Slot>,
    edge_coords: Vec<EdgeCoord>,
}

impl Board {
    pub const MIN_RADIUS: u32 = 1;

    /// Build a board of `radius` concentric rings with shared topology.
    ///
    /// All tiles start fallow with no chit.
    pub fn new(radius: u32) -> Result<Self, BoardError> {
        if radius < Self::MIN_RADIUS {
            return Err(BoardError::InvalidRadius {
                radius,
                min: Self::MIN_RADIUS,
            });
        }

        let topology = topology::build(radius);
        debug!(
            radius,
            tiles = topology.order.len(),
            vertices = topology.vertex_coords.len(),
            edges = topology.edge_coords.len(),
            "built board"
        );

        Ok(Self {
            radius,
            vertex_slots: vec![Slot::Empty; topology.vertex_coords.len()],
            edge_slots: vec![Slot::Empty; topology.edge_coords.len()],
            tiles: topology.tiles,
            order: topology.order,
            vertex_coords: topology.vertex_coords,
            edge_coords: topology.edge_coords,
        })
    }

    /// Build a board and deal terrain and chits with a provided RNG
    pub fn with_random_terrain<R: Rng>(radius: u32, rng: &mut R) -> Result<Self, BoardError> {
        let mut board = Self::new(radius)?;
        board.randomize_terrain(rng);
        Ok(board)
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn tile_count(&self) -> usize {
        self.order.len()
    }

    // ==================== Tile Queries ====================

    pub fn tile_at(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    fn require_tile(&self, coord: HexCoord) -> Result<&Tile, BoardError> {
        self.tiles.get(&coord).ok_or(BoardError::InvalidCoordinates {
            x: coord.x,
            y: coord.y,
        })
    }

    fn require_tile_mut(&mut self, coord: HexCoord) -> Result<&mut Tile, BoardError> {
        self.tiles
            .get_mut(&coord)
            .ok_or(BoardError::InvalidCoordinates {
                x: coord.x,
                y: coord.y,
            })
    }

    /// Tiles in ring order, center first
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.order.iter().map(move |coord| &self.tiles[coord])
    }

    /// Tiles on the outermost ring
    pub fn perimeter_tiles(&self) -> impl Iterator<Item = &Tile> {
        let outer = self.radius - 1;
        self.tiles().filter(move |t| t.coord.ring() == outer)
    }

    pub fn neighbor_tile(&self, tile: &Tile, direction: EdgeDirection) -> Option<&Tile> {
        self.tile_at(tile.coord.neighbor(direction))
    }

    /// The up-to-3 tiles meeting at a corner
    pub fn adjacent_tiles_to_vertex(&self, vertex: VertexCoord) -> Result<Vec<&Tile>, BoardError> {
        let tile = self.require_tile(vertex.hex)?;
        let mut tiles = vec![tile];
        tiles.extend(
            vertex
                .direction
                .edge_directions()
                .into_iter()
                .filter_map(|dir| self.neighbor_tile(tile, dir)),
        );
        Ok(tiles)
    }

    // ==================== Slot Access ====================

    /// Resolve a corner described from any touching tile to its slot handle
    pub fn vertex_id(&self, vertex: VertexCoord) -> Result<VertexId, BoardError> {
        Ok(self.require_tile(vertex.hex)?.vertex(vertex.direction))
    }

    /// Resolve a side described from either touching tile to its slot handle
    pub fn edge_id(&self, edge: EdgeCoord) -> Result<EdgeId, BoardError> {
        Ok(self.require_tile(edge.hex)?.edge(edge.direction))
    }

    pub fn vertex_slot(&self, id: VertexId) -> &Slot {
        &self.vertex_slots[id.index()]
    }

    pub fn edge_slot(&self, id: EdgeId) -> &Slot {
        &self.edge_slots[id.index()]
    }

    pub(crate) fn vertex_slot_mut(&mut self, id: VertexId) -> &mut Slot {
        &mut self.vertex_slots[id.index()]
    }

    pub(crate) fn edge_slot_mut(&mut self, id: EdgeId) -> &mut Slot {
        &mut self.edge_slots[id.index()]
    }

    /// Canonical coordinate of a corner: the first tile that created it
    pub fn vertex_coord(&self, id: VertexId) -> VertexCoord {
        self.vertex_coords[id.index()]
    }

    /// Canonical coordinate of a side: the first tile that created it
    pub fn edge_coord(&self, id: EdgeId) -> EdgeCoord {
        self.edge_coords[id.index()]
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertex_slots.len() as u32).map(VertexId)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edge_slots.len() as u32).map(EdgeId)
    }

    // ==================== Adjacency ====================

    /// The two corners at the ends of a side
    pub fn edge_endpoints(&self, id: EdgeId) -> [VertexId; 2] {
        let coord = self.edge_coord(id);
        let tile = &self.tiles[&coord.hex];
        coord.direction.vertex_directions().map(|dir| tile.vertex(dir))
    }

    /// Sides meeting at a corner.
    ///
    /// Two come from the tile itself; the third runs between the two
    /// neighbors and is found by reprojecting the corner into whichever of
    /// them exists. A corner on the coast with neither neighbor has two.
    pub fn adjacent_edges_to_vertex(&self, vertex: VertexCoord) -> Result<Vec<EdgeId>, BoardError> {
        let tile = self.require_tile(vertex.hex)?;
        Ok(self.edges_around(tile, vertex.direction))
    }

    fn edges_around(&self, tile: &Tile, direction: VertexDirection) -> Vec<EdgeId> {
        let local = direction.edge_directions();
        let mut edges: Vec<EdgeId> = local.iter().map(|dir| tile.edge(*dir)).collect();

        for dir in local {
            let Some(neighbor) = self.neighbor_tile(tile, dir) else {
                continue;
            };
            let Some(projected) = VertexCoord::new(tile.coord, direction).reprojected(dir) else {
                continue;
            };
            // Of the neighbor's two sides at this corner, one is shared with us.
            let outward = projected
                .direction
                .edge_directions()
                .into_iter()
                .find(|their_dir| *their_dir != dir.opposite());
            if let Some(outward) = outward {
                edges.push(neighbor.edge(outward));
            }
            break;
        }

        edges
    }

    /// Sides meeting at a corner, by handle
    pub fn edges_at_vertex(&self, id: VertexId) -> Vec<EdgeId> {
        let coord = self.vertex_coord(id);
        self.edges_around(&self.tiles[&coord.hex], coord.direction)
    }

    /// The up-to-3 corners one side away (the distance-rule neighborhood)
    pub fn adjacent_vertices_to_vertex(
        &self,
        vertex: VertexCoord,
    ) -> Result<Vec<VertexId>, BoardError> {
        let id = self.vertex_id(vertex)?;
        Ok(self.vertices_near(id))
    }

    pub(crate) fn vertices_near(&self, id: VertexId) -> Vec<VertexId> {
        self.edges_at_vertex(id)
            .into_iter()
            .filter_map(|edge| self.edge_endpoints(edge).into_iter().find(|v| *v != id))
            .collect()
    }

    /// The up-to-4 sides sharing a corner with this side
    pub fn adjacent_edges_to_edge(&self, edge: EdgeCoord) -> Result<Vec<EdgeId>, BoardError> {
        let id = self.edge_id(edge)?;
        Ok(self.edges_near(id))
    }

    pub(crate) fn edges_near(&self, id: EdgeId) -> Vec<EdgeId> {
        let mut adjacent = Vec::with_capacity(4);
        for vertex in self.edge_endpoints(id) {
            for other in self.edges_at_vertex(vertex) {
                if other != id && !adjacent.contains(&other) {
                    adjacent.push(other);
                }
            }
        }
        adjacent
    }

    // ==================== Terrain ====================

    /// Set a tile's terrain and chit
    pub fn set_terrain(
        &mut self,
        coord: HexCoord,
        tile_type: TileType,
        chit: u8,
    ) -> Result<(), BoardError> {
        if !is_valid_chit(tile_type, chit) {
            return Err(BoardError::InvalidChitValue { value: chit });
        }
        let tile = self.require_tile_mut(coord)?;
        tile.tile_type = tile_type;
        tile.chit = chit;
        Ok(())
    }

    /// Deal terrain and chits at random.
    ///
    /// Tiles are drawn from whole copies of the base game's pool (4 lumber,
    /// 4 grain, 4 wool, 3 ore, 3 brick, 1 fallow), shuffled before any are
    /// left out. At least one tile is fallow, and a robber is placed on the
    /// first one.
    pub fn randomize_terrain<R: Rng>(&mut self, rng: &mut R) {
        const TERRAIN_CYCLE: [Option<Resource>; 19] = [
            Some(Resource::Lumber),
            Some(Resource::Lumber),
            Some(Resource::Lumber),
            Some(Resource::Lumber),
            Some(Resource::Grain),
            Some(Resource::Grain),
            Some(Resource::Grain),
            Some(Resource::Grain),
            Some(Resource::Wool),
            Some(Resource::Wool),
            Some(Resource::Wool),
            Some(Resource::Wool),
            Some(Resource::Ore),
            Some(Resource::Ore),
            Some(Resource::Ore),
            Some(Resource::Brick),
            Some(Resource::Brick),
            Some(Resource::Brick),
            None,
        ];
        const CHIT_CYCLE: [u8; 18] = [2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

        let tile_count = self.tile_count();
        let copies = tile_count.div_ceil(TERRAIN_CYCLE.len());
        let mut terrain: Vec<Option<Resource>> = TERRAIN_CYCLE
            .iter()
            .copied()
            .cycle()
            .take(copies * TERRAIN_CYCLE.len())
            .collect();
        terrain.shuffle(rng);
        terrain.truncate(tile_count);
        if !terrain.contains(&None) {
            let index = rng.gen_range(0..terrain.len());
            terrain[index] = None;
        }

        let arable: Vec<HexCoord> = self
            .order
            .iter()
            .zip(&terrain)
            .filter(|(_, t)| t.is_some())
            .map(|(coord, _)| *coord)
            .collect();
        let chits: Vec<u8> = CHIT_CYCLE.iter().copied().cycle().take(arable.len()).collect();
        let chits = assign_chits_avoiding_adjacent_68(&arable, &chits, rng);

        let mut chit_iter = chits.into_iter();
        let mut robber_placed = false;
        for (coord, resource) in self.order.clone().into_iter().zip(terrain) {
            let Some(tile) = self.tiles.get_mut(&coord) else {
                continue;
            };
            tile.calamities.clear();
            match resource {
                Some(resource) => {
                    tile.tile_type = TileType::Resource(resource);
                    tile.chit = chit_iter.next().unwrap_or(0);
                }
                None => {
                    tile.tile_type = TileType::Fallow;
                    tile.chit = 0;
                    if !robber_placed {
                        tile.add_calamity(Calamity::robber(0));
                        robber_placed = true;
                    }
                }
            }
        }
    }

    /// Attach harbor metadata to a coastal tile
    pub fn set_harbor(&mut self, coord: HexCoord, harbor: Harbor) -> Result<(), BoardError> {
        let outer = self.radius - 1;
        let tile = self.require_tile_mut(coord)?;
        if coord.ring() != outer {
            return Err(BoardError::NotPerimeterTile {
                x: coord.x,
                y: coord.y,
            });
        }
        tile.harbor = Some(harbor);
        Ok(())
    }

    // ==================== Calamities ====================

    pub fn place_calamity(
        &mut self,
        coord: HexCoord,
        calamity: Calamity,
    ) -> Result<(), BoardError> {
        self.require_tile(coord)?;
        if let Some(tile) = self.tile_with_calamity(&calamity) {
            return Err(BoardError::CalamityAlreadyPlaced {
                x: tile.coord.x,
                y: tile.coord.y,
            });
        }
        self.require_tile_mut(coord)?.add_calamity(calamity);
        Ok(())
    }

    pub fn tile_with_calamity(&self, calamity: &Calamity) -> Option<&Tile> {
        self.tiles().find(|t| t.has_calamity(calamity))
    }

    /// Move a calamity to a different tile, returning where it came from.
    ///
    /// A calamity not yet on the board is simply placed.
    pub fn move_calamity(
        &mut self,
        calamity: Calamity,
        to: HexCoord,
    ) -> Result<Option<HexCoord>, BoardError> {
        self.require_tile(to)?;
        let from = self.tile_with_calamity(&calamity).map(|t| t.coord);
        if from == Some(to) {
            return Err(BoardError::CalamityNotMoved);
        }
        if let Some(from) = from {
            self.require_tile_mut(from)?.remove_calamity(&calamity);
        }
        self.require_tile_mut(to)?.add_calamity(calamity);
        debug!(%calamity, ?from, %to, "moved calamity");
        Ok(from)
    }

    /// Players with a corner structure on a tile (robber steal candidates)
    pub fn players_adjacent_to_tile(
        &self,
        coord: HexCoord,
    ) -> Result<BTreeSet<PlayerId>, BoardError> {
        let tile = self.require_tile(coord)?;
        Ok(tile
            .vertices()
            .iter()
            .filter_map(|id| self.vertex_slot(*id).owner())
            .collect())
    }

    // ==================== Scoring ====================

    /// Victory points from everything a player has built
    pub fn structure_points(&self, player: PlayerId) -> u32 {
        self.vertex_slots
            .iter()
            .chain(&self.edge_slots)
            .filter(|slot| slot.owner() == Some(player))
            .map(Slot::point_value)
            .sum()
    }

    /// Convert to a JSON-friendly representation with arrays instead of HashMaps
    /// This is needed because JSON doesn't support complex types as keys
    pub fn to_json_friendly(&self) -> BoardJson {
        BoardJson {
            radius: self.radius,
            tiles: self
                .tiles()
                .map(|tile| TileJson {
                    x: tile.coord.x,
                    y: tile.coord.y,
                    tile_type: tile.tile_type,
                    chit: tile.chit,
                    calamities: tile.calamities.clone(),
                    harbor: tile.harbor,
                })
                .collect(),
            vertices: self
                .vertex_ids()
                .filter(|id| !self.vertex_slot(*id).is_empty())
                .map(|id| SlotJson {
                    at: self.vertex_coord(id).to_string(),
                    slot: self.vertex_slot(id).clone(),
                })
                .collect(),
            edges: self
                .edge_ids()
                .filter(|id| !self.edge_slot(*id).is_empty())
                .map(|id| SlotJson {
                    at: self.edge_coord(id).to_string(),
                    slot: self.edge_slot(id).clone(),
                })
                .collect(),
        }
    }
}

/// Assign chits to positions while trying to avoid 6 and 8 being adjacent
fn assign_chits_avoiding_adjacent_68<R: Rng>(
    coords: &[HexCoord],
    chits: &[u8],
    rng: &mut R,
) -> Vec<u8> {
    const MAX_ATTEMPTS: usize = 100;

    let mut shuffled = chits.to_vec();
    for _ in 0..MAX_ATTEMPTS {
        shuffled.shuffle(rng);
        if is_valid_chit_placement(coords, &shuffled) {
            break;
        }
    }
    // After many failed attempts the last shuffle stands; small boards may
    // have no valid arrangement at all.
    shuffled
}

/// Check if a chit placement is valid (no adjacent 6 and 8)
fn is_valid_chit_placement(coords: &[HexCoord], chits: &[u8]) -> bool {
    let hot: Vec<HexCoord> = coords
        .iter()
        .zip(chits)
        .filter(|(_, &chit)| chit == 6 || chit == 8)
        .map(|(coord, _)| *coord)
        .collect();

    hot.iter()
        .all(|a| hot.iter().all(|b| a.distance_to(b) != 1))
}

/// JSON-friendly board representation with arrays instead of HashMaps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardJson {
    pub radius: u32,
    pub tiles: Vec<TileJson>,
    pub vertices: Vec<SlotJson>,
    pub edges: Vec<SlotJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileJson {
    pub x: i32,
    pub y: i32,
    pub tile_type: TileType,
    pub chit: u8,
    pub calamities: Vec<Calamity>,
    pub harbor: Option<Harbor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotJson {
    /// Canonical coordinate, e.g. `(0, 0) TR`
    pub at: String,
    pub slot: Slot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::tile_count;
    use crate::structure::{Structure, StructureKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(x: i32, y: i32) -> HexCoord {
        HexCoord::new(x, y)
    }

    #[test]
    fn test_standard_board_has_19_tiles() {
        let board = Board::new(3).unwrap();
        assert_eq!(board.tile_count(), 19);
        assert_eq!(board.tiles().count(), 19);
        assert_eq!(board.perimeter_tiles().count(), 12);
    }

    #[test]
    fn test_zero_radius_rejected() {
        assert_eq!(
            Board::new(0).unwrap_err(),
            BoardError::InvalidRadius { radius: 0, min: 1 }
        );
    }

    #[test]
    fn test_tiles_iterate_in_ring_order() {
        let board = Board::new(2).unwrap();
        let coords: Vec<HexCoord> = board.tiles().map(|t| t.coord).collect();
        assert_eq!(coords[0], at(0, 0));
        assert_eq!(coords[1], at(-1, 0));
        assert_eq!(coords.len(), tile_count(2));
    }

    #[test]
    fn test_lookup_outside_board() {
        let board = Board::new(2).unwrap();
        assert!(board.tile_at(at(5, 5)).is_none());
        assert_eq!(
            board.vertex_id(VertexCoord::new(at(5, 5), VertexDirection::Top)),
            Err(BoardError::InvalidCoordinates { x: 5, y: 5 })
        );
    }

    #[test]
    fn test_shared_edge_is_same_slot() {
        let board = Board::new(3).unwrap();
        let from_center = board.edge_id(EdgeCoord::new(at(0, 0), EdgeDirection::East)).unwrap();
        let from_east = board.edge_id(EdgeCoord::new(at(1, 0), EdgeDirection::West)).unwrap();
        assert_eq!(from_center, from_east);
        assert!(std::ptr::eq(board.edge_slot(from_center), board.edge_slot(from_east)));
    }

    #[test]
    fn test_shared_vertex_is_same_slot() {
        let board = Board::new(3).unwrap();
        let top = board.vertex_id(VertexCoord::new(at(0, 0), VertexDirection::Top)).unwrap();
        let from_ne = board
            .vertex_id(VertexCoord::new(at(0, 1), VertexDirection::BottomLeft))
            .unwrap();
        let from_nw = board
            .vertex_id(VertexCoord::new(at(-1, 1), VertexDirection::BottomRight))
            .unwrap();
        assert_eq!(top, from_ne);
        assert_eq!(top, from_nw);
    }

    #[test]
    fn test_adjacent_tiles_to_vertex() {
        let board = Board::new(3).unwrap();
        let center_top = VertexCoord::new(at(0, 0), VertexDirection::Top);
        let tiles = board.adjacent_tiles_to_vertex(center_top).unwrap();
        let coords: BTreeSet<HexCoord> = tiles.iter().map(|t| t.coord).collect();
        assert_eq!(coords, BTreeSet::from([at(0, 0), at(0, 1), at(-1, 1)]));

        // A corner on the coast touches only the tiles that exist.
        let single = Board::new(1).unwrap();
        assert_eq!(single.adjacent_tiles_to_vertex(center_top).unwrap().len(), 1);
    }

    #[test]
    fn test_adjacent_edges_to_vertex() {
        let board = Board::new(3).unwrap();
        let edges = board
            .adjacent_edges_to_vertex(VertexCoord::new(at(0, 0), VertexDirection::TopRight))
            .unwrap();
        assert_eq!(edges.len(), 3);

        // The outward side runs between the NE and E neighbors.
        let outward = board.edge_id(EdgeCoord::new(at(0, 1), EdgeDirection::SouthEast)).unwrap();
        let outward_again = board
            .edge_id(EdgeCoord::new(at(1, 0), EdgeDirection::NorthWest))
            .unwrap();
        assert_eq!(outward, outward_again);
        assert!(edges.contains(&outward));

        let single = Board::new(1).unwrap();
        let corner = VertexCoord::new(at(0, 0), VertexDirection::Bottom);
        assert_eq!(single.adjacent_edges_to_vertex(corner).unwrap().len(), 2);
    }

    #[test]
    fn test_every_side_touches_its_endpoints() {
        let board = Board::new(3).unwrap();
        for edge in board.edge_ids() {
            for vertex in board.edge_endpoints(edge) {
                assert!(board.edges_at_vertex(vertex).contains(&edge));
            }
        }
    }

    #[test]
    fn test_adjacent_vertices_to_vertex() {
        let board = Board::new(3).unwrap();
        let center_top = VertexCoord::new(at(0, 0), VertexDirection::Top);
        let neighbors = board.adjacent_vertices_to_vertex(center_top).unwrap();
        assert_eq!(neighbors.len(), 3);

        let top_left = board
            .vertex_id(VertexCoord::new(at(0, 0), VertexDirection::TopLeft))
            .unwrap();
        let top_right = board
            .vertex_id(VertexCoord::new(at(0, 0), VertexDirection::TopRight))
            .unwrap();
        assert!(neighbors.contains(&top_left));
        assert!(neighbors.contains(&top_right));
        assert!(!neighbors.contains(&board.vertex_id(center_top).unwrap()));
    }

    #[test]
    fn test_adjacent_edges_to_edge() {
        let board = Board::new(3).unwrap();
        let east = EdgeCoord::new(at(0, 0), EdgeDirection::East);
        let adjacent = board.adjacent_edges_to_edge(east).unwrap();
        assert_eq!(adjacent.len(), 4);
        assert!(!adjacent.contains(&board.edge_id(east).unwrap()));

        let single = Board::new(1).unwrap();
        assert_eq!(single.adjacent_edges_to_edge(east).unwrap().len(), 2);
    }

    #[test]
    fn test_write_visible_from_all_tiles() {
        let mut board = Board::new(3).unwrap();
        let id = board.vertex_id(VertexCoord::new(at(0, 0), VertexDirection::Top)).unwrap();
        board
            .vertex_slot_mut(id)
            .set(Structure::new(2, StructureKind::settlement()));

        for (coord, dir) in [
            (at(0, 0), VertexDirection::Top),
            (at(0, 1), VertexDirection::BottomLeft),
            (at(-1, 1), VertexDirection::BottomRight),
        ] {
            let seen = board.vertex_id(VertexCoord::new(coord, dir)).unwrap();
            assert_eq!(board.vertex_slot(seen).owner(), Some(2));
        }
    }

    #[test]
    fn test_set_terrain_validates_chit() {
        let mut board = Board::new(2).unwrap();
        let ore = TileType::Resource(Resource::Ore);
        board.set_terrain(at(0, 0), ore, 6).unwrap();
        assert_eq!(board.tile_at(at(0, 0)).unwrap().resource(), Some(Resource::Ore));

        assert_eq!(
            board.set_terrain(at(0, 0), ore, 7),
            Err(BoardError::InvalidChitValue { value: 7 })
        );
        assert_eq!(
            board.set_terrain(at(9, 0), ore, 6),
            Err(BoardError::InvalidCoordinates { x: 9, y: 0 })
        );
    }

    #[test]
    fn test_random_terrain_distribution() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::with_random_terrain(3, &mut rng).unwrap();

        let fallow: Vec<&Tile> = board.tiles().filter(|t| t.resource().is_none()).collect();
        assert_eq!(fallow.len(), 1);
        assert!(fallow[0].is_blocked(), "robber starts on the fallow tile");

        let lumber = board
            .tiles()
            .filter(|t| t.resource() == Some(Resource::Lumber))
            .count();
        assert_eq!(lumber, 4);

        for tile in board.tiles() {
            assert!(is_valid_chit(tile.tile_type, tile.chit));
        }
        let mut chits: Vec<u8> = board.tiles().map(|t| t.chit).filter(|c| *c > 0).collect();
        chits.sort_unstable();
        assert_eq!(chits, vec![2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12]);
    }

    #[test]
    fn test_harbor_only_on_perimeter() {
        let mut board = Board::new(3).unwrap();
        board.set_harbor(at(-2, 0), Harbor::Generic).unwrap();
        assert_eq!(board.tile_at(at(-2, 0)).unwrap().harbor, Some(Harbor::Generic));
        assert_eq!(
            board.set_harbor(at(0, 0), Harbor::Specific(Resource::Ore)),
            Err(BoardError::NotPerimeterTile { x: 0, y: 0 })
        );
    }

    #[test]
    fn test_move_calamity() {
        let mut board = Board::new(2).unwrap();
        let robber = Calamity::robber(0);

        assert_eq!(board.move_calamity(robber, at(0, 0)), Ok(None));
        assert!(board.tile_at(at(0, 0)).unwrap().is_blocked());

        assert_eq!(board.move_calamity(robber, at(0, 0)), Err(BoardError::CalamityNotMoved));
        assert_eq!(board.move_calamity(robber, at(1, 0)), Ok(Some(at(0, 0))));
        assert!(!board.tile_at(at(0, 0)).unwrap().is_blocked());
        assert_eq!(board.tile_with_calamity(&robber).unwrap().coord, at(1, 0));
    }

    #[test]
    fn test_calamity_placed_once() {
        let mut board = Board::new(2).unwrap();
        let robber = Calamity::robber(0);
        board.place_calamity(at(0, 0), robber).unwrap();

        assert_eq!(
            board.place_calamity(at(1, 0), robber),
            Err(BoardError::CalamityAlreadyPlaced { x: 0, y: 0 })
        );
        assert!(!board.tile_at(at(1, 0)).unwrap().is_blocked());

        // A different calamity may share the board.
        board.place_calamity(at(1, 0), Calamity::robber(1)).unwrap();

        board.move_calamity(robber, at(-1, 0)).unwrap();
        let blocked: Vec<HexCoord> = board
            .tiles()
            .filter(|t| t.is_blocked())
            .map(|t| t.coord)
            .collect();
        assert_eq!(blocked, vec![at(-1, 0), at(1, 0)]);
        assert!(!board.tile_at(at(0, 0)).unwrap().is_blocked());
    }

    #[test]
    fn test_random_terrain_on_small_boards() {
        let mut seen = BTreeSet::new();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let board = Board::with_random_terrain(2, &mut rng).unwrap();

            let fallow = board.tiles().filter(|t| t.resource().is_none()).count();
            assert!(fallow >= 1);
            assert!(board.tile_with_calamity(&Calamity::robber(0)).is_some());
            seen.extend(board.tiles().filter_map(|t| t.resource()));
        }
        assert!(seen.len() > 2);

        let mut rng = StdRng::seed_from_u64(3);
        let single = Board::with_random_terrain(1, &mut rng).unwrap();
        assert!(single.tile_with_calamity(&Calamity::robber(0)).is_some());
    }
}
