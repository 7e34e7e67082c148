//! One-time construction of the tile graph with shared corners and sides.
//!
//! Tiles are created in ring order. For each corner and side of a new tile
//! we look at the neighbors that were already created: if one of them
//! already touches that position, the new tile adopts the neighbor's slot
//! handle. Otherwise a fresh slot is allocated, and tiles created later will
//! adopt it in turn. The first `(x, y, direction)` that allocates a slot is
//! its canonical coordinate.

use super::slot::{EdgeId, VertexId};
use super::tile::Tile;
use crate::hex::{
    board_coordinates, equivalent_vertex_dir_on_neighbor, EdgeCoord, EdgeDirection, HexCoord,
    VertexCoord, VertexDirection,
};
use std::collections::HashMap;

/// Tiles plus the canonical coordinate of every slot, indexed by handle
pub(crate) struct Topology {
    pub tiles: HashMap<HexCoord, Tile>,
    pub order: Vec<HexCoord>,
    pub vertex_coords: Vec<VertexCoord>,
    pub edge_coords: Vec<EdgeCoord>,
}

pub(crate) fn build(radius: u32) -> Topology {
    let order = board_coordinates(radius);
    let mut topology = Topology {
        tiles: HashMap::with_capacity(order.len()),
        order: Vec::with_capacity(order.len()),
        vertex_coords: Vec::new(),
        edge_coords: Vec::new(),
    };

    for coord in order {
        let vertices = VertexDirection::ALL.map(|dir| topology.sync_vertex(coord, dir));
        let edges = EdgeDirection::ALL.map(|dir| topology.sync_edge(coord, dir));
        topology.tiles.insert(coord, Tile::new(coord, vertices, edges));
        topology.order.push(coord);
    }

    topology
}

impl Topology {
    /// Adopt the corner from an existing neighbor, or allocate it.
    fn sync_vertex(&mut self, coord: HexCoord, dir: VertexDirection) -> VertexId {
        for edge_dir in dir.edge_directions() {
            let Some(neighbor) = self.tiles.get(&coord.neighbor(edge_dir)) else {
                continue;
            };
            if let Some(their_dir) = equivalent_vertex_dir_on_neighbor(dir, edge_dir) {
                return neighbor.vertex(their_dir);
            }
        }

        let id = VertexId(self.vertex_coords.len() as u32);
        self.vertex_coords.push(VertexCoord::new(coord, dir));
        id
    }

    /// Adopt the side from the neighbor across it, or allocate it.
    fn sync_edge(&mut self, coord: HexCoord, dir: EdgeDirection) -> EdgeId {
        if let Some(neighbor) = self.tiles.get(&coord.neighbor(dir)) {
            return neighbor.edge(dir.opposite());
        }

        let id = EdgeId(self.edge_coords.len() as u32);
        self.edge_coords.push(EdgeCoord::new(coord, dir));
        id
    }
}
