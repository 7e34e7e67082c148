//! Placement rules for structures on corners and sides.
//!
//! Validation never touches the board. A placement is checked in full by
//! [`PlacementValidator::validate`] and only then written, so a failed
//! placement leaves every slot as it was.

use crate::board::{Board, EdgeId, PlayerId, Slot, VertexId};
use crate::error::BoardError;
use crate::hex::{EdgeCoord, VertexCoord};
use crate::structure::{PositionType, Structure};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Situational rules that change with the phase of play
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRules {
    /// The new structure must touch a side the player already owns
    #[serde(default)]
    pub must_border_claimed_edge: bool,
    /// Sides must touch this corner (the opening road off a fresh settlement)
    #[serde(default)]
    pub anchor: Option<VertexCoord>,
}

impl PlacementRules {
    /// Opening settlements: distance rule only
    pub fn free() -> Self {
        Self::default()
    }

    /// Normal play: must connect to the player's roads
    pub fn connected() -> Self {
        Self {
            must_border_claimed_edge: true,
            anchor: None,
        }
    }

    /// Opening road: must touch the settlement just placed
    pub fn anchored(anchor: VertexCoord) -> Self {
        Self {
            must_border_claimed_edge: false,
            anchor: Some(anchor),
        }
    }
}

/// A resolved slot handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Vertex(VertexId),
    Edge(EdgeId),
}

impl Target {
    fn position(self) -> PositionType {
        match self {
            Target::Vertex(_) => PositionType::Vertex,
            Target::Edge(_) => PositionType::Edge,
        }
    }
}

/// Checks a proposed placement against the current board
pub struct PlacementValidator<'a> {
    board: &'a Board,
}

impl<'a> PlacementValidator<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Run every rule in order and report the first violation
    pub fn validate(
        &self,
        target: Target,
        structure: &Structure,
        rules: &PlacementRules,
    ) -> Result<(), BoardError> {
        if structure.position() != target.position() {
            return Err(BoardError::InvalidStructurePlacement);
        }

        match target {
            Target::Vertex(id) => {
                if !self.satisfies_distance_rule(id) {
                    return Err(BoardError::InvalidStructurePlacement);
                }
            }
            Target::Edge(id) => {
                if let Some(anchor) = rules.anchor {
                    let anchor = self.board.vertex_id(anchor)?;
                    if !self.board.edges_at_vertex(anchor).contains(&id) {
                        return Err(BoardError::InvalidStructurePlacement);
                    }
                }
            }
        }

        let slot = self.slot(target);
        self.check_occupant(slot, structure)?;

        if slot.is_empty()
            && rules.must_border_claimed_edge
            && !self.borders_claimed_edge(target, structure.owner)
        {
            return Err(BoardError::InvalidStructurePlacement);
        }

        Ok(())
    }

    fn slot(&self, target: Target) -> &'a Slot {
        match target {
            Target::Vertex(id) => self.board.vertex_slot(id),
            Target::Edge(id) => self.board.edge_slot(id),
        }
    }

    /// No structure on any corner one side away
    fn satisfies_distance_rule(&self, id: VertexId) -> bool {
        self.board
            .vertices_near(id)
            .into_iter()
            .all(|adj| self.board.vertex_slot(adj).is_empty())
    }

    /// An occupied slot only accepts an augmenting structure from its owner
    fn check_occupant(&self, slot: &Slot, structure: &Structure) -> Result<(), BoardError> {
        match slot.structure() {
            None if structure.kind.is_augmenting() => Err(BoardError::InvalidBaseStructure {
                kind: structure.name().to_string(),
                found: "empty slot".to_string(),
            }),
            None => Ok(()),
            Some(occupant) if occupant.owner != structure.owner => {
                Err(BoardError::BoardPositionOccupied)
            }
            Some(occupant) if !structure.kind.can_augment(&occupant.kind) => {
                Err(BoardError::InvalidBaseStructure {
                    kind: structure.name().to_string(),
                    found: occupant.name().to_string(),
                })
            }
            Some(_) => Ok(()),
        }
    }

    /// Whether a side touching the position belongs to `player`
    fn borders_claimed_edge(&self, target: Target, player: PlayerId) -> bool {
        let touching = match target {
            Target::Vertex(id) => self.board.edges_at_vertex(id),
            Target::Edge(id) => self.board.edges_near(id),
        };
        touching
            .into_iter()
            .any(|edge| self.board.edge_slot(edge).owner() == Some(player))
    }
}

impl Board {
    /// Validate and build a corner structure
    pub fn place_vertex_structure(
        &mut self,
        vertex: VertexCoord,
        structure: Structure,
        rules: &PlacementRules,
    ) -> Result<(), BoardError> {
        let target = Target::Vertex(self.vertex_id(vertex)?);
        self.place(target, structure, rules)
    }

    /// Validate and build a side structure
    pub fn place_edge_structure(
        &mut self,
        edge: EdgeCoord,
        structure: Structure,
        rules: &PlacementRules,
    ) -> Result<(), BoardError> {
        let target = Target::Edge(self.edge_id(edge)?);
        self.place(target, structure, rules)
    }

    /// Validate against the resolved slot, then commit
    pub fn place(
        &mut self,
        target: Target,
        structure: Structure,
        rules: &PlacementRules,
    ) -> Result<(), BoardError> {
        PlacementValidator::new(self).validate(target, &structure, rules)?;
        self.commit(target, structure);
        Ok(())
    }

    fn commit(&mut self, target: Target, structure: Structure) {
        match target {
            Target::Vertex(id) => {
                debug!(at = %self.vertex_coord(id), %structure, "built");
                self.vertex_slot_mut(id).set(structure);
            }
            Target::Edge(id) => {
                debug!(at = %self.edge_coord(id), %structure, "built");
                self.edge_slot_mut(id).set(structure);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::{EdgeDirection, HexCoord, VertexDirection};
    use crate::structure::{Augments, StructureKind};
    use pretty_assertions::assert_eq;

    const FREE: PlacementRules = PlacementRules {
        must_border_claimed_edge: false,
        anchor: None,
    };

    fn vertex(x: i32, y: i32, dir: VertexDirection) -> VertexCoord {
        VertexCoord::new(HexCoord::new(x, y), dir)
    }

    fn edge(x: i32, y: i32, dir: EdgeDirection) -> EdgeCoord {
        EdgeCoord::new(HexCoord::new(x, y), dir)
    }

    fn settlement(owner: PlayerId) -> Structure {
        Structure::new(owner, StructureKind::settlement())
    }

    fn road(owner: PlayerId) -> Structure {
        Structure::new(owner, StructureKind::road())
    }

    fn city(owner: PlayerId) -> Structure {
        Structure::new(owner, StructureKind::city())
    }

    #[test]
    fn test_distance_rule_seen_from_every_tile() {
        let mut board = Board::new(3).unwrap();
        board
            .place_vertex_structure(vertex(0, 0, VertexDirection::Top), settlement(0), &FREE)
            .unwrap();

        // The three neighbors of the corner, each described from a different tile.
        let neighbors = [
            vertex(0, 0, VertexDirection::TopLeft),
            vertex(0, 0, VertexDirection::TopRight),
            vertex(0, 1, VertexDirection::TopLeft),
            vertex(-1, 1, VertexDirection::TopRight),
        ];
        for coord in neighbors {
            assert_eq!(
                board.place_vertex_structure(coord, settlement(1), &FREE),
                Err(BoardError::InvalidStructurePlacement),
                "{coord} is one side away"
            );
        }
    }

    #[test]
    fn test_placement_visible_from_converging_tiles() {
        let mut board = Board::new(3).unwrap();
        let placed = vertex(0, 1, VertexDirection::BottomLeft);
        board
            .place_vertex_structure(placed, settlement(2), &FREE)
            .unwrap();
        let placed = board.vertex_id(placed).unwrap();

        // One corner away, described from each of the three tiles that meet there.
        for coord in [
            vertex(0, 0, VertexDirection::TopRight),
            vertex(0, 1, VertexDirection::Bottom),
            vertex(1, 0, VertexDirection::TopLeft),
        ] {
            let seen: Vec<VertexId> = board
                .adjacent_vertices_to_vertex(coord)
                .unwrap()
                .into_iter()
                .filter(|id| board.vertex_slot(*id).owner() == Some(2))
                .collect();
            assert_eq!(seen, vec![placed], "seen from {coord}");
        }
    }

    #[test]
    fn test_non_adjacent_with_claimed_edge_succeeds() {
        let mut board = Board::new(3).unwrap();
        let rules = PlacementRules::connected();
        board
            .place_vertex_structure(vertex(0, 0, VertexDirection::Top), settlement(0), &FREE)
            .unwrap();
        board
            .place_edge_structure(
                edge(0, 0, EdgeDirection::NorthEast),
                road(0),
                &PlacementRules::anchored(vertex(0, 0, VertexDirection::Top)),
            )
            .unwrap();
        board
            .place_edge_structure(edge(0, 0, EdgeDirection::East), road(0), &rules)
            .unwrap();

        // Two sides away from the first settlement, touching the player's road.
        board
            .place_vertex_structure(
                vertex(0, 0, VertexDirection::BottomRight),
                settlement(0),
                &rules,
            )
            .unwrap();
        assert_eq!(
            board.structure_points(0),
            2,
            "two settlements, roads are worth nothing"
        );
    }

    #[test]
    fn test_claimed_edge_required_in_normal_play() {
        let mut board = Board::new(3).unwrap();
        let rules = PlacementRules::connected();

        assert_eq!(
            board.place_vertex_structure(vertex(0, 0, VertexDirection::Top), settlement(0), &rules),
            Err(BoardError::InvalidStructurePlacement)
        );
        assert_eq!(
            board.place_edge_structure(edge(0, 0, EdgeDirection::East), road(0), &rules),
            Err(BoardError::InvalidStructurePlacement)
        );

        board
            .place_edge_structure(edge(0, 0, EdgeDirection::East), road(0), &FREE)
            .unwrap();
        // Another player's road does not count.
        assert_eq!(
            board.place_edge_structure(edge(0, 0, EdgeDirection::SouthEast), road(1), &rules),
            Err(BoardError::InvalidStructurePlacement)
        );
        board
            .place_edge_structure(edge(0, 0, EdgeDirection::SouthEast), road(0), &rules)
            .unwrap();
    }

    #[test]
    fn test_anchor_rule() {
        let mut board = Board::new(3).unwrap();
        let anchor = vertex(0, 0, VertexDirection::TopRight);
        let rules = PlacementRules::anchored(anchor);

        assert_eq!(
            board.place_edge_structure(edge(0, 0, EdgeDirection::SouthWest), road(0), &rules),
            Err(BoardError::InvalidStructurePlacement)
        );
        // The outward side at the anchor, described from the neighbor that owns it.
        board
            .place_edge_structure(edge(1, 0, EdgeDirection::NorthWest), road(0), &rules)
            .unwrap();
    }

    #[test]
    fn test_upgrade_rules() {
        let mut board = Board::new(3).unwrap();
        let corner = vertex(0, 0, VertexDirection::Bottom);
        board
            .place_vertex_structure(corner, settlement(1), &FREE)
            .unwrap();

        assert_eq!(
            board.place_vertex_structure(corner, city(2), &FREE),
            Err(BoardError::BoardPositionOccupied)
        );
        assert_eq!(
            board.place_vertex_structure(corner, settlement(1), &FREE),
            Err(BoardError::InvalidBaseStructure {
                kind: "settlement".into(),
                found: "settlement".into(),
            })
        );

        board
            .place_vertex_structure(corner, city(1), &PlacementRules::connected())
            .unwrap();
        let id = board.vertex_id(corner).unwrap();
        assert_eq!(board.vertex_slot(id).structure().unwrap().name(), "city");

        // The castle upgrades a city, not a settlement.
        let mut other = Board::new(3).unwrap();
        other
            .place_vertex_structure(corner, settlement(1), &FREE)
            .unwrap();
        assert_eq!(
            other.place_vertex_structure(
                corner,
                Structure::new(1, StructureKind::castle()),
                &FREE
            ),
            Err(BoardError::InvalidBaseStructure {
                kind: "castle".into(),
                found: "settlement".into(),
            })
        );
    }

    #[test]
    fn test_augmenting_structure_needs_a_base() {
        let mut board = Board::new(2).unwrap();
        assert_eq!(
            board.place_vertex_structure(vertex(0, 0, VertexDirection::Top), city(0), &FREE),
            Err(BoardError::InvalidBaseStructure {
                kind: "city".into(),
                found: "empty slot".into(),
            })
        );
    }

    #[test]
    fn test_extension_is_appended() {
        let library = StructureKind {
            name: "library".into(),
            position: PositionType::Vertex,
            cost: Default::default(),
            count: 1,
            point_value: 1,
            base_yield: 1,
            augments: Augments::Extension {
                base_kind: "settlement".into(),
            },
        };
        let mut board = Board::new(2).unwrap();
        let corner = vertex(0, 0, VertexDirection::Top);
        board
            .place_vertex_structure(corner, settlement(0), &FREE)
            .unwrap();
        board
            .place_vertex_structure(corner, Structure::new(0, library), &FREE)
            .unwrap();

        let slot = board.vertex_slot(board.vertex_id(corner).unwrap());
        assert_eq!(slot.structure().unwrap().name(), "settlement");
        assert_eq!(slot.extensions().len(), 1);
        assert_eq!(slot.total_yield(), 2);
    }

    #[test]
    fn test_position_type_mismatch() {
        let mut board = Board::new(2).unwrap();
        let id = board.edge_id(edge(0, 0, EdgeDirection::East)).unwrap();
        assert_eq!(
            board.place(Target::Edge(id), settlement(0), &FREE),
            Err(BoardError::InvalidStructurePlacement)
        );
        let id = board.vertex_id(vertex(0, 0, VertexDirection::Top)).unwrap();
        assert_eq!(
            board.place(Target::Vertex(id), road(0), &FREE),
            Err(BoardError::InvalidStructurePlacement)
        );
    }

    #[test]
    fn test_failed_placement_changes_nothing() {
        let mut board = Board::new(2).unwrap();
        board
            .place_vertex_structure(vertex(0, 0, VertexDirection::Top), settlement(0), &FREE)
            .unwrap();
        let before = board.to_json_friendly();

        let corner = vertex(0, 0, VertexDirection::TopRight);
        assert_eq!(
            board.place_vertex_structure(corner, settlement(1), &FREE),
            Err(BoardError::InvalidStructurePlacement)
        );
        assert_eq!(
            board.place_vertex_structure(vertex(0, 0, VertexDirection::Top), city(1), &FREE),
            Err(BoardError::BoardPositionOccupied)
        );

        let after = board.to_json_friendly();
        assert_eq!(before.vertices, after.vertices);
        assert_eq!(before.edges, after.edges);
    }
}
