//! Resource production for a dice roll.

use crate::bank::Bank;
use crate::board::{Board, PlayerId, Resource};
use crate::player::{Player, ResourceHand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// What a roll actually paid out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub roll: u8,
    /// Resources credited, per player
    pub granted: BTreeMap<PlayerId, ResourceHand>,
    /// Resource types nobody received because the bank ran short
    pub skipped: Vec<Resource>,
}

impl Distribution {
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    pub fn granted_to(&self, player: PlayerId) -> ResourceHand {
        self.granted.get(&player).copied().unwrap_or_default()
    }
}

impl Board {
    /// Calculate resources produced for a dice roll, before the bank is consulted
    pub fn yield_for_roll(&self, roll: u8) -> BTreeMap<PlayerId, ResourceHand> {
        let mut demand: BTreeMap<PlayerId, ResourceHand> = BTreeMap::new();

        for tile in self.tiles().filter(|t| t.produces_on(roll)) {
            let Some(resource) = tile.resource() else {
                continue;
            };

            for vertex in tile.vertices() {
                let slot = self.vertex_slot(*vertex);
                if let Some(owner) = slot.owner() {
                    demand.entry(owner).or_default().add(resource, slot.total_yield());
                }
            }
        }

        demand
    }

    /// Pay out a roll from the bank.
    ///
    /// Each resource type is withdrawn for all recipients at once. If the bank
    /// cannot cover the total for a type, nobody receives that type; other
    /// types are unaffected. Players not in `players` are ignored.
    pub fn distribute_for_roll(
        &self,
        roll: u8,
        bank: &mut Bank,
        players: &mut [Player],
    ) -> Distribution {
        let mut demand = self.yield_for_roll(roll);
        demand.retain(|id, _| players.iter().any(|p| p.id == *id));

        let mut distribution = Distribution {
            roll,
            ..Default::default()
        };

        for resource in Resource::ALL {
            let total: u32 = demand.values().map(|hand| hand.get(resource)).sum();
            if total == 0 {
                continue;
            }

            if bank.withdraw(resource, total).is_err() {
                warn!(
                    roll,
                    %resource,
                    demand = total,
                    available = bank.balance(resource),
                    "bank short, nobody receives this resource"
                );
                distribution.skipped.push(resource);
                continue;
            }

            for (id, hand) in &demand {
                let amount = hand.get(resource);
                if amount == 0 {
                    continue;
                }
                if let Some(player) = players.iter_mut().find(|p| p.id == *id) {
                    player.resources.add(resource, amount);
                }
                distribution.granted.entry(*id).or_default().add(resource, amount);
            }
        }

        debug!(roll, recipients = distribution.granted.len(), "distributed");
        distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileType;
    use crate::calamity::Calamity;
    use crate::hex::{HexCoord, VertexCoord, VertexDirection};
    use crate::placement::PlacementRules;
    use crate::structure::{Structure, StructureCatalog, StructureKind};
    use pretty_assertions::assert_eq;

    fn board_with_settlement(resource: Resource, chit: u8) -> Board {
        let mut board = Board::new(2).unwrap();
        board
            .set_terrain(HexCoord::new(0, 0), TileType::Resource(resource), chit)
            .unwrap();
        board
            .place_vertex_structure(
                VertexCoord::new(HexCoord::new(0, 0), VertexDirection::Top),
                Structure::new(0, StructureKind::settlement()),
                &PlacementRules::free(),
            )
            .unwrap();
        board
    }

    fn players(count: u8) -> Vec<Player> {
        let catalog = StructureCatalog::standard();
        (0..count)
            .map(|id| Player::new(id, format!("Player {}", id + 1), &catalog))
            .collect()
    }

    #[test]
    fn test_settlement_receives_one() {
        let board = board_with_settlement(Resource::Ore, 6);
        let mut bank = Bank::new(19);
        let mut players = players(2);

        let distribution = board.distribute_for_roll(6, &mut bank, &mut players);

        assert_eq!(players[0].resources.get(Resource::Ore), 1);
        assert_eq!(bank.balance(Resource::Ore), 18);
        assert_eq!(distribution.granted_to(0), ResourceHand::single(Resource::Ore, 1));
        assert!(distribution.skipped.is_empty());
        assert_eq!(players[1].resources.total(), 0);
    }

    #[test]
    fn test_empty_bank_pays_nothing() {
        let board = board_with_settlement(Resource::Ore, 6);
        let mut bank = Bank::with_resources(ResourceHand::with_amounts(5, 5, 0, 5, 5));
        let mut players = players(1);

        let distribution = board.distribute_for_roll(6, &mut bank, &mut players);

        assert_eq!(players[0].resources.get(Resource::Ore), 0);
        assert_eq!(bank.balance(Resource::Ore), 0);
        assert_eq!(distribution.skipped, vec![Resource::Ore]);
        assert!(distribution.is_empty());
    }

    #[test]
    fn test_shortfall_is_all_or_nothing_per_resource() {
        let mut board = board_with_settlement(Resource::Ore, 6);
        // Second producing tile on the same roll, different resource.
        board
            .set_terrain(HexCoord::new(1, 0), TileType::Resource(Resource::Wool), 6)
            .unwrap();
        board
            .place_vertex_structure(
                VertexCoord::new(HexCoord::new(1, 0), VertexDirection::Bottom),
                Structure::new(1, StructureKind::settlement()),
                &PlacementRules::free(),
            )
            .unwrap();
        // Player 1 also sits on the ore tile.
        board
            .place_vertex_structure(
                VertexCoord::new(HexCoord::new(0, 0), VertexDirection::Bottom),
                Structure::new(1, StructureKind::settlement()),
                &PlacementRules::free(),
            )
            .unwrap();

        // Two ore are owed but only one is left.
        let mut bank = Bank::with_resources(ResourceHand::with_amounts(0, 0, 1, 0, 3));
        let mut players = players(2);
        let distribution = board.distribute_for_roll(6, &mut bank, &mut players);

        assert_eq!(distribution.skipped, vec![Resource::Ore]);
        assert_eq!(bank.balance(Resource::Ore), 1);
        assert_eq!(players[0].resources.total(), 0);
        assert_eq!(players[1].resources, ResourceHand::single(Resource::Wool, 1));
        assert_eq!(bank.balance(Resource::Wool), 2);
    }

    #[test]
    fn test_calamity_blocks_tile() {
        let mut board = board_with_settlement(Resource::Grain, 8);
        board
            .place_calamity(HexCoord::new(0, 0), Calamity::robber(0))
            .unwrap();
        let mut bank = Bank::new(19);
        let mut players = players(1);

        let distribution = board.distribute_for_roll(8, &mut bank, &mut players);

        assert!(distribution.is_empty());
        assert_eq!(bank.balance(Resource::Grain), 19);
    }

    #[test]
    fn test_city_yields_two_from_each_adjacent_tile() {
        let mut board = board_with_settlement(Resource::Lumber, 5);
        board
            .set_terrain(HexCoord::new(0, 1), TileType::Resource(Resource::Lumber), 5)
            .unwrap();
        board
            .place_vertex_structure(
                VertexCoord::new(HexCoord::new(0, 0), VertexDirection::Top),
                Structure::new(0, StructureKind::city()),
                &PlacementRules::free(),
            )
            .unwrap();

        assert_eq!(
            board.yield_for_roll(5).get(&0).copied(),
            Some(ResourceHand::single(Resource::Lumber, 4))
        );
        assert!(board.yield_for_roll(9).is_empty());
    }

    #[test]
    fn test_unknown_players_are_ignored() {
        let board = board_with_settlement(Resource::Brick, 4);
        let mut bank = Bank::new(19);
        let mut nobody: Vec<Player> = Vec::new();

        let distribution = board.distribute_for_roll(4, &mut bank, &mut nobody);

        assert!(distribution.is_empty());
        assert_eq!(bank.balance(Resource::Brick), 19);
    }
}
