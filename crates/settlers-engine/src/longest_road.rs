//! Longest contiguous road per player.
//!
//! A road is a trail through a player's sides: each side is used at most
//! once, corners may be revisited. The search starts from every claimed side
//! and grows outward from both of its ends with one shared set of used
//! sides, so a closed ring is counted once around and never twice.

use crate::board::{Board, EdgeId, PlayerId, VertexId};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

pub struct LongestRoadSearch<'a> {
    board: &'a Board,
    opponent_structures_block: bool,
}

impl<'a> LongestRoadSearch<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            opponent_structures_block: false,
        }
    }

    /// Whether another player's corner structure cuts a road in two
    pub fn opponent_structures_block(mut self, block: bool) -> Self {
        self.opponent_structures_block = block;
        self
    }

    /// Longest road length for every player owning at least one side
    pub fn execute(&self) -> HashMap<PlayerId, u32> {
        let mut lengths = HashMap::new();

        for (owner, edges) in self.claimed_edges() {
            let longest = edges
                .iter()
                .map(|edge| self.longest_through(owner, *edge))
                .max()
                .unwrap_or(0);
            debug!(owner, edges = edges.len(), longest, "longest road");
            lengths.insert(owner, longest);
        }

        lengths
    }

    /// Longest road for one player, 0 if they own no sides
    pub fn length_for(&self, player: PlayerId) -> u32 {
        self.execute().get(&player).copied().unwrap_or(0)
    }

    /// Owned sides by player, each side once however many tiles share it
    fn claimed_edges(&self) -> BTreeMap<PlayerId, Vec<EdgeId>> {
        let mut visited = HashSet::new();
        let mut claimed: BTreeMap<PlayerId, Vec<EdgeId>> = BTreeMap::new();

        for tile in self.board.tiles() {
            for edge in tile.edges() {
                if !visited.insert(*edge) {
                    continue;
                }
                if let Some(owner) = self.board.edge_slot(*edge).owner() {
                    claimed.entry(owner).or_default().push(*edge);
                }
            }
        }

        claimed
    }

    fn longest_through(&self, owner: PlayerId, edge: EdgeId) -> u32 {
        let [first, second] = self.board.edge_endpoints(edge);
        let mut used = HashSet::from([edge]);
        1 + self.extend(owner, second, &mut used, Some(first))
    }

    /// Longest continuation from `at` over unused sides.
    ///
    /// With `then` set, wherever the trail may stop the search also
    /// continues from that other end, against the same used set.
    fn extend(
        &self,
        owner: PlayerId,
        at: VertexId,
        used: &mut HashSet<EdgeId>,
        then: Option<VertexId>,
    ) -> u32 {
        let mut best = match then {
            Some(other_end) => self.extend(owner, other_end, used, None),
            None => 0,
        };

        if self.is_blocked(owner, at) {
            return best;
        }

        for next in self.board.edges_at_vertex(at) {
            if used.contains(&next) || self.board.edge_slot(next).owner() != Some(owner) {
                continue;
            }
            let Some(far) = self
                .board
                .edge_endpoints(next)
                .into_iter()
                .find(|v| *v != at)
            else {
                continue;
            };

            used.insert(next);
            best = best.max(1 + self.extend(owner, far, used, then));
            used.remove(&next);
        }

        best
    }

    fn is_blocked(&self, owner: PlayerId, vertex: VertexId) -> bool {
        self.opponent_structures_block
            && self
                .board
                .vertex_slot(vertex)
                .owner()
                .is_some_and(|other| other != owner)
    }
}

impl Board {
    /// Calculate the longest road for a player
    pub fn longest_road(&self, player: PlayerId, opponent_structures_block: bool) -> u32 {
        LongestRoadSearch::new(self)
            .opponent_structures_block(opponent_structures_block)
            .length_for(player)
    }
}
