//! Drives a scenario through the engine and collects what happened.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use settlers_engine::{
    Augments, Bank, Board, BoardError, BoardJson, Calamity, Distribution, GameConfig, HexCoord,
    LongestRoadSearch, PlacementRules, Player, PlayerId, Resource, ResourceHand, Structure,
    StructureCatalog, StructureKind,
};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::dice::Dice;
use crate::scenario::{edge_coord, vertex_coord, Position, Scenario, Step};

/// Shortest road that can hold the longest-road bonus
const MIN_LONGEST_ROAD: u32 = 5;
const LONGEST_ROAD_POINTS: u32 = 2;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("Unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("Scenario has no players")]
    NoPlayers,

    #[error("Scenario has {count} players, at most {max} are supported")]
    TooManyPlayers { count: usize, max: usize },
}

/// Something that happened while running a scenario
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    Built {
        player: PlayerId,
        structure: String,
        at: Position,
    },
    /// The placement or purchase failed; payment and piece were returned
    Rejected {
        player: PlayerId,
        structure: String,
        at: Position,
        reason: BoardError,
    },
    Rolled {
        roller: PlayerId,
        value: u8,
        distribution: Distribution,
    },
    RobberMoved {
        roller: PlayerId,
        to: Option<HexCoord>,
        discards: BTreeMap<PlayerId, ResourceHand>,
        stolen_from: Option<PlayerId>,
        resource: Option<Resource>,
    },
}

/// Final state of one player
#[derive(Debug, Clone, Serialize)]
pub struct Standing {
    pub id: PlayerId,
    pub name: String,
    pub points: u32,
    pub longest_road: u32,
    pub resources: ResourceHand,
    pub remaining_structures: BTreeMap<String, u32>,
}

/// Everything printed at the end of a run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub seed: u64,
    pub events: Vec<SimEvent>,
    pub standings: Vec<Standing>,
    pub longest_road_holder: Option<PlayerId>,
    pub winner: Option<PlayerId>,
    pub bank: ResourceHand,
    pub board: BoardJson,
}

/// A board, a bank and the players, advanced one scripted step at a time
pub struct Simulation {
    config: GameConfig,
    catalog: StructureCatalog,
    board: Board,
    bank: Bank,
    players: Vec<Player>,
    robber: Calamity,
    dice: Dice,
    rng: StdRng,
    seed: u64,
    /// Rolls so far; the roller rotates through the players
    turn: usize,
    events: Vec<SimEvent>,
}

impl Simulation {
    pub fn new(config: GameConfig, scenario: &Scenario) -> Result<Self, SimError> {
        if scenario.players.is_empty() {
            return Err(SimError::NoPlayers);
        }
        if scenario.players.len() != usize::from(config.game.player_count) {
            warn!(
                configured = config.game.player_count,
                scripted = scenario.players.len(),
                "player count differs from config, using the scenario's players"
            );
        }

        let mut rng = StdRng::seed_from_u64(scenario.seed);
        let robber = Calamity::robber(0);
        let mut board = config.build_board()?;

        if scenario.terrain.is_empty() {
            board.randomize_terrain(&mut rng);
        } else {
            for spec in &scenario.terrain {
                board.set_terrain(HexCoord::new(spec.x, spec.y), spec.tile_type, spec.chit)?;
            }
            let start = scenario.robber.or_else(|| {
                board
                    .tiles()
                    .find(|t| t.resource().is_none())
                    .map(|t| t.coord)
            });
            if let Some(start) = start {
                board.place_calamity(start, robber)?;
            }
        }

        let catalog = config.catalog();
        let players = scenario
            .players
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let id = PlayerId::try_from(i).map_err(|_| SimError::TooManyPlayers {
                    count: scenario.players.len(),
                    max: usize::from(PlayerId::MAX) + 1,
                })?;
                Ok(Player::new(id, name.as_str(), &catalog))
            })
            .collect::<Result<Vec<_>, SimError>>()?;
        let bank = config.initial_bank(&board);

        info!(
            radius = board.radius(),
            players = scenario.players.len(),
            seed = scenario.seed,
            "simulation ready"
        );

        Ok(Self {
            config,
            catalog,
            board,
            bank,
            players,
            robber,
            dice: Dice::default(),
            rng,
            seed: scenario.seed,
            turn: 0,
            events: Vec::new(),
        })
    }

    pub fn run(&mut self, steps: &[Step]) -> Result<(), SimError> {
        for step in steps {
            self.step(step)?;
        }
        Ok(())
    }

    /// Apply one step. Rule violations are recorded as events; only
    /// malformed scenarios (unknown players or structure kinds) are errors.
    pub fn step(&mut self, step: &Step) -> Result<(), SimError> {
        match step {
            Step::Opening {
                player,
                settlement,
                road,
            } => {
                let free = PlacementRules::free();
                let built = self.build(*player, "settlement", *settlement, &free, false)?;
                if let (true, Position::Vertex { x, y, direction }) = (built, settlement) {
                    let anchor = PlacementRules::anchored(vertex_coord(*x, *y, *direction));
                    self.build(*player, "road", *road, &anchor, false)?;
                }
                Ok(())
            }
            Step::Build { player, kind, at } => {
                self.build(*player, kind, *at, &PlacementRules::connected(), true)?;
                Ok(())
            }
            Step::Roll { value } => self.roll(*value),
            Step::Rolls { count } => {
                for _ in 0..*count {
                    self.roll(None)?;
                }
                Ok(())
            }
        }
    }

    fn player_index(&self, id: PlayerId) -> Result<usize, SimError> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(SimError::UnknownPlayer(id))
    }

    /// Buy and place one structure, recording the outcome
    fn build(
        &mut self,
        player: PlayerId,
        kind: &str,
        at: Position,
        rules: &PlacementRules,
        paid: bool,
    ) -> Result<bool, SimError> {
        let kind = self.catalog.get(kind)?.clone();
        let index = self.player_index(player)?;

        match self.try_build(index, &kind, at, rules, paid) {
            Ok(()) => {
                debug!(player, structure = %kind.name, ?at, "built");
                self.events.push(SimEvent::Built {
                    player,
                    structure: kind.name,
                    at,
                });
                Ok(true)
            }
            Err(reason) => {
                warn!(player, structure = %kind.name, ?at, %reason, "build rejected");
                self.events.push(SimEvent::Rejected {
                    player,
                    structure: kind.name,
                    at,
                    reason,
                });
                Ok(false)
            }
        }
    }

    /// Pay, take a piece, place it. Anything that fails is undone.
    fn try_build(
        &mut self,
        index: usize,
        kind: &StructureKind,
        at: Position,
        rules: &PlacementRules,
        paid: bool,
    ) -> Result<(), BoardError> {
        let cost = if paid { kind.cost } else { ResourceHand::new() };
        let replaced = self.upgraded_occupant(self.players[index].id, kind, at);
        let player = &mut self.players[index];

        player.pay_to_bank(&cost, &mut self.bank)?;
        let structure = match player.take_structure(kind) {
            Ok(structure) => structure,
            Err(e) => {
                self.bank.refund(&cost, &mut player.resources)?;
                return Err(e);
            }
        };

        let placed = match at {
            Position::Vertex { x, y, direction } => self.board.place_vertex_structure(
                vertex_coord(x, y, direction),
                structure.clone(),
                rules,
            ),
            Position::Edge { x, y, direction } => self.board.place_edge_structure(
                edge_coord(x, y, direction),
                structure.clone(),
                rules,
            ),
        };

        if let Err(e) = placed {
            player.restore_structure(structure);
            self.bank.refund(&cost, &mut player.resources)?;
            return Err(e);
        }

        // An upgrade hands the piece it replaced back to its owner.
        if let Some(replaced) = replaced {
            player.restore_structure(replaced);
        }
        Ok(())
    }

    /// The player's own structure an upgrade at `at` would replace
    fn upgraded_occupant(
        &self,
        player: PlayerId,
        kind: &StructureKind,
        at: Position,
    ) -> Option<Structure> {
        if !matches!(kind.augments, Augments::Upgrade { .. }) {
            return None;
        }
        let slot = match at {
            Position::Vertex { x, y, direction } => self
                .board
                .vertex_id(vertex_coord(x, y, direction))
                .ok()
                .map(|id| self.board.vertex_slot(id))?,
            Position::Edge { x, y, direction } => self
                .board
                .edge_id(edge_coord(x, y, direction))
                .ok()
                .map(|id| self.board.edge_slot(id))?,
        };
        slot.structure()
            .filter(|s| s.owner == player && kind.can_augment(&s.kind))
            .cloned()
    }

    fn roll(&mut self, value: Option<u8>) -> Result<(), SimError> {
        let roller = self.players[self.turn % self.players.len()].id;
        self.turn += 1;

        let value = value.unwrap_or_else(|| self.dice.roll(&mut self.rng));
        info!(roller, value, "rolled");

        if value == self.robber.roll_value() {
            return self.robber_strikes(roller);
        }

        let distribution = self
            .board
            .distribute_for_roll(value, &mut self.bank, &mut self.players);
        self.events.push(SimEvent::Rolled {
            roller,
            value,
            distribution,
        });
        Ok(())
    }

    /// Discard, move the robber, steal
    fn robber_strikes(&mut self, roller: PlayerId) -> Result<(), SimError> {
        let threshold = self.config.rules.robber_discard_threshold;
        let mut discards = BTreeMap::new();

        for player in &mut self.players {
            let count = self.robber.discard_count(player.resources.total(), threshold);
            if count == 0 {
                continue;
            }
            let discard = player.resources.discard_selection(count);
            player.resources.try_subtract(&discard)?;
            self.bank.deposit_hand(&discard);
            discards.insert(player.id, discard);
        }

        let to = self.robber_target(roller);
        let mut stolen_from = None;
        let mut resource = None;

        if let Some(target) = to {
            self.board.move_calamity(self.robber, target)?;

            let victims: Vec<PlayerId> = self
                .board
                .players_adjacent_to_tile(target)?
                .into_iter()
                .filter(|id| *id != roller)
                .filter(|id| self.players.iter().any(|p| p.id == *id && !p.resources.is_empty()))
                .collect();

            if let Some(&victim) = victims.choose(&mut self.rng) {
                let victim_index = self.player_index(victim)?;
                let roller_index = self.player_index(roller)?;
                resource = self.players[victim_index].resources.steal_random(&mut self.rng);
                if let Some(stolen) = resource {
                    self.players[roller_index].resources.add(stolen, 1);
                    stolen_from = Some(victim);
                }
            }
        }

        self.events.push(SimEvent::RobberMoved {
            roller,
            to,
            discards,
            stolen_from,
            resource,
        });
        Ok(())
    }

    /// The tile touching the most opponents and none of the roller's corners
    fn robber_target(&self, roller: PlayerId) -> Option<HexCoord> {
        let current = self.board.tile_with_calamity(&self.robber).map(|t| t.coord);
        let mut best: Option<(usize, HexCoord)> = None;

        for tile in self.board.tiles() {
            if Some(tile.coord) == current {
                continue;
            }
            let owners: Vec<PlayerId> = tile
                .vertices()
                .iter()
                .filter_map(|id| self.board.vertex_slot(*id).owner())
                .collect();
            if owners.contains(&roller) {
                continue;
            }
            if best.map_or(true, |(score, _)| owners.len() > score) {
                best = Some((owners.len(), tile.coord));
            }
        }

        best.map(|(_, coord)| coord)
    }

    /// Score the final position
    pub fn finish(mut self) -> Report {
        let lengths = LongestRoadSearch::new(&self.board)
            .opponent_structures_block(self.config.rules.opponent_structures_block_roads)
            .execute();
        for player in &mut self.players {
            player.longest_road_length = lengths.get(&player.id).copied().unwrap_or(0);
        }
        let holder = longest_road_holder(&self.players);

        let standings: Vec<Standing> = self
            .players
            .iter()
            .map(|p| Standing {
                id: p.id,
                name: p.name.clone(),
                points: self.board.structure_points(p.id)
                    + if holder == Some(p.id) { LONGEST_ROAD_POINTS } else { 0 },
                longest_road: p.longest_road_length,
                resources: p.resources,
                remaining_structures: p.remaining_structures.clone(),
            })
            .collect();

        let points_to_win = self.config.game.points_to_win;
        let winner = standings
            .iter()
            .filter(|s| s.points >= points_to_win)
            .max_by_key(|s| s.points)
            .map(|s| s.id);

        Report {
            seed: self.seed,
            events: self.events,
            standings,
            longest_road_holder: holder,
            winner,
            bank: *self.bank.resources(),
            board: self.board.to_json_friendly(),
        }
    }
}

/// The single player with the longest road of at least the minimum length
fn longest_road_holder(players: &[Player]) -> Option<PlayerId> {
    let longest = players.iter().map(|p| p.longest_road_length).max()?;
    if longest < MIN_LONGEST_ROAD {
        return None;
    }
    let mut leaders = players.iter().filter(|p| p.longest_road_length == longest);
    match (leaders.next(), leaders.next()) {
        (Some(leader), None) => Some(leader.id),
        // Ties hold nobody
        _ => None,
    }
}
