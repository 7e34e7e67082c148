//! Player state and resource management.
//!
//! This module contains:
//! - ResourceHand for managing resource counts
//! - Player struct with resources and structure stock

use crate::bank::Bank;
use crate::board::{PlayerId, Resource};
use crate::error::BoardError;
use crate::structure::{Structure, StructureCatalog, StructureKind};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A hand of resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceHand {
    pub brick: u32,
    pub lumber: u32,
    pub ore: u32,
    pub grain: u32,
    pub wool: u32,
}

impl ResourceHand {
    /// Create an empty hand
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand with specific amounts
    pub fn with_amounts(brick: u32, lumber: u32, ore: u32, grain: u32, wool: u32) -> Self {
        Self {
            brick,
            lumber,
            ore,
            grain,
            wool,
        }
    }

    /// Create a hand with the same amount of every resource
    pub fn uniform(amount: u32) -> Self {
        Self::with_amounts(amount, amount, amount, amount, amount)
    }

    /// Create a hand with a single resource
    pub fn single(resource: Resource, amount: u32) -> Self {
        let mut hand = Self::new();
        hand.add(resource, amount);
        hand
    }

    /// Total number of resource cards
    pub fn total(&self) -> u32 {
        self.brick + self.lumber + self.ore + self.grain + self.wool
    }

    /// Check if hand is empty
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Get count of a specific resource
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Brick => self.brick,
            Resource::Lumber => self.lumber,
            Resource::Ore => self.ore,
            Resource::Grain => self.grain,
            Resource::Wool => self.wool,
        }
    }

    fn slot_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Brick => &mut self.brick,
            Resource::Lumber => &mut self.lumber,
            Resource::Ore => &mut self.ore,
            Resource::Grain => &mut self.grain,
            Resource::Wool => &mut self.wool,
        }
    }

    /// Add resources to hand
    pub fn add(&mut self, resource: Resource, amount: u32) {
        *self.slot_mut(resource) += amount;
    }

    /// Add another hand to this one
    pub fn add_hand(&mut self, other: &ResourceHand) {
        for (resource, amount) in other.iter() {
            self.add(resource, amount);
        }
    }

    /// Remove `amount` of one resource, leaving the hand untouched on shortfall
    pub fn remove(&mut self, resource: Resource, amount: u32) -> Result<(), BoardError> {
        let held = self.slot_mut(resource);
        if *held < amount {
            return Err(BoardError::NotEnoughResources { resource });
        }
        *held -= amount;
        Ok(())
    }

    /// Check if can afford a cost
    pub fn can_afford(&self, cost: &ResourceHand) -> bool {
        self.shortfall(cost).is_none()
    }

    /// First resource this hand lacks to cover `cost`
    pub fn shortfall(&self, cost: &ResourceHand) -> Option<Resource> {
        Resource::ALL
            .into_iter()
            .find(|r| self.get(*r) < cost.get(*r))
    }

    /// Subtract a whole cost, or nothing at all
    pub fn try_subtract(&mut self, cost: &ResourceHand) -> Result<(), BoardError> {
        if let Some(resource) = self.shortfall(cost) {
            return Err(BoardError::NotEnoughResources { resource });
        }
        for (resource, amount) in cost.iter() {
            *self.slot_mut(resource) -= amount;
        }
        Ok(())
    }

    /// Non-zero entries in `Resource::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        Resource::ALL
            .into_iter()
            .map(|r| (r, self.get(r)))
            .filter(|(_, amount)| *amount > 0)
    }

    /// Remove a random resource (for robber stealing)
    pub fn steal_random<R: Rng>(&mut self, rng: &mut R) -> Option<Resource> {
        let available: Vec<Resource> = self
            .iter()
            .flat_map(|(r, amount)| std::iter::repeat(r).take(amount as usize))
            .collect();

        let resource = *available.choose(rng)?;
        *self.slot_mut(resource) -= 1;
        Some(resource)
    }

    /// Pick `count` cards to give up, most plentiful resource first
    pub fn discard_selection(&self, count: u32) -> ResourceHand {
        let mut remaining = *self;
        let mut discard = ResourceHand::new();
        for _ in 0..count {
            let Some(most) = Resource::ALL
                .into_iter()
                .filter(|r| remaining.get(*r) > 0)
                .max_by_key(|r| remaining.get(*r))
            else {
                break;
            };
            *remaining.slot_mut(most) -= 1;
            discard.add(most, 1);
        }
        discard
    }
}

/// A single player's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Current resources
    pub resources: ResourceHand,
    /// Pieces left to build, by structure kind name
    pub remaining_structures: BTreeMap<String, u32>,
    /// Last computed longest road
    pub longest_road_length: u32,
}

impl Player {
    /// Create a new player with a full stock of every catalog kind
    pub fn new(id: PlayerId, name: impl Into<String>, catalog: &StructureCatalog) -> Self {
        Self {
            id,
            name: name.into(),
            resources: ResourceHand::new(),
            remaining_structures: catalog.iter().map(|k| (k.name.clone(), k.count)).collect(),
            longest_road_length: 0,
        }
    }

    pub fn remaining(&self, kind: &str) -> u32 {
        self.remaining_structures.get(kind).copied().unwrap_or(0)
    }

    /// Take one piece of `kind` from stock
    pub fn take_structure(&mut self, kind: &StructureKind) -> Result<Structure, BoardError> {
        match self.remaining_structures.get_mut(&kind.name) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(Structure::new(self.id, kind.clone()))
            }
            _ => Err(BoardError::NotEnoughStructures {
                kind: kind.name.clone(),
            }),
        }
    }

    /// Put a piece back in stock, e.g. after a failed placement
    pub fn restore_structure(&mut self, structure: Structure) {
        *self
            .remaining_structures
            .entry(structure.kind.name)
            .or_insert(0) += 1;
    }

    /// Move `cost` from this player's hand into the bank
    pub fn pay_to_bank(&mut self, cost: &ResourceHand, bank: &mut Bank) -> Result<(), BoardError> {
        self.resources.try_subtract(cost)?;
        bank.deposit_hand(cost);
        Ok(())
    }
}
