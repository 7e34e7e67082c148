//! The shared, finite pool of resource cards.

use crate::board::Resource;
use crate::error::BoardError;
use crate::player::ResourceHand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    resources: ResourceHand,
}

impl Bank {
    /// A bank holding `per_resource` cards of every arable resource
    pub fn new(per_resource: u32) -> Self {
        Self {
            resources: ResourceHand::uniform(per_resource),
        }
    }

    /// One card of each resource per tile on the board.
    ///
    /// The base game ships 19 cards of each resource for 19 tiles; this
    /// keeps that ratio for other board sizes.
    pub fn for_tile_count(tile_count: usize) -> Self {
        Self::new(tile_count as u32)
    }

    pub fn with_resources(resources: ResourceHand) -> Self {
        Self { resources }
    }

    pub fn balance(&self, resource: Resource) -> u32 {
        self.resources.get(resource)
    }

    pub fn resources(&self) -> &ResourceHand {
        &self.resources
    }

    /// Take `count` cards of one resource, or none if the bank is short
    pub fn withdraw(&mut self, resource: Resource, count: u32) -> Result<(), BoardError> {
        self.resources.remove(resource, count)
    }

    pub fn deposit(&mut self, resource: Resource, count: u32) {
        self.resources.add(resource, count);
    }

    pub fn deposit_hand(&mut self, hand: &ResourceHand) {
        self.resources.add_hand(hand);
    }

    /// Give a purchase back: move `cost` from the bank into `hand`
    pub fn refund(
        &mut self,
        cost: &ResourceHand,
        hand: &mut ResourceHand,
    ) -> Result<(), BoardError> {
        self.resources.try_subtract(cost)?;
        hand.add_hand(cost);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdraw_and_deposit() {
        let mut bank = Bank::new(2);
        bank.withdraw(Resource::Ore, 2).unwrap();
        assert_eq!(bank.balance(Resource::Ore), 0);
        assert_eq!(bank.balance(Resource::Wool), 2);

        bank.deposit(Resource::Ore, 1);
        assert_eq!(bank.balance(Resource::Ore), 1);
    }

    #[test]
    fn test_withdraw_shortfall_leaves_balance() {
        let mut bank = Bank::new(1);
        assert_eq!(
            bank.withdraw(Resource::Grain, 2),
            Err(BoardError::NotEnoughResources {
                resource: Resource::Grain
            })
        );
        assert_eq!(bank.balance(Resource::Grain), 1);
    }

    #[test]
    fn test_refund() {
        let mut bank = Bank::new(0);
        let mut hand = ResourceHand::with_amounts(1, 1, 0, 0, 0);
        let cost = hand;

        bank.deposit_hand(&cost);
        hand = ResourceHand::new();
        bank.refund(&cost, &mut hand).unwrap();
        assert_eq!(hand, cost);
        assert!(bank.resources().is_empty());
    }

    #[test]
    fn test_bank_scales_with_board() {
        let bank = Bank::for_tile_count(19);
        assert_eq!(bank.resources().total(), 19 * 5);
    }
}
