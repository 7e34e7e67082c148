//! Dice for the simulated game.

use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct Dice {
    count: u8,
    faces: u8,
}

impl Dice {
    pub fn new(count: u8, faces: u8) -> Self {
        Self { count, faces }
    }

    /// Sum of the face values after one throw
    pub fn roll<R: Rng>(&self, rng: &mut R) -> u8 {
        (0..self.count).map(|_| rng.gen_range(1..=self.faces)).sum()
    }
}

impl Default for Dice {
    /// Two six-sided dice
    fn default() -> Self {
        Self::new(2, 6)
    }
}
