//! Uniform piece randomizer
//!
//! Every draw picks one of the 7 kinds with equal probability, independent
//! of previous draws. Seeded from a `ChaCha8Rng` so a game can be replayed.

use crate::tetromino::TetrominoType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: ChaCha8Rng,
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomizer {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw the next piece kind
    pub fn next(&mut self) -> TetrominoType {
        let index = self.rng.gen_range(0..TetrominoType::ALL.len());
        TetrominoType::ALL[index]
    }
}
