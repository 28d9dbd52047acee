//! RNG module - uniform random piece generation
//!
//! Each draw picks one of the seven kinds uniformly and independently of every
//! earlier draw; there is no bag, so droughts and repeats are possible.
//! Seeded PCG keeps a game reproducible from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::types::PieceKind;

/// Seedable source of piece kinds
#[derive(Debug, Clone)]
pub struct PieceRng {
    rng: Pcg32,
}

impl PieceRng {
    /// Create a new generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        PieceKind::from_index(self.rng.random_range(0..PieceKind::ALL.len()))
    }
}

impl Default for PieceRng {
    fn default() -> Self {
        Self::new(1)
    }
}
