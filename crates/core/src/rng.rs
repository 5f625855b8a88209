//! RNG module - seedable random piece selection.
//!
//! Each spawn draws one of the 7 kinds uniformly at random, matching the
//! classic "pure random" selector rather than a bag randomizer. The LCG is
//! seedable so spawn sequences are reproducible in tests.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Draw a piece kind uniformly at random
    pub fn next_piece(&mut self) -> PieceKind {
        PieceKind::from_index(self.next_range(7))
    }

    /// Current internal state (usable as a seed to replay from here)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
