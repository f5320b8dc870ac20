//! Random permutations of `0..n`, drawn one value at a time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws each value of `0..n` exactly once, in random order.
///
/// After the last draw, [`reset`](Self::reset) makes every value available
/// again for a second pass in a fresh order.
#[derive(Debug, Clone)]
pub struct Permutation {
    pool: Vec<u32>,
    remaining: usize,
    rng: StdRng,
}

impl Permutation {
    pub fn new(n: u32, rng: StdRng) -> Self {
        Self {
            pool: (0..n).collect(),
            remaining: n as usize,
            rng,
        }
    }

    pub fn seeded(n: u32, seed: u64) -> Self {
        Self::new(n, StdRng::seed_from_u64(seed))
    }

    /// Values not yet drawn in this pass
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn reset(&mut self) {
        self.remaining = self.pool.len();
    }
}

impl Iterator for Permutation {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let pick = self.rng.random_range(0..self.remaining);
        self.remaining -= 1;
        // drawn values collect at the tail, out of reach of later picks
        self.pool.swap(pick, self.remaining);
        Some(self.pool[self.remaining])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
