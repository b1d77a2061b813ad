//! Injectable randomness for team, role, word and code draws
//!
//! All random decisions in the game go through [`Randomness`] so tests and
//! replays can script exact permutations and samples.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Source of uniform permutations and samples
pub trait Randomness {
    /// A uniformly random permutation of `0..len`
    fn permutation(&mut self, len: usize) -> Vec<usize>;

    /// `amount` distinct indices from `0..len`, in draw order
    fn sample(&mut self, len: usize, amount: usize) -> Vec<usize>;
}

/// Randomness backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct SystemRandomness<R = StdRng> {
    rng: R,
}

impl SystemRandomness<StdRng> {
    /// Seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SystemRandomness<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SystemRandomness<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Randomness for SystemRandomness<R> {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }

    fn sample(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }
}

/// Replays queued permutations and samples
///
/// When a queue runs dry the identity ordering is returned.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandomness {
    permutations: VecDeque<Vec<usize>>,
    samples: VecDeque<Vec<usize>>,
}

impl ScriptedRandomness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_permutation(mut self, order: Vec<usize>) -> Self {
        self.permutations.push_back(order);
        self
    }

    pub fn with_sample(mut self, picks: Vec<usize>) -> Self {
        self.samples.push_back(picks);
        self
    }
}

impl Randomness for ScriptedRandomness {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        self.permutations
            .pop_front()
            .unwrap_or_else(|| (0..len).collect())
    }

    fn sample(&mut self, len: usize, amount: usize) -> Vec<usize> {
        self.samples
            .pop_front()
            .unwrap_or_else(|| (0..amount.min(len)).collect())
    }
}

impl<T: Randomness + ?Sized> Randomness for &mut T {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (**self).permutation(len)
    }

    fn sample(&mut self, len: usize, amount: usize) -> Vec<usize> {
        (**self).sample(len, amount)
    }
}
