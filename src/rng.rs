//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for a
//! run. It wraps the `rand` crate's `StdRng` and exposes the handful of draws
//! the genetic operators need.
//!
//! ## Example
//!
//! ```rust
//! use genpass::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let length = rng.gen_range_inclusive(8, 12);
//!
//! assert!((8..=12).contains(&length));
//! ```
//!
//! ## Independent streams
//!
//! Work that may run on several threads takes its own generator obtained with
//! [`RandomNumberGenerator::fork`]. Forks are drawn from the parent in a fixed
//! order, so a seeded run is reproducible no matter how the forks are
//! scheduled afterwards.

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent generator from this one.
    ///
    /// The child is seeded with the next `u64` of the parent, so the sequence
    /// of forks is itself deterministic under a fixed seed.
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.gen())
    }

    /// Draws a `usize` uniformly from `from..=to`.
    ///
    /// # Panics
    ///
    /// Panics if `from > to`.
    pub fn gen_range_inclusive(&mut self, from: usize, to: usize) -> usize {
        self.rng.gen_range(from..=to)
    }

    /// Returns `true` with probability `p`.
    ///
    /// `p == 0.0` never returns `true` and `p == 1.0` always does.
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside `[0, 1]`.
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }

    /// Picks one element uniformly, or `None` if the slice is empty.
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        items.choose(&mut self.rng).copied()
    }

    /// Shuffles the slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Draws `amount` distinct indices from `0..length`, in draw order.
    ///
    /// # Panics
    ///
    /// Panics if `amount > length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, length, amount).into_vec()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_gen_range_inclusive_bounds() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        for _ in 0..200 {
            let value = rng.gen_range_inclusive(3, 5);
            assert!((3..=5).contains(&value));
        }
        assert_eq!(rng.gen_range_inclusive(4, 4), 4);
    }

    #[test]
    fn test_gen_bool_extremes() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        for _ in 0..100 {
            assert!(!rng.gen_bool(0.0));
            assert!(rng.gen_bool(1.0));
        }
    }

    #[test]
    fn test_sample_indices_distinct() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let indices = rng.sample_indices(10, 10);

        assert_eq!(indices.len(), 10);
        let unique: HashSet<usize> = indices.iter().copied().collect();
        assert_eq!(unique.len(), 10);
        assert!(indices.iter().all(|&i| i < 10));
    }

    #[test]
    fn test_choose_empty() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let empty: [char; 0] = [];
        assert_eq!(rng.choose(&empty), None);
        assert_eq!(rng.choose(&['x']), Some('x'));
    }

    #[test]
    fn test_clone() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        let nums1: Vec<usize> = (0..5).map(|_| rng1.gen_range_inclusive(0, 1000)).collect();
        let nums2: Vec<usize> = (0..5).map(|_| rng2.gen_range_inclusive(0, 1000)).collect();

        assert_eq!(nums1, nums2);
    }

    #[test]
    fn test_fork_is_reproducible() {
        let mut parent1 = RandomNumberGenerator::from_seed(9);
        let mut parent2 = RandomNumberGenerator::from_seed(9);

        let mut child1 = parent1.fork();
        let mut child2 = parent2.fork();

        assert_eq!(
            child1.gen_range_inclusive(0, 1_000_000),
            child2.gen_range_inclusive(0, 1_000_000)
        );
    }
}
