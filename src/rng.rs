//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` and exposes the
//! handful of draws used by selection operators, generation strategies and populations.
//!
//! Every stateful component owns its own generator. `split()` hands out a freshly
//! seeded generator so that copies running on different threads never draw from
//! correlated streams.
//!
//! ## Example
//!
//! ```rust
//! use evocore::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let index = rng.next_index(10);
//! assert!(index < 10);
//!
//! let u = rng.next_f64();
//! assert!((0.0..1.0).contains(&u));
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` that provides the random draws
/// needed by the evolutionary components.
#[derive(Debug, Clone)]
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

    /// Returns an independent generator for use by a split copy.
    ///
    /// The new generator is seeded from system entropy, so it shares no state with
    /// `self` and drawing from one never affects the other.
    pub fn split(&self) -> Self {
        Self::new()
    }

    /// Returns a uniformly distributed index in `[0, bound)`.
    ///
    /// `bound` must be positive.
    pub fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    /// Returns a uniformly distributed value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns a uniformly distributed value in `[low, high)`.
    ///
    /// Returns `low` when the range is empty.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// Shuffles a slice in place.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
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

    #[test]
    fn test_next_index_in_bounds() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        for bound in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_index(bound) < bound);
            }
        }
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        for _ in 0..100 {
            let value = rng.uniform(-3.0, 5.0);
            assert!((-3.0..5.0).contains(&value));
        }
        assert_eq!(rng.uniform(2.0, 2.0), 2.0);
    }

    #[test]
    fn test_clone_repeats_sequence() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        let a: Vec<usize> = (0..10).map(|_| rng1.next_index(1000)).collect();
        let b: Vec<usize> = (0..10).map(|_| rng2.next_index(1000)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_is_independent() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.split();

        let a: Vec<u64> = (0..8).map(|_| rng1.rng.gen()).collect();
        let b: Vec<u64> = (0..8).map(|_| rng2.rng.gen()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let mut values: Vec<usize> = (0..20).collect();
        rng.shuffle(&mut values);
        values.sort_unstable();
        assert_eq!(values, (0..20).collect::<Vec<_>>());
    }
}
