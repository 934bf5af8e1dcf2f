//! # Operator Traits
//!
//! The evolutionary core never looks inside a candidate solution. It creates them
//! through an [`Initializer`] and changes them through a [`MutationOperator`] or a
//! [`CrossoverOperator`], all of which are supplied by the caller.
//!
//! Each trait has a `split` method that returns a functionally independent copy for
//! use on another thread. Operators that hold random state must give the copy its
//! own generator.
//!
//! ## Example
//!
//! ```rust
//! use evocore::operators::{Initializer, MutationOperator};
//! use evocore::rng::RandomNumberGenerator;
//!
//! struct BitFlip {
//!     rng: RandomNumberGenerator,
//! }
//!
//! impl MutationOperator<Vec<bool>> for BitFlip {
//!     fn mutate(&mut self, candidate: &mut Vec<bool>) {
//!         let i = self.rng.next_index(candidate.len());
//!         candidate[i] = !candidate[i];
//!     }
//!
//!     fn split(&self) -> Self {
//!         Self { rng: self.rng.split() }
//!     }
//! }
//!
//! let mut op = BitFlip { rng: RandomNumberGenerator::from_seed(1) };
//! let mut bits = vec![false; 8];
//! op.mutate(&mut bits);
//! assert_eq!(bits.iter().filter(|b| **b).count(), 1);
//! ```

/// Capabilities every candidate solution must have.
///
/// Candidates are copied when selected more than once, compared for equality by the
/// elite set, and moved between threads by parallel runs.
pub trait Candidate: Clone + PartialEq + Send + Sync + 'static {}

impl<T> Candidate for T where T: Clone + PartialEq + Send + Sync + 'static {}

/// Produces fresh candidate solutions.
pub trait Initializer<C>: Send {
    /// Creates one new candidate.
    fn create_candidate(&mut self) -> C;

    /// Returns an independent copy for use on another thread.
    fn split(&self) -> Self
    where
        Self: Sized;
}

/// Changes one candidate in place.
pub trait MutationOperator<C>: Send {
    /// Mutates `candidate` in place.
    fn mutate(&mut self, candidate: &mut C);

    /// Returns an independent copy for use on another thread.
    fn split(&self) -> Self
    where
        Self: Sized;
}

/// Recombines two candidates in place.
pub trait CrossoverOperator<C>: Send {
    /// Crosses `first` and `second`; both are changed.
    fn cross(&mut self, first: &mut C, second: &mut C);

    /// Returns an independent copy for use on another thread.
    fn split(&self) -> Self
    where
        Self: Sized;
}
