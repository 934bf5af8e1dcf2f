//! # Fitness
//!
//! Fitness values come in two numeric flavors, `f64` and `i64`. The [`Fitness`]
//! trait captures what the selection and population code needs from either:
//! ordering, a default value, and a conversion to `f64` for weighting.
//!
//! A [`FitnessVector`] is a read-only view over per-member fitness values. Slices and
//! vectors of either flavor implement it directly, and [`FitnessArray::of`] wraps a
//! plain slice explicitly.
//!
//! ```rust
//! use evocore::fitness::{FitnessArray, FitnessVector};
//!
//! let values = [3_i64, 1, 4];
//! let view = FitnessArray::of(&values);
//! assert_eq!(view.size(), 3);
//! assert_eq!(view.fitness(2), 4);
//! ```

pub mod function;

use std::cmp::Ordering;
use std::fmt::Debug;

pub use function::{FitnessFunction, InverseCost, NegativeCost, Problem};

/// A scalar fitness value. Larger is fitter.
pub trait Fitness: Copy + PartialOrd + Debug + Default + Send + Sync + 'static {
    /// Converts the value to `f64` for weight computations.
    fn to_f64(self) -> f64;

    /// Order used for ranking and partitioning. Must be a total order.
    fn compare(&self, other: &Self) -> Ordering;

    /// Whether the value has no place among ordinary fitness values.
    fn is_nan(self) -> bool {
        false
    }
}

impl Fitness for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    /// IEEE 754 total order: NaN sorts above positive infinity.
    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
}

impl Fitness for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// A read-only view over the fitness values of a population.
///
/// `index` passed to [`FitnessVector::fitness`] must lie in `[0, size())`.
pub trait FitnessVector {
    /// The numeric flavor of the values.
    type Value: Fitness;

    /// Number of members.
    fn size(&self) -> usize;

    /// Fitness of member `index`.
    fn fitness(&self, index: usize) -> Self::Value;
}

impl<T: Fitness> FitnessVector for [T] {
    type Value = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn fitness(&self, index: usize) -> T {
        self[index]
    }
}

impl<T: Fitness> FitnessVector for Vec<T> {
    type Value = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn fitness(&self, index: usize) -> T {
        self[index]
    }
}

/// A thin [`FitnessVector`] over a borrowed slice.
#[derive(Debug, Clone, Copy)]
pub struct FitnessArray<'a, T: Fitness> {
    values: &'a [T],
}

impl<'a, T: Fitness> FitnessArray<'a, T> {
    /// Wraps `values` without copying.
    pub fn of(values: &'a [T]) -> Self {
        Self { values }
    }
}

impl<T: Fitness> FitnessVector for FitnessArray<'_, T> {
    type Value = T;

    fn size(&self) -> usize {
        self.values.len()
    }

    fn fitness(&self, index: usize) -> T {
        self.values[index]
    }
}
