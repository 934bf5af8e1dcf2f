use std::fmt::Debug;

use crate::error::Result;
use crate::fitness::FitnessVector;

/// Trait for selection operators.
///
/// A selection operator maps a [`FitnessVector`] to indices of selected members.
/// Selection is with replacement: `selected` may be shorter than, as long as, or
/// longer than the vector, and every index written is in `[0, fitness.size())`.
///
/// # Examples
///
/// ```
/// use evocore::selection::{SelectionOperator, TournamentSelection};
///
/// let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
/// let mut selection = TournamentSelection::default();
/// let mut selected = [0usize; 8];
/// selection.select(&fitness, &mut selected).unwrap();
///
/// assert!(selected.iter().all(|&i| i < fitness.len()));
/// ```
pub trait SelectionOperator: Debug + Send + Sized {
    /// Fills `selected` with indices into `fitness`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if `fitness` is empty and `selected` is not, and
    /// `NumericalFailure` if a weighted operator computes an unusable weight.
    fn select<V>(&mut self, fitness: &V, selected: &mut [usize]) -> Result<()>
    where
        V: FitnessVector + ?Sized;

    /// Called once before a run with the planned number of generations.
    ///
    /// Operators with schedules reset them here.
    fn init(&mut self, _generations: usize) {}

    /// Returns a functionally independent copy: mutable state and random streams
    /// are not shared with `self`.
    fn split(&self) -> Self;
}
