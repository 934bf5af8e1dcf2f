use crate::error::{GeneticError, Result};
use crate::fitness::{Fitness, FitnessVector};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_operator::SelectionOperator;
use crate::selection::weighted::{check_rankable, check_selectable};

/// Rearranges `indices` so that every member referenced left of `cut` is no fitter
/// than every member referenced at or right of `cut`.
///
/// This is a selection (quickselect), not a sort: neither side is ordered
/// internally. Members with fitness equal to the boundary value may land on either
/// side, but each side has exactly `cut` and `indices.len() - cut` entries. NaN
/// counts as fitter than any number.
///
/// # Examples
///
/// ```
/// use evocore::selection::partition_best_to_right;
///
/// let fitness = vec![5.0, 1.0, 4.0, 2.0, 3.0];
/// let mut indices: Vec<usize> = (0..5).collect();
/// partition_best_to_right(&fitness, &mut indices, 3);
///
/// let mut best: Vec<usize> = indices[3..].to_vec();
/// best.sort_unstable();
/// assert_eq!(best, vec![0, 2]);
/// ```
pub fn partition_best_to_right<V>(fitness: &V, indices: &mut [usize], cut: usize)
where
    V: FitnessVector + ?Sized,
{
    if cut == 0 || cut >= indices.len() {
        return;
    }
    indices.select_nth_unstable_by(cut, |&a, &b| {
        fitness.fitness(a).compare(&fitness.fitness(b))
    });
}

/// Truncation selection.
///
/// Only the `k` fittest members are eligible; each output slot is drawn uniformly
/// among them. When `k` is at least the population size every member is eligible.
///
/// # Examples
///
/// ```
/// use evocore::selection::{SelectionOperator, TruncationSelection};
///
/// let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
/// let mut selection = TruncationSelection::new(2).unwrap();
/// let mut selected = [0usize; 10];
/// selection.select(&fitness, &mut selected).unwrap();
/// assert!(selected.iter().all(|&i| i == 1 || i == 3));
/// ```
#[derive(Debug, Clone)]
pub struct TruncationSelection {
    k: usize,
    indices: Vec<usize>,
    rng: RandomNumberGenerator,
}

impl TruncationSelection {
    /// # Arguments
    ///
    /// * `k` - How many of the fittest members are eligible.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `k` is 0.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(GeneticError::InvalidArgument(
                "Truncation size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            k,
            indices: Vec::new(),
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    /// The number of eligible members.
    pub fn truncation_size(&self) -> usize {
        self.k
    }
}

impl SelectionOperator for TruncationSelection {
    fn select<V>(&mut self, fitness: &V, selected: &mut [usize]) -> Result<()>
    where
        V: FitnessVector + ?Sized,
    {
        let n = fitness.size();
        if !check_selectable(n, selected.len())? {
            return Ok(());
        }
        check_rankable(fitness)?;
        self.indices.clear();
        self.indices.extend(0..n);
        let cut = n.saturating_sub(self.k);
        partition_best_to_right(fitness, &mut self.indices, cut);

        let eligible = n - cut;
        for slot in selected.iter_mut() {
            *slot = self.indices[cut + self.rng.next_index(eligible)];
        }
        Ok(())
    }

    fn split(&self) -> Self {
        Self {
            k: self.k,
            indices: Vec::new(),
            rng: self.rng.split(),
        }
    }
}
