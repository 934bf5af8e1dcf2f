use crate::error::{GeneticError, Result};
use crate::fitness::{Fitness, FitnessVector};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_operator::SelectionOperator;
use crate::selection::weighted::{
    accumulate, check_rankable, check_selectable, sample, SamplingMode,
};

/// Ascending rank of every member: the least fit member has rank 0. Ties are broken
/// by original index. NaN ranks above every other value.
pub(crate) fn ranks<V>(fitness: &V) -> Vec<usize>
where
    V: FitnessVector + ?Sized,
{
    let n = fitness.size();
    let mut order: Vec<usize> = (0..n).collect();
    // Stable, so equal fitness keeps index order.
    order.sort_by(|&a, &b| fitness.fitness(a).compare(&fitness.fitness(b)));
    let mut rank = vec![0; n];
    for (r, &index) in order.iter().enumerate() {
        rank[index] = r;
    }
    rank
}

/// Linear rank selection.
///
/// The member of rank `r` (0 = least fit) among `n` gets weight
/// `2 - c + 2(c - 1) r / (n - 1)`, where `c` in `[1, 2]` controls selection pressure:
/// at 1 every member is equally likely, at 2 the least fit member is never selected.
///
/// # Examples
///
/// ```
/// use evocore::selection::LinearRankSelection;
///
/// let selection = LinearRankSelection::new(2.0).unwrap();
/// let running = selection.compute_weight_running_sum(&vec![3.0, 1.0, 2.0]);
/// assert_eq!(running, vec![2.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LinearRankSelection {
    /// Higher values increase selection pressure.
    selection_pressure: f64,
    mode: SamplingMode,
    rng: RandomNumberGenerator,
}

impl LinearRankSelection {
    /// Roulette sampling over linear rank weights.
    ///
    /// # Arguments
    ///
    /// * `selection_pressure` - Expected number of copies of the fittest member per
    ///   `n` draws. 1 selects uniformly, 2 gives the least fit member weight 0.
    ///
    /// # Returns
    ///
    /// A new LinearRankSelection seeded from entropy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `selection_pressure` is not in `[1, 2]`.
    pub fn new(selection_pressure: f64) -> Result<Self> {
        if !(1.0..=2.0).contains(&selection_pressure) {
            return Err(GeneticError::InvalidArgument(
                "Selection pressure must be in the range [1.0, 2.0]".to_string(),
            ));
        }

        Ok(Self {
            selection_pressure,
            mode: SamplingMode::Roulette,
            rng: RandomNumberGenerator::new(),
        })
    }

    /// Stochastic universal sampling over linear rank weights.
    pub fn stochastic_universal(selection_pressure: f64) -> Result<Self> {
        let mut selection = Self::new(selection_pressure)?;
        selection.mode = SamplingMode::StochasticUniversal;
        Ok(selection)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn selection_pressure(&self) -> f64 {
        self.selection_pressure
    }

    fn weight(&self, rank: usize, n: usize) -> f64 {
        if n < 2 {
            return 1.0;
        }
        let c = self.selection_pressure;
        2.0 - c + 2.0 * (c - 1.0) * rank as f64 / (n - 1) as f64
    }

    /// Cumulative rank weights in index order.
    pub fn compute_weight_running_sum<V>(&self, fitness: &V) -> Vec<f64>
    where
        V: FitnessVector + ?Sized,
    {
        let n = fitness.size();
        let mut total = 0.0;
        ranks(fitness)
            .into_iter()
            .map(|rank| {
                total += self.weight(rank, n);
                total
            })
            .collect()
    }
}

impl SelectionOperator for LinearRankSelection {
    fn select<V>(&mut self, fitness: &V, selected: &mut [usize]) -> Result<()>
    where
        V: FitnessVector + ?Sized,
    {
        if !check_selectable(fitness.size(), selected.len())? {
            return Ok(());
        }
        check_rankable(fitness)?;
        let running = self.compute_weight_running_sum(fitness);
        sample(&running, self.mode, &mut self.rng, selected);
        Ok(())
    }

    fn split(&self) -> Self {
        Self {
            selection_pressure: self.selection_pressure,
            mode: self.mode,
            rng: self.rng.split(),
        }
    }
}

/// Exponential rank selection.
///
/// The member of rank `r` (0 = least fit) among `n` gets weight `c^(n - 1 - r)`, with
/// `c` in `(0, 1)`. Smaller `c` means stronger pressure toward the fittest.
#[derive(Debug, Clone)]
pub struct ExponentialRankSelection {
    c: f64,
    mode: SamplingMode,
    rng: RandomNumberGenerator,
}

impl ExponentialRankSelection {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `c` is not in `(0, 1)`.
    pub fn new(c: f64) -> Result<Self> {
        if !(c > 0.0 && c < 1.0) {
            return Err(GeneticError::InvalidArgument(
                "Exponential rank base must be in the range (0.0, 1.0)".to_string(),
            ));
        }
        Ok(Self {
            c,
            mode: SamplingMode::Roulette,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn stochastic_universal(c: f64) -> Result<Self> {
        let mut selection = Self::new(c)?;
        selection.mode = SamplingMode::StochasticUniversal;
        Ok(selection)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    /// Cumulative rank weights in index order.
    pub fn compute_weight_running_sum<V>(&self, fitness: &V) -> Result<Vec<f64>>
    where
        V: FitnessVector + ?Sized,
    {
        let n = fitness.size();
        accumulate(
            ranks(fitness)
                .into_iter()
                .map(|rank| self.c.powi((n - 1 - rank) as i32)),
            n,
        )
    }
}

impl SelectionOperator for ExponentialRankSelection {
    fn select<V>(&mut self, fitness: &V, selected: &mut [usize]) -> Result<()>
    where
        V: FitnessVector + ?Sized,
    {
        if !check_selectable(fitness.size(), selected.len())? {
            return Ok(());
        }
        check_rankable(fitness)?;
        let running = self.compute_weight_running_sum(fitness)?;
        sample(&running, self.mode, &mut self.rng, selected);
        Ok(())
    }

    fn split(&self) -> Self {
        Self {
            c: self.c,
            mode: self.mode,
            rng: self.rng.split(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_ranks_break_ties_by_index() {
        assert_eq!(ranks(&vec![3.0, 1.0, 2.0]), vec![2, 0, 1]);
        assert_eq!(ranks(&vec![5_i64, 5, 1, 5]), vec![1, 2, 0, 3]);
        assert_eq!(ranks(&vec![7.0]), vec![0]);
    }

    #[test]
    fn test_linear_rank_running_sum() {
        let fitness = vec![3.0, 1.0, 2.0];

        let uniform = LinearRankSelection::new(1.0).unwrap();
        assert_close(&uniform.compute_weight_running_sum(&fitness), &[1.0, 2.0, 3.0]);

        let strong = LinearRankSelection::new(2.0).unwrap();
        assert_close(&strong.compute_weight_running_sum(&fitness), &[2.0, 2.0, 3.0]);

        let medium = LinearRankSelection::new(1.5).unwrap();
        assert_close(&medium.compute_weight_running_sum(&fitness), &[1.5, 2.0, 3.0]);
    }

    #[test]
    fn test_linear_rank_single_member() {
        let selection = LinearRankSelection::new(2.0).unwrap();
        assert_close(&selection.compute_weight_running_sum(&vec![4_i64]), &[1.0]);
    }

    #[test]
    fn test_exponential_rank_running_sum() {
        let selection = ExponentialRankSelection::new(0.5).unwrap();
        let running = selection
            .compute_weight_running_sum(&vec![3.0, 1.0, 2.0])
            .unwrap();
        assert_close(&running, &[1.0, 1.25, 1.75]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(LinearRankSelection::new(0.99).is_err());
        assert!(LinearRankSelection::new(2.01).is_err());
        assert!(LinearRankSelection::stochastic_universal(f64::NAN).is_err());
        assert!(ExponentialRankSelection::new(0.0).is_err());
        assert!(ExponentialRankSelection::new(1.0).is_err());
        assert!(ExponentialRankSelection::stochastic_universal(1.5).is_err());
    }

    #[test]
    fn test_nan_fitness_is_a_numerical_failure() {
        let fitness: Vec<f64> = (0..40)
            .map(|i| if i % 3 == 0 { f64::NAN } else { i as f64 })
            .collect();
        assert_eq!(ranks(&fitness).iter().filter(|&&r| r >= 26).count(), 14);

        let mut selected = [0usize; 10];
        let mut linear = LinearRankSelection::new(2.0).unwrap();
        assert!(matches!(
            linear.select(&fitness, &mut selected),
            Err(GeneticError::NumericalFailure(_))
        ));
        let mut exponential = ExponentialRankSelection::stochastic_universal(0.9).unwrap();
        assert!(matches!(
            exponential.select(&fitness, &mut selected),
            Err(GeneticError::NumericalFailure(_))
        ));
    }

    #[test]
    fn test_sus_never_picks_least_fit_at_full_pressure() {
        let fitness: Vec<f64> = (0..7).map(|i| 0.1 * i as f64).rev().collect();
        let mut selection = LinearRankSelection::stochastic_universal(2.0)
            .unwrap()
            .with_seed(5);
        for len in [1, 3, 6, 7, 13, 100] {
            let mut selected = vec![0usize; len];
            selection.select(&fitness, &mut selected).unwrap();
            assert!(selected.iter().all(|&i| i != 6), "len {}: {:?}", len, selected);
        }
    }

    #[test]
    fn test_strong_linear_pressure_never_picks_least_fit() {
        let mut selection = LinearRankSelection::new(2.0).unwrap().with_seed(4);
        let mut selected = [0usize; 500];
        selection
            .select(&vec![2.0, 0.5, 3.0, 1.0], &mut selected)
            .unwrap();
        assert!(selected.iter().all(|&i| i != 1));
    }
}
