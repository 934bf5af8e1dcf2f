//! Running-sum (inverse-CDF) selection shared by the proportional, rank and
//! Boltzmann operators.
//!
//! Each operator turns the fitness vector into a non-decreasing array of cumulative
//! weights in index order. A draw `u` in `[0, total)` maps to the smallest index whose
//! cumulative weight exceeds `u`. Stochastic universal sampling (SUS) uses one random
//! offset and `selected.len()` evenly spaced pointers instead of independent draws.

use std::fmt;
use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::fitness::{Fitness, FitnessVector};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_operator::SelectionOperator;

/// How a running sum is turned into selected indices.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    /// One independent draw per selected slot.
    #[default]
    Roulette,
    /// Stochastic universal sampling: one offset, evenly spaced pointers.
    StochasticUniversal,
}

/// Returns `Ok(false)` when there is nothing to select.
pub(crate) fn check_selectable(size: usize, wanted: usize) -> Result<bool> {
    if wanted == 0 {
        return Ok(false);
    }
    if size == 0 {
        return Err(GeneticError::EmptyPopulation);
    }
    Ok(true)
}

/// Rejects fitness vectors that cannot be ranked because a value is NaN.
pub(crate) fn check_rankable<V>(fitness: &V) -> Result<()>
where
    V: FitnessVector + ?Sized,
{
    match (0..fitness.size()).find(|&i| fitness.fitness(i).is_nan()) {
        Some(index) => Err(GeneticError::NumericalFailure(format!(
            "Fitness of member {} is NaN and cannot be ranked",
            index
        ))),
        None => Ok(()),
    }
}

/// Accumulates `weights` into a running sum, rejecting negative, NaN and infinite
/// weights as well as an overflowing total.
pub(crate) fn accumulate<I>(weights: I, capacity: usize) -> Result<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let mut running = Vec::with_capacity(capacity);
    let mut total = 0.0;
    for (index, weight) in weights.into_iter().enumerate() {
        if !(weight >= 0.0) || !weight.is_finite() {
            return Err(GeneticError::NumericalFailure(format!(
                "Selection weight {} of member {} is not a finite non-negative number",
                weight, index
            )));
        }
        total += weight;
        running.push(total);
    }
    if !total.is_finite() {
        return Err(GeneticError::NumericalFailure(
            "Sum of selection weights overflowed".to_string(),
        ));
    }
    Ok(running)
}

/// Smallest index whose cumulative weight exceeds `u`.
pub(crate) fn lookup(running: &[f64], u: f64) -> usize {
    running
        .partition_point(|&w| w <= u)
        .min(running.len() - 1)
}

/// Fills `selected` from a non-empty running sum.
///
/// If every weight is zero the draw falls back to uniform selection.
pub(crate) fn sample(
    running: &[f64],
    mode: SamplingMode,
    rng: &mut RandomNumberGenerator,
    selected: &mut [usize],
) {
    let n = running.len();
    let total = running[n - 1];
    if total <= 0.0 {
        for slot in selected.iter_mut() {
            *slot = rng.next_index(n);
        }
        return;
    }
    match mode {
        SamplingMode::Roulette => {
            for slot in selected.iter_mut() {
                *slot = lookup(running, rng.uniform(0.0, total));
            }
        }
        SamplingMode::StochasticUniversal => {
            let step = total / selected.len() as f64;
            let offset = rng.uniform(0.0, step);
            // Trailing zero weights are never reachable, whatever the rounding.
            let last = running.partition_point(|&w| w < total);
            let mut index = 0;
            for (i, slot) in selected.iter_mut().enumerate() {
                let pointer = offset + i as f64 * step;
                while index < last && running[index] <= pointer {
                    index += 1;
                }
                *slot = index;
            }
            // Pointers are visited in index order.
            rng.shuffle(selected);
        }
    }
}

/// Transformation applied to raw fitness before it is used as a weight.
#[derive(Clone, Default)]
pub enum FitnessBias {
    #[default]
    Identity,
    Square,
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl FitnessBias {
    pub fn apply(&self, fitness: f64) -> f64 {
        match self {
            FitnessBias::Identity => fitness,
            FitnessBias::Square => fitness * fitness,
            FitnessBias::Custom(bias) => bias(fitness),
        }
    }
}

impl fmt::Debug for FitnessBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitnessBias::Identity => write!(f, "Identity"),
            FitnessBias::Square => write!(f, "Square"),
            FitnessBias::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Fitness proportional selection.
///
/// Each member is selected with probability proportional to its (biased) fitness.
/// Weights must be non-negative; wrap the operator in a
/// [`FitnessShifter`](crate::selection::FitnessShifter) when fitness can be negative.
///
/// # Examples
///
/// ```
/// use evocore::selection::{FitnessBias, FitnessProportionalSelection, SelectionOperator};
///
/// let fitness = vec![1.0, 2.0, 3.0];
/// let selection = FitnessProportionalSelection::new().with_bias(FitnessBias::Square);
/// let running = selection.compute_weight_running_sum(&fitness).unwrap();
/// assert_eq!(running, vec![1.0, 5.0, 14.0]);
/// ```
#[derive(Debug, Clone)]
pub struct FitnessProportionalSelection {
    bias: FitnessBias,
    mode: SamplingMode,
    rng: RandomNumberGenerator,
}

impl FitnessProportionalSelection {
    /// Roulette-wheel sampling with unbiased weights.
    pub fn new() -> Self {
        Self {
            bias: FitnessBias::Identity,
            mode: SamplingMode::Roulette,
            rng: RandomNumberGenerator::new(),
        }
    }

    /// Stochastic universal sampling with unbiased weights.
    pub fn stochastic_universal() -> Self {
        Self {
            mode: SamplingMode::StochasticUniversal,
            ..Self::new()
        }
    }

    pub fn with_bias(mut self, bias: FitnessBias) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn sampling_mode(&self) -> SamplingMode {
        self.mode
    }

    /// Cumulative biased fitness in index order.
    pub fn compute_weight_running_sum<V>(&self, fitness: &V) -> Result<Vec<f64>>
    where
        V: FitnessVector + ?Sized,
    {
        let n = fitness.size();
        accumulate(
            (0..n).map(|i| self.bias.apply(fitness.fitness(i).to_f64())),
            n,
        )
    }
}

impl Default for FitnessProportionalSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionOperator for FitnessProportionalSelection {
    fn select<V>(&mut self, fitness: &V, selected: &mut [usize]) -> Result<()>
    where
        V: FitnessVector + ?Sized,
    {
        if !check_selectable(fitness.size(), selected.len())? {
            return Ok(());
        }
        let running = self.compute_weight_running_sum(fitness)?;
        sample(&running, self.mode, &mut self.rng, selected);
        Ok(())
    }

    fn split(&self) -> Self {
        Self {
            bias: self.bias.clone(),
            mode: self.mode,
            rng: self.rng.split(),
        }
    }
}
