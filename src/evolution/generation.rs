//! # Generation Strategies
//!
//! A [`Generation`] applies variation to the mutable slots of a population that has
//! just been selected, and re-evaluates the slots it changed. The driver calls
//! `select`, then [`Generation::step`], then `replace`.
//!
//! | Strategy | Crossover | Mutation |
//! |---|---|---|
//! | [`MutationOnly`] | none | every slot |
//! | [`MutationCrossover`] | adjacent pairs, fixed rate | every slot |
//! | [`AdaptiveMutationOnly`] | none | per slot, rate from parameter 0 |
//! | [`AdaptiveMutationCrossover`] | adjacent pairs, rate from parameter 0 | per slot, rate from parameter 1 |

use crate::error::{GeneticError, Result};
use crate::fitness::FitnessFunction;
use crate::operators::{Candidate, CrossoverOperator, Initializer, MutationOperator};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionOperator;

/// One generation of variation over a selected population.
pub trait Generation<C: Candidate>: Send {
    /// Width of the evolvable parameter vector the strategy reads, 0 if none.
    fn required_parameters(&self) -> usize {
        0
    }

    /// Varies the mutable slots of `population` and returns the number of fitness
    /// evaluations performed.
    ///
    /// # Errors
    ///
    /// Propagates population errors, for example when the population is not in the
    /// selected state.
    fn step<I, F, S>(&mut self, population: &mut Population<C, I, F, S>) -> Result<usize>
    where
        I: Initializer<C>,
        F: FitnessFunction<C>,
        S: SelectionOperator;

    /// Returns an independent copy for use on another thread.
    fn split(&self) -> Self
    where
        Self: Sized;
}

/// Mutates every mutable slot.
#[derive(Debug, Clone)]
pub struct MutationOnly<M> {
    mutation: M,
}

impl<M> MutationOnly<M> {
    pub fn new(mutation: M) -> Self {
        Self { mutation }
    }
}

impl<C, M> Generation<C> for MutationOnly<M>
where
    C: Candidate,
    M: MutationOperator<C>,
{
    fn step<I, F, S>(&mut self, population: &mut Population<C, I, F, S>) -> Result<usize>
    where
        I: Initializer<C>,
        F: FitnessFunction<C>,
        S: SelectionOperator,
    {
        let mutable = population.mutable_size();
        for index in 0..mutable {
            self.mutation.mutate(population.candidate_mut(index)?);
            population.update_fitness(index)?;
        }
        Ok(mutable)
    }

    fn split(&self) -> Self {
        Self::new(self.mutation.split())
    }
}

/// Crosses adjacent pairs `(0, 1), (2, 3), ...` with a fixed probability, then
/// mutates every mutable slot.
#[derive(Debug, Clone)]
pub struct MutationCrossover<M, X> {
    mutation: M,
    crossover: X,
    crossover_rate: f64,
    rng: RandomNumberGenerator,
}

impl<M, X> MutationCrossover<M, X> {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `crossover_rate` is outside `[0, 1]`.
    pub fn new(mutation: M, crossover: X, crossover_rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&crossover_rate) {
            return Err(GeneticError::InvalidArgument(
                "Crossover rate must be in the range [0.0, 1.0]".to_string(),
            ));
        }
        Ok(Self {
            mutation,
            crossover,
            crossover_rate,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }
}

impl<C, M, X> Generation<C> for MutationCrossover<M, X>
where
    C: Candidate,
    M: MutationOperator<C>,
    X: CrossoverOperator<C>,
{
    fn step<I, F, S>(&mut self, population: &mut Population<C, I, F, S>) -> Result<usize>
    where
        I: Initializer<C>,
        F: FitnessFunction<C>,
        S: SelectionOperator,
    {
        let mutable = population.mutable_size();
        for first in (0..mutable.saturating_sub(1)).step_by(2) {
            if self.rng.next_f64() < self.crossover_rate {
                let (a, b) = population.candidate_pair_mut(first, first + 1)?;
                self.crossover.cross(a, b);
            }
        }
        for index in 0..mutable {
            self.mutation.mutate(population.candidate_mut(index)?);
            population.update_fitness(index)?;
        }
        Ok(mutable)
    }

    fn split(&self) -> Self {
        Self {
            mutation: self.mutation.split(),
            crossover: self.crossover.split(),
            crossover_rate: self.crossover_rate,
            rng: self.rng.split(),
        }
    }
}

/// Mutates each mutable slot with the probability held in its own parameter 0, after
/// resampling the parameters. Only mutated slots are re-evaluated.
#[derive(Debug, Clone)]
pub struct AdaptiveMutationOnly<M> {
    mutation: M,
    rng: RandomNumberGenerator,
}

impl<M> AdaptiveMutationOnly<M> {
    pub fn new(mutation: M) -> Self {
        Self {
            mutation,
            rng: RandomNumberGenerator::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl<C, M> Generation<C> for AdaptiveMutationOnly<M>
where
    C: Candidate,
    M: MutationOperator<C>,
{
    fn required_parameters(&self) -> usize {
        1
    }

    fn step<I, F, S>(&mut self, population: &mut Population<C, I, F, S>) -> Result<usize>
    where
        I: Initializer<C>,
        F: FitnessFunction<C>,
        S: SelectionOperator,
    {
        population.adapt_parameters()?;
        let mut evaluations = 0;
        for index in 0..population.mutable_size() {
            let rate = population.get_parameter(index, 0)?;
            if self.rng.next_f64() < rate {
                self.mutation.mutate(population.candidate_mut(index)?);
                population.update_fitness(index)?;
                evaluations += 1;
            }
        }
        Ok(evaluations)
    }

    fn split(&self) -> Self {
        Self {
            mutation: self.mutation.split(),
            rng: self.rng.split(),
        }
    }
}

/// Self-adaptive genetic algorithm step.
///
/// Parameter 0 of the first slot of each adjacent pair is that pair's crossover
/// probability, and parameter 1 of each slot is its mutation probability. Parameters
/// are resampled before use. Only slots changed by crossover or mutation are
/// re-evaluated.
#[derive(Debug, Clone)]
pub struct AdaptiveMutationCrossover<M, X> {
    mutation: M,
    crossover: X,
    rng: RandomNumberGenerator,
    dirty: Vec<bool>,
}

impl<M, X> AdaptiveMutationCrossover<M, X> {
    pub fn new(mutation: M, crossover: X) -> Self {
        Self {
            mutation,
            crossover,
            rng: RandomNumberGenerator::new(),
            dirty: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl<C, M, X> Generation<C> for AdaptiveMutationCrossover<M, X>
where
    C: Candidate,
    M: MutationOperator<C>,
    X: CrossoverOperator<C>,
{
    fn required_parameters(&self) -> usize {
        2
    }

    fn step<I, F, S>(&mut self, population: &mut Population<C, I, F, S>) -> Result<usize>
    where
        I: Initializer<C>,
        F: FitnessFunction<C>,
        S: SelectionOperator,
    {
        population.adapt_parameters()?;
        let mutable = population.mutable_size();
        self.dirty.clear();
        self.dirty.resize(mutable, false);

        for first in (0..mutable.saturating_sub(1)).step_by(2) {
            let rate = population.get_parameter(first, 0)?;
            if self.rng.next_f64() < rate {
                let (a, b) = population.candidate_pair_mut(first, first + 1)?;
                self.crossover.cross(a, b);
                self.dirty[first] = true;
                self.dirty[first + 1] = true;
            }
        }
        for index in 0..mutable {
            let rate = population.get_parameter(index, 1)?;
            if self.rng.next_f64() < rate {
                self.mutation.mutate(population.candidate_mut(index)?);
                self.dirty[index] = true;
            }
        }

        let mut evaluations = 0;
        for index in 0..mutable {
            if self.dirty[index] {
                population.update_fitness(index)?;
                evaluations += 1;
            }
        }
        Ok(evaluations)
    }

    fn split(&self) -> Self {
        Self {
            mutation: self.mutation.split(),
            crossover: self.crossover.split(),
            rng: self.rng.split(),
            dirty: Vec::new(),
        }
    }
}
