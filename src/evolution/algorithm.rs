//! # EvolutionaryAlgorithm
//!
//! The driver that runs a [`Population`] through generations with a [`Generation`]
//! strategy. Each generation is `select`, `step`, `replace`. Before each generation
//! the driver checks the population's [`ProgressTracker`]: a stop request or a
//! known-optimal solution ends the run at the generation boundary.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use evocore::evolution::GeneticAlgorithm;
//! use evocore::fitness::{NegativeCost, Problem};
//! use evocore::operators::{CrossoverOperator, Initializer, MutationOperator};
//! use evocore::population::PopulationBuilder;
//! use evocore::rng::RandomNumberGenerator;
//! use evocore::selection::TournamentSelection;
//! use evocore::tracker::ProgressTracker;
//!
//! /// Count of zero bits; the optimum is all ones.
//! struct Zeros;
//! impl Problem<Vec<bool>> for Zeros {
//!     type Cost = i64;
//!     fn cost(&self, bits: &Vec<bool>) -> i64 { bits.iter().filter(|b| !**b).count() as i64 }
//!     fn min_cost(&self) -> i64 { 0 }
//! }
//!
//! struct RandomBits(RandomNumberGenerator);
//! impl Initializer<Vec<bool>> for RandomBits {
//!     fn create_candidate(&mut self) -> Vec<bool> { (0..16).map(|_| self.0.next_f64() < 0.5).collect() }
//!     fn split(&self) -> Self { RandomBits(self.0.split()) }
//! }
//!
//! struct Flip(RandomNumberGenerator);
//! impl MutationOperator<Vec<bool>> for Flip {
//!     fn mutate(&mut self, bits: &mut Vec<bool>) { let i = self.0.next_index(bits.len()); bits[i] = !bits[i]; }
//!     fn split(&self) -> Self { Flip(self.0.split()) }
//! }
//!
//! struct OnePoint(RandomNumberGenerator);
//! impl CrossoverOperator<Vec<bool>> for OnePoint {
//!     fn cross(&mut self, a: &mut Vec<bool>, b: &mut Vec<bool>) {
//!         let point = self.0.next_index(a.len());
//!         a[point..].swap_with_slice(&mut b[point..]);
//!     }
//!     fn split(&self) -> Self { OnePoint(self.0.split()) }
//! }
//!
//! let population = PopulationBuilder::new()
//!     .with_initializer(RandomBits(RandomNumberGenerator::from_seed(1)))
//!     .with_fitness_function(NegativeCost::new(Zeros))
//!     .with_selection(TournamentSelection::default().with_seed(2))
//!     .with_tracker(Arc::new(ProgressTracker::new()))
//!     .with_size(20)
//!     .with_elites(1)
//!     .with_seed(3)
//!     .build()
//!     .unwrap();
//!
//! let mut ga = GeneticAlgorithm::genetic(
//!     population,
//!     Flip(RandomNumberGenerator::from_seed(4)),
//!     OnePoint(RandomNumberGenerator::from_seed(5)),
//!     0.8,
//! )
//! .unwrap();
//!
//! let best = ga.optimize(50).unwrap().unwrap();
//! assert!(best.cost() <= 4);
//! assert!(ga.total_run_length() >= 20);
//! ```

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::error::{GeneticError, Result};
use crate::evolution::generation::{
    AdaptiveMutationCrossover, AdaptiveMutationOnly, Generation, MutationCrossover, MutationOnly,
};
use crate::evolution::options::EvolutionOptions;
use crate::fitness::FitnessFunction;
use crate::operators::{Candidate, CrossoverOperator, Initializer, MutationOperator};
use crate::population::{CostOf, Population};
use crate::selection::SelectionOperator;
use crate::tracker::{ProgressTracker, SolutionCostPair};

/// The best solution found by a run, if any.
pub type RunResult<C, F> = Option<SolutionCostPair<C, CostOf<C, F>>>;

/// Runs a population through generations of selection, variation and replacement.
pub struct EvolutionaryAlgorithm<C, I, F, S, G>
where
    F: FitnessFunction<C>,
{
    population: Population<C, I, F, S>,
    generation: G,
    total_run_length: usize,
}

/// Crossover of adjacent pairs at a fixed rate, then mutation of every slot.
pub type GeneticAlgorithm<C, I, F, S, M, X> =
    EvolutionaryAlgorithm<C, I, F, S, MutationCrossover<M, X>>;

/// Mutation of every slot, no crossover.
pub type MutationOnlyAlgorithm<C, I, F, S, M> = EvolutionaryAlgorithm<C, I, F, S, MutationOnly<M>>;

/// Crossover and mutation rates evolved per member.
pub type AdaptiveEvolutionaryAlgorithm<C, I, F, S, M, X> =
    EvolutionaryAlgorithm<C, I, F, S, AdaptiveMutationCrossover<M, X>>;

impl<C, I, F, S, G> EvolutionaryAlgorithm<C, I, F, S, G>
where
    C: Candidate,
    I: Initializer<C>,
    F: FitnessFunction<C>,
    S: SelectionOperator,
    G: Generation<C>,
{
    /// Pairs a population with a generation strategy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the strategy reads more evolvable parameters than
    /// the population carries.
    pub fn new(population: Population<C, I, F, S>, generation: G) -> Result<Self> {
        let required = generation.required_parameters();
        if population.parameter_width() < required {
            return Err(GeneticError::InvalidArgument(format!(
                "Generation strategy needs {} evolvable parameters, population has {}",
                required,
                population.parameter_width()
            )));
        }
        Ok(Self {
            population,
            generation,
            total_run_length: 0,
        })
    }

    pub fn population(&self) -> &Population<C, I, F, S> {
        &self.population
    }

    pub fn generation(&self) -> &G {
        &self.generation
    }

    /// The tracker shared with every split copy.
    pub fn tracker(&self) -> &ProgressTracker<C, CostOf<C, F>> {
        self.population.tracker()
    }

    /// Fitness evaluations performed by this driver across every run so far.
    pub fn total_run_length(&self) -> usize {
        self.total_run_length
    }

    /// Initializes a fresh population and runs up to `generations` generations.
    ///
    /// Returns `None` if the tracker was already stopped, otherwise the best solution
    /// recorded in the tracker, which may come from another copy sharing it.
    ///
    /// # Errors
    ///
    /// Propagates population and selection errors.
    #[instrument(level = "debug", skip(self), fields(size = self.population.size()))]
    pub fn optimize(&mut self, generations: usize) -> Result<RunResult<C, F>> {
        if self.tracker().is_stopped() {
            info!("tracker is stopped, skipping optimization");
            return Ok(None);
        }
        info!(generations, "starting optimization");
        self.population.init_operators(generations);
        self.population.init();
        self.total_run_length += self.population.size();
        self.run(generations)?;
        Ok(self.tracker().solution_cost_pair())
    }

    /// Runs [`EvolutionaryAlgorithm::optimize`] for the number of generations planned
    /// in `options`.
    ///
    /// # Errors
    ///
    /// Propagates population and selection errors.
    pub fn optimize_with_options(&mut self, options: &EvolutionOptions) -> Result<RunResult<C, F>> {
        self.optimize(options.num_generations())
    }

    /// Runs up to `generations` more generations from the current population.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if [`EvolutionaryAlgorithm::optimize`] never ran, and
    /// propagates population and selection errors.
    #[instrument(level = "debug", skip(self), fields(size = self.population.size()))]
    pub fn reoptimize(&mut self, generations: usize) -> Result<RunResult<C, F>> {
        if !self.population.is_initialized() {
            return Err(GeneticError::InvalidState(
                "reoptimize called before optimize".to_string(),
            ));
        }
        if self.tracker().is_stopped() {
            info!("tracker is stopped, skipping reoptimization");
            return Ok(None);
        }
        info!(generations, "continuing optimization");
        self.population.init_operators(generations);
        self.run(generations)?;
        Ok(self.tracker().solution_cost_pair())
    }

    fn run(&mut self, generations: usize) -> Result<()> {
        for generation in 0..generations {
            let tracker = self.population.tracker();
            if tracker.is_stopped() || tracker.did_find_best() {
                info!(generation, "stopping early");
                break;
            }
            self.population.select()?;
            let evaluations = self.generation.step(&mut self.population)?;
            self.population.replace()?;
            self.total_run_length += evaluations;
            debug!(
                generation,
                evaluations,
                best_cost = ?self.population.tracker().cost(),
                "generation complete"
            );
        }
        info!(
            total_run_length = self.total_run_length,
            best_cost = ?self.tracker().cost(),
            "optimization finished"
        );
        Ok(())
    }

    /// Returns an independent copy that shares only the tracker and the fitness
    /// function. The copy's run length starts at 0.
    pub fn split(&self) -> Self {
        Self {
            population: self.population.split(),
            generation: self.generation.split(),
            total_run_length: 0,
        }
    }

    /// Runs `copies` split copies of this driver concurrently on the rayon pool and
    /// returns the best solution any of them recorded. The evaluations of every copy
    /// are added to this driver's run length.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `copies` is 0, and the first error of any copy.
    #[instrument(level = "debug", skip(self))]
    pub fn optimize_in_parallel(&mut self, copies: usize, generations: usize) -> Result<RunResult<C, F>> {
        if copies == 0 {
            return Err(GeneticError::InvalidArgument(
                "At least one copy is required".to_string(),
            ));
        }
        info!(copies, generations, "starting parallel optimization");
        let mut runners: Vec<Self> = (0..copies).map(|_| self.split()).collect();
        let results = runners
            .par_iter_mut()
            .map(|runner| runner.optimize(generations))
            .collect::<Result<Vec<_>>>()?;
        self.total_run_length += runners.iter().map(|r| r.total_run_length).sum::<usize>();

        if results.iter().all(Option::is_none) {
            return Ok(None);
        }
        Ok(self.tracker().solution_cost_pair())
    }
}

impl<C, I, F, S, M> EvolutionaryAlgorithm<C, I, F, S, MutationOnly<M>>
where
    C: Candidate,
    I: Initializer<C>,
    F: FitnessFunction<C>,
    S: SelectionOperator,
    M: MutationOperator<C>,
{
    pub fn mutation_only(population: Population<C, I, F, S>, mutation: M) -> Self {
        Self {
            population,
            generation: MutationOnly::new(mutation),
            total_run_length: 0,
        }
    }
}

impl<C, I, F, S, M, X> EvolutionaryAlgorithm<C, I, F, S, MutationCrossover<M, X>>
where
    C: Candidate,
    I: Initializer<C>,
    F: FitnessFunction<C>,
    S: SelectionOperator,
    M: MutationOperator<C>,
    X: CrossoverOperator<C>,
{
    /// Creates a genetic algorithm that crosses adjacent pairs of selected slots.
    ///
    /// # Arguments
    ///
    /// * `population` - The population to evolve, not yet initialized.
    /// * `mutation` - Applied to every mutable slot each generation.
    /// * `crossover` - Applied to each adjacent pair with probability `crossover_rate`.
    /// * `crossover_rate` - Probability in `[0, 1]` that a pair is crossed.
    ///
    /// # Returns
    ///
    /// A driver with a run length of 0.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `crossover_rate` is outside `[0, 1]`.
    pub fn genetic(
        population: Population<C, I, F, S>,
        mutation: M,
        crossover: X,
        crossover_rate: f64,
    ) -> Result<Self> {
        let generation = MutationCrossover::new(mutation, crossover, crossover_rate)?;
        Self::new(population, generation)
    }

    /// Like [`EvolutionaryAlgorithm::genetic`], with the crossover rate taken from
    /// `options`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the crossover rate in `options` is outside `[0, 1]`.
    pub fn genetic_from_options(
        population: Population<C, I, F, S>,
        mutation: M,
        crossover: X,
        options: &EvolutionOptions,
    ) -> Result<Self> {
        Self::genetic(population, mutation, crossover, options.crossover_rate())
    }
}

impl<C, I, F, S, M> EvolutionaryAlgorithm<C, I, F, S, AdaptiveMutationOnly<M>>
where
    C: Candidate,
    I: Initializer<C>,
    F: FitnessFunction<C>,
    S: SelectionOperator,
    M: MutationOperator<C>,
{
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless the population has at least one evolvable
    /// parameter.
    pub fn adaptive_mutation_only(population: Population<C, I, F, S>, mutation: M) -> Result<Self> {
        Self::new(population, AdaptiveMutationOnly::new(mutation))
    }
}

impl<C, I, F, S, M, X> EvolutionaryAlgorithm<C, I, F, S, AdaptiveMutationCrossover<M, X>>
where
    C: Candidate,
    I: Initializer<C>,
    F: FitnessFunction<C>,
    S: SelectionOperator,
    M: MutationOperator<C>,
    X: CrossoverOperator<C>,
{
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless the population has at least two evolvable
    /// parameters.
    pub fn adaptive(population: Population<C, I, F, S>, mutation: M, crossover: X) -> Result<Self> {
        Self::new(population, AdaptiveMutationCrossover::new(mutation, crossover))
    }
}
