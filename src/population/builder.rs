use std::sync::Arc;

use crate::error::{GeneticError, OptionExt, Result};
use crate::evolution::options::EvolutionOptions;
use crate::fitness::FitnessFunction;
use crate::operators::{Candidate, Initializer};
use crate::population::base::{CostOf, Population};
use crate::population::elite::EliteSet;
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionOperator;
use crate::tracker::ProgressTracker;

/// How the evolvable parameters of a population are resampled.
///
/// Each generation every parameter of every mutable member is independently replaced,
/// with probability `resample_probability`, by a value drawn uniformly from
/// `[lower, upper)`. Initial parameters are drawn from the same range.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterAdaptation {
    resample_probability: f64,
    lower: f64,
    upper: f64,
}

impl ParameterAdaptation {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the probability is outside `[0, 1]` or the range
    /// is empty or not finite.
    pub fn new(resample_probability: f64, lower: f64, upper: f64) -> Result<Self> {
        let adaptation = Self {
            resample_probability,
            lower,
            upper,
        };
        adaptation.validate()?;
        Ok(adaptation)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.resample_probability) {
            return Err(GeneticError::InvalidArgument(
                "Resample probability must be in the range [0.0, 1.0]".to_string(),
            ));
        }
        if !self.lower.is_finite() || !self.upper.is_finite() || self.lower > self.upper {
            return Err(GeneticError::InvalidArgument(format!(
                "Invalid parameter range [{}, {})",
                self.lower, self.upper
            )));
        }
        Ok(())
    }

    pub fn resample_probability(&self) -> f64 {
        self.resample_probability
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }
}

impl Default for ParameterAdaptation {
    fn default() -> Self {
        Self {
            resample_probability: 0.1,
            lower: 0.0,
            upper: 1.0,
        }
    }
}

/// Collects the collaborators and sizes of a [`Population`] and validates them.
///
/// The initializer, fitness function, selection operator, progress tracker and size
/// are required. Elites and evolvable parameters are off unless requested.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use evocore::fitness::{NegativeCost, Problem};
/// use evocore::operators::Initializer;
/// use evocore::population::PopulationBuilder;
/// use evocore::selection::TournamentSelection;
/// use evocore::tracker::ProgressTracker;
///
/// struct Square;
/// impl Problem<i64> for Square {
///     type Cost = i64;
///     fn cost(&self, x: &i64) -> i64 { x * x }
///     fn min_cost(&self) -> i64 { 0 }
/// }
///
/// struct Countdown(i64);
/// impl Initializer<i64> for Countdown {
///     fn create_candidate(&mut self) -> i64 { self.0 -= 1; self.0 }
///     fn split(&self) -> Self { Countdown(self.0) }
/// }
///
/// let mut population = PopulationBuilder::new()
///     .with_initializer(Countdown(5))
///     .with_fitness_function(NegativeCost::new(Square))
///     .with_selection(TournamentSelection::default())
///     .with_tracker(Arc::new(ProgressTracker::new()))
///     .with_size(4)
///     .with_elites(1)
///     .build()
///     .unwrap();
///
/// population.init();
/// assert_eq!(population.mutable_size(), 3);
/// assert_eq!(population.get_most_fit().unwrap().fitness(), -1);
/// ```
pub struct PopulationBuilder<C, I, F, S>
where
    F: FitnessFunction<C>,
{
    initializer: Option<I>,
    fitness_function: Option<Arc<F>>,
    selection: Option<S>,
    tracker: Option<Arc<ProgressTracker<C, CostOf<C, F>>>>,
    size: Option<usize>,
    elite_count: usize,
    parameter_width: usize,
    adaptation: ParameterAdaptation,
    seed: Option<u64>,
}

impl<C, I, F, S> PopulationBuilder<C, I, F, S>
where
    C: Candidate,
    I: Initializer<C>,
    F: FitnessFunction<C>,
    S: SelectionOperator,
{
    pub fn new() -> Self {
        Self {
            initializer: None,
            fitness_function: None,
            selection: None,
            tracker: None,
            size: None,
            elite_count: 0,
            parameter_width: 0,
            adaptation: ParameterAdaptation::default(),
            seed: None,
        }
    }

    pub fn with_initializer(mut self, initializer: I) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn with_fitness_function(mut self, fitness_function: F) -> Self {
        self.fitness_function = Some(Arc::new(fitness_function));
        self
    }

    /// Uses a fitness function that is already shared with other populations.
    pub fn with_shared_fitness_function(mut self, fitness_function: Arc<F>) -> Self {
        self.fitness_function = Some(fitness_function);
        self
    }

    pub fn with_selection(mut self, selection: S) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_tracker(mut self, tracker: Arc<ProgressTracker<C, CostOf<C, F>>>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Reserves the last `elite_count` slots for the best distinct members seen.
    pub fn with_elites(mut self, elite_count: usize) -> Self {
        self.elite_count = elite_count;
        self
    }

    /// Gives every member a vector of `width` self-adaptive parameters.
    pub fn with_evolvable_parameters(mut self, width: usize) -> Self {
        self.parameter_width = width;
        self
    }

    pub fn with_adaptation(mut self, adaptation: ParameterAdaptation) -> Self {
        self.adaptation = adaptation;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Takes the size, elite count, adaptation and seed from `options`. The planned
    /// generations and the crossover rate belong to the driver; see
    /// [`EvolutionaryAlgorithm::optimize_with_options`](crate::evolution::EvolutionaryAlgorithm::optimize_with_options)
    /// and [`EvolutionaryAlgorithm::genetic_from_options`](crate::evolution::EvolutionaryAlgorithm::genetic_from_options).
    pub fn with_options(mut self, options: &EvolutionOptions) -> Self {
        self.size = Some(options.population_size());
        self.elite_count = options.elite_count();
        self.adaptation = *options.adaptation();
        self.seed = options.seed();
        self
    }

    /// Builds the population in its uninitialized state.
    ///
    /// # Errors
    ///
    /// Returns `MissingValue` if a required collaborator or the size was not supplied,
    /// and `InvalidArgument` if the size is 0, the elites fill the whole population, or
    /// the adaptation is invalid.
    pub fn build(self) -> Result<Population<C, I, F, S>> {
        let initializer = self
            .initializer
            .ok_or_else_genetic(|| GeneticError::MissingValue("initializer".to_string()))?;
        let fitness_function = self
            .fitness_function
            .ok_or_else_genetic(|| GeneticError::MissingValue("fitness function".to_string()))?;
        let selection = self
            .selection
            .ok_or_else_genetic(|| GeneticError::MissingValue("selection operator".to_string()))?;
        let tracker = self
            .tracker
            .ok_or_else_genetic(|| GeneticError::MissingValue("progress tracker".to_string()))?;
        let size = self
            .size
            .ok_or_else_genetic(|| GeneticError::MissingValue("population size".to_string()))?;

        if size == 0 {
            return Err(GeneticError::InvalidArgument(
                "Population size must be positive".to_string(),
            ));
        }
        if self.elite_count >= size {
            return Err(GeneticError::InvalidArgument(format!(
                "Elite count {} must be less than the population size {}",
                self.elite_count, size
            )));
        }
        self.adaptation.validate()?;

        let elites = if self.elite_count > 0 {
            Some(EliteSet::new(Vec::new(), self.elite_count)?)
        } else {
            None
        };
        let rng = match self.seed {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };

        Ok(Population::from_parts(
            initializer,
            fitness_function,
            selection,
            tracker,
            size,
            elites,
            self.parameter_width,
            self.adaptation,
            rng,
        ))
    }
}

impl<C, I, F, S> Default for PopulationBuilder<C, I, F, S>
where
    C: Candidate,
    I: Initializer<C>,
    F: FitnessFunction<C>,
    S: SelectionOperator,
{
    fn default() -> Self {
        Self::new()
    }
}
