//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct collects the plain configuration values of an
//! evolutionary run: the planned number of generations, the population size, the
//! number of elite slots, the crossover rate used by genetic algorithms, how
//! evolvable parameters are resampled, and an optional seed for reproducible runs.
//!
//! ## Example
//!
//! ```rust
//! use evocore::evolution::options::EvolutionOptions;
//!
//! let options = EvolutionOptions::builder()
//!     .num_generations(250)
//!     .population_size(40)
//!     .elite_count(2)
//!     .crossover_rate(0.9)
//!     .seed(17)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.population_size(), 40);
//! assert_eq!(options.mutable_size(), 38);
//!
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.population_size(), 100);
//! ```
//!
//! With the `serde` feature enabled the options serialize like any plain struct, so
//! they can be loaded from a configuration file.

use crate::error::{GeneticError, Result};
use crate::population::ParameterAdaptation;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_generations: usize,
    population_size: usize,
    elite_count: usize,
    crossover_rate: f64,
    adaptation: ParameterAdaptation,
    seed: Option<u64>,
}

impl EvolutionOptions {
    /// Creates options with the given sizes and defaults for everything else.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the resulting options fail [`EvolutionOptions::validate`].
    pub fn new(num_generations: usize, population_size: usize, elite_count: usize) -> Result<Self> {
        let options = Self {
            num_generations,
            population_size,
            elite_count,
            ..Self::default()
        };
        options.validate()?;
        Ok(options)
    }

    /// Checks every value against its valid range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the population is empty, the elites fill the whole
    /// population, the crossover rate is outside `[0, 1]`, or the parameter adaptation
    /// is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::InvalidArgument(
                "Population size must be positive".to_string(),
            ));
        }
        if self.elite_count >= self.population_size {
            return Err(GeneticError::InvalidArgument(format!(
                "Elite count {} must be less than the population size {}",
                self.elite_count, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(GeneticError::InvalidArgument(
                "Crossover rate must be in the range [0.0, 1.0]".to_string(),
            ));
        }
        self.adaptation.validate()
    }

    pub fn num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// Slots subject to selection and variation each generation.
    pub fn mutable_size(&self) -> usize {
        self.population_size.saturating_sub(self.elite_count)
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn adaptation(&self) -> &ParameterAdaptation {
        &self.adaptation
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 100,
            population_size: 100,
            elite_count: 0,
            crossover_rate: 0.8,
            adaptation: ParameterAdaptation::default(),
            seed: None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset values fall back to the defaults of [`EvolutionOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    population_size: Option<usize>,
    elite_count: Option<usize>,
    crossover_rate: Option<f64>,
    adaptation: Option<ParameterAdaptation>,
    seed: Option<u64>,
}

impl EvolutionOptionsBuilder {
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn elite_count(mut self, value: usize) -> Self {
        self.elite_count = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn adaptation(mut self, value: ParameterAdaptation) -> Self {
        self.adaptation = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Builds and validates the `EvolutionOptions` instance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the options fail [`EvolutionOptions::validate`].
    pub fn build(self) -> Result<EvolutionOptions> {
        let defaults = EvolutionOptions::default();
        let options = EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(defaults.num_generations),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            elite_count: self.elite_count.unwrap_or(defaults.elite_count),
            crossover_rate: self.crossover_rate.unwrap_or(defaults.crossover_rate),
            adaptation: self.adaptation.unwrap_or(defaults.adaptation),
            seed: self.seed.or(defaults.seed),
        };
        options.validate()?;
        Ok(options)
    }
}
