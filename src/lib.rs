pub mod error;
pub mod evolution;
pub mod fitness;
pub mod operators;
pub mod population;
pub mod rng;
pub mod selection;
pub mod tracker;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionOptions, EvolutionaryAlgorithm, GeneticAlgorithm};
pub use fitness::{FitnessFunction, FitnessVector, Problem};
pub use operators::{Candidate, CrossoverOperator, Initializer, MutationOperator};
pub use population::{Population, PopulationBuilder};
pub use selection::SelectionOperator;
pub use tracker::ProgressTracker;
