pub mod algorithm;
pub mod generation;
pub mod options;

pub use algorithm::{
    AdaptiveEvolutionaryAlgorithm, EvolutionaryAlgorithm, GeneticAlgorithm, MutationOnlyAlgorithm,
    RunResult,
};
pub use generation::{
    AdaptiveMutationCrossover, AdaptiveMutationOnly, Generation, MutationCrossover, MutationOnly,
};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder};
