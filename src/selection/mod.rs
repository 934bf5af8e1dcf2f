pub mod boltzmann;
pub mod random;
pub mod rank;
pub mod scaling;
pub mod selection_operator;
pub mod tournament;
pub mod truncation;
pub mod weighted;

pub use boltzmann::{BoltzmannSelection, TemperatureSchedule};
pub use random::RandomSelection;
pub use rank::{ExponentialRankSelection, LinearRankSelection};
pub use scaling::{FitnessShifter, SigmaScaling};
pub use selection_operator::SelectionOperator;
pub use tournament::TournamentSelection;
pub use truncation::{partition_best_to_right, TruncationSelection};
pub use weighted::{FitnessBias, FitnessProportionalSelection, SamplingMode};
