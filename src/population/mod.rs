pub mod base;
pub mod builder;
pub mod elite;
pub mod member;

pub use base::{CostOf, FitnessOf, Population};
pub use builder::{ParameterAdaptation, PopulationBuilder};
pub use elite::{EliteIter, EliteSet};
pub use member::PopulationMember;
