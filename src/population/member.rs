use crate::fitness::Fitness;

/// A candidate solution paired with its cached fitness.
///
/// Members of populations with evolvable parameters also carry the candidate's
/// parameter vector; for other populations it is empty.
///
/// `Clone` is a deep copy of all fields.
#[derive(Debug, Clone)]
pub struct PopulationMember<C, T> {
    candidate: C,
    fitness: T,
    parameters: Vec<f64>,
}

impl<C, T: Fitness> PopulationMember<C, T> {
    pub fn new(candidate: C, fitness: T) -> Self {
        Self {
            candidate,
            fitness,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameters(candidate: C, fitness: T, parameters: Vec<f64>) -> Self {
        Self {
            candidate,
            fitness,
            parameters,
        }
    }

    pub fn candidate(&self) -> &C {
        &self.candidate
    }

    /// Mutable access for applying operators in place. The cached fitness is not
    /// updated.
    pub fn candidate_mut(&mut self) -> &mut C {
        &mut self.candidate
    }

    pub fn into_candidate(self) -> C {
        self.candidate
    }

    pub fn fitness(&self) -> T {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: T) {
        self.fitness = fitness;
    }

    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }
}
