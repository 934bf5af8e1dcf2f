//! Problems and the fitness functions that turn them into something to maximize.

use std::ops::Neg;

use super::Fitness;
use crate::error::{GeneticError, Result};

/// A cost-minimization problem over candidates of type `C`.
pub trait Problem<C>: Send + Sync {
    /// The numeric flavor of the cost.
    type Cost: Fitness;

    /// Cost of `candidate`. Lower is better.
    fn cost(&self, candidate: &C) -> Self::Cost;

    /// A lower bound on the cost of any candidate.
    fn min_cost(&self) -> Self::Cost;

    /// Whether `cost` is known to be optimal.
    fn is_min_cost(&self, cost: Self::Cost) -> bool {
        cost == self.min_cost()
    }
}

/// Maps a candidate to a fitness to be maximized, wrapping an underlying [`Problem`].
///
/// Fitness functions are shared between split copies of a population, so they must
/// be `Send + Sync`.
pub trait FitnessFunction<C>: Send + Sync {
    /// The numeric flavor of the fitness.
    type Value: Fitness;
    /// The wrapped problem.
    type Problem: Problem<C>;

    /// Fitness of `candidate`.
    fn fitness(&self, candidate: &C) -> Self::Value;

    /// The problem whose cost this fitness inverts.
    fn problem(&self) -> &Self::Problem;
}

/// Fitness equal to the negated cost. Keeps the numeric flavor of the problem.
#[derive(Debug, Clone)]
pub struct NegativeCost<P> {
    problem: P,
}

impl<P> NegativeCost<P> {
    pub fn new(problem: P) -> Self {
        Self { problem }
    }
}

impl<C, P> FitnessFunction<C> for NegativeCost<P>
where
    P: Problem<C>,
    P::Cost: Neg<Output = P::Cost>,
{
    type Value = P::Cost;
    type Problem = P;

    fn fitness(&self, candidate: &C) -> P::Cost {
        -self.problem.cost(candidate)
    }

    fn problem(&self) -> &P {
        &self.problem
    }
}

/// Fitness `c / (c + cost - min_cost)`, which lies in `(0, 1]` and equals 1 at the
/// optimum.
#[derive(Debug, Clone)]
pub struct InverseCost<P> {
    problem: P,
    c: f64,
}

impl<P> InverseCost<P> {
    /// Uses `c = 1`.
    pub fn new(problem: P) -> Self {
        Self { problem, c: 1.0 }
    }

    /// # Errors
    ///
    /// Returns `InvalidArgument` if `c` is not positive.
    pub fn with_constant(problem: P, c: f64) -> Result<Self> {
        if !(c > 0.0) {
            return Err(GeneticError::InvalidArgument(
                "Inverse cost constant must be positive".to_string(),
            ));
        }
        Ok(Self { problem, c })
    }
}

impl<C, P> FitnessFunction<C> for InverseCost<P>
where
    P: Problem<C>,
{
    type Value = f64;
    type Problem = P;

    fn fitness(&self, candidate: &C) -> f64 {
        let excess = self.problem.cost(candidate).to_f64() - self.problem.min_cost().to_f64();
        self.c / (self.c + excess)
    }

    fn problem(&self) -> &P {
        &self.problem
    }
}
