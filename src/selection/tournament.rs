use crate::error::{GeneticError, Result};
use crate::fitness::FitnessVector;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_operator::SelectionOperator;
use crate::selection::weighted::check_selectable;

/// A selection operator that selects members through tournament selection.
///
/// For every output slot, `k` members are drawn uniformly at random (with
/// replacement) and the fittest of them is selected.
///
/// Tournament selection provides a balance between exploration and exploitation:
/// - Smaller tournament sizes lead to more exploration
/// - Larger tournament sizes lead to more exploitation
///
/// # Examples
///
/// ```
/// use evocore::selection::{SelectionOperator, TournamentSelection};
///
/// let fitness = vec![5_i64, 8, 3, 9, 1];
/// let mut selection = TournamentSelection::new(3).unwrap().with_seed(1);
/// let mut selected = [0usize; 3];
/// selection.select(&fitness, &mut selected).unwrap();
/// assert!(selected.iter().all(|&i| i < 5));
/// ```
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
    rng: RandomNumberGenerator,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection with the specified tournament size.
    ///
    /// # Arguments
    ///
    /// * `tournament_size` - The number of members drawn for each tournament. Larger
    ///   tournaments favor the fittest members more strongly.
    ///
    /// # Returns
    ///
    /// A new TournamentSelection seeded from entropy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `tournament_size` is less than 2.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 2 {
            return Err(GeneticError::InvalidArgument(
                "Tournament size must be at least 2".to_string(),
            ));
        }

        Ok(Self {
            tournament_size,
            rng: RandomNumberGenerator::new(),
        })
    }

    /// Replaces the random number generator with a seeded one, for reproducible
    /// selections.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    fn run_tournament<V>(&mut self, fitness: &V) -> usize
    where
        V: FitnessVector + ?Sized,
    {
        let n = fitness.size();
        let mut best_idx = self.rng.next_index(n);
        let mut best_fitness = fitness.fitness(best_idx);
        for _ in 1..self.tournament_size {
            let idx = self.rng.next_index(n);
            let current = fitness.fitness(idx);
            if current > best_fitness {
                best_idx = idx;
                best_fitness = current;
            }
        }
        best_idx
    }
}

impl Default for TournamentSelection {
    /// Binary tournament.
    fn default() -> Self {
        Self {
            tournament_size: 2,
            rng: RandomNumberGenerator::new(),
        }
    }
}

impl SelectionOperator for TournamentSelection {
    fn select<V>(&mut self, fitness: &V, selected: &mut [usize]) -> Result<()>
    where
        V: FitnessVector + ?Sized,
    {
        if !check_selectable(fitness.size(), selected.len())? {
            return Ok(());
        }
        for slot in selected.iter_mut() {
            *slot = self.run_tournament(fitness);
        }
        Ok(())
    }

    fn split(&self) -> Self {
        Self {
            tournament_size: self.tournament_size,
            rng: self.rng.split(),
        }
    }
}
