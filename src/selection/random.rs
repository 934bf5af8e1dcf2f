use crate::error::Result;
use crate::fitness::FitnessVector;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_operator::SelectionOperator;
use crate::selection::weighted::check_selectable;

/// Uniform random selection that ignores fitness entirely.
#[derive(Debug, Clone, Default)]
pub struct RandomSelection {
    rng: RandomNumberGenerator,
}

impl RandomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl SelectionOperator for RandomSelection {
    fn select<V>(&mut self, fitness: &V, selected: &mut [usize]) -> Result<()>
    where
        V: FitnessVector + ?Sized,
    {
        let n = fitness.size();
        if !check_selectable(n, selected.len())? {
            return Ok(());
        }
        for slot in selected.iter_mut() {
            *slot = self.rng.next_index(n);
        }
        Ok(())
    }

    fn split(&self) -> Self {
        Self {
            rng: self.rng.split(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_member_reachable() {
        let mut selection = RandomSelection::new().with_seed(2);
        let mut selected = [0usize; 400];
        selection
            .select(&vec![100.0, 0.0, -5.0, 1.0], &mut selected)
            .unwrap();
        for index in 0..4 {
            assert!(selected.contains(&index));
        }
    }
}
