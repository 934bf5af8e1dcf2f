//! Selection operators that transform fitness before delegating to another operator.
//!
//! A wrapper only replaces the fitness values the inner operator sees. Everything
//! else, including sampling and schedules, is the inner operator's own logic.

use crate::error::{GeneticError, Result};
use crate::fitness::{Fitness, FitnessVector};
use crate::selection::selection_operator::SelectionOperator;
use crate::selection::weighted::check_selectable;

/// Shifts every fitness by `1 - min(fitness)` so the least fit member has fitness
/// exactly 1 and all weights are positive.
///
/// # Examples
///
/// ```
/// use evocore::selection::{FitnessProportionalSelection, FitnessShifter, SelectionOperator};
///
/// let mut selection = FitnessShifter::new(FitnessProportionalSelection::new());
/// let mut selected = [0usize; 5];
/// selection.select(&vec![-4.0, -2.0, 3.0], &mut selected).unwrap();
/// assert!(selected.iter().all(|&i| i < 3));
/// ```
#[derive(Debug, Clone)]
pub struct FitnessShifter<S> {
    inner: S,
    shifted: Vec<f64>,
}

impl<S: SelectionOperator> FitnessShifter<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            shifted: Vec::new(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// The values the inner operator sees.
    pub fn shift<V>(fitness: &V, shifted: &mut Vec<f64>)
    where
        V: FitnessVector + ?Sized,
    {
        let n = fitness.size();
        let min = (0..n)
            .map(|i| fitness.fitness(i).to_f64())
            .fold(f64::INFINITY, f64::min);
        shifted.clear();
        shifted.extend((0..n).map(|i| fitness.fitness(i).to_f64() + 1.0 - min));
    }
}

impl<S: SelectionOperator> SelectionOperator for FitnessShifter<S> {
    fn select<V>(&mut self, fitness: &V, selected: &mut [usize]) -> Result<()>
    where
        V: FitnessVector + ?Sized,
    {
        if !check_selectable(fitness.size(), selected.len())? {
            return Ok(());
        }
        Self::shift(fitness, &mut self.shifted);
        self.inner.select(&self.shifted[..], selected)
    }

    fn init(&mut self, generations: usize) {
        self.inner.init(generations);
    }

    fn split(&self) -> Self {
        Self::new(self.inner.split())
    }
}

/// Sigma scaling.
///
/// Fitness `f` becomes `max(floor, 1 + (f - mean) / (2 * stdev))`, using the
/// population standard deviation. If every member has the same fitness, every
/// member gets 1.
#[derive(Debug, Clone)]
pub struct SigmaScaling<S> {
    inner: S,
    floor: f64,
    scaled: Vec<f64>,
}

impl<S: SelectionOperator> SigmaScaling<S> {
    /// Floor of 0.1.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            floor: 0.1,
            scaled: Vec::new(),
        }
    }

    /// # Errors
    ///
    /// Returns `InvalidArgument` if `floor` is negative or not finite.
    pub fn with_floor(inner: S, floor: f64) -> Result<Self> {
        if !(floor >= 0.0) || !floor.is_finite() {
            return Err(GeneticError::InvalidArgument(
                "Sigma scaling floor must be non-negative and finite".to_string(),
            ));
        }
        Ok(Self {
            inner,
            floor,
            scaled: Vec::new(),
        })
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// The values the inner operator sees.
    pub fn scale<V>(&self, fitness: &V, scaled: &mut Vec<f64>)
    where
        V: FitnessVector + ?Sized,
    {
        let n = fitness.size();
        scaled.clear();
        scaled.extend((0..n).map(|i| fitness.fitness(i).to_f64()));
        if n == 0 {
            return;
        }
        let mean = scaled.iter().sum::<f64>() / n as f64;
        let variance = scaled.iter().map(|f| (f - mean) * (f - mean)).sum::<f64>() / n as f64;
        let stdev = variance.sqrt();
        for value in scaled.iter_mut() {
            *value = if stdev > 0.0 {
                (1.0 + (*value - mean) / (2.0 * stdev)).max(self.floor)
            } else {
                1.0
            };
        }
    }
}

impl<S: SelectionOperator> SelectionOperator for SigmaScaling<S> {
    fn select<V>(&mut self, fitness: &V, selected: &mut [usize]) -> Result<()>
    where
        V: FitnessVector + ?Sized,
    {
        if !check_selectable(fitness.size(), selected.len())? {
            return Ok(());
        }
        let mut scaled = std::mem::take(&mut self.scaled);
        self.scale(fitness, &mut scaled);
        let result = self.inner.select(&scaled[..], selected);
        self.scaled = scaled;
        result
    }

    fn init(&mut self, generations: usize) {
        self.inner.init(generations);
    }

    fn split(&self) -> Self {
        Self {
            inner: self.inner.split(),
            floor: self.floor,
            scaled: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{BoltzmannSelection, FitnessProportionalSelection};

    /// Records the last fitness vector it was asked to select from.
    #[derive(Debug, Default)]
    struct Recorder {
        seen: Vec<f64>,
        init_calls: usize,
    }

    impl SelectionOperator for Recorder {
        fn select<V>(&mut self, fitness: &V, selected: &mut [usize]) -> Result<()>
        where
            V: FitnessVector + ?Sized,
        {
            self.seen = (0..fitness.size())
                .map(|i| fitness.fitness(i).to_f64())
                .collect();
            for (slot, value) in selected.iter_mut().enumerate() {
                *value = slot % fitness.size();
            }
            Ok(())
        }

        fn init(&mut self, _generations: usize) {
            self.init_calls += 1;
        }

        fn split(&self) -> Self {
            Recorder::default()
        }
    }

    #[test]
    fn test_shifter_delegates_shifted_values() {
        let mut selection = FitnessShifter::new(Recorder::default());
        let mut selected = [0usize; 4];
        selection
            .select(&vec![-3_i64, 2, 0], &mut selected)
            .unwrap();
        assert_eq!(selection.inner().seen, vec![1.0, 6.0, 4.0]);
        assert_eq!(selected, [0, 1, 2, 0]);

        selection.select(&vec![5.0, 7.0], &mut selected).unwrap();
        assert_eq!(selection.inner().seen, vec![1.0, 3.0]);
    }

    #[test]
    fn test_sigma_scaling_values() {
        let mut selection = SigmaScaling::new(Recorder::default());
        let mut selected = [0usize; 2];
        // mean 3, population stdev 2
        selection
            .select(&vec![1.0, 1.0, 5.0, 5.0], &mut selected)
            .unwrap();
        assert_eq!(selection.inner().seen, vec![0.5, 0.5, 1.5, 1.5]);

        selection.select(&vec![4.0, 4.0, 4.0], &mut selected).unwrap();
        assert_eq!(selection.inner().seen, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_sigma_scaling_floor() {
        let mut selection = SigmaScaling::with_floor(Recorder::default(), 0.25).unwrap();
        let mut selected = [0usize; 1];
        // mean 2.5, stdev 3.5
        selection
            .select(&vec![-1.0, 6.0], &mut selected)
            .unwrap();
        assert_eq!(selection.inner().seen, vec![0.5, 1.5]);

        selection
            .select(&vec![-10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], &mut selected)
            .unwrap();
        assert_eq!(selection.inner().seen[0], 0.25);
        assert!(SigmaScaling::with_floor(Recorder::default(), -1.0).is_err());
    }

    #[test]
    fn test_init_is_forwarded() {
        let mut shifter = FitnessShifter::new(Recorder::default());
        shifter.init(10);
        assert_eq!(shifter.inner().init_calls, 1);

        let mut sigma = SigmaScaling::new(Recorder::default());
        sigma.init(10);
        sigma.init(10);
        assert_eq!(sigma.inner().init_calls, 2);
    }

    #[test]
    fn test_shifter_allows_negative_fitness_proportional() {
        let mut plain = FitnessProportionalSelection::new();
        let mut shifted = FitnessShifter::new(FitnessProportionalSelection::new());
        let fitness = vec![-4.0, -1.0, -2.0];
        let mut selected = [0usize; 10];
        assert!(plain.select(&fitness, &mut selected).is_err());
        assert!(shifted.select(&fitness, &mut selected).is_ok());
    }

    #[test]
    fn test_wrappers_compose_with_schedules() {
        let mut selection = SigmaScaling::new(BoltzmannSelection::linear(3.0, 1.0, 1.0).unwrap());
        let mut selected = [0usize; 3];
        selection.select(&vec![1.0, 2.0, 3.0], &mut selected).unwrap();
        assert_eq!(selection.inner().temperature(), 2.0);
        selection.init(5);
        assert_eq!(selection.inner().temperature(), 3.0);
    }
}
