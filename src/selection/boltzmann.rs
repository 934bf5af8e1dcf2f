use std::iter;

use crate::error::{GeneticError, Result};
use crate::fitness::{Fitness, FitnessVector};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_operator::SelectionOperator;
use crate::selection::weighted::{accumulate, check_selectable, sample, SamplingMode};

/// How the Boltzmann temperature evolves from one generation to the next.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemperatureSchedule {
    /// The temperature never changes.
    Constant { temperature: f64 },
    /// `T` decreases by `step` each generation, never below `floor`.
    Linear { initial: f64, step: f64, floor: f64 },
    /// `T` is multiplied by `decay` each generation, never below `floor`.
    Exponential { initial: f64, decay: f64, floor: f64 },
}

impl TemperatureSchedule {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a temperature is not positive, the floor exceeds
    /// the initial temperature, the linear step is not positive, or the decay is not
    /// in `(0, 1)`.
    pub fn validate(&self) -> Result<()> {
        let positive = |value: f64, name: &str| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(GeneticError::InvalidArgument(format!(
                    "Boltzmann {} must be positive and finite",
                    name
                )))
            }
        };
        match *self {
            TemperatureSchedule::Constant { temperature } => positive(temperature, "temperature"),
            TemperatureSchedule::Linear {
                initial,
                step,
                floor,
            } => {
                positive(initial, "initial temperature")?;
                positive(step, "temperature step")?;
                positive(floor, "temperature floor")?;
                if floor > initial {
                    return Err(GeneticError::InvalidArgument(
                        "Boltzmann temperature floor exceeds the initial temperature".to_string(),
                    ));
                }
                Ok(())
            }
            TemperatureSchedule::Exponential {
                initial,
                decay,
                floor,
            } => {
                positive(initial, "initial temperature")?;
                positive(floor, "temperature floor")?;
                if !(decay > 0.0 && decay < 1.0) {
                    return Err(GeneticError::InvalidArgument(
                        "Boltzmann decay must be in the range (0.0, 1.0)".to_string(),
                    ));
                }
                if floor > initial {
                    return Err(GeneticError::InvalidArgument(
                        "Boltzmann temperature floor exceeds the initial temperature".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Temperature at generation 0.
    pub fn initial(&self) -> f64 {
        match *self {
            TemperatureSchedule::Constant { temperature } => temperature,
            TemperatureSchedule::Linear { initial, .. } => initial,
            TemperatureSchedule::Exponential { initial, .. } => initial,
        }
    }

    /// Temperature one generation after `current`.
    pub fn next(&self, current: f64) -> f64 {
        match *self {
            TemperatureSchedule::Constant { temperature } => temperature,
            TemperatureSchedule::Linear { step, floor, .. } => (current - step).max(floor),
            TemperatureSchedule::Exponential { decay, floor, .. } => (current * decay).max(floor),
        }
    }

    /// Closed-form temperature after `generation` updates.
    pub fn temperature_at(&self, generation: usize) -> f64 {
        match *self {
            TemperatureSchedule::Constant { temperature } => temperature,
            TemperatureSchedule::Linear {
                initial,
                step,
                floor,
            } => (initial - step * generation as f64).max(floor),
            TemperatureSchedule::Exponential {
                initial,
                decay,
                floor,
            } => (initial * decay.powf(generation as f64)).max(floor),
        }
    }
}

/// Boltzmann selection.
///
/// Member `i` is weighted by `exp(f_i / T)`. The temperature follows a
/// [`TemperatureSchedule`]: it is reset by `init` and advanced by `update`, which
/// `select` calls once after every selection (one selection per generation).
///
/// With a constant schedule the running sum starts at 1 rather than at
/// `exp(f_0 / T)`; the remaining members are accumulated normally.
///
/// # Examples
///
/// ```
/// use evocore::selection::{BoltzmannSelection, SelectionOperator};
///
/// let mut selection = BoltzmannSelection::exponential(10.0, 0.5, 1.0).unwrap();
/// assert_eq!(selection.temperature(), 10.0);
/// selection.update();
/// assert_eq!(selection.temperature(), 5.0);
/// selection.init(100);
/// assert_eq!(selection.temperature(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct BoltzmannSelection {
    schedule: TemperatureSchedule,
    temperature: f64,
    mode: SamplingMode,
    rng: RandomNumberGenerator,
}

impl BoltzmannSelection {
    /// Creates a Boltzmann selection following `schedule`.
    ///
    /// # Arguments
    ///
    /// * `schedule` - How the temperature evolves from one generation to the next.
    /// * `mode` - Roulette draws or stochastic universal sampling.
    ///
    /// # Returns
    ///
    /// A new BoltzmannSelection at the schedule's initial temperature.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the schedule is invalid.
    pub fn new(schedule: TemperatureSchedule, mode: SamplingMode) -> Result<Self> {
        schedule.validate()?;
        Ok(Self {
            schedule,
            temperature: schedule.initial(),
            mode,
            rng: RandomNumberGenerator::new(),
        })
    }

    /// Roulette sampling at a fixed temperature.
    pub fn constant(temperature: f64) -> Result<Self> {
        Self::new(
            TemperatureSchedule::Constant { temperature },
            SamplingMode::Roulette,
        )
    }

    pub fn linear(initial: f64, step: f64, floor: f64) -> Result<Self> {
        Self::new(
            TemperatureSchedule::Linear {
                initial,
                step,
                floor,
            },
            SamplingMode::Roulette,
        )
    }

    pub fn exponential(initial: f64, decay: f64, floor: f64) -> Result<Self> {
        Self::new(
            TemperatureSchedule::Exponential {
                initial,
                decay,
                floor,
            },
            SamplingMode::Roulette,
        )
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn schedule(&self) -> &TemperatureSchedule {
        &self.schedule
    }

    /// The temperature the next selection will use.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Advances the schedule by one generation.
    pub fn update(&mut self) {
        self.temperature = self.schedule.next(self.temperature);
    }

    /// Cumulative Boltzmann weights in index order at the current temperature.
    pub fn compute_weight_running_sum<V>(&self, fitness: &V) -> Result<Vec<f64>>
    where
        V: FitnessVector + ?Sized,
    {
        let n = fitness.size();
        let t = self.temperature;
        let weight = |i: usize| (fitness.fitness(i).to_f64() / t).exp();
        match self.schedule {
            TemperatureSchedule::Constant { .. } => {
                if n == 0 {
                    return Ok(Vec::new());
                }
                accumulate(iter::once(1.0).chain((1..n).map(weight)), n)
            }
            _ => accumulate((0..n).map(weight), n),
        }
    }
}

impl SelectionOperator for BoltzmannSelection {
    fn select<V>(&mut self, fitness: &V, selected: &mut [usize]) -> Result<()>
    where
        V: FitnessVector + ?Sized,
    {
        if !check_selectable(fitness.size(), selected.len())? {
            return Ok(());
        }
        let running = self.compute_weight_running_sum(fitness)?;
        sample(&running, self.mode, &mut self.rng, selected);
        self.update();
        Ok(())
    }

    fn init(&mut self, _generations: usize) {
        self.temperature = self.schedule.initial();
    }

    fn split(&self) -> Self {
        Self {
            schedule: self.schedule,
            temperature: self.temperature,
            mode: self.mode,
            rng: self.rng.split(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_running_sum(fitness: &[f64], t: f64) -> Vec<f64> {
        let mut total = 0.0;
        fitness
            .iter()
            .map(|f| {
                total += (f / t).exp();
                total
            })
            .collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() <= 1e-9 * e.abs().max(1.0), "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_constant_running_sum_starts_at_one() {
        let selection = BoltzmannSelection::constant(2.0).unwrap();
        let running = selection
            .compute_weight_running_sum(&vec![1.0, 2.0, 3.0])
            .unwrap();
        let e1 = 1.0_f64.exp();
        let e15 = 1.5_f64.exp();
        assert_close(&running, &[1.0, 1.0 + e1, 1.0 + e1 + e15]);
    }

    #[test]
    fn test_linear_schedule_matches_closed_form() {
        let fitness = vec![1.0, 4.0, 2.0, 8.0];
        let mut selection = BoltzmannSelection::linear(10.0, 1.5, 2.0).unwrap();
        for generation in 0..10 {
            let t = selection.schedule().temperature_at(generation);
            assert!((selection.temperature() - t).abs() < 1e-9);
            assert_close(
                &selection.compute_weight_running_sum(&fitness).unwrap(),
                &expected_running_sum(&fitness, t),
            );
            selection.update();
        }
        assert_eq!(selection.temperature(), 2.0);
    }

    #[test]
    fn test_exponential_schedule_matches_closed_form() {
        let fitness = vec![3_i64, 1, 2];
        let as_f64: Vec<f64> = fitness.iter().map(|&f| f as f64).collect();
        let mut selection = BoltzmannSelection::exponential(8.0, 0.75, 0.5).unwrap();
        for generation in 0..15 {
            let t = selection.schedule().temperature_at(generation);
            assert!((selection.temperature() - t).abs() < 1e-9);
            assert_close(
                &selection.compute_weight_running_sum(&fitness).unwrap(),
                &expected_running_sum(&as_f64, t),
            );
            selection.update();
        }
    }

    #[test]
    fn test_init_resets_schedule() {
        let fitness = vec![1.0, 2.0];
        let mut selection = BoltzmannSelection::linear(5.0, 1.0, 1.0).unwrap();
        let initial = selection.compute_weight_running_sum(&fitness).unwrap();
        let mut selected = [0usize; 4];
        selection.select(&fitness, &mut selected).unwrap();
        selection.select(&fitness, &mut selected).unwrap();
        assert_eq!(selection.temperature(), 3.0);

        selection.init(10);
        assert_eq!(selection.temperature(), 5.0);
        assert_eq!(selection.compute_weight_running_sum(&fitness).unwrap(), initial);
    }

    #[test]
    fn test_split_copies_schedule_state() {
        let mut selection = BoltzmannSelection::exponential(4.0, 0.5, 0.1).unwrap();
        selection.update();
        let mut copy = selection.split();
        assert_eq!(copy.temperature(), 2.0);
        copy.update();
        assert_eq!(copy.temperature(), 1.0);
        assert_eq!(selection.temperature(), 2.0);
    }

    #[test]
    fn test_invalid_schedules() {
        assert!(BoltzmannSelection::constant(0.0).is_err());
        assert!(BoltzmannSelection::constant(f64::INFINITY).is_err());
        assert!(BoltzmannSelection::linear(5.0, 0.0, 1.0).is_err());
        assert!(BoltzmannSelection::linear(5.0, 1.0, 6.0).is_err());
        assert!(BoltzmannSelection::linear(5.0, 1.0, 0.0).is_err());
        assert!(BoltzmannSelection::exponential(5.0, 1.0, 1.0).is_err());
        assert!(BoltzmannSelection::exponential(5.0, 0.0, 1.0).is_err());
        assert!(BoltzmannSelection::exponential(-5.0, 0.5, 1.0).is_err());
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut selection = BoltzmannSelection::linear(1.0, 0.5, 0.5).unwrap();
        let mut selected = [0usize; 2];
        let result = selection.select(&vec![1.0, 10_000.0], &mut selected);
        assert!(matches!(result, Err(GeneticError::NumericalFailure(_))));
    }
}
