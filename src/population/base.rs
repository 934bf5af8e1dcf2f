//! # Population
//!
//! A [`Population`] owns the live generation: `N` candidates, a parallel array of
//! their fitness values and, when configured, a flat array of `N * P` evolvable
//! parameters and an [`EliteSet`] of `E` members.
//!
//! Slots `[0, N - E)` are the mutable slots. Each generation runs through
//!
//! 1. [`Population::select`]: the selection operator picks `N - E` indices over all
//!    `N` fitness values, and copies of the picked members (with their parameters)
//!    move into the mutable slots;
//! 2. variation: the caller mutates or crosses the mutable slots in place through
//!    [`Population::candidate_mut`] and records each changed slot with
//!    [`Population::update_fitness`];
//! 3. [`Population::replace`]: the elites are written back into the last `E` slots.
//!
//! Calling these out of order is an `InvalidState` error.

use std::sync::Arc;

use tracing::debug;

use crate::error::{GeneticError, OptionExt, Result};
use crate::fitness::{Fitness, FitnessFunction, Problem};
use crate::operators::{Candidate, Initializer};
use crate::population::builder::ParameterAdaptation;
use crate::population::elite::EliteSet;
use crate::population::member::PopulationMember;
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionOperator;
use crate::tracker::ProgressTracker;

/// The cost type of the problem wrapped by fitness function `F`.
pub type CostOf<C, F> = <<F as FitnessFunction<C>>::Problem as Problem<C>>::Cost;

/// The fitness type of fitness function `F`.
pub type FitnessOf<C, F> = <F as FitnessFunction<C>>::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopulationState {
    Uninitialized,
    Ready,
    Selected,
}

/// A population of candidates with cached fitness, optional elitism and optional
/// self-adaptive parameters.
///
/// Built with [`PopulationBuilder`](crate::population::PopulationBuilder).
pub struct Population<C, I, F, S>
where
    F: FitnessFunction<C>,
{
    initializer: I,
    fitness_function: Arc<F>,
    selection: S,
    tracker: Arc<ProgressTracker<C, CostOf<C, F>>>,
    size: usize,
    candidates: Vec<C>,
    fitness: Vec<FitnessOf<C, F>>,
    selected: Vec<usize>,
    next_candidates: Vec<C>,
    next_fitness: Vec<FitnessOf<C, F>>,
    next_parameters: Vec<f64>,
    elites: Option<EliteSet<C, FitnessOf<C, F>>>,
    elite_count: usize,
    width: usize,
    parameters: Vec<f64>,
    adaptation: ParameterAdaptation,
    rng: RandomNumberGenerator,
    best_fitness: Option<FitnessOf<C, F>>,
    state: PopulationState,
}

impl<C, I, F, S> Population<C, I, F, S>
where
    C: Candidate,
    I: Initializer<C>,
    F: FitnessFunction<C>,
    S: SelectionOperator,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        initializer: I,
        fitness_function: Arc<F>,
        selection: S,
        tracker: Arc<ProgressTracker<C, CostOf<C, F>>>,
        size: usize,
        elites: Option<EliteSet<C, FitnessOf<C, F>>>,
        width: usize,
        adaptation: ParameterAdaptation,
        rng: RandomNumberGenerator,
    ) -> Self {
        let elite_count = elites.as_ref().map_or(0, |e| e.capacity());
        Self {
            initializer,
            fitness_function,
            selection,
            tracker,
            size,
            candidates: Vec::with_capacity(size),
            fitness: Vec::with_capacity(size),
            selected: vec![0; size - elite_count],
            next_candidates: Vec::with_capacity(size - elite_count),
            next_fitness: Vec::with_capacity(size - elite_count),
            next_parameters: Vec::new(),
            elites,
            elite_count,
            width,
            parameters: Vec::new(),
            adaptation,
            rng,
            best_fitness: None,
            state: PopulationState::Uninitialized,
        }
    }

    /// Total number of slots, `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of slots that are selected into and varied each generation, `N - E`.
    pub fn mutable_size(&self) -> usize {
        self.size - self.elite_count
    }

    /// Number of trailing slots reserved for elites, `E`.
    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// Width `P` of each member's parameter vector; 0 without evolvable parameters.
    pub fn parameter_width(&self) -> usize {
        self.width
    }

    /// Whether `init` has run.
    pub fn is_initialized(&self) -> bool {
        self.state != PopulationState::Uninitialized
    }

    pub fn tracker(&self) -> &Arc<ProgressTracker<C, CostOf<C, F>>> {
        &self.tracker
    }

    pub fn fitness_function(&self) -> &Arc<F> {
        &self.fitness_function
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }

    /// The elite set, if the population reserves elite slots.
    pub fn elites(&self) -> Option<&EliteSet<C, FitnessOf<C, F>>> {
        self.elites.as_ref()
    }

    /// The live fitness values, usable as a [`FitnessVector`](crate::fitness::FitnessVector).
    pub fn fitness_values(&self) -> &[FitnessOf<C, F>] {
        &self.fitness
    }

    /// Forwards the planned number of generations to the selection operator.
    pub fn init_operators(&mut self, generations: usize) {
        debug!(generations, "initializing selection operator");
        self.selection.init(generations);
    }

    /// Creates and evaluates `N` fresh candidates, draws initial parameters, and
    /// seeds the elite set. Any previous generation is discarded.
    pub fn init(&mut self) {
        self.candidates.clear();
        self.fitness.clear();
        for _ in 0..self.size {
            let candidate = self.initializer.create_candidate();
            let fitness = self.fitness_function.fitness(&candidate);
            self.candidates.push(candidate);
            self.fitness.push(fitness);
        }

        let (lower, upper) = (self.adaptation.lower(), self.adaptation.upper());
        self.parameters.clear();
        for _ in 0..self.size * self.width {
            let value = self.rng.uniform(lower, upper);
            self.parameters.push(value);
        }

        self.best_fitness = None;
        for index in 0..self.size {
            self.record_if_best(index);
        }

        let width = self.width;
        if let Some(elites) = self.elites.as_mut() {
            elites.clear();
            for index in 0..self.size {
                elites.offer_parts(
                    &self.candidates[index],
                    self.fitness[index],
                    &self.parameters[index * width..(index + 1) * width],
                );
            }
        }

        self.state = PopulationState::Ready;
        debug!(
            size = self.size,
            elites = self.elite_count,
            parameter_width = self.width,
            "population initialized"
        );
    }

    /// Refreshes the elite set from the mutable slots, then fills the mutable slots
    /// with copies of the members picked by the selection operator.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the population is initialized and not already
    /// selected, and propagates selection errors.
    pub fn select(&mut self) -> Result<()> {
        self.require_state(PopulationState::Ready, "select")?;
        let mutable = self.mutable_size();
        let width = self.width;

        if let Some(elites) = self.elites.as_mut() {
            let mut added = 0;
            for index in 0..mutable {
                if elites.offer_parts(
                    &self.candidates[index],
                    self.fitness[index],
                    &self.parameters[index * width..(index + 1) * width],
                ) {
                    added += 1;
                }
            }
            debug!(added, "refreshed elite set");
        }

        self.selection.select(&self.fitness[..], &mut self.selected)?;

        self.next_candidates.clear();
        self.next_candidates
            .extend(self.selected.iter().map(|&i| self.candidates[i].clone()));
        self.candidates[..mutable].swap_with_slice(&mut self.next_candidates);

        self.next_fitness.clear();
        self.next_fitness
            .extend(self.selected.iter().map(|&i| self.fitness[i]));
        self.fitness[..mutable].copy_from_slice(&self.next_fitness);

        if width > 0 {
            self.next_parameters.clear();
            for &i in &self.selected {
                self.next_parameters
                    .extend_from_slice(&self.parameters[i * width..(i + 1) * width]);
            }
            self.parameters[..mutable * width].copy_from_slice(&self.next_parameters);
        }

        self.state = PopulationState::Selected;
        debug!(selected = mutable, "selected next generation");
        Ok(())
    }

    /// Re-evaluates the candidate in `index` after it was changed in place, and
    /// returns its new fitness.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` outside the selected state, and `InvalidArgument` if
    /// `index` is out of range.
    pub fn update_fitness(&mut self, index: usize) -> Result<FitnessOf<C, F>> {
        self.require_state(PopulationState::Selected, "update_fitness")?;
        self.check_index(index)?;
        let fitness = self.fitness_function.fitness(&self.candidates[index]);
        self.fitness[index] = fitness;
        self.record_if_best(index);
        Ok(fitness)
    }

    /// Commits the generation: the elites, in ascending order of fitness, are written
    /// into the last `E` slots. If fewer than `E` distinct elites exist, the remaining
    /// slots repeat the fittest one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless [`Population::select`] was called first.
    pub fn replace(&mut self) -> Result<()> {
        self.require_state(PopulationState::Selected, "replace")?;
        let mutable = self.mutable_size();
        let width = self.width;

        if let Some(elites) = self.elites.as_ref() {
            for offset in 0..self.elite_count {
                let elite = elites
                    .get(offset)
                    .or_else(|| elites.most_fit())
                    .ok_or_else_genetic(|| {
                        GeneticError::InvalidState("elite set is empty".to_string())
                    })?;
                let slot = mutable + offset;
                self.candidates[slot] = elite.candidate().clone();
                self.fitness[slot] = elite.fitness();
                if width > 0 {
                    self.parameters[slot * width..(slot + 1) * width]
                        .copy_from_slice(elite.parameters());
                }
            }
        }

        self.state = PopulationState::Ready;
        debug!(elite_slots = self.elite_count, "replaced generation");
        Ok(())
    }

    /// Resamples the parameters of the mutable slots according to the population's
    /// [`ParameterAdaptation`].
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` without evolvable parameters and `InvalidState` outside
    /// the selected state.
    pub fn adapt_parameters(&mut self) -> Result<()> {
        self.require_parameters()?;
        self.require_state(PopulationState::Selected, "adapt_parameters")?;
        let probability = self.adaptation.resample_probability();
        let (lower, upper) = (self.adaptation.lower(), self.adaptation.upper());
        let end = self.mutable_size() * self.width;
        for value in &mut self.parameters[..end] {
            if self.rng.next_f64() < probability {
                *value = self.rng.uniform(lower, upper);
            }
        }
        Ok(())
    }

    /// Parameter `component` of the member in `index`.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` without evolvable parameters, `InvalidState` before
    /// [`Population::init`], and `InvalidArgument` if either index is out of range.
    pub fn get_parameter(&self, index: usize, component: usize) -> Result<f64> {
        let parameters = self.parameters(index)?;
        parameters.get(component).copied().ok_or_else_genetic(|| {
            GeneticError::InvalidArgument(format!(
                "Parameter {} is out of range for width {}",
                component, self.width
            ))
        })
    }

    /// The whole parameter vector of the member in `index`.
    ///
    /// # Errors
    ///
    /// As [`Population::get_parameter`].
    pub fn parameters(&self, index: usize) -> Result<&[f64]> {
        self.require_parameters()?;
        self.ensure_initialized()?;
        self.check_index(index)?;
        Ok(&self.parameters[index * self.width..(index + 1) * self.width])
    }

    /// # Errors
    ///
    /// Returns `InvalidState` before [`Population::init`] and `InvalidArgument` if
    /// `index` is out of range.
    pub fn get_fitness(&self, index: usize) -> Result<FitnessOf<C, F>> {
        self.ensure_initialized()?;
        self.check_index(index)?;
        Ok(self.fitness[index])
    }

    /// # Errors
    ///
    /// As [`Population::get_fitness`].
    pub fn candidate(&self, index: usize) -> Result<&C> {
        self.ensure_initialized()?;
        self.check_index(index)?;
        Ok(&self.candidates[index])
    }

    /// Mutable access to a candidate. Its cached fitness is stale until
    /// [`Population::update_fitness`] is called for the same slot.
    ///
    /// # Errors
    ///
    /// As [`Population::get_fitness`].
    pub fn candidate_mut(&mut self, index: usize) -> Result<&mut C> {
        self.ensure_initialized()?;
        self.check_index(index)?;
        Ok(&mut self.candidates[index])
    }

    /// Mutable access to two distinct candidates at once, for crossover.
    ///
    /// # Errors
    ///
    /// As [`Population::get_fitness`], and `InvalidArgument` if `first == second`.
    pub fn candidate_pair_mut(&mut self, first: usize, second: usize) -> Result<(&mut C, &mut C)> {
        self.ensure_initialized()?;
        self.check_index(first)?;
        self.check_index(second)?;
        if first == second {
            return Err(GeneticError::InvalidArgument(
                "Crossover requires two distinct slots".to_string(),
            ));
        }
        let (low, high) = (first.min(second), first.max(second));
        let (left, right) = self.candidates.split_at_mut(high);
        let (a, b) = (&mut left[low], &mut right[0]);
        if first < second {
            Ok((a, b))
        } else {
            Ok((b, a))
        }
    }

    /// The fittest member of the live generation, or of the elite set if an elite
    /// is fitter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` before [`Population::init`].
    pub fn get_most_fit(&self) -> Result<PopulationMember<C, FitnessOf<C, F>>> {
        self.ensure_initialized()?;
        let best = (0..self.size)
            // NaN never wins over a comparable fitness.
            .max_by(|&a, &b| {
                let (fa, fb) = (self.fitness[a], self.fitness[b]);
                fb.is_nan()
                    .cmp(&fa.is_nan())
                    .then_with(|| fa.compare(&fb))
            })
            .ok_or(GeneticError::EmptyPopulation)?;
        let live = PopulationMember::with_parameters(
            self.candidates[best].clone(),
            self.fitness[best],
            self.parameters[best * self.width..(best + 1) * self.width].to_vec(),
        );
        match self.elites.as_ref().and_then(|e| e.most_fit()) {
            Some(elite) if elite.fitness() > live.fitness() => Ok(elite.clone()),
            _ => Ok(live),
        }
    }

    /// Returns an independent copy for another thread.
    ///
    /// Candidates, fitness values, parameters and elites are deep-copied; the
    /// selection operator, initializer and random generator are split. The fitness
    /// function and the progress tracker are shared.
    pub fn split(&self) -> Self {
        Self {
            initializer: self.initializer.split(),
            fitness_function: Arc::clone(&self.fitness_function),
            selection: self.selection.split(),
            tracker: Arc::clone(&self.tracker),
            size: self.size,
            candidates: self.candidates.clone(),
            fitness: self.fitness.clone(),
            selected: self.selected.clone(),
            next_candidates: Vec::with_capacity(self.mutable_size()),
            next_fitness: Vec::with_capacity(self.mutable_size()),
            next_parameters: Vec::new(),
            elites: self.elites.clone(),
            elite_count: self.elite_count,
            width: self.width,
            parameters: self.parameters.clone(),
            adaptation: self.adaptation,
            rng: self.rng.split(),
            best_fitness: self.best_fitness,
            state: self.state,
        }
    }

    /// Reports the member in `index` to the tracker if it beats every fitness this
    /// population has seen.
    fn record_if_best(&mut self, index: usize) {
        let fitness = self.fitness[index];
        if self.best_fitness.map_or(true, |best| fitness > best) {
            self.best_fitness = Some(fitness);
            let problem = self.fitness_function.problem();
            let candidate = &self.candidates[index];
            let cost = problem.cost(candidate);
            self.tracker
                .update(cost, candidate, problem.is_min_cost(cost));
        }
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.state == PopulationState::Uninitialized {
            return Err(GeneticError::InvalidState(
                "population has not been initialized".to_string(),
            ));
        }
        Ok(())
    }

    fn require_state(&self, expected: PopulationState, operation: &str) -> Result<()> {
        self.ensure_initialized()?;
        if self.state != expected {
            return Err(GeneticError::InvalidState(format!(
                "{} called in state {:?}",
                operation, self.state
            )));
        }
        Ok(())
    }

    fn require_parameters(&self) -> Result<()> {
        if self.width == 0 {
            return Err(GeneticError::Unsupported(
                "population has no evolvable parameters".to_string(),
            ));
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.size {
            return Err(GeneticError::InvalidArgument(format!(
                "Index {} is out of range for population size {}",
                index, self.size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::{FitnessVector, NegativeCost};
    use crate::population::PopulationBuilder;

    /// Cost is the candidate itself, so fitness is its negation.
    struct Value;

    impl Problem<i64> for Value {
        type Cost = i64;

        fn cost(&self, candidate: &i64) -> i64 {
            *candidate
        }

        fn min_cost(&self) -> i64 {
            0
        }
    }

    struct Sequence(Vec<i64>, usize);

    impl Initializer<i64> for Sequence {
        fn create_candidate(&mut self) -> i64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }

        fn split(&self) -> Self {
            Sequence(self.0.clone(), self.1)
        }
    }

    /// Always selects the same indices, cycling if more are needed.
    #[derive(Debug)]
    struct Fixed(Vec<usize>);

    impl SelectionOperator for Fixed {
        fn select<V>(&mut self, _fitness: &V, selected: &mut [usize]) -> Result<()>
        where
            V: FitnessVector + ?Sized,
        {
            for (slot, value) in selected.iter_mut().enumerate() {
                *value = self.0[slot % self.0.len()];
            }
            Ok(())
        }

        fn split(&self) -> Self {
            Fixed(self.0.clone())
        }
    }

    type TestPopulation = Population<i64, Sequence, NegativeCost<Value>, Fixed>;

    fn population(values: Vec<i64>, picks: Vec<usize>, elites: usize, width: usize) -> TestPopulation {
        let size = values.len();
        PopulationBuilder::new()
            .with_initializer(Sequence(values, 0))
            .with_fitness_function(NegativeCost::new(Value))
            .with_selection(Fixed(picks))
            .with_tracker(Arc::new(ProgressTracker::new()))
            .with_size(size)
            .with_elites(elites)
            .with_evolvable_parameters(width)
            .with_seed(3)
            .build()
            .unwrap()
    }

    #[test]
    fn test_lifecycle_order_is_enforced() {
        let mut pop = population(vec![3, 1, 2], vec![0], 0, 0);
        assert!(matches!(pop.select(), Err(GeneticError::InvalidState(_))));
        assert!(matches!(pop.get_most_fit(), Err(GeneticError::InvalidState(_))));
        assert!(matches!(pop.get_fitness(0), Err(GeneticError::InvalidState(_))));

        pop.init();
        assert!(matches!(pop.replace(), Err(GeneticError::InvalidState(_))));
        assert!(matches!(
            pop.update_fitness(0),
            Err(GeneticError::InvalidState(_))
        ));

        pop.select().unwrap();
        assert!(matches!(pop.select(), Err(GeneticError::InvalidState(_))));
        assert!(pop.update_fitness(1).is_ok());
        pop.replace().unwrap();
        assert!(pop.select().is_ok());
    }

    #[test]
    fn test_select_copies_picked_members() {
        let mut pop = population(vec![5, 7, 9, 11], vec![2, 2, 0, 3], 0, 0);
        pop.init();
        pop.select().unwrap();
        let candidates: Vec<i64> = (0..4).map(|i| *pop.candidate(i).unwrap()).collect();
        assert_eq!(candidates, vec![9, 9, 5, 11]);
        assert_eq!(pop.fitness_values(), &[-9, -9, -5, -11]);

        *pop.candidate_mut(1).unwrap() = 1;
        assert_eq!(pop.get_fitness(1).unwrap(), -9);
        assert_eq!(pop.update_fitness(1).unwrap(), -1);
        assert_eq!(pop.get_fitness(0).unwrap(), -9);
    }

    #[test]
    fn test_elites_fill_last_slots() {
        let mut pop = population(vec![4, 8, 1, 6, 3], vec![1], 2, 0);
        pop.init();
        assert_eq!(pop.mutable_size(), 3);
        pop.select().unwrap();
        pop.replace().unwrap();

        let candidates: Vec<i64> = (0..5).map(|i| *pop.candidate(i).unwrap()).collect();
        assert_eq!(candidates, vec![8, 8, 8, 3, 1]);
        assert_eq!(pop.get_most_fit().unwrap().fitness(), -1);
    }

    #[test]
    fn test_elite_padding_repeats_best() {
        let mut pop = population(vec![2, 2, 2, 2], vec![0], 3, 0);
        pop.init();
        pop.select().unwrap();
        pop.replace().unwrap();
        assert_eq!(pop.elites().unwrap().len(), 1);
        assert_eq!(pop.fitness_values(), &[-2, -2, -2, -2]);
    }

    #[test]
    fn test_most_fit_considers_elites() {
        let mut pop = population(vec![1, 5, 5], vec![1, 1], 1, 0);
        pop.init();
        pop.select().unwrap();
        pop.replace().unwrap();
        // the live mutable slots no longer hold candidate 1, the elite slot does
        assert_eq!(*pop.candidate(2).unwrap(), 1);

        pop.select().unwrap();
        *pop.candidate_mut(2).unwrap() = 50;
        pop.update_fitness(2).unwrap();
        let best = pop.get_most_fit().unwrap();
        assert_eq!(*best.candidate(), 1);
        assert_eq!(best.fitness(), -1);
    }

    #[test]
    fn test_parameters_follow_candidates() {
        let mut pop = population(vec![10, 20, 30], vec![2, 0, 2], 0, 2);
        pop.init();
        let before: Vec<Vec<f64>> = (0..3).map(|i| pop.parameters(i).unwrap().to_vec()).collect();
        assert!(before.iter().flatten().all(|p| (0.0..1.0).contains(p)));

        pop.select().unwrap();
        assert_eq!(pop.parameters(0).unwrap(), &before[2][..]);
        assert_eq!(pop.parameters(1).unwrap(), &before[0][..]);
        assert_eq!(pop.get_parameter(2, 1).unwrap(), before[2][1]);
        assert!(matches!(
            pop.get_parameter(0, 2),
            Err(GeneticError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parameters_unsupported_without_width() {
        let mut pop = population(vec![1, 2], vec![0], 0, 0);
        pop.init();
        assert!(matches!(
            pop.get_parameter(0, 0),
            Err(GeneticError::Unsupported(_))
        ));
        pop.select().unwrap();
        assert!(matches!(
            pop.adapt_parameters(),
            Err(GeneticError::Unsupported(_))
        ));
    }

    #[test]
    fn test_adapt_parameters_stays_in_range() {
        let mut pop = PopulationBuilder::new()
            .with_initializer(Sequence(vec![1, 2, 3, 4], 0))
            .with_fitness_function(NegativeCost::new(Value))
            .with_selection(Fixed(vec![0, 1, 2, 3]))
            .with_tracker(Arc::new(ProgressTracker::new()))
            .with_size(4)
            .with_evolvable_parameters(3)
            .with_adaptation(ParameterAdaptation::new(1.0, 2.0, 3.0).unwrap())
            .build()
            .unwrap();
        pop.init();
        pop.select().unwrap();
        pop.adapt_parameters().unwrap();
        for i in 0..4 {
            assert!(pop.parameters(i).unwrap().iter().all(|p| (2.0..3.0).contains(p)));
        }
    }

    #[test]
    fn test_pair_access() {
        let mut pop = population(vec![1, 2, 3], vec![0, 1, 2], 0, 0);
        pop.init();
        {
            let (a, b) = pop.candidate_pair_mut(2, 0).unwrap();
            assert_eq!((*a, *b), (3, 1));
            std::mem::swap(a, b);
        }
        assert_eq!(*pop.candidate(0).unwrap(), 3);
        assert!(pop.candidate_pair_mut(1, 1).is_err());
        assert!(pop.candidate_pair_mut(0, 3).is_err());
    }

    #[test]
    fn test_tracker_records_lowest_cost() {
        let mut pop = population(vec![7, 4, 9], vec![0], 0, 0);
        pop.init();
        assert_eq!(pop.tracker().cost(), Some(4));
        pop.select().unwrap();
        *pop.candidate_mut(0).unwrap() = 0;
        pop.update_fitness(0).unwrap();
        assert_eq!(pop.tracker().cost(), Some(0));
        assert!(pop.tracker().did_find_best());
    }
}
