//! # Progress Tracking
//!
//! A [`ProgressTracker`] is the one piece of state shared between split copies of
//! a population or algorithm. It keeps the best solution seen by any copy, and a stop
//! flag the drivers poll once per generation.
//!
//! ```rust
//! use evocore::tracker::ProgressTracker;
//!
//! let tracker: ProgressTracker<String, i64> = ProgressTracker::new();
//! assert!(tracker.update(10, &"first".to_string(), false));
//! assert!(!tracker.update(12, &"worse".to_string(), false));
//! assert_eq!(tracker.cost(), Some(10));
//!
//! tracker.stop();
//! assert!(tracker.is_stopped());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::fitness::Fitness;

/// A solution together with its cost.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionCostPair<C, K> {
    solution: C,
    cost: K,
    known_optimal: bool,
}

impl<C, K: Fitness> SolutionCostPair<C, K> {
    pub fn new(solution: C, cost: K, known_optimal: bool) -> Self {
        Self {
            solution,
            cost,
            known_optimal,
        }
    }

    pub fn solution(&self) -> &C {
        &self.solution
    }

    pub fn into_solution(self) -> C {
        self.solution
    }

    pub fn cost(&self) -> K {
        self.cost
    }

    /// Whether the cost equals the problem's known minimum.
    pub fn is_known_optimal(&self) -> bool {
        self.known_optimal
    }
}

/// Thread-safe register of the best (lowest cost) solution found so far.
#[derive(Debug)]
pub struct ProgressTracker<C, K> {
    best: Mutex<Option<SolutionCostPair<C, K>>>,
    stopped: AtomicBool,
    found_best: AtomicBool,
}

impl<C: Clone, K: Fitness> ProgressTracker<C, K> {
    pub fn new() -> Self {
        Self {
            best: Mutex::new(None),
            stopped: AtomicBool::new(false),
            found_best: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<SolutionCostPair<C, K>>> {
        self.best.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records `solution` if `cost` is strictly lower than the best so far.
    ///
    /// Returns `true` if the record changed. The solution is cloned only when it is
    /// kept.
    pub fn update(&self, cost: K, solution: &C, known_optimal: bool) -> bool {
        let mut best = self.lock();
        let improves = match best.as_ref() {
            Some(current) => cost < current.cost,
            None => true,
        };
        if improves {
            *best = Some(SolutionCostPair::new(solution.clone(), cost, known_optimal));
            if known_optimal {
                self.found_best.store(true, Ordering::SeqCst);
            }
        }
        improves
    }

    /// The best solution so far, if any.
    pub fn solution_cost_pair(&self) -> Option<SolutionCostPair<C, K>> {
        self.lock().clone()
    }

    /// The cost of the best solution so far, if any.
    pub fn cost(&self) -> Option<K> {
        self.lock().as_ref().map(|pair| pair.cost)
    }

    /// Requests that drivers sharing this tracker stop at the next generation boundary.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Clears the stop request.
    pub fn start(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Whether a solution with the known minimum cost has been recorded.
    pub fn did_find_best(&self) -> bool {
        self.found_best.load(Ordering::SeqCst)
    }
}

impl<C: Clone, K: Fitness> Default for ProgressTracker<C, K> {
    fn default() -> Self {
        Self::new()
    }
}
