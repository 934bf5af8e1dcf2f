use std::sync::Arc;

use evocore::{
    error::GeneticError,
    evolution::{
        AdaptiveEvolutionaryAlgorithm, EvolutionOptions, EvolutionaryAlgorithm, GeneticAlgorithm,
        MutationOnlyAlgorithm,
    },
    fitness::{InverseCost, NegativeCost, Problem},
    operators::{CrossoverOperator, Initializer, MutationOperator},
    population::PopulationBuilder,
    rng::RandomNumberGenerator,
    selection::{FitnessProportionalSelection, SigmaScaling, TournamentSelection},
    tracker::ProgressTracker,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}

const BITS: usize = 24;

/// Number of zero bits. The optimum is all ones.
struct OneMax;

impl Problem<Vec<bool>> for OneMax {
    type Cost = i64;

    fn cost(&self, bits: &Vec<bool>) -> i64 {
        bits.iter().filter(|b| !**b).count() as i64
    }

    fn min_cost(&self) -> i64 {
        0
    }
}

struct RandomBits {
    rng: RandomNumberGenerator,
}

impl RandomBits {
    fn new(seed: u64) -> Self {
        Self {
            rng: RandomNumberGenerator::from_seed(seed),
        }
    }
}

impl Initializer<Vec<bool>> for RandomBits {
    fn create_candidate(&mut self) -> Vec<bool> {
        (0..BITS).map(|_| self.rng.next_f64() < 0.5).collect()
    }

    fn split(&self) -> Self {
        Self {
            rng: self.rng.split(),
        }
    }
}

struct BitFlip {
    rng: RandomNumberGenerator,
}

impl BitFlip {
    fn new(seed: u64) -> Self {
        Self {
            rng: RandomNumberGenerator::from_seed(seed),
        }
    }
}

impl MutationOperator<Vec<bool>> for BitFlip {
    fn mutate(&mut self, bits: &mut Vec<bool>) {
        let i = self.rng.next_index(bits.len());
        bits[i] = !bits[i];
    }

    fn split(&self) -> Self {
        Self {
            rng: self.rng.split(),
        }
    }
}

struct SinglePoint {
    rng: RandomNumberGenerator,
}

impl SinglePoint {
    fn new(seed: u64) -> Self {
        Self {
            rng: RandomNumberGenerator::from_seed(seed),
        }
    }
}

impl CrossoverOperator<Vec<bool>> for SinglePoint {
    fn cross(&mut self, first: &mut Vec<bool>, second: &mut Vec<bool>) {
        let point = 1 + self.rng.next_index(first.len() - 1);
        first[point..].swap_with_slice(&mut second[point..]);
    }

    fn split(&self) -> Self {
        Self {
            rng: self.rng.split(),
        }
    }
}

type OneMaxGa = GeneticAlgorithm<
    Vec<bool>,
    RandomBits,
    NegativeCost<OneMax>,
    TournamentSelection,
    BitFlip,
    SinglePoint,
>;

fn genetic_algorithm(options: &EvolutionOptions) -> OneMaxGa {
    let population = PopulationBuilder::new()
        .with_initializer(RandomBits::new(1))
        .with_fitness_function(NegativeCost::new(OneMax))
        .with_selection(TournamentSelection::new(3).unwrap().with_seed(2))
        .with_tracker(Arc::new(ProgressTracker::new()))
        .with_options(options)
        .build()
        .unwrap();
    EvolutionaryAlgorithm::genetic_from_options(population, BitFlip::new(3), SinglePoint::new(4), options)
        .unwrap()
}

#[test]
fn test_genetic_algorithm_improves() {
    init_tracing();
    let options = EvolutionOptions::builder()
        .population_size(40)
        .elite_count(2)
        .seed(5)
        .build()
        .unwrap();
    let mut ga = genetic_algorithm(&options);

    ga.optimize(0).unwrap();
    let initial = ga.tracker().cost().unwrap();

    let best = ga.optimize(200).unwrap().unwrap();
    assert!(best.cost() <= initial);
    assert!(best.cost() <= 2, "best cost {}", best.cost());
    assert_eq!(OneMax.cost(best.solution()), best.cost());
    assert!(ga.total_run_length() >= 40);
}

#[test]
fn test_options_drive_the_run() {
    let options = EvolutionOptions::builder()
        .num_generations(0)
        .population_size(10)
        .crossover_rate(0.25)
        .build()
        .unwrap();
    let mut ga = genetic_algorithm(&options);
    assert_eq!(ga.generation().crossover_rate(), 0.25);
    assert!(ga.optimize_with_options(&options).unwrap().is_some());
    assert_eq!(ga.total_run_length(), 10);

    let options = EvolutionOptions::builder()
        .num_generations(5)
        .population_size(10)
        .build()
        .unwrap();
    let mut ga = genetic_algorithm(&options);
    ga.optimize_with_options(&options).unwrap();
    // stops early only on the known optimum
    assert!(ga.total_run_length() <= 10 + 5 * 10);
    assert!(ga.total_run_length() > 10);
}

#[test]
fn test_stop_before_optimize() {
    let mut ga = genetic_algorithm(&EvolutionOptions::default());
    ga.tracker().stop();
    assert!(ga.optimize(10).unwrap().is_none());
    assert!(ga.tracker().solution_cost_pair().is_none());

    ga.tracker().start();
    assert!(ga.optimize(1).unwrap().is_some());
}

#[test]
fn test_parallel_runs_share_best() {
    init_tracing();
    let options = EvolutionOptions::builder()
        .population_size(20)
        .elite_count(1)
        .build()
        .unwrap();
    let mut ga = genetic_algorithm(&options);
    let best = ga.optimize_in_parallel(4, 100).unwrap().unwrap();
    assert_eq!(Some(best.cost()), ga.tracker().cost());
    assert!(ga.total_run_length() >= 4 * 20);
    assert!(matches!(
        ga.optimize_in_parallel(0, 1),
        Err(GeneticError::InvalidArgument(_))
    ));
}

#[test]
fn test_adaptive_algorithm() {
    init_tracing();
    let population = PopulationBuilder::new()
        .with_initializer(RandomBits::new(6))
        .with_fitness_function(NegativeCost::new(OneMax))
        .with_selection(TournamentSelection::default().with_seed(7))
        .with_tracker(Arc::new(ProgressTracker::new()))
        .with_size(30)
        .with_elites(1)
        .with_evolvable_parameters(2)
        .with_seed(8)
        .build()
        .unwrap();
    let mut algorithm: AdaptiveEvolutionaryAlgorithm<_, _, _, _, _, _> =
        EvolutionaryAlgorithm::adaptive(population, BitFlip::new(9), SinglePoint::new(10)).unwrap();

    let best = algorithm.optimize(300).unwrap().unwrap();
    assert!(best.cost() <= 4, "best cost {}", best.cost());
    for i in 0..algorithm.population().size() {
        let crossover_rate = algorithm.population().get_parameter(i, 0).unwrap();
        assert!((0.0..1.0).contains(&crossover_rate));
    }
}

#[test]
fn test_adaptive_needs_two_parameters() {
    let population = PopulationBuilder::new()
        .with_initializer(RandomBits::new(1))
        .with_fitness_function(NegativeCost::new(OneMax))
        .with_selection(TournamentSelection::default())
        .with_tracker(Arc::new(ProgressTracker::new()))
        .with_size(4)
        .with_evolvable_parameters(1)
        .build()
        .unwrap();
    let result = EvolutionaryAlgorithm::adaptive(population, BitFlip::new(1), SinglePoint::new(2));
    assert!(matches!(result, Err(GeneticError::InvalidArgument(_))));
}

#[test]
fn test_mutation_only_with_inverse_cost() {
    let population = PopulationBuilder::new()
        .with_initializer(RandomBits::new(11))
        .with_fitness_function(InverseCost::new(OneMax))
        .with_selection(SigmaScaling::new(FitnessProportionalSelection::new().with_seed(12)))
        .with_tracker(Arc::new(ProgressTracker::new()))
        .with_size(30)
        .with_elites(2)
        .build()
        .unwrap();
    let mut algorithm: MutationOnlyAlgorithm<_, _, _, _, _> =
        EvolutionaryAlgorithm::mutation_only(population, BitFlip::new(13));

    let first = algorithm.optimize(20).unwrap().unwrap();
    let second = algorithm.reoptimize(200).unwrap().unwrap();
    assert!(second.cost() <= first.cost());
    assert!(second.cost() <= 6, "best cost {}", second.cost());
}

#[cfg(feature = "serde")]
#[test]
fn test_options_serde_round_trip() {
    use evocore::population::ParameterAdaptation;
    use evocore::selection::{SamplingMode, TemperatureSchedule};

    let options = EvolutionOptions::builder()
        .population_size(64)
        .elite_count(4)
        .crossover_rate(0.6)
        .adaptation(ParameterAdaptation::new(0.2, 0.0, 0.5).unwrap())
        .seed(21)
        .build()
        .unwrap();
    let json = serde_json::to_string(&options).unwrap();
    let restored: EvolutionOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, options);

    let schedule = TemperatureSchedule::Exponential {
        initial: 8.0,
        decay: 0.9,
        floor: 0.5,
    };
    let json = serde_json::to_string(&schedule).unwrap();
    assert_eq!(serde_json::from_str::<TemperatureSchedule>(&json).unwrap(), schedule);

    let json = serde_json::to_string(&SamplingMode::StochasticUniversal).unwrap();
    assert_eq!(
        serde_json::from_str::<SamplingMode>(&json).unwrap(),
        SamplingMode::StochasticUniversal
    );
}
