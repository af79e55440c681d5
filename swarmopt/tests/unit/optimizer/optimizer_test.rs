use super::*;
use crate::bounds::{BoundsPolicy, SearchSpace};
use crate::helpers::objectives::*;
use crate::helpers::optimizer::*;
use crate::helpers::utils::create_test_random;
use crate::measurement::{FnMeasurement, MeasurementKind};
use crate::objective::{Direction, FunctionObjective};
use crate::termination::{MaxIteration, Termination};
use crate::topology::Topology;
use crate::update::UpdateRule;
use crate::utils::{CancellationQuota, GenericResult, Parallelism, Quota};

fn run_sphere(config: OptimizerConfig, environment: Arc<Environment>) -> (Optimizer, OptimizationResult) {
    let mut optimizer = Optimizer::new(config, environment).expect("cannot create optimizer");
    let result = optimizer.run(&create_sphere_objective()).expect("cannot run optimizer");

    (optimizer, result)
}

struct FnTermination<F: Fn(&OptimizationState) -> bool + Send + Sync>(F);

impl<F: Fn(&OptimizationState) -> bool + Send + Sync> Termination for FnTermination<F> {
    fn is_termination(&self, state: &OptimizationState) -> bool {
        (self.0)(state)
    }

    fn estimate(&self, _: &OptimizationState) -> Float {
        0.
    }
}

fn assert_monotonic(result: &OptimizationResult, direction: Direction) {
    let series = result.measurements.series("best_fitness").into_iter().map(|value| value.unwrap()).collect::<Vec<_>>();

    assert!(series.windows(2).all(|pair| !direction.is_better(pair[0], pair[1])), "not monotonic: {series:?}");
}

#[test]
fn can_minimize_sphere_function() {
    let (optimizer, result) = run_sphere(create_sphere_config(20, 50, 42), create_test_environment());

    assert!(result.fitness < 1E-3, "fitness is too high: {}", result.fitness);
    assert_eq!(result.iterations, 50);
    assert_eq!(result.evaluations, 20 * 51);
    assert_eq!(result.outcome, RunOutcome::Completed);
    assert_eq!(result.measurements.len(), 50);
    assert_eq!(result.measurements.records().first().map(|record| record.iteration), Some(1));
    assert_eq!(result.position.len(), 2);
    assert_eq!(sphere(result.position.as_slice()), result.fitness);
    assert_eq!(optimizer.phase(), OptimizerPhase::Completed);
    assert_eq!(optimizer.state().map(|state| state.iteration), Some(50));
    assert_monotonic(&result, Direction::Minimize);
}

#[test]
fn can_stop_after_exact_amount_of_iterations() {
    let (_, result) = run_sphere(create_sphere_config(20, 10, 0), create_test_environment());

    assert_eq!(result.iterations, 10);
    assert_eq!(result.measurements.len(), 10);
}

#[test]
fn can_keep_only_required_best_history() {
    let mut config = create_sphere_config(10, 40, 0);
    config.termination = TerminationConfig::Any {
        criteria: vec![
            TerminationConfig::max_iterations(40),
            TerminationConfig::Stagnation { window: 8, min_delta: -1. },
            TerminationConfig::Stagnation { window: 5, min_delta: -1. },
        ],
    };

    let (optimizer, result) = run_sphere(config, create_test_environment());

    assert_eq!(result.iterations, 40);
    assert_eq!(optimizer.state().map(|state| state.best_history.len()), Some(9));

    let mut custom = Optimizer::new(create_sphere_config(10, 1000, 0), create_test_environment())
        .unwrap()
        .with_termination(Box::new(FnTermination(|state: &OptimizationState| state.iteration >= 12)));
    custom.run(&create_sphere_objective()).unwrap();
    assert_eq!(custom.state().map(|state| state.best_history.len()), Some(13));

    let (optimizer, _) = run_sphere(create_sphere_config(10, 40, 0), create_test_environment());
    assert_eq!(optimizer.state().map(|state| state.best_history.len()), Some(2));
}

#[test]
fn can_check_termination_before_first_iteration() {
    let (optimizer, result) = run_sphere(create_sphere_config(20, 0, 0), create_test_environment());

    assert_eq!(result.iterations, 0);
    assert_eq!(result.evaluations, 20);
    assert!(result.measurements.is_empty());
    assert_eq!(optimizer.state().map(|state| state.swarm.size()), Some(20));
}

#[test]
fn can_reject_invalid_config() {
    let mut config = create_sphere_config(20, 10, 0);
    config.population_size = 0;

    let result = Optimizer::new(config, create_test_environment());

    assert!(matches!(result, Err(OptimizationError::Configuration(_))));
}

#[test]
fn can_reject_bounds_with_unrepresentable_range() {
    let result = OptimizerConfigBuilder::default()
        .with_bounds(SearchSpace::uniform(2, -1E308, 1E308))
        .with_population_size(5)
        .with_termination(TerminationConfig::max_iterations(3))
        .build();

    match result {
        Err(OptimizationError::Configuration(message)) => assert!(message.contains("too wide")),
        _ => unreachable!("unexpected result"),
    }
}

#[test]
fn can_reproduce_run_with_the_same_seed() {
    let (_, first) = run_sphere(create_sphere_config(15, 30, 7), create_test_environment());
    let (_, second) = run_sphere(create_sphere_config(15, 30, 7), create_test_environment());

    assert_eq!(first, second);
}

#[test]
fn can_reproduce_run_regardless_of_parallelism() {
    let parallel = Arc::new(Environment::new(create_test_random(), None, Parallelism::new_with_cpus(4), Arc::new(|_| {})));
    let config = OptimizerConfigBuilder::default()
        .with_bounds(SearchSpace::uniform(5, -10., 10.))
        .with_topology(Topology::Random { size: 3 })
        .with_measurements(vec![MeasurementKind::BestFitness, MeasurementKind::Diversity])
        .with_termination(TerminationConfig::max_iterations(30))
        .with_random_seed(Some(3))
        .build()
        .unwrap();

    let (_, sequential) = run_sphere(config.clone(), create_test_environment());
    let (_, parallel) = run_sphere(config, parallel);

    assert_eq!(sequential, parallel);
}

#[test]
fn can_produce_different_runs_with_different_seeds() {
    let (_, first) = run_sphere(create_sphere_config(15, 5, 1), create_test_environment());
    let (_, second) = run_sphere(create_sphere_config(15, 5, 2), create_test_environment());

    assert_ne!(first.position, second.position);
}

parameterized_test! {can_keep_particles_within_bounds, policy, {
    can_keep_particles_within_bounds_impl(policy);
}}

can_keep_particles_within_bounds! {
    case_01_clamp: BoundsPolicy::Clamp,
    case_02_reflect: BoundsPolicy::Reflect,
}

fn can_keep_particles_within_bounds_impl(policy: BoundsPolicy) {
    let space = SearchSpace::new(vec![1., -1.], vec![3., 0.]);
    let config = OptimizerConfigBuilder::default()
        .with_bounds(space.clone())
        .with_bounds_policy(policy)
        .with_coefficients(0.9, 2., 2.)
        .with_velocity_initialization(VelocityInitialization::Random { fraction: 1. })
        .with_termination(TerminationConfig::max_iterations(30))
        .with_random_seed(Some(11))
        .build()
        .unwrap();
    let containment = FnMeasurement::new(
        "containment",
        Arc::new(move |state: &OptimizationState| -> GenericResult<Float> {
            let is_contained = state.swarm.particles().iter().all(|particle| {
                space.contains(particle.position.as_slice()) && space.contains(particle.best_position.as_slice())
            });
            Ok(if is_contained { 1. } else { 0. })
        }),
    );

    let mut optimizer =
        Optimizer::new(config, create_test_environment()).unwrap().with_measurement(Box::new(containment));
    let result = optimizer.run(&create_rastrigin_objective()).unwrap();

    assert_eq!(result.measurements.series("containment"), vec![Some(1.); 30]);
}

parameterized_test! {can_optimize_with_different_strategies, (topology, update_rule), {
    can_optimize_with_different_strategies_impl(topology, update_rule);
}}

can_optimize_with_different_strategies! {
    case_01_ring: (Topology::Ring { size: 2 }, UpdateRule::Standard),
    case_02_random: (Topology::Random { size: 3 }, UpdateRule::Standard),
    case_03_gc_global: (Topology::Global, UpdateRule::guaranteed_convergence()),
    case_04_gc_ring: (Topology::Ring { size: 4 }, UpdateRule::guaranteed_convergence()),
}

fn can_optimize_with_different_strategies_impl(topology: Topology, update_rule: UpdateRule) {
    let config = OptimizerConfigBuilder::default()
        .with_bounds(SearchSpace::uniform(2, -5., 5.))
        .with_population_size(20)
        .with_topology(topology)
        .with_update_rule(update_rule)
        .with_termination(TerminationConfig::max_iterations(100))
        .with_random_seed(Some(5))
        .build()
        .unwrap();

    let (_, result) = run_sphere(config, create_test_environment());

    assert!(result.fitness < 1E-2, "fitness is too high: {}", result.fitness);
    assert_monotonic(&result, Direction::Minimize);
}

#[test]
fn can_maximize_objective() {
    let config = OptimizerConfigBuilder::default()
        .with_bounds(SearchSpace::uniform(2, -5., 5.))
        .with_population_size(20)
        .with_direction(Direction::Maximize)
        .with_termination(TerminationConfig::max_iterations(50))
        .with_random_seed(Some(42))
        .build()
        .unwrap();
    let objective = FunctionObjective::from_fn(|position| -sphere(position));

    let result = optimize(&objective, config, create_test_environment()).unwrap();

    assert!(result.fitness > -1E-3, "fitness is too low: {}", result.fitness);
    assert_monotonic(&result, Direction::Maximize);
}

#[test]
fn can_stop_when_target_error_is_reached() {
    let config = OptimizerConfigBuilder::default()
        .with_bounds(SearchSpace::uniform(2, -5., 5.))
        .with_population_size(20)
        .with_termination(TerminationConfig::Any {
            criteria: vec![
                TerminationConfig::max_iterations(1000),
                TerminationConfig::TargetError { epsilon: 1E-4, optimum: None },
            ],
        })
        .with_random_seed(Some(42))
        .build()
        .unwrap();

    let (_, result) = run_sphere(config, create_test_environment());

    assert!(result.iterations < 1000);
    assert!(result.fitness <= 1E-4);
}

#[test]
fn can_stop_on_evaluation_limit() {
    let config = OptimizerConfigBuilder::default()
        .with_bounds(SearchSpace::uniform(2, -5., 5.))
        .with_population_size(10)
        .with_termination(TerminationConfig::MaxEvaluations { limit: 55 })
        .with_random_seed(Some(42))
        .build()
        .unwrap();

    let (_, result) = run_sphere(config, create_test_environment());

    assert_eq!(result.iterations, 5);
    assert_eq!(result.evaluations, 60);
}

#[test]
fn can_use_custom_termination() {
    let (_, result) = {
        let mut optimizer = Optimizer::new(create_sphere_config(10, 1000, 0), create_test_environment())
            .unwrap()
            .with_termination(Box::new(MaxIteration::new(3)));
        let result = optimizer.run(&create_sphere_objective()).unwrap();
        (optimizer, result)
    };

    assert_eq!(result.iterations, 3);
}

#[test]
fn can_fail_on_initial_evaluation_error() {
    let mut optimizer = Optimizer::new(create_sphere_config(20, 10, 0), create_test_environment()).unwrap();

    let result = optimizer.run(&FailingObjective::new(5));

    assert!(matches!(result, Err(OptimizationError::Evaluation { iteration: 0, .. })));
    assert_eq!(optimizer.phase(), OptimizerPhase::Failed);
    assert!(optimizer.state().is_none());
}

#[test]
fn can_keep_last_good_state_on_evaluation_error() {
    let mut optimizer = Optimizer::new(create_sphere_config(20, 10, 0), create_test_environment()).unwrap();
    let objective = FailingObjective::new(20 * 3 + 5);

    let result = optimizer.run(&objective);

    match result {
        Err(OptimizationError::Evaluation { iteration, position, cause }) => {
            assert_eq!(iteration, 3);
            assert_eq!(position.len(), 2);
            assert_eq!(cause.to_string(), "objective is out of service");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(optimizer.phase(), OptimizerPhase::Failed);
    assert_eq!(optimizer.state().map(|state| (state.iteration, state.evaluations)), Some((2, 60)));
    assert_eq!(objective.evaluations(), 80);
}

#[test]
fn can_reject_second_run() {
    let (mut optimizer, _) = run_sphere(create_sphere_config(10, 5, 0), create_test_environment());

    let result = optimizer.run(&create_sphere_objective());

    assert_eq!(result, Err(OptimizationError::Lifecycle(OptimizerPhase::Completed)));
}

#[test]
fn can_cancel_run_between_iterations() {
    let quota = CancellationQuota::default();
    let environment = Arc::new(Environment::new(
        create_test_random(),
        Some(Arc::new(quota.clone())),
        Parallelism::sequential(),
        Arc::new(|_| {}),
    ));
    let cancellation = FnMeasurement::new(
        "cancellation",
        Arc::new(move |state: &OptimizationState| -> GenericResult<Float> {
            if state.iteration == 3 {
                quota.cancel();
            }
            Ok(state.iteration as Float)
        }),
    );

    let mut optimizer =
        Optimizer::new(create_sphere_config(10, 100, 0), environment).unwrap().with_measurement(Box::new(cancellation));
    let result = optimizer.run(&create_sphere_objective()).unwrap();

    assert_eq!(result.outcome, RunOutcome::Cancelled);
    assert_eq!(result.iterations, 3);
    assert_eq!(result.measurements.len(), 3);
    assert_eq!(optimizer.phase(), OptimizerPhase::Cancelled);
}

#[test]
fn can_cancel_run_before_first_iteration() {
    let quota = CancellationQuota::new(None);
    quota.cancel();
    assert!(quota.is_reached());
    let environment = Arc::new(Environment::new(
        create_test_random(),
        Some(Arc::new(quota)),
        Parallelism::sequential(),
        Arc::new(|_| {}),
    ));

    let (_, result) = run_sphere(create_sphere_config(10, 100, 0), environment);

    assert_eq!(result.outcome, RunOutcome::Cancelled);
    assert_eq!(result.iterations, 0);
    assert_eq!(result.evaluations, 10);
}

#[test]
fn can_log_progress_via_environment_logger() {
    let (logger, messages) = create_collecting_logger();
    let environment = Arc::new(Environment::new(create_test_random(), None, Parallelism::sequential(), logger));
    let mut config = create_sphere_config(10, 10, 0);
    config.telemetry = TelemetryMode::Logging { log_best: 5 };

    run_sphere(config, environment);

    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 5);
    assert!(messages[1].contains("iteration 5"));
    assert!(messages[2].contains("iteration 10"));
}

#[test]
fn can_use_environment_random_without_seed() {
    let mut config = create_sphere_config(10, 10, 0);
    config.random_seed = None;

    let (_, result) = run_sphere(config, create_test_environment());

    assert_eq!(result.iterations, 10);
    assert!(result.fitness.is_finite());
}
