//! The optimizer module contains the engine which owns the swarm and drives the
//! update, measure and termination check loop.

#[cfg(test)]
#[path = "../../tests/unit/optimizer/optimizer_test.rs"]
mod optimizer_test;

mod config;
pub use self::config::*;

mod error;
pub use self::error::*;

mod state;
pub use self::state::*;

mod telemetry;
pub use self::telemetry::*;

use crate::measurement::{Measurement, MeasurementLog, MeasurementPipeline};
use crate::objective::{Objective, evaluate};
use crate::population::{Particle, Swarm};
use crate::termination::Termination;
use crate::topology::Neighborhood;
use crate::update::{Draws, VelocityUpdate, next_position};
use crate::utils::{DefaultRandom, Environment, Float, Random, Timer};
use serde::Serialize;
use std::sync::Arc;

/// Specifies a lifecycle phase of the optimizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptimizerPhase {
    /// Configuration is validated, no swarm exists yet.
    Uninitialized,
    /// Initial swarm is sampled and evaluated.
    Initialized,
    /// Iterations are in progress.
    Running,
    /// Termination criteria was met.
    Completed,
    /// The run was stopped by the environment quota.
    Cancelled,
    /// The run was abandoned due to an error.
    Failed,
}

/// Specifies how a successful run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    /// Termination criteria was met.
    Completed,
    /// The run was stopped between iterations by an external signal.
    Cancelled,
}

/// A result of the optimization run.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizationResult {
    /// The best position found.
    pub position: Vec<Float>,
    /// Fitness of the best position.
    pub fitness: Float,
    /// Amount of completed iterations.
    pub iterations: usize,
    /// Amount of objective function evaluations.
    pub evaluations: usize,
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Statistics recorded on each iteration.
    pub measurements: MeasurementLog,
}

/// A particle swarm optimizer. An instance runs only once: to retry, create a new one.
pub struct Optimizer {
    config: OptimizerConfig,
    environment: Arc<Environment>,
    random: Arc<dyn Random>,
    termination: Box<dyn Termination>,
    pipeline: MeasurementPipeline,
    telemetry: Telemetry,
    velocity_update: VelocityUpdate,
    neighborhood: Option<Neighborhood>,
    phase: OptimizerPhase,
    state: Option<OptimizationState>,
}

impl Optimizer {
    /// Creates a new instance of `Optimizer`. When a random seed is configured, the optimizer
    /// owns a reproducible random source, otherwise the environment one is used.
    pub fn new(config: OptimizerConfig, environment: Arc<Environment>) -> Result<Self, OptimizationError> {
        config.validate()?;

        let random: Arc<dyn Random> = match config.random_seed {
            Some(seed) => Arc::new(DefaultRandom::new_repeatable(seed)),
            None => environment.random.clone(),
        };

        let termination = config.termination.create();
        let pipeline = MeasurementPipeline::new(config.measurements.iter().map(|kind| kind.create()).collect());
        let telemetry = Telemetry::new(config.telemetry, environment.logger.clone());
        let velocity_update = VelocityUpdate::new(config.update_rule, config.coefficients());

        Ok(Self {
            config,
            environment,
            random,
            termination,
            pipeline,
            telemetry,
            velocity_update,
            neighborhood: None,
            phase: OptimizerPhase::Uninitialized,
            state: None,
        })
    }

    /// Replaces termination criteria built from configuration with a custom one.
    pub fn with_termination(mut self, termination: Box<dyn Termination>) -> Self {
        self.termination = termination;
        self
    }

    /// Registers an additional measurement after the configured ones.
    pub fn with_measurement(mut self, measurement: Box<dyn Measurement>) -> Self {
        self.pipeline.add(measurement);
        self
    }

    /// Returns configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Returns current lifecycle phase.
    pub fn phase(&self) -> OptimizerPhase {
        self.phase
    }

    /// Returns the last completely updated state. After a failure it is the last good state.
    pub fn state(&self) -> Option<&OptimizationState> {
        self.state.as_ref()
    }

    /// Runs the optimization of given objective.
    pub fn run(&mut self, objective: &dyn Objective) -> Result<OptimizationResult, OptimizationError> {
        if self.phase != OptimizerPhase::Uninitialized {
            return Err(OptimizationError::Lifecycle(self.phase));
        }

        self.run_impl(objective).inspect_err(|err| {
            self.phase = OptimizerPhase::Failed;
            self.telemetry.log(format!("optimization failed: {err}").as_str());
        })
    }

    fn run_impl(&mut self, objective: &dyn Objective) -> Result<OptimizationResult, OptimizationError> {
        let run_time = Timer::start();

        let mut state =
            self.initialize(objective, run_time.clone())?.with_history_depth(self.termination.history_depth());
        self.telemetry.on_initial(&state, run_time);
        self.phase = OptimizerPhase::Initialized;

        if self.config.topology.is_static() {
            self.neighborhood = self.config.topology.neighborhood(state.swarm.size(), self.random.as_ref());
        }

        self.phase = OptimizerPhase::Running;

        let outcome = loop {
            if self.termination.is_termination(&state) {
                break RunOutcome::Completed;
            }

            if self.environment.is_quota_reached() {
                break RunOutcome::Cancelled;
            }

            let iteration_time = Timer::start();

            let swarm = match self.next_swarm(&state, objective) {
                Ok(swarm) => swarm,
                Err(err) => {
                    self.state = Some(state);
                    return Err(err);
                }
            };

            let evaluations = swarm.size();
            state = state.into_next(swarm, evaluations);
            self.velocity_update.on_iteration(state.is_improved());

            self.pipeline.observe(&state, self.telemetry.logger());
            self.telemetry.on_iteration(&state, self.termination.estimate(&state), iteration_time);
        };

        self.telemetry.on_result(&state, outcome);

        let result = OptimizationResult {
            position: state.best_position.clone(),
            fitness: state.best_fitness,
            iterations: state.iteration,
            evaluations: state.evaluations,
            outcome,
            measurements: self.pipeline.take_log(),
        };

        self.state = Some(state);
        self.phase = match outcome {
            RunOutcome::Completed => OptimizerPhase::Completed,
            RunOutcome::Cancelled => OptimizerPhase::Cancelled,
        };

        Ok(result)
    }

    /// Samples positions uniformly within bounds and evaluates them.
    fn initialize(&self, objective: &dyn Objective, timer: Timer) -> Result<OptimizationState, OptimizationError> {
        let random = self.random.as_ref();
        let space = &self.config.bounds;
        let limits = space.lower.iter().zip(space.upper.iter()).map(|(&l, &u)| (l, u)).collect::<Vec<_>>();

        let candidates = (0..self.config.population_size)
            .map(|id| {
                let position = limits.iter().map(|&(lower, upper)| random.uniform_real(lower, upper)).collect::<Vec<_>>();
                let velocity = match self.config.velocity_initialization {
                    VelocityInitialization::Zero => vec![0.; limits.len()],
                    VelocityInitialization::Random { fraction } => limits
                        .iter()
                        .map(|&(lower, upper)| {
                            let limit = fraction * (upper - lower);
                            if limit > 0. { random.uniform_real(-limit, limit) } else { 0. }
                        })
                        .collect(),
                };

                (id, position, velocity)
            })
            .collect::<Vec<_>>();

        let particles = self
            .environment
            .parallelism
            .collect(&candidates, |(id, position, velocity)| match evaluate(objective, position.as_slice()) {
                Ok(fitness) => Ok(Particle::new(*id, position.clone(), velocity.clone(), fitness)),
                Err(cause) => Err(OptimizationError::Evaluation { iteration: 0, position: position.clone(), cause }),
            })
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        OptimizationState::new(Swarm::new(particles), self.config.direction, objective.known_optimum(), timer)
            .ok_or_else(|| OptimizationError::Configuration("population size must be positive".to_string()))
    }

    /// Computes the next swarm from the state snapshot. All random draws are taken sequentially
    /// in particle order before the parallel part, so the result does not depend on threads.
    fn next_swarm(&self, state: &OptimizationState, objective: &dyn Objective) -> Result<Swarm, OptimizationError> {
        let random = self.random.as_ref();
        let topology = self.config.topology;
        let direction = state.direction;
        let size = state.swarm.size();

        let sampled = if topology.is_static() { None } else { topology.neighborhood(size, random) };
        let neighborhood = sampled.as_ref().or(self.neighborhood.as_ref());
        let social_bests = topology.social_bests(&state.swarm, direction, neighborhood);

        let draws = (0..size).map(|_| Draws::sample(self.config.dimensionality, random)).collect::<Vec<_>>();

        let tasks = state.swarm.particles().iter().zip(social_bests.iter()).zip(draws.iter()).collect::<Vec<_>>();

        let velocity_update = &self.velocity_update;
        let space = &self.config.bounds;
        let policy = self.config.bounds_policy;

        let particles = self
            .environment
            .parallelism
            .collect(&tasks, |task| {
                let ((particle, &social_id), draws) = *task;

                let social_best = state.swarm.get(social_id).unwrap_or(particle).best_position.as_slice();
                let global_best = (particle.id == state.best_id).then_some(state.best_position.as_slice());

                let velocity = velocity_update.next_velocity(particle, social_best, global_best, draws);
                let (position, velocity) = next_position(particle.position.as_slice(), velocity, space, policy);

                match evaluate(objective, position.as_slice()) {
                    Ok(fitness) => Ok(particle.moved_to(position, velocity, fitness, direction)),
                    Err(cause) => Err(OptimizationError::Evaluation { iteration: state.iteration + 1, position, cause }),
                }
            })
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Swarm::new(particles))
    }
}

/// Creates an optimizer with given configuration and runs it for the objective.
pub fn optimize(
    objective: &dyn Objective,
    config: OptimizerConfig,
    environment: Arc<Environment>,
) -> Result<OptimizationResult, OptimizationError> {
    Optimizer::new(config, environment)?.run(objective)
}
