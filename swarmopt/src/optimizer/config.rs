#[cfg(test)]
#[path = "../../tests/unit/optimizer/config_test.rs"]
mod config_test;

use super::{OptimizationError, TelemetryMode};
use crate::bounds::{BoundsPolicy, SearchSpace};
use crate::measurement::MeasurementKind;
use crate::objective::Direction;
use crate::termination::*;
use crate::topology::Topology;
use crate::update::{Coefficients, UpdateRule};
use crate::utils::{Float, GenericError};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Read};

/// A default swarm size.
pub const DEFAULT_POPULATION_SIZE: usize = 25;
/// A default inertia weight.
pub const DEFAULT_INERTIA: Float = 0.729844;
/// A default cognitive and social coefficient.
pub const DEFAULT_ACCELERATION: Float = 1.496180;
/// A default neighborhood size for local topologies.
pub const DEFAULT_NEIGHBORHOOD_SIZE: usize = 5;
/// A default iteration limit.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// An optimizer configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizerConfig {
    /// Amount of particles.
    pub population_size: usize,
    /// Dimensionality of the search space.
    pub dimensionality: usize,
    /// Search space limits.
    pub bounds: SearchSpace,
    /// Optimization direction. Default is minimization.
    #[serde(default)]
    pub direction: Direction,
    /// Inertia weight.
    pub inertia: Float,
    /// Cognitive acceleration coefficient.
    pub cognitive_coefficient: Float,
    /// Social acceleration coefficient.
    pub social_coefficient: Float,
    /// Per component velocity limit. Default is no limit.
    #[serde(default)]
    pub velocity_limit: Option<Float>,
    /// Specifies how velocities are initialized.
    #[serde(default)]
    pub velocity_initialization: VelocityInitialization,
    /// Velocity update rule.
    #[serde(default)]
    pub update_rule: UpdateRule,
    /// Neighborhood topology.
    #[serde(default)]
    pub topology: Topology,
    /// Bounds policy.
    #[serde(default)]
    pub bounds_policy: BoundsPolicy,
    /// Stopping condition.
    pub termination: TerminationConfig,
    /// Statistics recorded on each iteration.
    #[serde(default)]
    pub measurements: Vec<MeasurementKind>,
    /// Logging settings.
    #[serde(default)]
    pub telemetry: TelemetryMode,
    /// A seed of the random source. When absent, a non reproducible source is used.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// Specifies how velocities of the initial swarm are set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum VelocityInitialization {
    /// All velocities are zero.
    #[default]
    Zero,
    /// Velocities are uniformly distributed in `±fraction * (upper - lower)` per dimension.
    Random {
        /// A fraction of the search space range.
        fraction: Float,
    },
}

/// Describes a stopping condition composed from built-in criteria.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TerminationConfig {
    /// Stops when given amount of iterations is completed.
    MaxIterations {
        /// Iteration limit.
        limit: usize,
    },
    /// Stops when objective was evaluated given amount of times.
    MaxEvaluations {
        /// Evaluation limit.
        limit: usize,
    },
    /// Stops when given time is elapsed.
    #[serde(rename_all = "camelCase")]
    MaxTime {
        /// Time limit in seconds.
        limit_in_secs: Float,
    },
    /// Stops when the global best is within epsilon of the known optimum.
    TargetError {
        /// Accepted absolute error.
        epsilon: Float,
        /// Overrides optimum reported by the objective.
        #[serde(default)]
        optimum: Option<Float>,
    },
    /// Stops when the global best has not improved by more than `min_delta` over the `window`.
    #[serde(rename_all = "camelCase")]
    Stagnation {
        /// Amount of iterations.
        window: usize,
        /// Minimal improvement.
        min_delta: Float,
    },
    /// Stops when any of criteria is met.
    Any {
        /// Inner criteria.
        criteria: Vec<TerminationConfig>,
    },
    /// Stops when all criteria are met.
    All {
        /// Inner criteria.
        criteria: Vec<TerminationConfig>,
    },
}

impl TerminationConfig {
    /// Creates termination which stops after given amount of iterations.
    pub fn max_iterations(limit: usize) -> Self {
        TerminationConfig::MaxIterations { limit }
    }

    /// Builds termination criteria.
    pub fn create(&self) -> Box<dyn Termination> {
        match self {
            TerminationConfig::MaxIterations { limit } => Box::new(MaxIteration::new(*limit)),
            TerminationConfig::MaxEvaluations { limit } => Box::new(MaxEvaluation::new(*limit)),
            TerminationConfig::MaxTime { limit_in_secs } => Box::new(MaxTime::new(*limit_in_secs)),
            TerminationConfig::TargetError { epsilon, optimum: Some(optimum) } => {
                Box::new(TargetError::with_optimum(*epsilon, *optimum))
            }
            TerminationConfig::TargetError { epsilon, optimum: None } => Box::new(TargetError::new(*epsilon)),
            TerminationConfig::Stagnation { window, min_delta } => Box::new(Stagnation::new(*window, *min_delta)),
            TerminationConfig::Any { criteria } => {
                Box::new(CompositeTermination::any(criteria.iter().map(|c| c.create()).collect()))
            }
            TerminationConfig::All { criteria } => {
                Box::new(CompositeTermination::all(criteria.iter().map(|c| c.create()).collect()))
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            TerminationConfig::MaxTime { limit_in_secs } if !limit_in_secs.is_finite() || *limit_in_secs < 0. => {
                Err(format!("time limit must be a non negative number, got {limit_in_secs}"))
            }
            TerminationConfig::TargetError { epsilon, .. } if !epsilon.is_finite() || *epsilon < 0. => {
                Err(format!("target error must be a non negative number, got {epsilon}"))
            }
            TerminationConfig::Stagnation { window: 0, .. } => Err("stagnation window must be positive".to_string()),
            TerminationConfig::Stagnation { min_delta, .. } if min_delta.is_nan() => {
                Err("stagnation delta must be a number".to_string())
            }
            TerminationConfig::Any { criteria } | TerminationConfig::All { criteria } if criteria.is_empty() => {
                Err("composite termination requires at least one criteria".to_string())
            }
            TerminationConfig::Any { criteria } | TerminationConfig::All { criteria } => {
                criteria.iter().try_for_each(|c| c.validate())
            }
            _ => Ok(()),
        }
    }
}

impl OptimizerConfig {
    /// Checks configuration consistency.
    pub fn validate(&self) -> Result<(), OptimizationError> {
        self.validate_impl().map_err(OptimizationError::Configuration)
    }

    /// Returns coefficients of the velocity equation.
    pub fn coefficients(&self) -> Coefficients {
        Coefficients {
            inertia: self.inertia,
            cognitive: self.cognitive_coefficient,
            social: self.social_coefficient,
            velocity_limit: self.velocity_limit,
        }
    }

    fn validate_impl(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population size must be positive".to_string());
        }

        if self.dimensionality == 0 {
            return Err("dimensionality must be positive".to_string());
        }

        self.bounds.validate(self.dimensionality)?;

        [
            ("inertia", self.inertia),
            ("cognitive coefficient", self.cognitive_coefficient),
            ("social coefficient", self.social_coefficient),
        ]
        .iter()
        .try_for_each(|(name, value)| if value.is_finite() { Ok(()) } else { Err(format!("{name} must be finite")) })?;

        if let Some(limit) = self.velocity_limit {
            if !limit.is_finite() || limit <= 0. {
                return Err(format!("velocity limit must be positive, got {limit}"));
            }
        }

        if let VelocityInitialization::Random { fraction } = self.velocity_initialization {
            if !fraction.is_finite() || fraction < 0. {
                return Err(format!("velocity initialization fraction must be non negative, got {fraction}"));
            }
        }

        if let UpdateRule::GuaranteedConvergence { rho, .. } = self.update_rule {
            if !rho.is_finite() || rho <= 0. {
                return Err(format!("rho must be positive, got {rho}"));
            }
        }

        match self.topology {
            Topology::Ring { size: 0 } | Topology::Random { size: 0 } => {
                return Err("neighborhood size must be positive".to_string());
            }
            _ => {}
        }

        if let TelemetryMode::Logging { log_best: 0 } = self.telemetry {
            return Err("logging interval must be positive".to_string());
        }

        self.termination.validate()
    }
}

/// Provides configurable way to build optimizer configuration using fluent interface style.
pub struct OptimizerConfigBuilder {
    population_size: usize,
    bounds: Option<SearchSpace>,
    direction: Direction,
    coefficients: Coefficients,
    velocity_initialization: VelocityInitialization,
    update_rule: UpdateRule,
    topology: Topology,
    bounds_policy: BoundsPolicy,
    termination: Option<TerminationConfig>,
    measurements: Vec<MeasurementKind>,
    telemetry: TelemetryMode,
    random_seed: Option<u64>,
}

impl Default for OptimizerConfigBuilder {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            bounds: None,
            direction: Direction::default(),
            coefficients: Coefficients {
                inertia: DEFAULT_INERTIA,
                cognitive: DEFAULT_ACCELERATION,
                social: DEFAULT_ACCELERATION,
                velocity_limit: None,
            },
            velocity_initialization: VelocityInitialization::default(),
            update_rule: UpdateRule::default(),
            topology: Topology::default(),
            bounds_policy: BoundsPolicy::default(),
            termination: None,
            measurements: vec![MeasurementKind::BestFitness],
            telemetry: TelemetryMode::default(),
            random_seed: None,
        }
    }
}

impl OptimizerConfigBuilder {
    /// Sets search space, its dimensionality defines dimensionality of the problem.
    pub fn with_bounds(mut self, bounds: SearchSpace) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets amount of particles. Default is 25.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets optimization direction. Default is minimization.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets inertia, cognitive and social coefficients. Default is (0.729844, 1.49618, 1.49618).
    pub fn with_coefficients(mut self, inertia: Float, cognitive: Float, social: Float) -> Self {
        self.coefficients.inertia = inertia;
        self.coefficients.cognitive = cognitive;
        self.coefficients.social = social;
        self
    }

    /// Sets velocity limit. Default is no limit.
    pub fn with_velocity_limit(mut self, velocity_limit: Option<Float>) -> Self {
        self.coefficients.velocity_limit = velocity_limit;
        self
    }

    /// Sets velocity initialization. Default is zero velocities.
    pub fn with_velocity_initialization(mut self, velocity_initialization: VelocityInitialization) -> Self {
        self.velocity_initialization = velocity_initialization;
        self
    }

    /// Sets velocity update rule. Default is the standard one.
    pub fn with_update_rule(mut self, update_rule: UpdateRule) -> Self {
        self.update_rule = update_rule;
        self
    }

    /// Sets neighborhood topology. Default is global.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Sets ring topology with the default neighborhood size.
    pub fn with_ring_topology(self) -> Self {
        self.with_topology(Topology::Ring { size: DEFAULT_NEIGHBORHOOD_SIZE })
    }

    /// Sets bounds policy. Default is clamp.
    pub fn with_bounds_policy(mut self, bounds_policy: BoundsPolicy) -> Self {
        self.bounds_policy = bounds_policy;
        self
    }

    /// Sets termination. Default is 1000 iterations.
    pub fn with_termination(mut self, termination: TerminationConfig) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Sets measurements. Default is best fitness only.
    pub fn with_measurements(mut self, measurements: Vec<MeasurementKind>) -> Self {
        self.measurements = measurements;
        self
    }

    /// Sets telemetry mode. Default is no telemetry.
    pub fn with_telemetry(mut self, telemetry: TelemetryMode) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Sets random seed. Default is no seed.
    pub fn with_random_seed(mut self, random_seed: Option<u64>) -> Self {
        self.random_seed = random_seed;
        self
    }

    /// Builds and validates configuration.
    pub fn build(self) -> Result<OptimizerConfig, OptimizationError> {
        let bounds =
            self.bounds.ok_or_else(|| OptimizationError::Configuration("bounds are not specified".to_string()))?;

        let config = OptimizerConfig {
            population_size: self.population_size,
            dimensionality: bounds.dimension(),
            bounds,
            direction: self.direction,
            inertia: self.coefficients.inertia,
            cognitive_coefficient: self.coefficients.cognitive,
            social_coefficient: self.coefficients.social,
            velocity_limit: self.coefficients.velocity_limit,
            velocity_initialization: self.velocity_initialization,
            update_rule: self.update_rule,
            topology: self.topology,
            bounds_policy: self.bounds_policy,
            termination: self.termination.unwrap_or(TerminationConfig::max_iterations(DEFAULT_MAX_ITERATIONS)),
            measurements: self.measurements,
            telemetry: self.telemetry,
            random_seed: self.random_seed,
        };

        config.validate()?;

        Ok(config)
    }
}

/// Reads configuration from json.
pub fn read_config<R: Read>(reader: BufReader<R>) -> Result<OptimizerConfig, GenericError> {
    Ok(serde_json::from_reader(reader)?)
}
