//! This module reimports a common used types.

pub use crate::bounds::BoundsPolicy;
pub use crate::bounds::SearchSpace;

pub use crate::measurement::FnMeasurement;
pub use crate::measurement::Measurement;
pub use crate::measurement::MeasurementKind;
pub use crate::measurement::MeasurementLog;
pub use crate::measurement::MeasurementRecord;

pub use crate::objective::Direction;
pub use crate::objective::FunctionObjective;
pub use crate::objective::Objective;

pub use crate::optimizer::optimize;
pub use crate::optimizer::read_config;
pub use crate::optimizer::OptimizationError;
pub use crate::optimizer::OptimizationResult;
pub use crate::optimizer::OptimizationState;
pub use crate::optimizer::Optimizer;
pub use crate::optimizer::OptimizerConfig;
pub use crate::optimizer::OptimizerConfigBuilder;
pub use crate::optimizer::OptimizerPhase;
pub use crate::optimizer::RunOutcome;
pub use crate::optimizer::TelemetryMode;
pub use crate::optimizer::TerminationConfig;
pub use crate::optimizer::VelocityInitialization;

pub use crate::population::Particle;
pub use crate::population::Swarm;

pub use crate::termination::Termination;

pub use crate::topology::Topology;

pub use crate::update::UpdateRule;

pub use crate::utils::compare_floats;
pub use crate::utils::CancellationQuota;
pub use crate::utils::DefaultRandom;
pub use crate::utils::Environment;
pub use crate::utils::Float;
pub use crate::utils::GenericError;
pub use crate::utils::GenericResult;
pub use crate::utils::InfoLogger;
pub use crate::utils::Quota;
pub use crate::utils::Random;
