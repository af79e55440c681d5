//! This crate provides a particle swarm optimization engine for continuous, real valued,
//! black box objectives.
//!
//! A run is described by [`OptimizerConfig`](optimizer::OptimizerConfig) and driven by
//! [`Optimizer`](optimizer::Optimizer): the swarm is updated synchronously, so every particle
//! on iteration `t` sees the same snapshot of iteration `t - 1`. Neighborhood structure,
//! velocity update rule, bounds handling, termination criteria and per iteration measurements
//! are pluggable.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use swarmopt::prelude::*;
//!
//! let objective = FunctionObjective::from_fn(|x: &[Float]| x.iter().map(|v| v * v).sum());
//! let config = OptimizerConfigBuilder::default()
//!     .with_bounds(SearchSpace::uniform(2, -5., 5.))
//!     .with_population_size(20)
//!     .with_termination(TerminationConfig::max_iterations(50))
//!     .with_random_seed(Some(42))
//!     .build()
//!     .expect("valid config");
//!
//! let result = optimize(&objective, config, Arc::new(Environment::default())).expect("successful run");
//!
//! assert_eq!(result.iterations, 50);
//! assert_eq!(result.measurements.len(), 50);
//! ```

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod algorithms;
pub mod bounds;
pub mod measurement;
pub mod objective;
pub mod optimizer;
pub mod population;
pub mod prelude;
pub mod termination;
pub mod topology;
pub mod update;
pub mod utils;
