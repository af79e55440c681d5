//! The objective module specifies the function being optimized and the direction of optimization.

#[cfg(test)]
#[path = "../tests/unit/objective_test.rs"]
mod objective_test;

use crate::utils::{Float, GenericResult, compare_floats};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// Specifies a function which maps a position to a scalar fitness.
///
/// Implementations must be pure: the same position always produces the same fitness, otherwise
/// personal and global best comparisons are not well defined. An error returned from
/// [`Objective::fitness`] is fatal for the run.
pub trait Objective: Send + Sync {
    /// Returns fitness of the given position.
    fn fitness(&self, position: &[Float]) -> GenericResult<Float>;

    /// Returns a known optimum value, if any. Used to track error to optimum.
    fn known_optimum(&self) -> Option<Float> {
        None
    }
}

/// A fitness function type.
pub type FitnessFn = Arc<dyn Fn(&[Float]) -> GenericResult<Float> + Send + Sync>;

/// An objective defined by a closure.
#[derive(Clone)]
pub struct FunctionObjective {
    fitness_fn: FitnessFn,
    known_optimum: Option<Float>,
}

impl FunctionObjective {
    /// Creates a new instance of `FunctionObjective` from a fallible function.
    pub fn new(fitness_fn: FitnessFn) -> Self {
        Self { fitness_fn, known_optimum: None }
    }

    /// Creates a new instance of `FunctionObjective` from a function which cannot fail.
    pub fn from_fn<F>(fitness_fn: F) -> Self
    where
        F: Fn(&[Float]) -> Float + Send + Sync + 'static,
    {
        Self::new(Arc::new(move |position| Ok(fitness_fn(position))))
    }

    /// Sets a known optimum value.
    pub fn with_known_optimum(mut self, known_optimum: Float) -> Self {
        self.known_optimum = Some(known_optimum);
        self
    }
}

impl Objective for FunctionObjective {
    fn fitness(&self, position: &[Float]) -> GenericResult<Float> {
        (self.fitness_fn)(position)
    }

    fn known_optimum(&self) -> Option<Float> {
        self.known_optimum
    }
}

/// Specifies optimization direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Lower fitness is better.
    #[default]
    Minimize,
    /// Higher fitness is better.
    Maximize,
}

impl Direction {
    /// Compares two fitness values: `Ordering::Less` means that `a` is better than `b`.
    pub fn compare(&self, a: Float, b: Float) -> Ordering {
        match self {
            Direction::Minimize => compare_floats(a, b),
            Direction::Maximize => compare_floats(b, a),
        }
    }

    /// Returns true if `a` is strictly better than `b`.
    pub fn is_better(&self, a: Float, b: Float) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Returns improvement of `new` over `old`: positive when `new` is better.
    pub fn improvement(&self, old: Float, new: Float) -> Float {
        match self {
            Direction::Minimize => old - new,
            Direction::Maximize => new - old,
        }
    }
}

/// Evaluates fitness at the given position rejecting values which cannot be compared.
pub(crate) fn evaluate(objective: &dyn Objective, position: &[Float]) -> GenericResult<Float> {
    let fitness = objective.fitness(position)?;

    if fitness.is_nan() { Err("objective function returned NaN".into()) } else { Ok(fitness) }
}
