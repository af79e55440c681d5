#[cfg(test)]
#[path = "../../tests/unit/termination/target_error_test.rs"]
mod target_error_test;

use super::*;

/// Provides way to stop the run when the global best is close enough to the known optimum.
/// Never terminates when the optimum is unknown.
pub struct TargetError {
    epsilon: Float,
    optimum: Option<Float>,
}

impl TargetError {
    /// Creates a new instance of `TargetError` which uses the optimum reported by the objective.
    pub fn new(epsilon: Float) -> Self {
        Self { epsilon, optimum: None }
    }

    /// Creates a new instance of `TargetError` with explicitly specified optimum.
    pub fn with_optimum(epsilon: Float, optimum: Float) -> Self {
        Self { epsilon, optimum: Some(optimum) }
    }

    fn error(&self, state: &OptimizationState) -> Option<Float> {
        self.optimum.or(state.known_optimum).map(|optimum| (state.best_fitness - optimum).abs())
    }
}

impl Termination for TargetError {
    fn is_termination(&self, state: &OptimizationState) -> bool {
        self.error(state).is_some_and(|error| error <= self.epsilon)
    }

    fn estimate(&self, state: &OptimizationState) -> Float {
        if self.is_termination(state) { 1. } else { 0. }
    }

    fn history_depth(&self) -> Option<usize> {
        Some(0)
    }
}
