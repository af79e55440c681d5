#[cfg(test)]
#[path = "../../tests/unit/termination/max_iteration_test.rs"]
mod max_iteration_test;

use super::*;

/// A termination criteria which is in terminated state when maximum amount of iterations is reached.
pub struct MaxIteration {
    limit: usize,
}

impl MaxIteration {
    /// Creates a new instance of `MaxIteration`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Termination for MaxIteration {
    fn is_termination(&self, state: &OptimizationState) -> bool {
        state.iteration >= self.limit
    }

    fn estimate(&self, state: &OptimizationState) -> Float {
        if self.limit == 0 { 1. } else { (state.iteration as Float / self.limit as Float).min(1.) }
    }

    fn history_depth(&self) -> Option<usize> {
        Some(0)
    }
}
