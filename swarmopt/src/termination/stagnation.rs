#[cfg(test)]
#[path = "../../tests/unit/termination/stagnation_test.rs"]
mod stagnation_test;

use super::*;

/// A termination criteria which is in terminated state when the global best fitness has not
/// improved by more than `min_delta` over the last `window` iterations.
pub struct Stagnation {
    window: usize,
    min_delta: Float,
}

impl Stagnation {
    /// Creates a new instance of `Stagnation`. Zero window is treated as a single iteration.
    pub fn new(window: usize, min_delta: Float) -> Self {
        Self { window: window.max(1), min_delta }
    }

    /// Returns amount of latest iterations (up to the window) without improvement above `min_delta`.
    fn stagnant_iterations(&self, state: &OptimizationState) -> usize {
        let history = &state.best_history;
        let Some(last) = history.len().checked_sub(1) else {
            return 0;
        };

        (1..=self.window.min(last))
            .take_while(|&offset| state.direction.improvement(history[last - offset], history[last]) <= self.min_delta)
            .count()
    }
}

impl Termination for Stagnation {
    fn is_termination(&self, state: &OptimizationState) -> bool {
        self.stagnant_iterations(state) >= self.window
    }

    fn estimate(&self, state: &OptimizationState) -> Float {
        self.stagnant_iterations(state) as Float / self.window as Float
    }

    fn history_depth(&self) -> Option<usize> {
        Some(self.window)
    }
}
