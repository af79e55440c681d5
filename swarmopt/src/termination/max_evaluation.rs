use super::*;

/// A termination criteria which is in terminated state when objective function was evaluated
/// at least given amount of times. The check happens between iterations, so the limit can be
/// exceeded by up to one swarm size.
pub struct MaxEvaluation {
    limit: usize,
}

impl MaxEvaluation {
    /// Creates a new instance of `MaxEvaluation`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Termination for MaxEvaluation {
    fn is_termination(&self, state: &OptimizationState) -> bool {
        state.evaluations >= self.limit
    }

    fn estimate(&self, state: &OptimizationState) -> Float {
        if self.limit == 0 { 1. } else { (state.evaluations as Float / self.limit as Float).min(1.) }
    }

    fn history_depth(&self) -> Option<usize> {
        Some(0)
    }
}
