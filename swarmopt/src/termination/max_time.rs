use super::*;

/// A termination criteria which is in terminated state when max time elapsed since the run start.
pub struct MaxTime {
    limit_in_secs: Float,
}

impl MaxTime {
    /// Creates a new instance of `MaxTime`.
    pub fn new(limit_in_secs: Float) -> Self {
        Self { limit_in_secs }
    }
}

impl Termination for MaxTime {
    fn is_termination(&self, state: &OptimizationState) -> bool {
        state.timer.elapsed_secs_as_float() > self.limit_in_secs
    }

    fn estimate(&self, state: &OptimizationState) -> Float {
        if self.limit_in_secs > 0. { (state.timer.elapsed_secs_as_float() / self.limit_in_secs).min(1.) } else { 1. }
    }

    fn history_depth(&self) -> Option<usize> {
        Some(0)
    }
}
