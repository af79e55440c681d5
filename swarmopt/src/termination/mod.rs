//! The termination module contains logic which defines termination criteria for the optimizer,
//! e.g. when to stop iterating the swarm.

#[cfg(test)]
#[path = "../../tests/unit/termination/composite_test.rs"]
mod composite_test;

use crate::optimizer::OptimizationState;
use crate::utils::{Float, compare_floats_refs};

/// A trait which specifies criteria when the optimizer should stop searching for improved solution.
/// It is evaluated only at iteration boundaries on an immutable state snapshot.
pub trait Termination: Send + Sync {
    /// Returns true if termination condition is met.
    fn is_termination(&self, state: &OptimizationState) -> bool;

    /// Returns a relative estimation till termination. Value is in the `[0, 1]` range.
    fn estimate(&self, state: &OptimizationState) -> Float;

    /// Returns how many iterations back the criteria looks into global best history.
    /// `None` means that the whole history is required.
    fn history_depth(&self) -> Option<usize> {
        None
    }
}

mod max_evaluation;
pub use self::max_evaluation::MaxEvaluation;

mod max_iteration;
pub use self::max_iteration::MaxIteration;

mod max_time;
pub use self::max_time::MaxTime;

mod stagnation;
pub use self::stagnation::Stagnation;

mod target_error;
pub use self::target_error::TargetError;

/// Specifies how results of multiple criteria are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CompositeMode {
    Any,
    All,
}

/// A termination which encapsulates multiple termination criteria.
pub struct CompositeTermination {
    terminations: Vec<Box<dyn Termination>>,
    mode: CompositeMode,
}

impl CompositeTermination {
    /// Creates a new instance of `CompositeTermination` which is terminated when any of criteria is met.
    pub fn any(terminations: Vec<Box<dyn Termination>>) -> Self {
        Self { terminations, mode: CompositeMode::Any }
    }

    /// Creates a new instance of `CompositeTermination` which is terminated when all criteria are met.
    /// An empty list never terminates.
    pub fn all(terminations: Vec<Box<dyn Termination>>) -> Self {
        Self { terminations, mode: CompositeMode::All }
    }
}

impl Termination for CompositeTermination {
    fn is_termination(&self, state: &OptimizationState) -> bool {
        match self.mode {
            CompositeMode::Any => self.terminations.iter().any(|t| t.is_termination(state)),
            CompositeMode::All => {
                !self.terminations.is_empty() && self.terminations.iter().all(|t| t.is_termination(state))
            }
        }
    }

    fn estimate(&self, state: &OptimizationState) -> Float {
        let estimates = self.terminations.iter().map(|t| t.estimate(state)).collect::<Vec<_>>();

        match self.mode {
            CompositeMode::Any => estimates.iter().max_by(|a, b| compare_floats_refs(a, b)).cloned().unwrap_or(0.),
            CompositeMode::All => estimates.iter().min_by(|a, b| compare_floats_refs(a, b)).cloned().unwrap_or(0.),
        }
    }

    fn history_depth(&self) -> Option<usize> {
        self.terminations.iter().try_fold(0, |depth, t| t.history_depth().map(|other| depth.max(other)))
    }
}
