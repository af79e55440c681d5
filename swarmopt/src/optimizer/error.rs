use super::OptimizerPhase;
use crate::utils::{Float, GenericError};

/// Specifies errors which terminate the optimization run.
#[derive(Clone, Debug, PartialEq)]
pub enum OptimizationError {
    /// Configuration is invalid, no run was started.
    Configuration(String),
    /// Objective function could not evaluate a position. Iteration zero means the initial swarm.
    Evaluation {
        /// Iteration during which evaluation failed.
        iteration: usize,
        /// Offending position.
        position: Vec<Float>,
        /// A cause reported by the objective.
        cause: GenericError,
    },
    /// The optimizer was already run: runs are not resumable.
    Lifecycle(OptimizerPhase),
}

impl std::fmt::Display for OptimizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimizationError::Configuration(message) => write!(f, "invalid configuration: {message}"),
            OptimizationError::Evaluation { iteration, position, cause } => {
                write!(f, "cannot evaluate position {position:?} at iteration {iteration}: {cause}")
            }
            OptimizationError::Lifecycle(phase) => {
                write!(f, "optimizer cannot be run in {phase:?} phase, create a new instance instead")
            }
        }
    }
}

impl std::error::Error for OptimizationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptimizationError::Evaluation { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

impl From<OptimizationError> for GenericError {
    fn from(value: OptimizationError) -> Self {
        value.to_string().into()
    }
}
