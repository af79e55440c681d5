//! The update module contains velocity and position update rules.

#[cfg(test)]
#[path = "../../tests/unit/update/update_test.rs"]
mod update_test;

use crate::bounds::{BoundsPolicy, SearchSpace};
use crate::population::Particle;
use crate::utils::{Float, Random};
use serde::{Deserialize, Serialize};

mod guaranteed;
pub use self::guaranteed::RhoAdaptation;

mod standard;

/// Specifies the velocity update rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UpdateRule {
    /// Inertia weighted velocity update with cognitive and social components.
    #[default]
    Standard,
    /// Guaranteed convergence update: the particle owning the global best searches around it
    /// within an adaptive radius, all other particles use the standard rule.
    #[serde(rename_all = "camelCase")]
    GuaranteedConvergence {
        /// Initial search radius.
        rho: Float,
        /// Amount of consecutive global best improvements after which radius is doubled.
        success_threshold: usize,
        /// Amount of consecutive failures after which radius is halved.
        failure_threshold: usize,
    },
}

impl UpdateRule {
    /// Creates guaranteed convergence rule with commonly used parameters.
    pub fn guaranteed_convergence() -> Self {
        UpdateRule::GuaranteedConvergence { rho: 1., success_threshold: 15, failure_threshold: 5 }
    }
}

/// Run level coefficients of the velocity equation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    /// Inertia weight.
    pub inertia: Float,
    /// Cognitive acceleration coefficient.
    pub cognitive: Float,
    /// Social acceleration coefficient.
    pub social: Float,
    /// Optional per component velocity limit.
    pub velocity_limit: Option<Float>,
}

/// Uniform random numbers in `[0, 1)` drawn for one particle on one iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct Draws {
    /// Draws for the cognitive component.
    pub r1: Vec<Float>,
    /// Draws for the social component.
    pub r2: Vec<Float>,
}

impl Draws {
    /// Samples draws for a particle of given dimensionality.
    pub fn sample(dimension: usize, random: &dyn Random) -> Self {
        let r1 = (0..dimension).map(|_| random.uniform_real(0., 1.)).collect();
        let r2 = (0..dimension).map(|_| random.uniform_real(0., 1.)).collect();

        Self { r1, r2 }
    }
}

/// Keeps the configured rule together with its adaptive state.
#[derive(Clone, Debug)]
pub struct VelocityUpdate {
    coefficients: Coefficients,
    adaptation: Option<RhoAdaptation>,
}

impl VelocityUpdate {
    /// Creates a new instance of `VelocityUpdate`.
    pub fn new(rule: UpdateRule, coefficients: Coefficients) -> Self {
        let adaptation = match rule {
            UpdateRule::Standard => None,
            UpdateRule::GuaranteedConvergence { rho, success_threshold, failure_threshold } => {
                Some(RhoAdaptation::new(rho, success_threshold, failure_threshold))
            }
        };

        Self { coefficients, adaptation }
    }

    /// Returns coefficients.
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Returns current search radius of guaranteed convergence rule.
    pub fn rho(&self) -> Option<Float> {
        self.adaptation.as_ref().map(|adaptation| adaptation.rho())
    }

    /// Computes a new velocity of the particle. `global_best` is passed only for the particle
    /// which owns the global best.
    pub fn next_velocity(
        &self,
        particle: &Particle,
        social_best: &[Float],
        global_best: Option<&[Float]>,
        draws: &Draws,
    ) -> Vec<Float> {
        let velocity = match (self.adaptation.as_ref(), global_best) {
            (Some(adaptation), Some(global_best)) => {
                guaranteed::velocity(particle, global_best, self.coefficients.inertia, adaptation.rho(), &draws.r2)
            }
            _ => standard::velocity(particle, social_best, &self.coefficients, draws),
        };

        match self.coefficients.velocity_limit {
            Some(limit) => velocity.into_iter().map(|v| v.clamp(-limit, limit)).collect(),
            None => velocity,
        }
    }

    /// Notifies the rule about the outcome of the iteration.
    pub fn on_iteration(&mut self, is_improved: bool) {
        if let Some(adaptation) = self.adaptation.as_mut() {
            adaptation.track(is_improved);
        }
    }
}

/// Moves the particle with the given velocity and repairs the result with bounds policy.
pub fn next_position(
    position: &[Float],
    velocity: Vec<Float>,
    space: &SearchSpace,
    policy: BoundsPolicy,
) -> (Vec<Float>, Vec<Float>) {
    let position = position.iter().zip(velocity.iter()).map(|(x, v)| x + v).collect();

    policy.repair(position, velocity, space)
}
