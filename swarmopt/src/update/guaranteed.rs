use crate::population::Particle;
use crate::utils::Float;

/// `v' = -x + gbest + w*v + rho*(1 - 2*r2)`
pub(super) fn velocity(particle: &Particle, global_best: &[Float], inertia: Float, rho: Float, r2: &[Float]) -> Vec<Float> {
    (0..particle.dimension())
        .map(|idx| -particle.position[idx] + global_best[idx] + inertia * particle.velocity[idx] + rho * (1. - 2. * r2[idx]))
        .collect()
}

/// Adapts search radius of the global best particle based on consecutive successes and failures.
#[derive(Clone, Debug, PartialEq)]
pub struct RhoAdaptation {
    rho: Float,
    successes: usize,
    failures: usize,
    success_threshold: usize,
    failure_threshold: usize,
}

impl RhoAdaptation {
    /// Creates a new instance of `RhoAdaptation`.
    pub fn new(rho: Float, success_threshold: usize, failure_threshold: usize) -> Self {
        Self { rho, successes: 0, failures: 0, success_threshold, failure_threshold }
    }

    /// Returns current radius.
    pub fn rho(&self) -> Float {
        self.rho
    }

    /// Tracks iteration outcome and adjusts the radius.
    pub fn track(&mut self, is_improved: bool) {
        if is_improved {
            self.successes += 1;
            self.failures = 0;
        } else {
            self.failures += 1;
            self.successes = 0;
        }

        if self.successes > self.success_threshold {
            self.rho *= 2.;
        } else if self.failures > self.failure_threshold {
            self.rho *= 0.5;
        }
    }
}
