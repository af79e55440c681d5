use super::{Coefficients, Draws};
use crate::population::Particle;
use crate::utils::Float;

/// `v' = w*v + c1*r1*(pbest - x) + c2*r2*(sbest - x)`
pub(super) fn velocity(particle: &Particle, social_best: &[Float], coefficients: &Coefficients, draws: &Draws) -> Vec<Float> {
    let Coefficients { inertia, cognitive, social, .. } = *coefficients;

    (0..particle.dimension())
        .map(|idx| {
            let x = particle.position[idx];

            inertia * particle.velocity[idx]
                + cognitive * draws.r1[idx] * (particle.best_position[idx] - x)
                + social * draws.r2[idx] * (social_best[idx] - x)
        })
        .collect()
}
