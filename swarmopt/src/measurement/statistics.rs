use super::Measurement;
use crate::algorithms::math::*;
use crate::optimizer::OptimizationState;
use crate::utils::{Float, GenericResult};
use serde::{Deserialize, Serialize};

/// Specifies built-in statistics which can be requested via configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasurementKind {
    /// Global best fitness.
    BestFitness,
    /// Mean of current fitness values.
    MeanFitness,
    /// Worst current fitness value.
    WorstFitness,
    /// Standard deviation of current fitness values.
    FitnessStdev,
    /// Mean euclidean distance of positions to the swarm centroid.
    Diversity,
    /// Mean euclidean norm of velocities.
    VelocityMagnitude,
    /// Amount of objective function evaluations.
    Evaluations,
    /// Absolute difference between global best and known optimum.
    ErrorToOptimum,
}

impl MeasurementKind {
    /// Creates a measurement of this kind.
    pub fn create(&self) -> Box<dyn Measurement> {
        match self {
            MeasurementKind::BestFitness => Box::new(BestFitness),
            MeasurementKind::MeanFitness => Box::new(MeanFitness),
            MeasurementKind::WorstFitness => Box::new(WorstFitness),
            MeasurementKind::FitnessStdev => Box::new(FitnessStdev),
            MeasurementKind::Diversity => Box::new(Diversity),
            MeasurementKind::VelocityMagnitude => Box::new(VelocityMagnitude),
            MeasurementKind::Evaluations => Box::new(Evaluations),
            MeasurementKind::ErrorToOptimum => Box::new(ErrorToOptimum),
        }
    }
}

fn non_empty(state: &OptimizationState) -> GenericResult<()> {
    if state.swarm.is_empty() { Err("swarm is empty".into()) } else { Ok(()) }
}

/// Measures global best fitness.
pub struct BestFitness;

impl Measurement for BestFitness {
    fn name(&self) -> &str {
        "best_fitness"
    }

    fn measure(&self, state: &OptimizationState) -> GenericResult<Float> {
        Ok(state.best_fitness)
    }
}

/// Measures mean of current fitness values.
pub struct MeanFitness;

impl Measurement for MeanFitness {
    fn name(&self) -> &str {
        "mean_fitness"
    }

    fn measure(&self, state: &OptimizationState) -> GenericResult<Float> {
        non_empty(state)?;
        Ok(get_mean_iter(state.swarm.particles().iter().map(|particle| particle.fitness)))
    }
}

/// Measures the worst current fitness value with respect to optimization direction.
pub struct WorstFitness;

impl Measurement for WorstFitness {
    fn name(&self) -> &str {
        "worst_fitness"
    }

    fn measure(&self, state: &OptimizationState) -> GenericResult<Float> {
        let direction = state.direction;

        state
            .swarm
            .particles()
            .iter()
            .map(|particle| particle.fitness)
            .max_by(|a, b| direction.compare(*a, *b))
            .ok_or_else(|| "swarm is empty".into())
    }
}

/// Measures standard deviation of current fitness values.
pub struct FitnessStdev;

impl Measurement for FitnessStdev {
    fn name(&self) -> &str {
        "fitness_stdev"
    }

    fn measure(&self, state: &OptimizationState) -> GenericResult<Float> {
        non_empty(state)?;
        Ok(get_stdev(state.swarm.fitness().as_slice()))
    }
}

/// Measures swarm diversity as mean euclidean distance of positions to their centroid.
pub struct Diversity;

impl Measurement for Diversity {
    fn name(&self) -> &str {
        "diversity"
    }

    fn measure(&self, state: &OptimizationState) -> GenericResult<Float> {
        non_empty(state)?;

        let particles = state.swarm.particles();
        let centroid = get_centroid(particles.iter().map(|particle| particle.position.as_slice()), state.swarm.dimension());

        Ok(get_mean_iter(particles.iter().map(|particle| euclidean_distance(particle.position.as_slice(), &centroid))))
    }
}

/// Measures mean euclidean norm of particle velocities.
pub struct VelocityMagnitude;

impl Measurement for VelocityMagnitude {
    fn name(&self) -> &str {
        "velocity_magnitude"
    }

    fn measure(&self, state: &OptimizationState) -> GenericResult<Float> {
        non_empty(state)?;
        Ok(get_mean_iter(state.swarm.particles().iter().map(|particle| euclidean_norm(particle.velocity.as_slice()))))
    }
}

/// Measures amount of objective function evaluations.
pub struct Evaluations;

impl Measurement for Evaluations {
    fn name(&self) -> &str {
        "evaluations"
    }

    fn measure(&self, state: &OptimizationState) -> GenericResult<Float> {
        Ok(state.evaluations as Float)
    }
}

/// Measures absolute difference between global best and the known optimum.
pub struct ErrorToOptimum;

impl Measurement for ErrorToOptimum {
    fn name(&self) -> &str {
        "error_to_optimum"
    }

    fn measure(&self, state: &OptimizationState) -> GenericResult<Float> {
        state.error_to_optimum().ok_or_else(|| "objective has no known optimum".into())
    }
}
