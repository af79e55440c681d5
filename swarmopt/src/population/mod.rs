//! The population module contains the particle state model and the swarm which owns particles.

#[cfg(test)]
#[path = "../../tests/unit/population/swarm_test.rs"]
mod swarm_test;

use crate::objective::Direction;
use crate::utils::Float;
use std::cmp::Ordering;

/// A particle: a candidate solution together with its search momentum and memory.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Stable identifier assigned at initialization, it equals to particle's index in the swarm.
    pub id: usize,
    /// Current position.
    pub position: Vec<Float>,
    /// Current velocity.
    pub velocity: Vec<Float>,
    /// Fitness at current position.
    pub fitness: Float,
    /// The best position ever visited by this particle.
    pub best_position: Vec<Float>,
    /// Fitness at the best position.
    pub best_fitness: Float,
}

impl Particle {
    /// Creates a new particle which personal best is its initial position.
    pub fn new(id: usize, position: Vec<Float>, velocity: Vec<Float>, fitness: Float) -> Self {
        Self { id, best_position: position.clone(), position, velocity, fitness, best_fitness: fitness }
    }

    /// Moves particle to a new evaluated position and returns it with updated personal best.
    /// Only a strict improvement replaces the personal best.
    pub fn moved_to(&self, position: Vec<Float>, velocity: Vec<Float>, fitness: Float, direction: Direction) -> Self {
        let (best_position, best_fitness) = if direction.is_better(fitness, self.best_fitness) {
            (position.clone(), fitness)
        } else {
            (self.best_position.clone(), self.best_fitness)
        };

        Self { id: self.id, position, velocity, fitness, best_position, best_fitness }
    }

    /// Returns dimensionality of the particle.
    pub fn dimension(&self) -> usize {
        self.position.len()
    }
}

/// An ordered collection of particles of fixed size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Swarm {
    particles: Vec<Particle>,
}

impl Swarm {
    /// Creates a new instance of `Swarm`.
    pub fn new(particles: Vec<Particle>) -> Self {
        debug_assert!(particles.iter().enumerate().all(|(idx, particle)| particle.id == idx));
        Self { particles }
    }

    /// Returns particles.
    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    /// Returns particle with given id.
    pub fn get(&self, id: usize) -> Option<&Particle> {
        self.particles.get(id)
    }

    /// Returns amount of particles.
    pub fn size(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if there are no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Returns dimensionality of particles.
    pub fn dimension(&self) -> usize {
        self.particles.first().map_or(0, |particle| particle.dimension())
    }

    /// Returns the particle with the best personal best among given ids. Ties are resolved in
    /// favor of the lowest id.
    pub fn best_of<I>(&self, ids: I, direction: Direction) -> Option<&Particle>
    where
        I: Iterator<Item = usize>,
    {
        ids.filter_map(|id| self.particles.get(id)).fold(None, |best: Option<&Particle>, particle| match best {
            Some(best) => match direction.compare(particle.best_fitness, best.best_fitness) {
                Ordering::Less => Some(particle),
                Ordering::Equal if particle.id < best.id => Some(particle),
                _ => Some(best),
            },
            None => Some(particle),
        })
    }

    /// Returns the particle with the best personal best in the whole swarm.
    pub fn best(&self, direction: Direction) -> Option<&Particle> {
        self.best_of(0..self.particles.len(), direction)
    }

    /// Returns current fitness values of all particles.
    pub fn fitness(&self) -> Vec<Float> {
        self.particles.iter().map(|particle| particle.fitness).collect()
    }
}
