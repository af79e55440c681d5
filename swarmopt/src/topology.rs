//! The topology module defines which particles influence each other.

#[cfg(test)]
#[path = "../tests/unit/topology_test.rs"]
mod topology_test;

use crate::objective::Direction;
use crate::population::Swarm;
use crate::utils::Random;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::iter::once;

/// Specifies a neighborhood topology.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Topology {
    /// Every particle is influenced by the whole swarm (gbest).
    #[default]
    Global,
    /// Every particle is influenced by a fixed window of adjacent particles in circular order (lbest).
    Ring {
        /// Amount of neighbors excluding the particle itself.
        size: usize,
    },
    /// Every particle is influenced by neighbors resampled on each iteration.
    Random {
        /// Amount of neighbors excluding the particle itself.
        size: usize,
    },
}

/// A mapping from particle id to ids of its neighbors.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighborhood {
    members: Vec<Vec<usize>>,
}

impl Neighborhood {
    /// Returns neighbors of the particle with given id.
    pub fn neighbors(&self, id: usize) -> &[usize] {
        self.members.get(id).map_or(&[], |members| members.as_slice())
    }

    /// Returns amount of particles in the mapping.
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

impl Topology {
    /// Returns true if the neighborhood does not change between iterations, so it can be cached.
    pub fn is_static(&self) -> bool {
        !matches!(self, Topology::Random { .. })
    }

    /// Returns neighbors of the given particle in the population of given size. Global topology
    /// includes the particle itself, ring and random do not.
    pub fn neighbors(&self, id: usize, population_size: usize, random: &dyn Random) -> Vec<usize> {
        match *self {
            Topology::Global => (0..population_size).collect(),
            Topology::Ring { size } => ring_neighbors(id, population_size, size),
            Topology::Random { size } => random_neighbors(id, population_size, size, random),
        }
    }

    /// Builds a neighborhood for all particles. Returns `None` for global topology as it does not
    /// need an explicit mapping.
    pub fn neighborhood(&self, population_size: usize, random: &dyn Random) -> Option<Neighborhood> {
        match self {
            Topology::Global => None,
            _ => Some(Neighborhood {
                members: (0..population_size).map(|id| self.neighbors(id, population_size, random)).collect(),
            }),
        }
    }

    /// Returns for each particle the id of the particle with the best personal best within its
    /// neighborhood, the particle itself included.
    pub fn social_bests(&self, swarm: &Swarm, direction: Direction, neighborhood: Option<&Neighborhood>) -> Vec<usize> {
        let size = swarm.size();

        match (self, neighborhood) {
            (Topology::Global, _) | (_, None) => {
                let best = swarm.best(direction).map_or(0, |particle| particle.id);
                vec![best; size]
            }
            (_, Some(neighborhood)) => (0..size)
                .map(|id| {
                    let candidates = once(id).chain(neighborhood.neighbors(id).iter().cloned());
                    swarm.best_of(candidates, direction).map_or(id, |particle| particle.id)
                })
                .collect(),
        }
    }
}

fn ring_neighbors(id: usize, population_size: usize, size: usize) -> Vec<usize> {
    let size = size.min(population_size.saturating_sub(1));
    let left = size / 2;
    let right = size - left;

    let left = (1..=left).rev().map(|offset| (id + population_size - offset) % population_size);
    let right = (1..=right).map(|offset| (id + offset) % population_size);

    left.chain(right).collect()
}

/// Samples ids uniformly without replacement excluding the particle itself (Floyd's algorithm).
fn random_neighbors(id: usize, population_size: usize, size: usize, random: &dyn Random) -> Vec<usize> {
    let candidates = population_size.saturating_sub(1);
    let size = size.min(candidates);

    let mut selected = FxHashSet::default();
    (candidates - size..candidates).for_each(|upper| {
        let sample = random.uniform_int(0, upper as i32) as usize;
        if !selected.insert(sample) {
            selected.insert(upper);
        }
    });

    let mut neighbors = selected.into_iter().map(|idx| if idx < id { idx } else { idx + 1 }).collect::<Vec<_>>();
    neighbors.sort_unstable();

    neighbors
}
