//! The bounds module contains search space definition and the policies used to keep particles
//! inside of it.

#[cfg(test)]
#[path = "../tests/unit/bounds_test.rs"]
mod bounds_test;

use crate::utils::Float;
use serde::{Deserialize, Serialize};

/// A box shaped search space: per dimension lower and upper limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchSpace {
    /// Lower limits.
    pub lower: Vec<Float>,
    /// Upper limits.
    pub upper: Vec<Float>,
}

impl SearchSpace {
    /// Creates a new instance of `SearchSpace`.
    pub fn new(lower: Vec<Float>, upper: Vec<Float>) -> Self {
        Self { lower, upper }
    }

    /// Creates a search space with the same limits in every dimension.
    pub fn uniform(dimension: usize, lower: Float, upper: Float) -> Self {
        Self { lower: vec![lower; dimension], upper: vec![upper; dimension] }
    }

    /// Returns dimensionality of the space.
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Returns true if every component of the vector lies within limits.
    pub fn contains(&self, vector: &[Float]) -> bool {
        vector.iter().zip(self.lower.iter().zip(self.upper.iter())).all(|(&x, (&l, &u))| x >= l && x <= u)
    }

    /// Checks the space definition: returns an error message when it is invalid.
    pub fn validate(&self, dimension: usize) -> Result<(), String> {
        if self.lower.len() != dimension || self.upper.len() != dimension {
            return Err(format!(
                "bounds dimensionality mismatch: expected {dimension}, got lower: {}, upper: {}",
                self.lower.len(),
                self.upper.len()
            ));
        }

        self.lower.iter().zip(self.upper.iter()).enumerate().try_for_each(|(idx, (&lower, &upper))| {
            if !lower.is_finite() || !upper.is_finite() {
                Err(format!("bounds must be finite, dimension {idx}: [{lower}, {upper}]"))
            } else if lower >= upper {
                Err(format!("lower bound must be less than upper bound, dimension {idx}: [{lower}, {upper}]"))
            } else if !(2. * (upper - lower)).is_finite() {
                Err(format!("bounds range is too wide, dimension {idx}: [{lower}, {upper}]"))
            } else {
                Ok(())
            }
        })
    }
}

/// Specifies how positions which left the search space are repaired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundsPolicy {
    /// Truncates the position to the box and zeroes the offending velocity component.
    #[default]
    Clamp,
    /// Mirrors the overshoot back into the box and inverts the velocity component sign.
    Reflect,
    /// Does nothing: the problem is unconstrained.
    Unbounded,
}

impl BoundsPolicy {
    /// Applies the policy to a single vector, e.g. to a position without velocity.
    pub fn clamp(&self, vector: Vec<Float>, space: &SearchSpace) -> Vec<Float> {
        match self {
            BoundsPolicy::Unbounded => vector,
            BoundsPolicy::Clamp => vector
                .into_iter()
                .zip(space.lower.iter().zip(space.upper.iter()))
                .map(|(x, (&lower, &upper))| truncate(x, lower, upper))
                .collect(),
            BoundsPolicy::Reflect => vector
                .into_iter()
                .zip(space.lower.iter().zip(space.upper.iter()))
                .map(|(x, (&lower, &upper))| reflect(x, lower, upper).0)
                .collect(),
        }
    }

    /// Repairs position and its velocity component-wise.
    pub fn repair(&self, position: Vec<Float>, velocity: Vec<Float>, space: &SearchSpace) -> (Vec<Float>, Vec<Float>) {
        if *self == BoundsPolicy::Unbounded {
            return (position, velocity);
        }

        position
            .into_iter()
            .zip(velocity)
            .zip(space.lower.iter().zip(space.upper.iter()))
            .map(|((x, v), (&lower, &upper))| {
                if x >= lower && x <= upper {
                    return (x, v);
                }

                match self {
                    BoundsPolicy::Clamp => (truncate(x, lower, upper), 0.),
                    _ => match reflect(x, lower, upper) {
                        (x, true) => (x, -v),
                        (x, false) => (x, v),
                    },
                }
            })
            .unzip()
    }
}

fn truncate(x: Float, lower: Float, upper: Float) -> Float {
    if x.is_nan() { lower } else { x.clamp(lower, upper) }
}

/// Mirrors a value on the box walls until it lands inside, i.e. folds it with period `2 * range`.
/// Returns the folded value and whether it was mirrored an odd amount of times.
fn reflect(x: Float, lower: Float, upper: Float) -> (Float, bool) {
    if x >= lower && x <= upper {
        return (x, false);
    }

    let range = upper - lower;
    let offset = x - lower;

    if !offset.is_finite() {
        return (truncate(x, lower, upper), true);
    }

    let phase = offset.rem_euclid(2. * range);
    let (folded, is_odd) = if phase >= range { (2. * range - phase, true) } else { (phase, false) };

    ((lower + folded).clamp(lower, upper), is_odd)
}
