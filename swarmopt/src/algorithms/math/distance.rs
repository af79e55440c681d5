#[cfg(test)]
#[path = "../../../tests/unit/algorithms/math/distance_test.rs"]
mod distance_test;

use crate::utils::Float;

/// Calculates euclidean distance between two vectors.
pub fn euclidean_distance(a: &[Float], b: &[Float]) -> Float {
    a.iter().zip(b.iter()).map(|(a, b)| (a - b) * (a - b)).sum::<Float>().sqrt()
}

/// Calculates euclidean norm of the vector.
pub fn euclidean_norm(a: &[Float]) -> Float {
    a.iter().map(|value| value * value).sum::<Float>().sqrt()
}
