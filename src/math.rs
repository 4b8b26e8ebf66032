//! Pure numeric primitives shared by the trainers.

use num_traits::Float;

/// The logistic activation `1 / (1 + e^-z)`.
pub fn sigmoid<F: Float>(z: F) -> F {
    F::one() / (F::one() + (-z).exp())
}

/// Euclidean distance between two points in the plane.
pub fn euclidean_distance<F: Float>(x1: F, y1: F, x2: F, y2: F) -> F {
    let dx = x1 - x2;
    let dy = y1 - y2;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_sigmoid_midpoint_and_symmetry() {
        assert!((sigmoid(0.0_f64) - 0.5).abs() < EPSILON);
        // sigmoid(-z) == 1 - sigmoid(z)
        let z = 1.7_f64;
        assert!((sigmoid(-z) - (1.0 - sigmoid(z))).abs() < EPSILON);
    }

    #[test]
    fn test_sigmoid_saturates() {
        assert!(sigmoid(40.0_f64) > 0.999_999);
        assert!(sigmoid(-40.0_f64) < 0.000_001);
    }

    #[test]
    fn test_euclidean_distance() {
        assert!((euclidean_distance(0.0_f64, 0.0, 3.0, 4.0) - 5.0).abs() < EPSILON);
        assert!((euclidean_distance(2.5_f64, 2.5, 2.5, 2.5)).abs() < EPSILON);
    }
}
