//! Lloyd's-algorithm k-means clustering: alternating nearest-centroid
//! assignment and centroid recomputation until the centroids stop moving or
//! the iteration budget runs out.

use log::debug;
use rand::Rng;

use crate::error::{ModelError, ModelResult};
use crate::math::euclidean_distance;
use crate::{Centroid, Point, TrainingResult};

/// Hyperparameters for [`KMeansClusterer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters. May exceed the number of distinct points; the
    /// surplus centroids simply never attract anything and stay put.
    pub k: usize,
    /// Upper bound on assignment/update passes, not a target.
    pub iterations: usize,
    /// Per-coordinate movement below which a centroid counts as stationary.
    pub tolerance: f64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        KMeansConfig {
            k: 3,
            iterations: 10,
            tolerance: 0.01,
        }
    }
}

impl KMeansConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Clusters label-agnostic points, relabeling every point with the index of
/// its final nearest centroid.
///
/// Centroids initialize uniformly at random inside the bounding box of the
/// input. A centroid whose cluster goes empty freezes in place rather than
/// being reseeded.
#[derive(Debug, Clone, Default)]
pub struct KMeansClusterer {
    config: KMeansConfig,
}

impl KMeansClusterer {
    pub fn new(config: KMeansConfig) -> Self {
        KMeansClusterer { config }
    }

    /// Clusters with ambient randomness for the centroid initialization.
    pub fn cluster(&self, points: &[Point]) -> ModelResult<TrainingResult> {
        self.cluster_with_rng(points, &mut rand::thread_rng())
    }

    /// Clusters with caller-supplied randomness. Given the same RNG state and
    /// inputs, two runs produce bit-identical centroids and assignments.
    pub fn cluster_with_rng<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        rng: &mut R,
    ) -> ModelResult<TrainingResult> {
        self.validate()?;

        // Empty input is a defined empty result here, not an error: the
        // bounding box does not exist, so there is nothing to seed from.
        if points.is_empty() {
            return Ok(TrainingResult::KMeans {
                centroids: Vec::new(),
                clusters: Vec::new(),
                logs: vec!["No data points!".to_string()],
            });
        }

        let k = self.config.k;
        let mut logs = Vec::new();

        let (min_x, max_x, min_y, max_y) = bounding_box(points);
        if min_x == max_x && min_y == max_y {
            logs.push(format!(
                "All points sit at ({}, {}); every centroid initializes there",
                min_x, min_y
            ));
        }

        let mut centroids: Vec<Centroid> = (0..k)
            .map(|i| Centroid {
                x: min_x + rng.gen::<f64>() * (max_x - min_x),
                y: min_y + rng.gen::<f64>() * (max_y - min_y),
                label: i,
            })
            .collect();
        logs.push(format!("Initialized {} centroids.", k));

        let tolerance = self.config.tolerance;
        let mut assignments = vec![0usize; points.len()];

        for iteration in 0..self.config.iterations {
            for (point, slot) in points.iter().zip(assignments.iter_mut()) {
                *slot = nearest_centroid(&centroids, point);
            }

            let mut sums = vec![(0.0f64, 0.0f64); k];
            let mut counts = vec![0usize; k];
            for (point, &cluster) in points.iter().zip(assignments.iter()) {
                sums[cluster].0 += point.x;
                sums[cluster].1 += point.y;
                counts[cluster] += 1;
            }

            let mut moved = false;
            for (cluster, centroid) in centroids.iter_mut().enumerate() {
                // An empty cluster's centroid freezes in place.
                if counts[cluster] == 0 {
                    continue;
                }
                let new_x = sums[cluster].0 / counts[cluster] as f64;
                let new_y = sums[cluster].1 / counts[cluster] as f64;
                if (new_x - centroid.x).abs() > tolerance
                    || (new_y - centroid.y).abs() > tolerance
                {
                    moved = true;
                }
                centroid.x = new_x;
                centroid.y = new_y;
            }

            if !moved {
                logs.push(format!("Converged at iteration {}", iteration + 1));
                break;
            }
        }

        debug!(
            "k-means: {} points into {} clusters, {} iteration budget",
            points.len(),
            k,
            self.config.iterations
        );

        let clusters = points
            .iter()
            .zip(assignments.iter())
            .map(|(point, &cluster)| Point {
                x: point.x,
                y: point.y,
                label: Some(cluster),
            })
            .collect();

        Ok(TrainingResult::KMeans {
            centroids,
            clusters,
            logs,
        })
    }

    fn validate(&self) -> ModelResult<()> {
        if self.config.k == 0 {
            return Err(ModelError::invalid("k", "must be at least 1, got 0"));
        }
        if self.config.iterations == 0 {
            return Err(ModelError::invalid(
                "iterations",
                "must be at least 1, got 0",
            ));
        }
        let tolerance = self.config.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ModelError::invalid(
                "tolerance",
                format!("must be non-negative and finite, got {}", tolerance),
            ));
        }
        Ok(())
    }
}

/// Index of the nearest centroid; distance ties go to the lowest index.
fn nearest_centroid(centroids: &[Centroid], point: &Point) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let dist = euclidean_distance(point.x, point.y, centroid.x, centroid.y);
        if dist < best_dist {
            best_dist = dist;
            best = index;
        }
    }
    best
}

fn bounding_box(points: &[Point]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (min_x, max_x, min_y, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Three tight four-point blobs with means (10,10), (50,90) and (90,10).
    fn three_blobs() -> Vec<Point> {
        vec![
            Point::new(9.0, 10.0),
            Point::new(11.0, 10.0),
            Point::new(10.0, 9.0),
            Point::new(10.0, 11.0),
            Point::new(49.0, 90.0),
            Point::new(51.0, 90.0),
            Point::new(50.0, 89.0),
            Point::new(50.0, 91.0),
            Point::new(89.0, 10.0),
            Point::new(91.0, 10.0),
            Point::new(90.0, 9.0),
            Point::new(90.0, 11.0),
        ]
    }

    const BLOB_MEANS: [(f64, f64); 3] = [(10.0, 10.0), (50.0, 90.0), (90.0, 10.0)];

    fn parts_of(result: TrainingResult) -> (Vec<Centroid>, Vec<Point>, Vec<String>) {
        match result {
            TrainingResult::KMeans {
                centroids,
                clusters,
                logs,
            } => (centroids, clusters, logs),
            other => panic!("expected kmeans result, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_returns_defined_empty_result() {
        let clusterer = KMeansClusterer::new(KMeansConfig::default());
        let (centroids, clusters, logs) = parts_of(clusterer.cluster(&[]).unwrap());
        assert!(centroids.is_empty());
        assert!(clusters.is_empty());
        assert_eq!(logs, ["No data points!".to_string()]);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let clusterer = KMeansClusterer::new(KMeansConfig::new().with_k(0));
        assert!(matches!(
            clusterer.cluster(&three_blobs()).unwrap_err(),
            ModelError::InvalidParameter { name: "k", .. }
        ));

        let clusterer = KMeansClusterer::new(KMeansConfig::new().with_iterations(0));
        assert!(matches!(
            clusterer.cluster(&three_blobs()).unwrap_err(),
            ModelError::InvalidParameter { name: "iterations", .. }
        ));

        let clusterer = KMeansClusterer::new(KMeansConfig::new().with_tolerance(f64::NAN));
        assert!(matches!(
            clusterer.cluster(&three_blobs()).unwrap_err(),
            ModelError::InvalidParameter { name: "tolerance", .. }
        ));
    }

    #[test]
    fn test_output_shape_and_label_range() {
        let points = three_blobs();
        let clusterer = KMeansClusterer::new(KMeansConfig::default());
        let (centroids, clusters, _) = parts_of(
            clusterer
                .cluster_with_rng(&points, &mut StdRng::seed_from_u64(11))
                .unwrap(),
        );

        assert_eq!(centroids.len(), 3);
        for (index, centroid) in centroids.iter().enumerate() {
            assert_eq!(centroid.label, index);
        }
        assert_eq!(clusters.len(), points.len());
        for (original, clustered) in points.iter().zip(clusters.iter()) {
            assert_eq!((clustered.x, clustered.y), (original.x, original.y));
            assert!(clustered.class_label() < 3);
        }
    }

    #[test]
    fn test_seeded_clustering_is_deterministic() {
        let points = three_blobs();
        let clusterer = KMeansClusterer::new(KMeansConfig::default());
        let result_a = clusterer
            .cluster_with_rng(&points, &mut StdRng::seed_from_u64(5))
            .unwrap();
        let result_b = clusterer
            .cluster_with_rng(&points, &mut StdRng::seed_from_u64(5))
            .unwrap();
        assert_eq!(result_a, result_b);
    }

    #[test]
    fn test_separated_blobs_converge_to_blob_means() {
        // Three initializations with controlled spread, each seeding one
        // centroid into each blob's basin. StepRng draws are v / 2^64, so the
        // initial positions are known exactly.
        let rng_configs = [
            StepRng::new(1u64 << 58, 3u64 << 61),
            StepRng::new(1u64 << 63, 5u64 << 60),
            StepRng::new(1u64 << 61, 7u64 << 60),
        ];
        let points = three_blobs();
        let clusterer = KMeansClusterer::new(KMeansConfig::new().with_k(3).with_iterations(50));

        for mut rng in rng_configs {
            let (centroids, clusters, logs) =
                parts_of(clusterer.cluster_with_rng(&points, &mut rng).unwrap());

            assert!(
                logs.iter().any(|line| line == "Converged at iteration 2"),
                "expected early convergence, logs: {:?}",
                logs
            );
            // Each blob mean is hit by exactly one centroid.
            for (mx, my) in BLOB_MEANS {
                let hits = centroids
                    .iter()
                    .filter(|c| euclidean_distance(c.x, c.y, mx, my) < 1e-9)
                    .count();
                assert_eq!(hits, 1, "blob mean ({}, {}) not matched", mx, my);
            }
            // Every point ended up assigned to the centroid sitting on its
            // own blob.
            for point in &clusters {
                let centroid = &centroids[point.class_label()];
                assert!(euclidean_distance(point.x, point.y, centroid.x, centroid.y) < 2.0);
            }
        }
    }

    #[test]
    fn test_surplus_centroid_freezes_at_initial_position() {
        // Constant draws of 0.25 put all three centroids at (30, 30) inside
        // the (10,10)-(90,90) bounding box. Two centroids capture one point
        // each; the third never attracts anything and must not move.
        let points = vec![Point::new(10.0, 10.0), Point::new(90.0, 90.0)];
        let clusterer = KMeansClusterer::new(KMeansConfig::new().with_k(3).with_iterations(50));
        let (centroids, clusters, logs) = parts_of(
            clusterer
                .cluster_with_rng(&points, &mut StepRng::new(1u64 << 62, 0))
                .unwrap(),
        );

        assert_eq!((centroids[2].x, centroids[2].y), (30.0, 30.0));
        assert!(logs.iter().any(|line| line.starts_with("Converged")));
        assert!(clusters.iter().all(|p| p.class_label() < 2));
    }

    #[test]
    fn test_identical_points_are_absorbed_not_an_error() {
        let points = vec![Point::new(42.0, 17.0); 5];
        let clusterer = KMeansClusterer::new(KMeansConfig::default());
        let (centroids, clusters, logs) = parts_of(
            clusterer
                .cluster_with_rng(&points, &mut StdRng::seed_from_u64(3))
                .unwrap(),
        );

        for centroid in &centroids {
            assert_eq!((centroid.x, centroid.y), (42.0, 17.0));
        }
        // Everything collapses into the first cluster.
        assert!(clusters.iter().all(|p| p.class_label() == 0));
        assert!(logs.iter().any(|line| line.contains("every centroid initializes there")));
        assert!(logs.iter().any(|line| line == "Converged at iteration 1"));
    }
}
