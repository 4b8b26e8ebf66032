//! K-nearest-neighbors classification over a sampling grid.
//!
//! Rather than predicting single query points, the classifier sweeps an
//! inclusive `(grid_size + 1)^2` grid across the coordinate ranges and
//! majority-votes each cell, producing the dense field the renderer uses as a
//! background-fill approximation of the decision boundary.

use std::collections::BTreeMap;

use log::debug;
use ordered_float::OrderedFloat;

use crate::error::{ModelError, ModelResult};
use crate::math::euclidean_distance;
use crate::{GridPoint, Point, TrainingResult};

/// Hyperparameters for [`KnnClassifier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnnConfig {
    /// Number of neighbors per vote. Values larger than the training set are
    /// clamped to its size at classification time.
    pub k: usize,
    /// Grid resolution; the sampled grid has `grid_size + 1` cells per axis,
    /// inclusive of both range endpoints.
    pub grid_size: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Default for KnnConfig {
    fn default() -> Self {
        KnnConfig {
            k: 3,
            grid_size: 20,
            x_range: (0.0, 100.0),
            y_range: (0.0, 100.0),
        }
    }
}

impl KnnConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = (min, max);
        self
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = (min, max);
        self
    }
}

/// Brute-force k-NN over the training points, evaluated on every grid cell.
///
/// Fully deterministic: equidistant neighbors keep their input order (stable
/// sort), and vote ties between labels break to the lowest label.
#[derive(Debug, Clone, Default)]
pub struct KnnClassifier {
    config: KnnConfig,
}

impl KnnClassifier {
    pub fn new(config: KnnConfig) -> Self {
        KnnClassifier { config }
    }

    pub fn classify(&self, train_points: &[Point]) -> ModelResult<TrainingResult> {
        self.validate(train_points)?;

        let k = self.config.k.min(train_points.len());
        let mut logs = vec![format!("Running KNN with k={}...", k)];
        if k < self.config.k {
            logs.push(format!(
                "k={} exceeds the {} training points; clamped to {}",
                self.config.k,
                train_points.len(),
                k
            ));
        }

        let g = self.config.grid_size;
        let (x0, x1) = self.config.x_range;
        let (y0, y1) = self.config.y_range;
        let x_step = (x1 - x0) / g as f64;
        let y_step = (y1 - y0) / g as f64;

        debug!(
            "knn: {} training points, k {}, {}x{} grid",
            train_points.len(),
            k,
            g + 1,
            g + 1
        );

        let mut decision_boundary = Vec::with_capacity((g + 1) * (g + 1));
        for i in 0..=g {
            let x = x0 + i as f64 * x_step;
            for j in 0..=g {
                let y = y0 + j as f64 * y_step;
                let label = Self::classify_cell(train_points, k, x, y);
                decision_boundary.push(GridPoint { x, y, label });
            }
        }

        Ok(TrainingResult::Knn {
            decision_boundary,
            logs,
        })
    }

    fn classify_cell(train_points: &[Point], k: usize, x: f64, y: f64) -> usize {
        let mut neighbors: Vec<(f64, usize)> = train_points
            .iter()
            .map(|p| (euclidean_distance(p.x, p.y, x, y), p.class_label()))
            .collect();
        // Stable sort keeps equidistant neighbors in input order.
        neighbors.sort_by_key(|&(dist, _)| OrderedFloat(dist));

        let mut votes: BTreeMap<usize, usize> = BTreeMap::new();
        for &(_, label) in neighbors.iter().take(k) {
            *votes.entry(label).or_insert(0) += 1;
        }

        // Ascending label order plus a strict comparison: a vote tie resolves
        // to the lowest label.
        let mut best_label = 0;
        let mut best_count = 0;
        for (&label, &count) in &votes {
            if count > best_count {
                best_label = label;
                best_count = count;
            }
        }
        best_label
    }

    fn validate(&self, train_points: &[Point]) -> ModelResult<()> {
        if self.config.k == 0 {
            return Err(ModelError::invalid("k", "must be at least 1, got 0"));
        }
        if self.config.grid_size == 0 {
            return Err(ModelError::invalid(
                "grid_size",
                "must be at least 1, got 0",
            ));
        }
        for (name, (min, max)) in [
            ("x_range", self.config.x_range),
            ("y_range", self.config.y_range),
        ] {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(ModelError::invalid(
                    name,
                    format!("must be a finite interval with min < max, got [{}, {}]", min, max),
                ));
            }
        }
        if train_points.is_empty() {
            return Err(ModelError::InsufficientData(
                "cannot classify a grid with zero training points".to_string(),
            ));
        }
        Ok(())
    }
}
