//! This module contains the common data structures shared by the sandbox algorithms.

use crate::ModelType;

/// A single user-authored data point in the [0,100]x[0,100] coordinate space.
///
/// `label` is `Some(0)` or `Some(1)` for classification input and `None` for
/// pre-clustering input. K-means output reuses the field to carry the assigned
/// cluster index.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub label: Option<usize>,
}

impl Point {
    /// An unlabeled point, as produced by a canvas click in clustering mode.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y, label: None }
    }

    pub fn labeled(x: f64, y: f64, label: usize) -> Self {
        Point {
            x,
            y,
            label: Some(label),
        }
    }

    /// The class label this point contributes to a classifier.
    ///
    /// An unlabeled point counts as class 0. This is a deliberate convention,
    /// not an accident: the interactive canvas always labels classification
    /// points, so `None` only ever reaches a classifier through caller error,
    /// and mapping it to the default class keeps the routines total.
    pub fn class_label(&self) -> usize {
        self.label.unwrap_or(0)
    }
}

/// A k-means centroid. `label` is the cluster index in `[0, k)` and doubles as
/// the cluster identifier across iterations and in the rendered output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    pub label: usize,
}

/// One classified cell of the k-NN sampling grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
    pub label: usize,
}

/// Parameters of the logistic decision boundary `w1*x + w2*y + b = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weights {
    pub w1: f64,
    pub w2: f64,
    pub b: f64,
}

/// The artifact of one sandbox run, tagged by the model that produced it.
///
/// A result is created fresh per invocation and never mutated after return.
/// Every variant carries `logs`, the human-readable trace of key events
/// (initialization, convergence, final parameters) shown in the UI console.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainingResult {
    Logistic {
        weights: Weights,
        logs: Vec<String>,
    },
    Knn {
        decision_boundary: Vec<GridPoint>,
        logs: Vec<String>,
    },
    KMeans {
        centroids: Vec<Centroid>,
        /// The input points, re-labeled with their assigned cluster index.
        clusters: Vec<Point>,
        logs: Vec<String>,
    },
}

impl TrainingResult {
    pub fn model_type(&self) -> ModelType {
        match self {
            TrainingResult::Logistic { .. } => ModelType::Logistic,
            TrainingResult::Knn { .. } => ModelType::Knn,
            TrainingResult::KMeans { .. } => ModelType::KMeans,
        }
    }

    pub fn logs(&self) -> &[String] {
        match self {
            TrainingResult::Logistic { logs, .. }
            | TrainingResult::Knn { logs, .. }
            | TrainingResult::KMeans { logs, .. } => logs,
        }
    }
}
