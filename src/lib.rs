//! An interactive, in-memory model sandbox over 2D labeled points.
//!
//! Callers collect [`Point`]s (typically via [`CanvasMapping`] from canvas
//! clicks), pick a model and hyperparameters, and run one of three classic
//! learning algorithms to completion:
//!
//! - [`LogisticRegressionTrainer`] — full-batch gradient descent over the
//!   linear model `w1*x + w2*y + b`, yielding a linear decision boundary;
//! - [`KnnClassifier`] — k-nearest-neighbors majority voting over a sampling
//!   grid, yielding a classified decision-boundary field;
//! - [`KMeansClusterer`] — Lloyd's algorithm, yielding converged centroids
//!   plus per-point cluster assignments.
//!
//! Each run is synchronous, one-shot and side-effect free: inputs are
//! borrowed immutably, the returned [`TrainingResult`] is a fresh value, and
//! nothing is shared between invocations. Randomized routines accept an
//! injected [`rand::Rng`] for reproducibility; the plain entry points use
//! ambient thread-local randomness.

use std::fmt;

use rand::Rng;

pub mod canvas;
pub mod common_types;
pub mod error;
pub mod kmeans;
pub mod knn;
pub mod logistic;
pub mod math;
#[cfg(feature = "python")]
pub mod python;

pub use canvas::CanvasMapping;
pub use common_types::{Centroid, GridPoint, Point, TrainingResult, Weights};
pub use error::{ModelError, ModelResult};
pub use kmeans::{KMeansClusterer, KMeansConfig};
pub use knn::{KnnClassifier, KnnConfig};
pub use logistic::{LogisticConfig, LogisticRegressionTrainer};

/// Which of the three sandbox models to run. The variants are mutually
/// exclusive and share no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ModelType {
    Logistic,
    Knn,
    KMeans,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Logistic => "logistic",
            ModelType::Knn => "knn",
            ModelType::KMeans => "kmeans",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model selection bundled with its hyperparameters — the single value a
/// front end needs to hand over alongside the point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelConfig {
    Logistic(LogisticConfig),
    Knn(KnnConfig),
    KMeans(KMeansConfig),
}

impl ModelConfig {
    pub fn model_type(&self) -> ModelType {
        match self {
            ModelConfig::Logistic(_) => ModelType::Logistic,
            ModelConfig::Knn(_) => ModelType::Knn,
            ModelConfig::KMeans(_) => ModelType::KMeans,
        }
    }

    /// Runs the selected model against `points` with ambient randomness.
    pub fn run(&self, points: &[Point]) -> ModelResult<TrainingResult> {
        match self {
            ModelConfig::Logistic(config) => {
                LogisticRegressionTrainer::new(*config).train(points)
            }
            ModelConfig::Knn(config) => KnnClassifier::new(*config).classify(points),
            ModelConfig::KMeans(config) => KMeansClusterer::new(*config).cluster(points),
        }
    }

    /// Runs the selected model with caller-supplied randomness. The k-NN
    /// variant is deterministic and never touches the RNG.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        rng: &mut R,
    ) -> ModelResult<TrainingResult> {
        match self {
            ModelConfig::Logistic(config) => {
                LogisticRegressionTrainer::new(*config).train_with_rng(points, rng)
            }
            ModelConfig::Knn(config) => KnnClassifier::new(*config).classify(points),
            ModelConfig::KMeans(config) => {
                KMeansClusterer::new(*config).cluster_with_rng(points, rng)
            }
        }
    }
}
