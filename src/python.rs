//! Python bindings for the sandbox entry points.
//!
//! Points cross the boundary as `(x, y, label)` tuples with an optional
//! label; hyperparameters are keyword arguments carrying the same defaults as
//! the Rust configs. Validation failures surface as `ValueError`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::{
    KMeansClusterer, KMeansConfig, KnnClassifier, KnnConfig, LogisticConfig,
    LogisticRegressionTrainer, ModelError, Point, TrainingResult,
};

impl From<ModelError> for PyErr {
    fn from(err: ModelError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn to_points(raw: &[(f64, f64, Option<usize>)]) -> Vec<Point> {
    raw.iter().map(|&(x, y, label)| Point { x, y, label }).collect()
}

/// The result artifact exposed to Python; getters other than the producing
/// model's return `None`.
#[pyclass(name = "TrainingResult")]
pub struct PyTrainingResult {
    inner: TrainingResult,
}

#[pymethods]
impl PyTrainingResult {
    #[getter]
    fn model_type(&self) -> &'static str {
        self.inner.model_type().as_str()
    }

    #[getter]
    fn logs(&self) -> Vec<String> {
        self.inner.logs().to_vec()
    }

    /// `(w1, w2, b)` of the logistic decision boundary.
    #[getter]
    fn weights(&self) -> Option<(f64, f64, f64)> {
        match &self.inner {
            TrainingResult::Logistic { weights, .. } => {
                Some((weights.w1, weights.w2, weights.b))
            }
            _ => None,
        }
    }

    /// Classified grid cells as `(x, y, label)` tuples.
    #[getter]
    fn decision_boundary(&self) -> Option<Vec<(f64, f64, usize)>> {
        match &self.inner {
            TrainingResult::Knn {
                decision_boundary, ..
            } => Some(
                decision_boundary
                    .iter()
                    .map(|cell| (cell.x, cell.y, cell.label))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Final centroids as `(x, y, cluster_index)` tuples.
    #[getter]
    fn centroids(&self) -> Option<Vec<(f64, f64, usize)>> {
        match &self.inner {
            TrainingResult::KMeans { centroids, .. } => Some(
                centroids
                    .iter()
                    .map(|c| (c.x, c.y, c.label))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Input points re-labeled with their assigned cluster index.
    #[getter]
    fn clusters(&self) -> Option<Vec<(f64, f64, Option<usize>)>> {
        match &self.inner {
            TrainingResult::KMeans { clusters, .. } => Some(
                clusters
                    .iter()
                    .map(|p| (p.x, p.y, p.label))
                    .collect(),
            ),
            _ => None,
        }
    }

    fn __repr__(&self) -> String {
        format!("TrainingResult(model_type='{}')", self.inner.model_type())
    }
}

#[pyfunction]
#[pyo3(signature = (points, learning_rate = 0.1, epochs = 100))]
fn train_logistic_regression(
    points: Vec<(f64, f64, Option<usize>)>,
    learning_rate: f64,
    epochs: usize,
) -> PyResult<PyTrainingResult> {
    let config = LogisticConfig::new()
        .with_learning_rate(learning_rate)
        .with_epochs(epochs);
    let inner = LogisticRegressionTrainer::new(config).train(&to_points(&points))?;
    Ok(PyTrainingResult { inner })
}

#[pyfunction]
#[pyo3(signature = (points, k = 3, grid_size = 20, x_range = (0.0, 100.0), y_range = (0.0, 100.0)))]
fn run_knn(
    points: Vec<(f64, f64, Option<usize>)>,
    k: usize,
    grid_size: usize,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> PyResult<PyTrainingResult> {
    let config = KnnConfig {
        k,
        grid_size,
        x_range,
        y_range,
    };
    let inner = KnnClassifier::new(config).classify(&to_points(&points))?;
    Ok(PyTrainingResult { inner })
}

#[pyfunction]
#[pyo3(signature = (points, k = 3, iterations = 10))]
fn run_kmeans(
    points: Vec<(f64, f64, Option<usize>)>,
    k: usize,
    iterations: usize,
) -> PyResult<PyTrainingResult> {
    let config = KMeansConfig::new().with_k(k).with_iterations(iterations);
    let inner = KMeansClusterer::new(config).cluster(&to_points(&points))?;
    Ok(PyTrainingResult { inner })
}

#[pymodule]
fn ml_playground(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(train_logistic_regression, m)?)?;
    m.add_function(wrap_pyfunction!(run_knn, m)?)?;
    m.add_function(wrap_pyfunction!(run_kmeans, m)?)?;
    m.add_class::<PyTrainingResult>()?;
    Ok(())
}
