//! Batch-gradient-descent logistic regression over the 2-feature linear model
//! `z = w1*x + w2*y + b`.

use log::debug;
use rand::Rng;

use crate::error::{ModelError, ModelResult};
use crate::math::sigmoid;
use crate::{Point, TrainingResult, Weights};

/// Hyperparameters for [`LogisticRegressionTrainer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticConfig {
    /// Gradient-descent step size. Must be positive and finite.
    pub learning_rate: f64,
    /// Number of full-batch passes. The trainer always runs all of them;
    /// there is no convergence check.
    pub epochs: usize,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        LogisticConfig {
            learning_rate: 0.1,
            epochs: 100,
        }
    }
}

impl LogisticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }
}

/// Fits a linear decision boundary to labeled points by full-batch gradient
/// descent. Unlabeled points count as class 0 (see [`Point::class_label`]).
#[derive(Debug, Clone, Default)]
pub struct LogisticRegressionTrainer {
    config: LogisticConfig,
}

impl LogisticRegressionTrainer {
    pub fn new(config: LogisticConfig) -> Self {
        LogisticRegressionTrainer { config }
    }

    /// Trains with ambient randomness for the weight initialization.
    pub fn train(&self, points: &[Point]) -> ModelResult<TrainingResult> {
        self.train_with_rng(points, &mut rand::thread_rng())
    }

    /// Trains with caller-supplied randomness. Weights initialize uniformly in
    /// `[-0.5, 0.5)`; given the same RNG state and inputs, two runs produce
    /// bit-identical weights.
    pub fn train_with_rng<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        rng: &mut R,
    ) -> ModelResult<TrainingResult> {
        self.validate(points)?;

        let mut w1 = rng.gen::<f64>() - 0.5;
        let mut w2 = rng.gen::<f64>() - 0.5;
        let mut b = rng.gen::<f64>() - 0.5;

        let lr = self.config.learning_rate;
        let m = points.len() as f64;

        for _ in 0..self.config.epochs {
            let mut dw1 = 0.0;
            let mut dw2 = 0.0;
            let mut db = 0.0;

            for p in points {
                let z = w1 * p.x + w2 * p.y + b;
                let err = sigmoid(z) - p.class_label() as f64;
                dw1 += err * p.x;
                dw2 += err * p.y;
                db += err;
            }

            w1 -= lr * dw1 / m;
            w2 -= lr * dw2 / m;
            b -= lr * db / m;
        }

        debug!(
            "logistic regression: {} points, {} epochs, lr {}",
            points.len(),
            self.config.epochs,
            lr
        );

        let logs = vec![format!(
            "Final weights: w1={:.4}, w2={:.4}, b={:.4}",
            w1, w2, b
        )];
        Ok(TrainingResult::Logistic {
            weights: Weights { w1, w2, b },
            logs,
        })
    }

    fn validate(&self, points: &[Point]) -> ModelResult<()> {
        let lr = self.config.learning_rate;
        if !lr.is_finite() || lr <= 0.0 {
            return Err(ModelError::invalid(
                "learning_rate",
                format!("must be positive and finite, got {}", lr),
            ));
        }
        if self.config.epochs == 0 {
            return Err(ModelError::invalid("epochs", "must be at least 1, got 0"));
        }
        if points.is_empty() {
            return Err(ModelError::InsufficientData(
                "cannot fit a decision boundary to zero points".to_string(),
            ));
        }
        Ok(())
    }
}
