//! Binary L2-regularised logistic regression over sparse TF-IDF rows.
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::NewsClass;
use super::optimizer::{LbfgsParams, minimize};
use super::vectorizer::FeatureVector;
use crate::error::DetectorError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    /// Inverse regularisation strength.
    pub c: f64,
    pub max_iter: usize,
    /// Gradient tolerance on the sample-averaged objective.
    pub tol: f64,
    /// L-BFGS history length.
    pub memory: usize,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-4,
            memory: 10,
        }
    }
}

/// Class probabilities; the two components always sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    real: f64,
    fake: f64,
}

impl Prediction {
    #[must_use]
    pub fn from_real_probability(real: f64) -> Self {
        let real = real.clamp(0.0, 1.0);
        Self {
            real,
            fake: 1.0 - real,
        }
    }

    #[must_use]
    pub fn real(&self) -> f64 {
        self.real
    }

    #[must_use]
    pub fn fake(&self) -> f64 {
        self.fake
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    pub iterations: usize,
    pub converged: bool,
    pub objective: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    weights: Vec<f64>,
    intercept: f64,
}

impl ModelArtifact {
    fn validate(&self) -> Result<(), String> {
        if let Some(index) = self.weights.iter().position(|w| !w.is_finite()) {
            return Err(format!("weight {index} is not finite"));
        }
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelArtifact", into = "ModelArtifact")]
pub struct LogisticRegression {
    weights: Vec<f64>,
    intercept: f64,
}

impl TryFrom<ModelArtifact> for LogisticRegression {
    type Error = String;

    fn try_from(artifact: ModelArtifact) -> Result<Self, Self::Error> {
        artifact.validate()?;
        Ok(Self {
            weights: artifact.weights,
            intercept: artifact.intercept,
        })
    }
}

impl From<LogisticRegression> for ModelArtifact {
    fn from(model: LogisticRegression) -> Self {
        Self {
            weights: model.weights,
            intercept: model.intercept,
        }
    }
}

impl LogisticRegression {
    /// Fits weights and intercept with L-BFGS.
    ///
    /// The objective is `Σ log(1 + exp(-y·z)) + ‖w‖²/(2C)` divided by the
    /// sample count; the intercept is not penalised.
    pub fn fit(
        rows: &[FeatureVector],
        targets: &[NewsClass],
        params: &LogisticParams,
    ) -> Result<(Self, FitSummary), DetectorError> {
        let Some(first) = rows.first() else {
            return Err(DetectorError::EmptyCorpus);
        };
        if rows.len() != targets.len() {
            return Err(DetectorError::DimensionMismatch {
                expected: rows.len(),
                actual: targets.len(),
            });
        }
        let dim = first.dim();
        if let Some(row) = rows.iter().find(|row| row.dim() != dim) {
            return Err(DetectorError::DimensionMismatch {
                expected: dim,
                actual: row.dim(),
            });
        }
        let has_real = targets.contains(&NewsClass::Real);
        let has_fake = targets.contains(&NewsClass::Fake);
        match (has_real, has_fake) {
            (true, false) => return Err(DetectorError::SingleClass(NewsClass::Real)),
            (false, true) => return Err(DetectorError::SingleClass(NewsClass::Fake)),
            _ => {}
        }

        let signs: Vec<f64> = targets.iter().map(|class| class.sign()).collect();
        #[allow(clippy::cast_precision_loss)]
        let n = rows.len() as f64;
        let l2 = 1.0 / (params.c * n);

        let objective = |theta: &[f64], grad: &mut [f64]| {
            let (weights, intercept) = theta.split_at(dim);
            let intercept = intercept[0];
            let (loss, data_grad, intercept_grad) = rows
                .par_iter()
                .zip(signs.par_iter())
                .fold(
                    || (0.0, vec![0.0; dim], 0.0),
                    |(mut loss, mut acc, mut acc_b), (row, &y)| {
                        let z = margin(weights, intercept, row);
                        loss += softplus(-y * z);
                        let coef = -y * sigmoid(-y * z);
                        for (index, value) in row.iter() {
                            acc[index] += coef * value;
                        }
                        acc_b += coef;
                        (loss, acc, acc_b)
                    },
                )
                .reduce(
                    || (0.0, vec![0.0; dim], 0.0),
                    |(la, mut ga, ba), (lb, gb, bb)| {
                        for (a, b) in ga.iter_mut().zip(gb) {
                            *a += b;
                        }
                        (la + lb, ga, ba + bb)
                    },
                );

            let (grad_w, grad_b) = grad.split_at_mut(dim);
            let mut penalty = 0.0;
            for ((g, acc), w) in grad_w.iter_mut().zip(&data_grad).zip(weights) {
                *g = acc / n + l2 * w;
                penalty += w * w;
            }
            grad_b[0] = intercept_grad / n;
            loss / n + 0.5 * l2 * penalty
        };

        let lbfgs = LbfgsParams {
            memory: params.memory,
            max_iter: params.max_iter,
            gradient_tol: params.tol,
            ..LbfgsParams::default()
        };
        let minimum = minimize(objective, vec![0.0; dim + 1], &lbfgs);
        if minimum.converged {
            debug!(
                iterations = minimum.iterations,
                objective = minimum.value,
                "logistic regression converged"
            );
        } else {
            warn!(
                iterations = minimum.iterations,
                max_iter = params.max_iter,
                "logistic regression stopped before convergence"
            );
        }

        let summary = FitSummary {
            iterations: minimum.iterations,
            converged: minimum.converged,
            objective: minimum.value,
        };
        let mut weights = minimum.point;
        let intercept = weights.pop().unwrap_or_default();
        Ok((Self { weights, intercept }, summary))
    }

    pub fn decision_function(&self, row: &FeatureVector) -> Result<f64, DetectorError> {
        if row.dim() != self.weights.len() {
            return Err(DetectorError::DimensionMismatch {
                expected: self.weights.len(),
                actual: row.dim(),
            });
        }
        Ok(margin(&self.weights, self.intercept, row))
    }

    pub fn predict_proba(&self, row: &FeatureVector) -> Result<Prediction, DetectorError> {
        let z = self.decision_function(row)?;
        Ok(Prediction::from_real_probability(sigmoid(z)))
    }

    /// Hard class at the 0.5 boundary, used for evaluation.
    pub fn predict_class(&self, row: &FeatureVector) -> Result<NewsClass, DetectorError> {
        let z = self.decision_function(row)?;
        Ok(if z >= 0.0 {
            NewsClass::Real
        } else {
            NewsClass::Fake
        })
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

fn margin(weights: &[f64], intercept: f64, row: &FeatureVector) -> f64 {
    intercept
        + row
            .iter()
            .map(|(index, value)| weights[index] * value)
            .sum::<f64>()
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + e^t)` without overflow.
fn softplus(t: f64) -> f64 {
    if t > 0.0 {
        t + (-t).exp().ln_1p()
    } else {
        t.exp().ln_1p()
    }
}
