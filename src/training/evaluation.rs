//! Held-out evaluation metrics.
use serde::{Deserialize, Serialize};

use crate::classification::NewsClass;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Confusion counts with `Real` as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_real: usize,
    pub false_real: usize,
    pub true_fake: usize,
    pub false_fake: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub real: ClassMetrics,
    pub fake: ClassMetrics,
    pub confusion: ConfusionMatrix,
}

impl EvaluationReport {
    /// Pairs are compared position by position; extra entries in the longer
    /// slice are ignored.
    #[must_use]
    pub fn from_predictions(expected: &[NewsClass], predicted: &[NewsClass]) -> Self {
        let mut confusion = ConfusionMatrix::default();
        for (&truth, &guess) in expected.iter().zip(predicted) {
            match (truth, guess) {
                (NewsClass::Real, NewsClass::Real) => confusion.true_real += 1,
                (NewsClass::Fake, NewsClass::Real) => confusion.false_real += 1,
                (NewsClass::Fake, NewsClass::Fake) => confusion.true_fake += 1,
                (NewsClass::Real, NewsClass::Fake) => confusion.false_fake += 1,
            }
        }

        let total = confusion.true_real
            + confusion.false_real
            + confusion.true_fake
            + confusion.false_fake;
        Self {
            accuracy: ratio(confusion.true_real + confusion.true_fake, total),
            real: class_metrics(
                confusion.true_real,
                confusion.false_real,
                confusion.false_fake,
            ),
            fake: class_metrics(
                confusion.true_fake,
                confusion.false_fake,
                confusion.false_real,
            ),
            confusion,
        }
    }
}

fn class_metrics(true_pos: usize, false_pos: usize, false_neg: usize) -> ClassMetrics {
    let precision = ratio(true_pos, true_pos + false_pos);
    let recall = ratio(true_pos, true_pos + false_neg);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    ClassMetrics {
        precision,
        recall,
        f1,
        support: true_pos + false_neg,
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NewsClass::{Fake, Real};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn computes_per_class_scores() {
        let expected = [Real, Real, Real, Fake, Fake];
        let predicted = [Real, Real, Fake, Fake, Real];
        let report = EvaluationReport::from_predictions(&expected, &predicted);

        assert!(approx(report.accuracy, 0.6));
        assert_eq!(
            report.confusion,
            ConfusionMatrix {
                true_real: 2,
                false_real: 1,
                true_fake: 1,
                false_fake: 1,
            }
        );
        assert!(approx(report.real.precision, 2.0 / 3.0));
        assert!(approx(report.real.recall, 2.0 / 3.0));
        assert_eq!(report.real.support, 3);
        assert!(approx(report.fake.precision, 0.5));
        assert!(approx(report.fake.recall, 0.5));
        assert!(approx(report.fake.f1, 0.5));
        assert_eq!(report.fake.support, 2);
    }

    #[test]
    fn perfect_predictions() {
        let labels = [Real, Fake, Fake];
        let report = EvaluationReport::from_predictions(&labels, &labels);
        assert!(approx(report.accuracy, 1.0));
        assert!(approx(report.real.f1, 1.0));
        assert!(approx(report.fake.f1, 1.0));
    }

    #[test]
    fn empty_input_scores_zero() {
        let report = EvaluationReport::from_predictions(&[], &[]);
        assert!(approx(report.accuracy, 0.0));
        assert!(approx(report.real.f1, 0.0));
        assert_eq!(report.confusion, ConfusionMatrix::default());
    }
}
