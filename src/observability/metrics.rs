//! Prometheus metrics for the prediction service.
use std::sync::Arc;
use std::time::Duration;

use prometheus::{
    Encoder, Histogram, IntCounter, IntCounterVec, Registry, TextEncoder,
    register_histogram_with_registry, register_int_counter_vec_with_registry,
    register_int_counter_with_registry,
};
use tracing::warn;

use crate::classification::decision::Label;

#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    pub predictions_total: IntCounterVec,
    pub prediction_failures: IntCounter,
    pub prediction_duration: Histogram,
}

impl Metrics {
    /// Creates the collectors in a registry owned by this instance.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Arc::new(Registry::new());
        Ok(Self {
            predictions_total: register_int_counter_vec_with_registry!(
                "news_predictions_total",
                "Total number of classified texts by label",
                &["label"],
                registry
            )?,
            prediction_failures: register_int_counter_with_registry!(
                "news_prediction_failures_total",
                "Total number of classification requests that failed",
                registry
            )?,
            prediction_duration: register_histogram_with_registry!(
                "news_prediction_duration_seconds",
                "Time spent normalizing, vectorizing and scoring one text",
                vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 1.0],
                registry
            )?,
            registry,
        })
    }

    pub fn record_prediction(&self, label: Label, elapsed: Duration) {
        self.predictions_total
            .with_label_values(&[label.as_str()])
            .inc();
        self.prediction_duration.observe(elapsed.as_secs_f64());
    }

    pub fn record_failure(&self) {
        self.prediction_failures.inc();
    }

    /// Renders every collector in the Prometheus text format.
    #[must_use]
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            warn!("Failed to encode metrics: {e}");
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
