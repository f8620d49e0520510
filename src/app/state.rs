use std::sync::Arc;

use crate::classification::NewsClassifier;
use crate::error::DetectorError;
use crate::observability::Metrics;
use crate::store::ModelStore;

/// Shared read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    classifier: Arc<NewsClassifier>,
    metrics: Arc<Metrics>,
}

impl AppState {
    #[must_use]
    pub fn new(classifier: NewsClassifier, metrics: Metrics) -> Self {
        Self {
            classifier: Arc::new(classifier),
            metrics: Arc::new(metrics),
        }
    }

    /// Loads the fitted artifacts once; any failure here is fatal for the server.
    pub fn from_store(store: &dyn ModelStore) -> Result<Self, DetectorError> {
        let classifier = NewsClassifier::from_store(store)?;
        Ok(Self::new(classifier, Metrics::new()?))
    }

    #[must_use]
    pub fn classifier(&self) -> &NewsClassifier {
        &self.classifier
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
