mod router;
pub mod server;
mod state;

pub use router::build_router;
pub use state::AppState;

use tracing::info;

use crate::classification::{NewsClassifier, Verdict};
use crate::config::{PredictConfig, ServeConfig};
use crate::error::DetectorError;
use crate::store::FileModelStore;

/// Loads the artifacts and serves HTTP until a shutdown signal arrives.
pub async fn run_server(config: &ServeConfig) -> Result<(), DetectorError> {
    config.validate()?;
    let store = FileModelStore::new(&config.model_dir);
    let state = AppState::from_store(&store)?;
    info!(
        model_dir = %config.model_dir.display(),
        features = state.classifier().vectorizer().num_features(),
        "Loaded model artifacts"
    );

    let app = build_router(state);
    server::serve(app, &config.bind_address()).await
}

/// Classifies one text with the artifacts under `config.model_dir`.
pub fn run_predict(config: &PredictConfig, text: &str) -> Result<Verdict, DetectorError> {
    let store = FileModelStore::new(&config.model_dir);
    let classifier = NewsClassifier::from_store(&store)?;
    classifier.classify(text)
}
